//! Canonical view-model types handed to the presentation layer.

pub mod overlap;
pub mod report;
pub mod severity;

pub use overlap::{GeneOverlap, OverlapRisk, detect_overlaps};
pub use report::{AnalysisSummary, NormalizedDrugResult};
pub use severity::{Severity, Tier};
