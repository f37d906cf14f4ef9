//! Raw wire shapes to canonical view models.

pub mod report;

pub use report::normalize;
