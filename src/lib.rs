//! Pharmacogenomic CDS result reconciliation.
//!
//! The library half of the `genedose` CLI: a static gene-drug reference
//! table, a gene-overlap interaction detector, a normalizer that folds the
//! CDS service's single-drug and polypharmacy payload shapes into one
//! canonical summary, and the severity scorer both of those feed.

pub mod cli;
pub mod entities;
pub mod error;
pub mod reference;
pub mod sources;
pub mod transform;
