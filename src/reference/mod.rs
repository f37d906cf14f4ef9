//! Static gene-drug reference table.
//!
//! The authoritative many-to-many mapping between pharmacogenes and the
//! drugs they metabolize, distilled from CPIC guideline pairs. Loaded once
//! at startup as a const table; the same `(gene, drug)` pair may appear
//! more than once when several source annotations contributed it, so every
//! accessor de-duplicates on read.

use std::collections::HashSet;

mod data;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct GeneDrugAssociation {
    pub gene: &'static str,
    pub drug: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rxnorm_id: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atc_code: Option<&'static str>,
}

/// Genes associated with a drug, case-insensitive exact match on the drug
/// name, first-seen order. Unknown drugs yield an empty list; absence of
/// pharmacogenomic relevance is valid data, not an error.
pub fn genes_for_drug(drug: &str) -> Vec<&'static str> {
    let needle = drug.trim();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for row in data::ASSOCIATIONS {
        if row.drug.eq_ignore_ascii_case(needle) && seen.insert(row.gene) {
            out.push(row.gene);
        }
    }
    out
}

/// Drugs associated with a gene symbol, case-insensitive exact match,
/// first-seen order, de-duplicated.
pub fn drugs_for_gene(gene: &str) -> Vec<&'static str> {
    let needle = gene.trim();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for row in data::ASSOCIATIONS {
        if row.gene.eq_ignore_ascii_case(needle) && seen.insert(row.drug) {
            out.push(row.drug);
        }
    }
    out
}

/// Full association rows for a drug (carries RxNorm/ATC identifiers where
/// the source annotated them). De-duplicated on `(gene, drug)`.
pub fn associations_for_drug(drug: &str) -> Vec<GeneDrugAssociation> {
    let needle = drug.trim();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for row in data::ASSOCIATIONS {
        if row.drug.eq_ignore_ascii_case(needle) && seen.insert(row.gene) {
            out.push(*row);
        }
    }
    out
}

/// Substring listing for the CLI. This is a presentation convenience and
/// deliberately lives apart from the exact-match accessors above; it reads
/// the same records and cannot change what `genes_for_drug` answers.
pub fn search_drugs(fragment: &str) -> Vec<&'static str> {
    let needle = fragment.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for row in data::ASSOCIATIONS {
        if row.drug.to_ascii_lowercase().contains(&needle) && seen.insert(row.drug) {
            out.push(row.drug);
        }
    }
    out.sort_unstable();
    out
}
