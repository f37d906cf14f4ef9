//! Shared-metabolic-pathway conflict detection across a selected drug set.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::reference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapRisk {
    Moderate,
    High,
}

impl OverlapRisk {
    pub fn as_str(self) -> &'static str {
        match self {
            OverlapRisk::Moderate => "moderate",
            OverlapRisk::High => "high",
        }
    }
}

impl fmt::Display for OverlapRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A gene shared by two or more selected drugs. `risk_level` is `High`
/// when more than two drugs compete for the gene, `Moderate` for exactly
/// two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneOverlap {
    pub gene: String,
    pub drugs: Vec<String>,
    pub risk_level: OverlapRisk,
}

/// Finds genes shared by at least two of the selected drugs.
///
/// Fewer than two distinct drugs short-circuits to an empty result without
/// touching the reference table; no overlap can exist for a single drug,
/// and that is part of the contract rather than an optimization. Output
/// order is the insertion order of the first-encountered gene, so repeated
/// calls over the same selection render identically.
pub fn detect_overlaps<S: AsRef<str>>(selected_drugs: &[S]) -> Vec<GeneOverlap> {
    let mut drugs: Vec<&str> = Vec::new();
    for drug in selected_drugs {
        let drug = drug.as_ref().trim();
        if drug.is_empty() {
            continue;
        }
        if !drugs.iter().any(|seen| seen.eq_ignore_ascii_case(drug)) {
            drugs.push(drug);
        }
    }
    if drugs.len() < 2 {
        return Vec::new();
    }

    let mut gene_order: Vec<&'static str> = Vec::new();
    let mut by_gene: HashMap<&'static str, Vec<String>> = HashMap::new();
    for drug in drugs {
        let genes = reference::genes_for_drug(drug);
        if genes.is_empty() {
            // Possibly a stale reference table rather than a genuinely
            // unmapped drug, so make it observable.
            warn!(drug = %drug, "Selected drug has no reference-table entry; it cannot participate in overlaps");
            continue;
        }
        for gene in genes {
            let entry = by_gene.entry(gene).or_insert_with(|| {
                gene_order.push(gene);
                Vec::new()
            });
            entry.push(drug.to_string());
        }
    }

    gene_order
        .into_iter()
        .filter_map(|gene| {
            let drugs = by_gene.remove(gene)?;
            if drugs.len() < 2 {
                return None;
            }
            let risk_level = if drugs.len() > 2 {
                OverlapRisk::High
            } else {
                OverlapRisk::Moderate
            };
            Some(GeneOverlap {
                gene: gene.to_string(),
                drugs,
                risk_level,
            })
        })
        .collect()
}

pub fn overlaps_to_markdown(overlaps: &[GeneOverlap]) -> String {
    let mut out = String::new();
    out.push_str("# Gene-Overlap Interactions\n\n");
    if overlaps.is_empty() {
        out.push_str("No shared metabolic pathways detected for this selection.\n");
        return out;
    }
    out.push_str("| Gene | Drugs | Risk |\n");
    out.push_str("|------|-------|------|\n");
    for overlap in overlaps {
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            overlap.gene,
            overlap.drugs.join(", "),
            overlap.risk_level
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_drug_yields_no_overlaps() {
        assert!(detect_overlaps(&["codeine"]).is_empty());
        assert!(detect_overlaps::<&str>(&[]).is_empty());
    }

    #[test]
    fn duplicate_selection_counts_as_one_drug() {
        assert!(detect_overlaps(&["codeine", "Codeine", " codeine "]).is_empty());
    }

    #[test]
    fn two_drugs_sharing_a_gene_is_moderate() {
        let overlaps = detect_overlaps(&["codeine", "tramadol"]);
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].gene, "CYP2D6");
        assert_eq!(overlaps[0].drugs, vec!["codeine", "tramadol"]);
        assert_eq!(overlaps[0].risk_level, OverlapRisk::Moderate);
    }

    #[test]
    fn three_drugs_sharing_a_gene_is_high() {
        let overlaps = detect_overlaps(&["codeine", "tramadol", "hydrocodone"]);
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].gene, "CYP2D6");
        assert_eq!(
            overlaps[0].drugs,
            vec!["codeine", "tramadol", "hydrocodone"]
        );
        assert_eq!(overlaps[0].risk_level, OverlapRisk::High);
    }

    #[test]
    fn unknown_drugs_participate_in_nothing() {
        let overlaps = detect_overlaps(&["codeine", "notadrug"]);
        assert!(overlaps.is_empty());

        let overlaps = detect_overlaps(&["codeine", "notadrug", "tramadol"]);
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].drugs, vec!["codeine", "tramadol"]);
    }

    #[test]
    fn multi_gene_drugs_emit_one_overlap_per_shared_gene() {
        // Carbamazepine and phenytoin share HLA-B and SCN1A.
        let overlaps = detect_overlaps(&["carbamazepine", "phenytoin"]);
        let genes: Vec<&str> = overlaps.iter().map(|o| o.gene.as_str()).collect();
        assert_eq!(genes, vec!["HLA-B", "SCN1A"]);
        assert!(
            overlaps
                .iter()
                .all(|o| o.risk_level == OverlapRisk::Moderate)
        );
    }

    #[test]
    fn order_is_first_encountered_gene_insertion_order() {
        // Warfarin contributes CYP2C9 before phenytoin is visited, so
        // CYP2C9 must precede the genes phenytoin shares with carbamazepine.
        let overlaps = detect_overlaps(&["warfarin", "phenytoin", "carbamazepine"]);
        let genes: Vec<&str> = overlaps.iter().map(|o| o.gene.as_str()).collect();
        assert_eq!(genes, vec!["CYP2C9", "HLA-B", "SCN1A"]);
    }

    #[test]
    fn detection_is_deterministic_across_calls() {
        let selection = ["warfarin", "phenytoin", "carbamazepine", "codeine"];
        assert_eq!(detect_overlaps(&selection), detect_overlaps(&selection));
    }

    #[test]
    fn markdown_renders_empty_and_populated_states() {
        let md = overlaps_to_markdown(&[]);
        assert!(md.contains("No shared metabolic pathways"));

        let md = overlaps_to_markdown(&detect_overlaps(&["codeine", "tramadol"]));
        assert!(md.contains("| CYP2D6 | codeine, tramadol | moderate |"));
    }
}
