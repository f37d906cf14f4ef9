//! Canonical per-drug results and the aggregate summary handed to the
//! presentation layer. Field names and types here are the stability
//! contract: they do not change with the raw shape the CDS service chose
//! to answer with.

use serde::{Deserialize, Serialize};

use crate::entities::severity::{self, Severity, Tier};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDrugResult {
    pub drug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_gene: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diplotype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phenotype: Option<String>,
    pub risk_label: String,
    pub severity: Severity,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    pub contraindicated: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl NormalizedDrugResult {
    pub fn score(&self) -> i32 {
        self.severity.score()
    }

    pub fn tier(&self) -> Tier {
        self.severity.tier()
    }

    /// Whether the presentation layer should compute alternative-drug
    /// suggestions for this result.
    pub fn show_alternatives(&self) -> bool {
        severity::show_alternatives(self.score())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub results: Vec<NormalizedDrugResult>,
    pub highest_severity: Severity,
    /// Count of results strictly riskier than `low`.
    pub flagged_drug_count: usize,
}

impl AnalysisSummary {
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# CDS Analysis Summary\n\n");
        out.push_str(&format!(
            "Highest severity: **{}** (tier {}) - {} of {} drug{} flagged\n\n",
            self.highest_severity,
            self.highest_severity.tier(),
            self.flagged_drug_count,
            self.results.len(),
            if self.results.len() == 1 { "" } else { "s" },
        ));

        out.push_str("| Drug | Gene | Diplotype | Phenotype | Severity | Score | Confidence | Alternatives |\n");
        out.push_str("|------|------|-----------|-----------|----------|-------|------------|--------------|\n");
        for result in &self.results {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {:.2} | {} |\n",
                result.drug,
                result.primary_gene.as_deref().unwrap_or("-"),
                result.diplotype.as_deref().unwrap_or("-"),
                result.phenotype.as_deref().unwrap_or("-"),
                result.severity,
                result.score(),
                result.confidence,
                if result.show_alternatives() { "yes" } else { "no" },
            ));
        }

        for result in &self.results {
            let Some(text) = result.recommendation_text.as_deref() else {
                continue;
            };
            out.push_str(&format!("\n## {}\n\n", result.drug));
            if result.contraindicated {
                out.push_str("**Contraindicated.**\n\n");
            }
            out.push_str(&format!("{text}\n"));
            if let Some(action) = result.action.as_deref() {
                out.push_str(&format!("\nAction: {action}\n"));
            }
            if !result.citations.is_empty() {
                out.push_str(&format!("\nCitations: {}\n", result.citations.join("; ")));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(drug: &str, severity: Severity) -> NormalizedDrugResult {
        NormalizedDrugResult {
            drug: drug.to_string(),
            primary_gene: Some("CYP2D6".to_string()),
            diplotype: Some("*1/*4".to_string()),
            phenotype: Some("Intermediate Metabolizer".to_string()),
            risk_label: "Adjust Dosage".to_string(),
            severity,
            confidence: 0.82,
            recommendation_text: Some("Reduce starting dose.".to_string()),
            action: Some("Adjust dose".to_string()),
            contraindicated: false,
            citations: vec!["PMID:1".to_string()],
            explanation: None,
        }
    }

    #[test]
    fn alternatives_follow_the_score_gate() {
        assert!(result("codeine", Severity::High).show_alternatives());
        assert!(result("codeine", Severity::Unknown).show_alternatives());
        assert!(!result("codeine", Severity::Low).show_alternatives());
        assert!(!result("codeine", Severity::None).show_alternatives());
    }

    #[test]
    fn markdown_carries_banner_and_per_drug_rows() {
        let summary = AnalysisSummary {
            results: vec![
                result("codeine", Severity::Critical),
                result("warfarin", Severity::Low),
            ],
            highest_severity: Severity::Critical,
            flagged_drug_count: 1,
        };
        let md = summary.to_markdown();
        assert!(md.contains("Highest severity: **critical** (tier high) - 1 of 2 drugs flagged"));
        assert!(!md.contains('\u{2014}'), "rendered output stays plain ASCII punctuation");
        assert!(md.contains("| codeine | CYP2D6 | *1/*4 | Intermediate Metabolizer | critical | 95 | 0.82 | yes |"));
        assert!(md.contains("| warfarin |"));
        assert!(md.contains("## codeine"));
        assert!(md.contains("Citations: PMID:1"));
    }

    #[test]
    fn markdown_marks_contraindication() {
        let mut flagged = result("abacavir", Severity::Critical);
        flagged.contraindicated = true;
        let summary = AnalysisSummary {
            results: vec![flagged],
            highest_severity: Severity::Critical,
            flagged_drug_count: 1,
        };
        assert!(summary.to_markdown().contains("**Contraindicated.**"));
    }

    #[test]
    fn serialization_omits_absent_optionals() {
        let mut sparse = result("codeine", Severity::Unknown);
        sparse.primary_gene = None;
        sparse.citations.clear();
        let json = serde_json::to_value(&sparse).expect("serialize");
        assert!(json.get("primary_gene").is_none());
        assert!(json.get("citations").is_none());
        assert_eq!(json["severity"], "unknown");
        assert_eq!(json["contraindicated"], false);
    }
}
