//! Normalizes a raw CDS payload into the canonical [`AnalysisSummary`].
//!
//! Shape ambiguity has already been resolved at the wire boundary; this
//! module owns the defensive per-field extraction. The governing rule is
//! clinical: ambiguous or missing severity must never be presented as
//! equal to or safer than "low", so a missing severity becomes `Unknown`
//! and a garbage confidence becomes zero, both with a warning.

use serde_json::Value;
use tracing::warn;

use crate::entities::report::{AnalysisSummary, NormalizedDrugResult};
use crate::entities::severity::{self, Severity};
use crate::error::GeneDoseError;
use crate::sources::cds::{RawAnalysisResult, RawDrugRecord, RawOverallSummary};

/// Folds either raw shape into one summary. Result order preserves request
/// order, which is clinically meaningful.
pub fn normalize(raw: RawAnalysisResult) -> Result<AnalysisSummary, GeneDoseError> {
    let (records, service_summary) = match raw {
        RawAnalysisResult::Single(record) => (vec![record], None),
        RawAnalysisResult::Polypharmacy(record) => {
            if record.results.is_empty() {
                return Err(GeneDoseError::EmptyResultSet(
                    "polypharmacy payload carried zero results",
                ));
            }
            (record.results, record.overall_summary)
        }
    };

    let results: Vec<NormalizedDrugResult> =
        records.into_iter().map(from_drug_record).collect();
    let highest_severity = severity::max_severity(results.iter().map(|r| r.severity))
        .ok_or(GeneDoseError::EmptyResultSet("no per-drug results"))?;
    let flagged_drug_count = results
        .iter()
        .filter(|r| r.severity.score() > Severity::Low.score())
        .count();

    if let Some(summary) = service_summary {
        cross_check_service_summary(&summary, highest_severity, flagged_drug_count);
    }

    Ok(AnalysisSummary {
        results,
        highest_severity,
        flagged_drug_count,
    })
}

/// The aggregate is always recomputed locally; the service's own summary
/// is advisory, but a disagreement is worth a log line.
fn cross_check_service_summary(
    summary: &RawOverallSummary,
    highest_severity: Severity,
    flagged_drug_count: usize,
) {
    if let Some(reported) = summary.highest_severity.as_deref()
        && Severity::from_label(Some(reported)) != highest_severity
    {
        warn!(
            reported = %reported,
            computed = %highest_severity,
            "Service overall_summary disagrees with computed highest severity"
        );
    }
    if let Some(reported) = summary.drugs_flagged
        && reported as usize != flagged_drug_count
    {
        warn!(
            reported,
            computed = flagged_drug_count,
            "Service overall_summary disagrees with computed flagged count"
        );
    }
}

fn from_drug_record(record: RawDrugRecord) -> NormalizedDrugResult {
    let risk = record.risk_assessment;
    let profile = record.pharmacogenomic_profile;
    let recommendation = record.clinical_recommendation;
    let explanation = record.llm_explanation;

    let severity = Severity::from_label(risk.as_ref().and_then(|r| r.severity.as_deref()));
    let confidence = coerce_confidence(
        &record.drug,
        risk.as_ref().and_then(|r| r.confidence_score.as_ref()),
    );
    let risk_label = risk
        .as_ref()
        .and_then(|r| r.risk_label.as_deref())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("Unknown")
        .to_string();

    NormalizedDrugResult {
        drug: record.drug,
        primary_gene: clean(profile.as_ref().and_then(|p| p.primary_gene.as_deref())),
        diplotype: clean(profile.as_ref().and_then(|p| p.diplotype.as_deref())),
        phenotype: clean(profile.as_ref().and_then(|p| p.phenotype.as_deref())),
        risk_label,
        severity,
        confidence,
        recommendation_text: clean(
            recommendation
                .as_ref()
                .and_then(|r| r.recommendation_text.as_deref()),
        ),
        action: clean(recommendation.as_ref().and_then(|r| r.action.as_deref())),
        contraindicated: recommendation
            .as_ref()
            .and_then(|r| r.contraindication)
            .unwrap_or(false),
        citations: recommendation
            .and_then(|r| r.citations)
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect(),
        explanation: explanation.and_then(|e| {
            clean(e.summary.as_deref()).or_else(|| clean(e.explanation_text.as_deref()))
        }),
    }
}

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Confidence lands in [0,1] or becomes zero. A value the service sent but
/// that is non-numeric or out of range is untrustworthy, so it is floored
/// to zero rather than clamped toward a score it never earned, and logged.
fn coerce_confidence(drug: &str, value: Option<&Value>) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };
    match value.as_f64() {
        Some(number) if (0.0..=1.0).contains(&number) => number,
        Some(number) => {
            warn!(drug = %drug, value = number, "Confidence outside [0,1]; treating as 0");
            0.0
        }
        None => {
            warn!(drug = %drug, value = %value, "Non-numeric confidence; treating as 0");
            0.0
        }
    }
}
