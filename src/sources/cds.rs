//! Client for the external CDS analysis service, plus the raw wire shapes
//! it answers with.
//!
//! The service may answer a request with either a single-drug record or a
//! polypharmacy envelope wrapping many of them. That ambiguity is resolved
//! exactly once, at this boundary, into the [`RawAnalysisResult`] sum type;
//! nothing downstream probes fields to guess the shape again.

use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;

use crate::error::GeneDoseError;

const CDS_BASE: &str = "http://127.0.0.1:8000";
const CDS_BASE_ENV: &str = "GENEDOSE_CDS_BASE";
const CDS_API: &str = "CDS";

/// Upload cap enforced by the analysis service.
const MAX_VCF_BYTES: usize = 5 * 1024 * 1024;

/// One drug's worth of raw analysis output. Every nested section is
/// optional; the service omits whole objects when a pipeline stage failed,
/// and field names arrive in either the service's snake_case or the
/// dashboard's camelCase.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawDrugRecord {
    pub drug: String,
    #[serde(default, alias = "riskAssessment")]
    pub risk_assessment: Option<RawRiskAssessment>,
    #[serde(default, alias = "pharmacogenomicProfile")]
    pub pharmacogenomic_profile: Option<RawPgxProfile>,
    #[serde(default, alias = "clinicalRecommendation")]
    pub clinical_recommendation: Option<RawClinicalRecommendation>,
    #[serde(
        default,
        alias = "llmExplanation",
        alias = "llm_generated_explanation",
        alias = "llmGeneratedExplanation"
    )]
    pub llm_explanation: Option<RawExplanation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRiskAssessment {
    #[serde(default, alias = "riskLabel")]
    pub risk_label: Option<String>,
    /// Left as a raw JSON value; the service has been observed emitting
    /// non-numeric garbage here and the normalizer owns the coercion.
    #[serde(default, alias = "confidenceScore")]
    pub confidence_score: Option<Value>,
    #[serde(default)]
    pub severity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPgxProfile {
    #[serde(default, alias = "primaryGene")]
    pub primary_gene: Option<String>,
    #[serde(default)]
    pub diplotype: Option<String>,
    #[serde(default)]
    pub phenotype: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawClinicalRecommendation {
    #[serde(default, alias = "recommendationText")]
    pub recommendation_text: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default, alias = "contraindicated")]
    pub contraindication: Option<bool>,
    #[serde(default)]
    pub citations: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawExplanation {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, alias = "explanationText")]
    pub explanation_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawOverallSummary {
    #[serde(default, alias = "highestSeverity")]
    pub highest_severity: Option<String>,
    #[serde(default, alias = "drugsFlagged")]
    pub drugs_flagged: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPolypharmacyRecord {
    pub results: Vec<RawDrugRecord>,
    #[serde(default, alias = "overallSummary")]
    pub overall_summary: Option<RawOverallSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawAnalysisResult {
    Single(RawDrugRecord),
    Polypharmacy(RawPolypharmacyRecord),
}

impl RawAnalysisResult {
    /// Shape detection, done once: a `results` array wins, then a
    /// top-level `drug`. Anything else is a shape error and must surface
    /// as one; folding it into an empty summary would render as "no risk".
    pub fn from_value(value: Value) -> Result<Self, GeneDoseError> {
        if value.get("results").is_some_and(Value::is_array) {
            return serde_json::from_value(value)
                .map(RawAnalysisResult::Polypharmacy)
                .map_err(|err| {
                    GeneDoseError::Shape(format!("polypharmacy payload did not parse: {err}"))
                });
        }
        if value.get("drug").is_some() {
            return serde_json::from_value(value)
                .map(RawAnalysisResult::Single)
                .map_err(|err| {
                    GeneDoseError::Shape(format!("single-drug payload did not parse: {err}"))
                });
        }
        Err(GeneDoseError::Shape(
            "payload has neither a `results` array nor a top-level `drug`".into(),
        ))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, GeneDoseError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|err| GeneDoseError::Shape(format!("payload is not valid JSON: {err}")))?;
        Self::from_value(value)
    }
}

/// Monotonic generation counter for analysis requests. An in-flight
/// request's result is only accepted while its ticket is still the newest
/// one issued, so a stale response can never overwrite a newer summary.
#[derive(Debug, Default)]
pub struct AnalysisSequencer {
    current: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket(u64);

impl AnalysisSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for a new request, superseding all earlier ones.
    pub fn begin(&self) -> AnalysisTicket {
        AnalysisTicket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns the result only if `ticket` is still current; a superseded
    /// request's result is discarded, never merged.
    pub fn accept<T>(&self, ticket: AnalysisTicket, result: T) -> Option<T> {
        if ticket.0 == self.current.load(Ordering::SeqCst) {
            Some(result)
        } else {
            None
        }
    }
}

pub struct CdsClient {
    /// Retrying client for idempotent GETs.
    client: reqwest_middleware::ClientWithMiddleware,
    /// Plain client for the multipart upload; its body is not replayable,
    /// so the retry middleware must not see it.
    upload: reqwest::Client,
    base: Cow<'static, str>,
}

impl CdsClient {
    pub fn new() -> Result<Self, GeneDoseError> {
        Ok(Self {
            client: crate::sources::retrying_http_client()?,
            upload: crate::sources::base_http_client()?,
            base: crate::sources::env_base(CDS_BASE, CDS_BASE_ENV),
        })
    }

    /// Client against an explicit base URL, bypassing the env default.
    pub fn with_base(base: impl Into<String>) -> Result<Self, GeneDoseError> {
        Ok(Self {
            client: crate::sources::retrying_http_client()?,
            upload: crate::sources::base_http_client()?,
            base: Cow::Owned(base.into()),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_ref().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Submits a VCF and drug selection for analysis and resolves the
    /// response shape at the boundary.
    pub async fn analyze(
        &self,
        vcf_name: &str,
        vcf_bytes: Vec<u8>,
        drugs: &[String],
    ) -> Result<RawAnalysisResult, GeneDoseError> {
        if drugs.iter().all(|d| d.trim().is_empty()) {
            return Err(GeneDoseError::InvalidArgument(
                "At least one drug is required. Example: genedose analyze --vcf sample.vcf -d codeine".into(),
            ));
        }
        if vcf_bytes.is_empty() {
            return Err(GeneDoseError::InvalidArgument("VCF file is empty".into()));
        }
        if vcf_bytes.len() > MAX_VCF_BYTES {
            return Err(GeneDoseError::InvalidArgument(
                "VCF file exceeds the 5MB upload limit".into(),
            ));
        }

        let drug_list = drugs
            .iter()
            .map(|d| d.trim().to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        let form = Form::new()
            .part(
                "file",
                Part::bytes(vcf_bytes).file_name(vcf_name.to_string()),
            )
            .text("drugs", drug_list);

        let url = self.endpoint("api/cds/analyze");
        let resp = self
            .upload
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| GeneDoseError::Api {
                api: CDS_API.to_string(),
                message: format!("Request failed: {err}"),
            })?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|err| GeneDoseError::Api {
            api: CDS_API.to_string(),
            message: format!("Failed to read response body: {err}"),
        })?;
        if !status.is_success() {
            return Err(GeneDoseError::Api {
                api: CDS_API.to_string(),
                message: format!("HTTP {status}: {}", crate::sources::body_excerpt(&body)),
            });
        }

        RawAnalysisResult::from_slice(&body)
    }

    /// Connectivity probe against the service's health endpoint.
    pub async fn ping(&self) -> Result<Duration, GeneDoseError> {
        let url = self.endpoint("health");
        let start = Instant::now();
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| GeneDoseError::Api {
                api: CDS_API.to_string(),
                message: format!("Health check failed: {err}"),
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(GeneDoseError::Api {
                api: CDS_API.to_string(),
                message: format!("Health check returned HTTP {status}"),
            });
        }
        Ok(start.elapsed())
    }
}
