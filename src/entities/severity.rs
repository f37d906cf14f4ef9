//! Severity labels and the risk scoring they map to.
//!
//! The scoring table is deliberately asymmetric about missing data:
//! `Unknown` scores the same as `Moderate`, never lower, so an
//! indeterminate genomic call can never render as reassuring as a
//! confirmed-safe one.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Minimum score at which alternative-drug suggestions are computed and
/// shown downstream. Product policy value; keep it in one place.
pub const ALTERNATIVES_SCORE_THRESHOLD: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Moderate,
    High,
    Critical,
    Unknown,
}

impl Severity {
    /// Parses a severity label from the wire. Missing or unrecognized
    /// labels become `Unknown`, never `None`; substituting "none" for
    /// missing data would be a false safety signal.
    pub fn from_label(label: Option<&str>) -> Severity {
        let Some(raw) = label.map(str::trim).filter(|v| !v.is_empty()) else {
            return Severity::Unknown;
        };
        match raw.to_ascii_lowercase().as_str() {
            "none" => Severity::None,
            "low" => Severity::Low,
            "moderate" => Severity::Moderate,
            "high" => Severity::High,
            "critical" => Severity::Critical,
            "unknown" => Severity::Unknown,
            other => {
                warn!(label = %other, "Unrecognized severity label; treating as unknown");
                Severity::Unknown
            }
        }
    }

    /// Fixed severity-to-score table. `Unknown` scores as `Moderate` so
    /// indeterminate calls stay visually distinct from confirmed-safe ones.
    pub fn score(self) -> i32 {
        match self {
            Severity::Critical => 95,
            Severity::High => 80,
            Severity::Moderate | Severity::Unknown => 50,
            Severity::Low => 20,
            Severity::None => 5,
        }
    }

    pub fn tier(self) -> Tier {
        Tier::of_score(self.score())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
            Severity::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display tier used for presentation coloring. Pure function of the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Moderate,
    High,
}

impl Tier {
    pub fn of_score(score: i32) -> Tier {
        if score >= 80 {
            Tier::High
        } else if score >= 50 {
            Tier::Moderate
        } else {
            Tier::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Moderate => "moderate",
            Tier::High => "high",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Highest severity by score across a set of per-drug results. The first
/// encountered element wins score ties, which keeps the aggregate stable
/// for equal-scoring labels such as `Moderate` and `Unknown`.
///
/// Returns `None` for an empty set; "no drugs analyzed" is not a valid
/// severity state and callers surface it as an explicit error.
pub fn max_severity<I>(severities: I) -> Option<Severity>
where
    I: IntoIterator<Item = Severity>,
{
    let mut best: Option<Severity> = None;
    for severity in severities {
        match best {
            Some(current) if severity.score() <= current.score() => {}
            _ => best = Some(severity),
        }
    }
    best
}

/// Whether alternative-drug suggestions should be computed for a result
/// with this score.
pub fn show_alternatives(score: i32) -> bool {
    score >= ALTERNATIVES_SCORE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_table_matches_policy() {
        assert_eq!(Severity::Critical.score(), 95);
        assert_eq!(Severity::High.score(), 80);
        assert_eq!(Severity::Moderate.score(), 50);
        assert_eq!(Severity::Low.score(), 20);
        assert_eq!(Severity::None.score(), 5);
        assert_eq!(Severity::Unknown.score(), 50);
    }

    #[test]
    fn unknown_never_classifies_as_low_risk() {
        for severity in [
            Severity::Moderate,
            Severity::High,
            Severity::Critical,
            Severity::Unknown,
        ] {
            assert!(severity.score() >= 50, "{severity} must not look safe");
        }
        for severity in [Severity::Low, Severity::None] {
            assert!(severity.score() < 50);
        }
    }

    #[test]
    fn tiers_split_at_50_and_80() {
        assert_eq!(Tier::of_score(95), Tier::High);
        assert_eq!(Tier::of_score(80), Tier::High);
        assert_eq!(Tier::of_score(79), Tier::Moderate);
        assert_eq!(Tier::of_score(50), Tier::Moderate);
        assert_eq!(Tier::of_score(49), Tier::Low);
        assert_eq!(Tier::of_score(5), Tier::Low);
    }

    #[test]
    fn from_label_defaults_missing_to_unknown_not_none() {
        assert_eq!(Severity::from_label(None), Severity::Unknown);
        assert_eq!(Severity::from_label(Some("")), Severity::Unknown);
        assert_eq!(Severity::from_label(Some("  ")), Severity::Unknown);
        assert_eq!(Severity::from_label(Some("borked")), Severity::Unknown);
    }

    #[test]
    fn from_label_is_case_insensitive() {
        assert_eq!(Severity::from_label(Some("HIGH")), Severity::High);
        assert_eq!(Severity::from_label(Some(" Critical ")), Severity::Critical);
        assert_eq!(Severity::from_label(Some("none")), Severity::None);
    }

    #[test]
    fn max_severity_finds_critical_anywhere() {
        let sets = [
            vec![Severity::Critical, Severity::Low, Severity::Low],
            vec![Severity::Low, Severity::Critical, Severity::Low],
            vec![Severity::Low, Severity::Low, Severity::Critical],
            vec![Severity::Critical, Severity::Critical],
        ];
        for set in sets {
            assert_eq!(max_severity(set), Some(Severity::Critical));
        }
    }

    #[test]
    fn max_severity_first_wins_score_ties() {
        assert_eq!(
            max_severity([Severity::Unknown, Severity::Moderate]),
            Some(Severity::Unknown)
        );
        assert_eq!(
            max_severity([Severity::Moderate, Severity::Unknown]),
            Some(Severity::Moderate)
        );
    }

    #[test]
    fn max_severity_empty_is_none() {
        assert_eq!(max_severity(Vec::<Severity>::new()), None);
    }

    #[test]
    fn alternatives_gate_at_threshold() {
        assert!(show_alternatives(50));
        assert!(show_alternatives(95));
        assert!(!show_alternatives(49));
        assert!(!show_alternatives(20));
        assert!(show_alternatives(Severity::Unknown.score()));
    }
}
