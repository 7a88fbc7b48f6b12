//! Declarative scoring policy: per-signal weights and reason texts, risk
//! tier boundaries, and name-similarity thresholds. The policy is data;
//! weight changes are configuration edits, validated once at load time and
//! never re-checked during scoring.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{RiskLevel, SignalKind};

/// Weighted reason entry for one signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRule {
    pub weight: u32,
    pub reason: String,
}

impl SignalRule {
    fn new(weight: u32, reason: &str) -> Self {
        Self {
            weight,
            reason: reason.to_string(),
        }
    }
}

/// Risk tier boundaries applied to the clamped score, upper-inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBands {
    pub low_max: u32,
    pub medium_max: u32,
}

impl RiskBands {
    pub fn classify(&self, score: u32) -> RiskLevel {
        if score <= self.low_max {
            RiskLevel::Low
        } else if score <= self.medium_max {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// Similarity cut-offs for the tiered name comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NameThresholds {
    /// At or above: no signal.
    pub full_match: f64,
    /// At or above (but below `full_match`): minor discrepancy.
    pub minor: f64,
    /// Raw scores above this qualify for the substring override.
    pub substring_floor: f64,
}

/// The complete weighting policy consumed by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub duplicate_submission: SignalRule,
    pub invalid_national_id: SignalRule,
    pub invalid_tax_id: SignalRule,
    pub tampering: SignalRule,
    pub structural_anomaly: SignalRule,
    pub name_mismatch_major: SignalRule,
    pub name_mismatch_minor: SignalRule,
    pub score_cap: u32,
    pub bands: RiskBands,
    pub name_thresholds: NameThresholds,
    /// Treat tampering-detector infrastructure failure as "no evidence"
    /// instead of aborting the scoring call.
    pub tampering_fail_open: bool,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            duplicate_submission: SignalRule::new(50, "Duplicate submission detected."),
            invalid_national_id: SignalRule::new(30, "Invalid national ID checksum."),
            invalid_tax_id: SignalRule::new(30, "Invalid tax ID format."),
            tampering: SignalRule::new(40, "Potential document manipulation detected."),
            structural_anomaly: SignalRule::new(25, "Anomalies detected in document structure."),
            name_mismatch_major: SignalRule::new(
                20,
                "Name on document does not closely match user input.",
            ),
            name_mismatch_minor: SignalRule::new(10, "Minor discrepancy in name match."),
            score_cap: 100,
            bands: RiskBands {
                low_max: 30,
                medium_max: 70,
            },
            name_thresholds: NameThresholds {
                full_match: 0.9,
                minor: 0.7,
                substring_floor: 0.65,
            },
            tampering_fail_open: true,
        }
    }
}

impl ScoringPolicy {
    /// Load a policy from a JSON file. Missing fields fall back to the
    /// compiled-in defaults; the merged policy is validated before use.
    pub fn from_path(path: &Path) -> Result<Self, PolicyError> {
        let raw = fs::read_to_string(path).map_err(|source| PolicyError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let policy: Self = serde_json::from_str(&raw)?;
        policy.ensure_valid()?;
        Ok(policy)
    }

    /// Reject misconfigured weights and thresholds up front so scoring
    /// itself never has to.
    pub fn ensure_valid(&self) -> Result<(), PolicyError> {
        for kind in SignalKind::ALL {
            if self.rule(kind).weight == 0 {
                return Err(PolicyError::ZeroWeight {
                    signal: kind.name(),
                });
            }
        }

        if self.score_cap == 0
            || self.bands.low_max >= self.bands.medium_max
            || self.bands.medium_max >= self.score_cap
        {
            return Err(PolicyError::InvalidBands {
                low: self.bands.low_max,
                medium: self.bands.medium_max,
                cap: self.score_cap,
            });
        }

        let thresholds = &self.name_thresholds;
        let ordered = thresholds.substring_floor > 0.0
            && thresholds.substring_floor < thresholds.minor
            && thresholds.minor < thresholds.full_match
            && thresholds.full_match <= 1.0;
        if !ordered {
            return Err(PolicyError::InvalidNameThresholds {
                full_match: thresholds.full_match,
                minor: thresholds.minor,
                substring_floor: thresholds.substring_floor,
            });
        }

        Ok(())
    }

    /// Total lookup from signal kind to its weighted rule.
    pub fn rule(&self, kind: SignalKind) -> &SignalRule {
        match kind {
            SignalKind::DuplicateSubmission => &self.duplicate_submission,
            SignalKind::InvalidNationalId => &self.invalid_national_id,
            SignalKind::InvalidTaxId => &self.invalid_tax_id,
            SignalKind::Tampering => &self.tampering,
            SignalKind::StructuralAnomaly => &self.structural_anomaly,
            SignalKind::NameMismatchMajor => &self.name_mismatch_major,
            SignalKind::NameMismatchMinor => &self.name_mismatch_minor,
        }
    }
}

/// Configuration-time policy failures. Raised at startup, never while a
/// submission is being scored.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("unable to read scoring policy at {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("scoring policy is not valid JSON")]
    Parse(#[from] serde_json::Error),
    #[error("signal '{signal}' must carry a positive weight")]
    ZeroWeight { signal: &'static str },
    #[error("risk bands must satisfy low < medium < cap (found low={low}, medium={medium}, cap={cap})")]
    InvalidBands { low: u32, medium: u32, cap: u32 },
    #[error("name thresholds must satisfy 0 < substring_floor < minor < full_match <= 1 (found full_match={full_match}, minor={minor}, substring_floor={substring_floor})")]
    InvalidNameThresholds {
        full_match: f64,
        minor: f64,
        substring_floor: f64,
    },
}
