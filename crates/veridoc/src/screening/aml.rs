//! AML screening rules layered on top of the fraud score.
//!
//! The screen is rule-based and independent of the scoring engine: a
//! duplicate identity or a blacklisted address escalates straight to an
//! automatic flag, while a high fraud score routes to manual review.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{RiskAssessment, RiskLevel};
use super::registry::normalize_identifier;

/// Flags raised by the AML screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmlFlag {
    DuplicateIdentity,
    BlacklistedAddress,
    HighFraudRisk,
}

impl AmlFlag {
    pub const fn label(self) -> &'static str {
        match self {
            AmlFlag::DuplicateIdentity => "duplicate_identity",
            AmlFlag::BlacklistedAddress => "blacklisted_address",
            AmlFlag::HighFraudRisk => "high_fraud_risk",
        }
    }
}

/// Disposition ladder: automatic flags beat manual review beats clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmlAction {
    Clear,
    ManualReview,
    AutoFlag,
}

impl AmlAction {
    pub const fn label(self) -> &'static str {
        match self {
            AmlAction::Clear => "clear",
            AmlAction::ManualReview => "manual_review",
            AmlAction::AutoFlag => "auto_flag",
        }
    }
}

/// Screening result attached to every verification report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmlOutcome {
    pub flags: Vec<AmlFlag>,
    pub action: AmlAction,
    pub notes: Vec<String>,
}

/// Address blacklist and escalation thresholds backing the screen.
/// Patterns match as normalized substrings, so partial street fragments
/// and box designators both hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmlScreen {
    blacklisted_addresses: Vec<String>,
    manual_review_score: u32,
}

impl Default for AmlScreen {
    fn default() -> Self {
        Self {
            blacklisted_addresses: vec![
                "PO BOX".to_string(),
                "BLACKLISTED ESTATE".to_string(),
                "1234 FRAUD LANE".to_string(),
            ],
            manual_review_score: 71,
        }
    }
}

impl AmlScreen {
    pub fn new(blacklisted_addresses: Vec<String>, manual_review_score: u32) -> Self {
        Self {
            blacklisted_addresses,
            manual_review_score,
        }
    }

    /// Load the blacklist from a JSON array of address patterns; the
    /// escalation threshold keeps its default.
    pub fn from_path(path: &Path) -> Result<Self, AmlConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| AmlConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let patterns: Vec<String> = serde_json::from_str(&raw)?;
        Ok(Self {
            blacklisted_addresses: patterns,
            ..Self::default()
        })
    }

    pub fn is_address_blacklisted(&self, address: &str) -> bool {
        let normalized = normalize_identifier(address);
        if normalized.is_empty() {
            return false;
        }
        self.blacklisted_addresses.iter().any(|pattern| {
            let pattern = normalize_identifier(pattern);
            !pattern.is_empty() && normalized.contains(&pattern)
        })
    }

    /// Run the rules over one scored submission.
    pub fn screen(
        &self,
        address: Option<&str>,
        is_duplicate: bool,
        assessment: &RiskAssessment,
    ) -> AmlOutcome {
        let mut flags = Vec::new();
        let mut notes = Vec::new();

        if is_duplicate {
            flags.push(AmlFlag::DuplicateIdentity);
            notes.push("Identifier matches an existing record (duplicate).".to_string());
        }

        if address.is_some_and(|address| self.is_address_blacklisted(address)) {
            flags.push(AmlFlag::BlacklistedAddress);
            notes.push("Address matches blacklist patterns.".to_string());
        }

        if assessment.risk_level == RiskLevel::High
            || assessment.fraud_score >= self.manual_review_score
        {
            flags.push(AmlFlag::HighFraudRisk);
            notes.push(format!(
                "Risk level is High (score: {}).",
                assessment.fraud_score
            ));
        }

        let action = if flags.contains(&AmlFlag::DuplicateIdentity)
            || flags.contains(&AmlFlag::BlacklistedAddress)
        {
            AmlAction::AutoFlag
        } else if flags.contains(&AmlFlag::HighFraudRisk) {
            AmlAction::ManualReview
        } else {
            AmlAction::Clear
        };

        AmlOutcome {
            flags,
            action,
            notes,
        }
    }
}

/// Blacklist loading failures; callers typically fall back to the defaults.
#[derive(Debug, thiserror::Error)]
pub enum AmlConfigError {
    #[error("unable to read AML blacklist at {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("AML blacklist is not a JSON array of patterns")]
    Parse(#[from] serde_json::Error),
}
