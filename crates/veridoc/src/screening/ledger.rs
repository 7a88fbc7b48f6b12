//! Fraud alerts and the audit trail emitted for reviewed submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aml::{AmlAction, AmlFlag};
use super::domain::{DocumentType, RiskLevel};

/// Case record handed to human reviewers when a submission needs attention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudAlert {
    pub case_id: String,
    pub risk_level: RiskLevel,
    pub reasons: Vec<String>,
    pub document_type: DocumentType,
    /// Reviewer-facing inverse of the fraud score.
    pub confidence: u32,
    pub aml_flags: Vec<AmlFlag>,
    pub aml_action: AmlAction,
    pub created_at: DateTime<Utc>,
}

/// Outbound alert hook (case-management queue, e-mail adapter, ...).
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: FraudAlert) -> Result<(), AlertError>;
    /// Most recent alerts first, for the review listing.
    fn recent(&self, limit: usize) -> Result<Vec<FraudAlert>, AlertError>;
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}

/// Audit severity recorded alongside every verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    Success,
    Warning,
    Error,
}

impl AuditStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AuditStatus::Success => "success",
            AuditStatus::Warning => "warning",
            AuditStatus::Error => "error",
        }
    }
}

/// One append-only audit trail entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub actor: String,
    pub action: String,
    pub status: AuditStatus,
    pub details: String,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only audit trail contract.
pub trait AuditSink: Send + Sync {
    fn append(&self, entry: AuditEntry) -> Result<(), AuditError>;
}

/// Audit persistence error.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}
