//! Verification service composing the identity registry, the aggregator,
//! the AML screen, and the review ledgers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::aggregator::RiskAggregator;
use super::aml::{AmlAction, AmlOutcome, AmlScreen};
use super::domain::{
    DocumentSubmission, DocumentType, ImageHandle, RiskAssessment, RiskLevel, StructuralFeatures,
    VerificationStatus,
};
use super::ledger::{AlertError, AlertPublisher, AuditEntry, AuditSink, AuditStatus, FraudAlert};
use super::registry::{identity_fingerprint, IdentityRegistry, RegistryError};
use super::signals::SignalError;

/// Inbound verification request carrying the caller's identity claim and
/// the fields produced by the upstream document extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub document_type: DocumentType,
    pub claimed_name: String,
    pub extracted: ExtractedFields,
    pub image: ImageHandle,
}

/// Field set produced by the external document extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub name: String,
    pub id_number: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Response envelope returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub verification_id: String,
    pub valid: bool,
    pub status: VerificationStatus,
    pub assessment: RiskAssessment,
    pub is_duplicate: bool,
    pub aml: AmlOutcome,
}

static VERIFICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static CASE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_verification_id() -> String {
    let id = VERIFICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("ver-{id:06}")
}

fn next_case_id() -> String {
    let id = CASE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("FR-{id:06}")
}

/// Orchestrates one verification: duplicate lookup, scoring, AML screening,
/// alerting, and audit. Holds no mutable state of its own.
pub struct VerificationService<G, A, L> {
    registry: Arc<G>,
    alerts: Arc<A>,
    audit: Arc<L>,
    aggregator: Arc<RiskAggregator>,
    aml: AmlScreen,
}

impl<G, A, L> VerificationService<G, A, L>
where
    G: IdentityRegistry + 'static,
    A: AlertPublisher + 'static,
    L: AuditSink + 'static,
{
    pub fn new(
        registry: Arc<G>,
        alerts: Arc<A>,
        audit: Arc<L>,
        aggregator: RiskAggregator,
        aml: AmlScreen,
    ) -> Self {
        Self {
            registry,
            alerts,
            audit,
            aggregator: Arc::new(aggregator),
            aml,
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// Alert and audit failures degrade to warnings; a review hook outage
    /// must not turn a scored submission into an error. Registry failures
    /// do abort: the duplicate signal is mandatory.
    pub fn verify(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationReport, VerificationError> {
        let fingerprint = identity_fingerprint(&request.extracted.id_number);
        let is_duplicate = match fingerprint.as_deref() {
            Some(fingerprint) => self.registry.contains(fingerprint)?,
            None => false,
        };

        let structure = StructuralFeatures::from_fields([
            ("extracted_name", Some(request.extracted.name.as_str())),
            ("id_number", Some(request.extracted.id_number.as_str())),
            ("document_type", Some(request.document_type.label())),
        ]);

        let submission = DocumentSubmission {
            document_type: request.document_type,
            claimed_name: request.claimed_name.clone(),
            extracted_name: request.extracted.name.clone(),
            id_number: request.extracted.id_number.clone(),
            is_duplicate,
            image: request.image.clone(),
            structure,
        };

        let assessment = self.aggregator.score(&submission)?;
        let aml = self
            .aml
            .screen(request.extracted.address.as_deref(), is_duplicate, &assessment);

        let valid = assessment.fraud_score <= self.aggregator.policy().bands.medium_max;
        let status = if valid {
            VerificationStatus::ValidDocument
        } else {
            VerificationStatus::InvalidDocument
        };

        if assessment.risk_level != RiskLevel::Low || aml.action != AmlAction::Clear {
            if let Err(err) = self.alerts.publish(self.build_alert(&request, &assessment, &aml)) {
                warn!(%err, "fraud alert publish failed");
            }
        }

        let entry = self.build_audit_entry(valid, &assessment, &aml);
        if let Err(err) = self.audit.append(entry) {
            warn!(%err, "audit append failed");
        }

        if let Some(fingerprint) = fingerprint.as_deref() {
            if let Err(err) = self.registry.record(fingerprint) {
                warn!(%err, "identity fingerprint record failed");
            }
        }

        let verification_id = next_verification_id();
        info!(
            %verification_id,
            fraud_score = assessment.fraud_score,
            risk = assessment.risk_level.label(),
            aml_action = aml.action.label(),
            "verification complete"
        );

        Ok(VerificationReport {
            verification_id,
            valid,
            status,
            assessment,
            is_duplicate,
            aml,
        })
    }

    /// Expose the recent alert listing for the review endpoint.
    pub fn recent_alerts(&self, limit: usize) -> Result<Vec<FraudAlert>, AlertError> {
        self.alerts.recent(limit)
    }

    fn build_alert(
        &self,
        request: &VerificationRequest,
        assessment: &RiskAssessment,
        aml: &AmlOutcome,
    ) -> FraudAlert {
        let cap = self.aggregator.policy().score_cap;
        FraudAlert {
            case_id: next_case_id(),
            risk_level: assessment.risk_level,
            reasons: assessment.reasons.clone(),
            document_type: request.document_type,
            confidence: cap.saturating_sub(assessment.fraud_score),
            aml_flags: aml.flags.clone(),
            aml_action: aml.action,
            created_at: Utc::now(),
        }
    }

    fn build_audit_entry(
        &self,
        valid: bool,
        assessment: &RiskAssessment,
        aml: &AmlOutcome,
    ) -> AuditEntry {
        let status = if aml.action == AmlAction::AutoFlag {
            AuditStatus::Error
        } else if assessment.risk_level == RiskLevel::High {
            AuditStatus::Warning
        } else if valid {
            AuditStatus::Success
        } else {
            AuditStatus::Error
        };

        let aml_summary = if aml.flags.is_empty() {
            "no AML flags".to_string()
        } else {
            let labels: Vec<&str> = aml.flags.iter().map(|flag| flag.label()).collect();
            format!("AML flags: {}", labels.join(", "))
        };

        AuditEntry {
            actor: "system".to_string(),
            action: "fraud_verification".to_string(),
            status,
            details: format!(
                "fraud score {}% | risk {} | {}",
                assessment.fraud_score,
                assessment.risk_level.label(),
                aml_summary
            ),
            recorded_at: Utc::now(),
        }
    }
}

/// Error raised while orchestrating a verification.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error(transparent)]
    Signal(#[from] SignalError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
