//! Deterministic signal aggregation producing the risk verdict.

use std::sync::Arc;

use tracing::{debug, warn};

use super::checksum;
use super::domain::{DocumentSubmission, DocumentType, RiskAssessment, Signal, SignalKind};
use super::names::{self, NameMatchTier};
use super::policy::{PolicyError, ScoringPolicy};
use super::signals::{
    NameSimilarityProvider, SignalError, StructuralAnomalyDetector, TamperingDetector,
};

/// Executes the fixed signal sequence against one submission and folds the
/// triggered weights into a clamped score, a risk tier, and an ordered
/// reason trail. Stateless across calls; safe to share between threads.
pub struct RiskAggregator {
    policy: ScoringPolicy,
    tampering: Arc<dyn TamperingDetector>,
    structure: Arc<dyn StructuralAnomalyDetector>,
    names: Arc<dyn NameSimilarityProvider>,
}

impl RiskAggregator {
    /// Build an aggregator over validated policy and injected collaborator
    /// handles. Misconfigured policy is rejected here, not at scoring time.
    pub fn new(
        policy: ScoringPolicy,
        tampering: Arc<dyn TamperingDetector>,
        structure: Arc<dyn StructuralAnomalyDetector>,
        names: Arc<dyn NameSimilarityProvider>,
    ) -> Result<Self, PolicyError> {
        policy.ensure_valid()?;
        Ok(Self {
            policy,
            tampering,
            structure,
            names,
        })
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Score one submission. Malformed input only ever triggers signals;
    /// the sole error path is an unavailable mandatory collaborator.
    pub fn score(&self, submission: &DocumentSubmission) -> Result<RiskAssessment, SignalError> {
        let signals = self.evaluate_signals(submission)?;

        let total: u32 = signals.iter().map(|signal| signal.weight).sum();
        let fraud_score = total.min(self.policy.score_cap);
        let risk_level = self.policy.bands.classify(fraud_score);
        let reasons: Vec<String> = signals
            .into_iter()
            .filter_map(|signal| signal.reason)
            .collect();

        debug!(
            fraud_score,
            risk = risk_level.label(),
            signals = reasons.len(),
            "submission scored"
        );

        Ok(RiskAssessment {
            fraud_score,
            risk_level,
            reasons,
        })
    }

    /// Run the five checks in their fixed order and collect the triggered
    /// signals. The order is an observable contract: the reason list
    /// mirrors it and downstream reviewers depend on that ordering.
    fn evaluate_signals(
        &self,
        submission: &DocumentSubmission,
    ) -> Result<Vec<Signal>, SignalError> {
        let mut signals = Vec::new();

        if submission.is_duplicate {
            signals.push(self.triggered(SignalKind::DuplicateSubmission));
        }

        match submission.document_type {
            DocumentType::NationalId => {
                // Checksum and format collapse into one failure reason.
                let genuine = checksum::validate_format(
                    DocumentType::NationalId,
                    &submission.id_number,
                ) && checksum::validate(DocumentType::NationalId, &submission.id_number);
                if !genuine {
                    signals.push(self.triggered(SignalKind::InvalidNationalId));
                }
            }
            DocumentType::TaxId => {
                if !checksum::validate_format(DocumentType::TaxId, &submission.id_number) {
                    signals.push(self.triggered(SignalKind::InvalidTaxId));
                }
            }
            DocumentType::UtilityBill => {}
        }

        if self.tampering_verdict(submission)? {
            signals.push(self.triggered(SignalKind::Tampering));
        }

        if !self.structure.is_well_formed(&submission.structure)? {
            signals.push(self.triggered(SignalKind::StructuralAnomaly));
        }

        let (similarity, tier) = names::match_names(
            self.names.as_ref(),
            &self.policy.name_thresholds,
            &submission.claimed_name,
            &submission.extracted_name,
        )?;
        debug!(similarity, ?tier, "name comparison complete");
        match tier {
            NameMatchTier::Match => {}
            NameMatchTier::MinorDiscrepancy => {
                signals.push(self.triggered(SignalKind::NameMismatchMinor));
            }
            NameMatchTier::MajorMismatch => {
                signals.push(self.triggered(SignalKind::NameMismatchMajor));
            }
        }

        Ok(signals)
    }

    fn triggered(&self, kind: SignalKind) -> Signal {
        let rule = self.policy.rule(kind);
        Signal {
            kind,
            triggered: true,
            weight: rule.weight,
            reason: Some(rule.reason.clone()),
        }
    }

    /// Tampering is the one capability with a documented fail-open policy:
    /// an unreadable image is an infrastructure condition, not evidence.
    fn tampering_verdict(&self, submission: &DocumentSubmission) -> Result<bool, SignalError> {
        match self.tampering.is_tampered(&submission.image) {
            Ok(tampered) => Ok(tampered),
            Err(err) if self.policy.tampering_fail_open => {
                warn!(%err, "tampering detector unavailable; treating as no evidence");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}
