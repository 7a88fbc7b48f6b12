use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::screening::aggregator::RiskAggregator;
use crate::screening::aml::AmlScreen;
use crate::screening::domain::{
    DocumentSubmission, DocumentType, ImageHandle, StructuralFeatures,
};
use crate::screening::ledger::{
    AlertError, AlertPublisher, AuditEntry, AuditError, AuditSink, FraudAlert,
};
use crate::screening::policy::ScoringPolicy;
use crate::screening::registry::{IdentityRegistry, RegistryError};
use crate::screening::service::VerificationService;
use crate::screening::signals::{
    NameSimilarityProvider, SignalError, StructuralAnomalyDetector, TamperingDetector,
};

/// Passes the Verhoeff check; see the checksum tests for the derivation.
pub(super) const VALID_NATIONAL_ID: &str = "123456789010";
pub(super) const VALID_NATIONAL_ID_ALT: &str = "246813579019";

pub(super) struct StaticTampering(pub(super) bool);

impl TamperingDetector for StaticTampering {
    fn is_tampered(&self, _image: &ImageHandle) -> Result<bool, SignalError> {
        Ok(self.0)
    }
}

pub(super) struct FailingTampering;

impl TamperingDetector for FailingTampering {
    fn is_tampered(&self, image: &ImageHandle) -> Result<bool, SignalError> {
        Err(SignalError::unavailable(
            "tampering",
            format!("unreadable image {}", image.0),
        ))
    }
}

pub(super) struct StaticStructure(pub(super) bool);

impl StructuralAnomalyDetector for StaticStructure {
    fn is_well_formed(&self, _features: &StructuralFeatures) -> Result<bool, SignalError> {
        Ok(self.0)
    }
}

pub(super) struct FailingStructure;

impl StructuralAnomalyDetector for FailingStructure {
    fn is_well_formed(&self, _features: &StructuralFeatures) -> Result<bool, SignalError> {
        Err(SignalError::unavailable("structural_anomaly", "model offline"))
    }
}

/// Provider returning a fixed score, plus a call counter so tests can
/// assert the exact-match short-circuit skips it.
#[derive(Default)]
pub(super) struct RecordingSimilarity {
    pub(super) score: f64,
    pub(super) calls: Arc<Mutex<usize>>,
}

impl RecordingSimilarity {
    pub(super) fn with_score(score: f64) -> Self {
        Self {
            score,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub(super) fn call_count(&self) -> usize {
        *self.calls.lock().expect("call counter poisoned")
    }
}

impl NameSimilarityProvider for RecordingSimilarity {
    fn similarity(&self, _claimed: &str, _extracted: &str) -> Result<f64, SignalError> {
        *self.calls.lock().expect("call counter poisoned") += 1;
        Ok(self.score)
    }
}

pub(super) fn aggregator_with(
    tampering: impl TamperingDetector + 'static,
    structure: impl StructuralAnomalyDetector + 'static,
    names: impl NameSimilarityProvider + 'static,
) -> RiskAggregator {
    RiskAggregator::new(
        ScoringPolicy::default(),
        Arc::new(tampering),
        Arc::new(structure),
        Arc::new(names),
    )
    .expect("default policy is valid")
}

/// Aggregator whose collaborators all report a clean document.
pub(super) fn clean_aggregator(similarity: f64) -> RiskAggregator {
    aggregator_with(
        StaticTampering(false),
        StaticStructure(true),
        RecordingSimilarity::with_score(similarity),
    )
}

pub(super) fn submission() -> DocumentSubmission {
    DocumentSubmission {
        document_type: DocumentType::NationalId,
        claimed_name: "Amit Kumar".to_string(),
        extracted_name: "Amit Kumar".to_string(),
        id_number: VALID_NATIONAL_ID.to_string(),
        is_duplicate: false,
        image: ImageHandle("uploads/national-id.png".to_string()),
        structure: StructuralFeatures::from_fields([
            ("extracted_name", Some("Amit Kumar")),
            ("id_number", Some(VALID_NATIONAL_ID)),
            ("document_type", Some("national_id")),
        ]),
    }
}

#[derive(Default)]
pub(super) struct MemoryRegistry {
    pub(super) fingerprints: Arc<Mutex<HashSet<String>>>,
}

impl IdentityRegistry for MemoryRegistry {
    fn contains(&self, fingerprint: &str) -> Result<bool, RegistryError> {
        let guard = self.fingerprints.lock().expect("registry mutex poisoned");
        Ok(guard.contains(fingerprint))
    }

    fn record(&self, fingerprint: &str) -> Result<(), RegistryError> {
        let mut guard = self.fingerprints.lock().expect("registry mutex poisoned");
        guard.insert(fingerprint.to_string());
        Ok(())
    }
}

pub(super) struct UnavailableRegistry;

impl IdentityRegistry for UnavailableRegistry {
    fn contains(&self, _fingerprint: &str) -> Result<bool, RegistryError> {
        Err(RegistryError::Unavailable("database offline".to_string()))
    }

    fn record(&self, _fingerprint: &str) -> Result<(), RegistryError> {
        Err(RegistryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryAlerts {
    events: Arc<Mutex<Vec<FraudAlert>>>,
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<FraudAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for MemoryAlerts {
    fn publish(&self, alert: FraudAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<FraudAlert>, AlertError> {
        let guard = self.events.lock().expect("alert mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryAudit {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl MemoryAudit {
    pub(super) fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditSink for MemoryAudit {
    fn append(&self, entry: AuditEntry) -> Result<(), AuditError> {
        self.entries
            .lock()
            .expect("audit mutex poisoned")
            .push(entry);
        Ok(())
    }
}

pub(super) fn build_service(
    similarity: f64,
) -> (
    VerificationService<MemoryRegistry, MemoryAlerts, MemoryAudit>,
    Arc<MemoryRegistry>,
    Arc<MemoryAlerts>,
    Arc<MemoryAudit>,
) {
    let registry = Arc::new(MemoryRegistry::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let audit = Arc::new(MemoryAudit::default());
    let service = VerificationService::new(
        registry.clone(),
        alerts.clone(),
        audit.clone(),
        clean_aggregator(similarity),
        AmlScreen::default(),
    );
    (service, registry, alerts, audit)
}
