use std::collections::HashSet;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{info, warn};
use veridoc::config::ScreeningConfig;
use veridoc::screening::{
    AlertError, AlertPublisher, AmlScreen, AuditEntry, AuditError, AuditSink, FraudAlert,
    IdentityRegistry, ImageHandle, NameSimilarityProvider, PolicyError, RegistryError,
    ScoringPolicy, SignalError, StructuralAnomalyDetector, StructuralFeatures, TamperingDetector,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryIdentityRegistry {
    fingerprints: Arc<Mutex<HashSet<String>>>,
}

impl IdentityRegistry for InMemoryIdentityRegistry {
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryAlertPublisher {
    events: Arc<Mutex<Vec<FraudAlert>>>,
}

impl AlertPublisher for InMemoryAlertPublisher {
    fn publish(&self, alert: FraudAlert) -> Result<(), AlertError> {
        let mut guard = self.events.lock().expect("alert mutex poisoned");
        guard.push(alert);
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<FraudAlert>, AlertError> {
        let guard = self.events.lock().expect("alert mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

/// Keeps audit entries in memory and mirrors each into the tracing stream.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditSink {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl AuditSink for InMemoryAuditSink {
    fn append(&self, entry: AuditEntry) -> Result<(), AuditError> {
        info!(
            actor = %entry.actor,
            action = %entry.action,
            status = entry.status.label(),
            details = %entry.details,
            "audit entry"
        );
        let mut guard = self.entries.lock().expect("audit mutex poisoned");
        guard.push(entry);
        Ok(())
    }
}

/// Stand-in for the external pixel-level analyzer: confirms the referenced
/// image is readable and reports no tampering evidence of its own. An
/// unreadable image surfaces as the usual infrastructure error.
pub(crate) struct FileProbeTamperingDetector;

impl TamperingDetector for FileProbeTamperingDetector {
    fn is_tampered(&self, image: &ImageHandle) -> Result<bool, SignalError> {
        std::fs::metadata(&image.0).map_err(|err| {
            SignalError::unavailable("tampering", format!("unreadable image {}: {err}", image.0))
        })?;
        Ok(false)
    }
}

/// Tampering verdict computed upstream and carried with the submission.
pub(crate) struct PrecomputedTamperingDetector {
    verdict: bool,
}

impl PrecomputedTamperingDetector {
    pub(crate) fn new(verdict: bool) -> Self {
        Self { verdict }
    }
}

impl TamperingDetector for PrecomputedTamperingDetector {
    fn is_tampered(&self, _image: &ImageHandle) -> Result<bool, SignalError> {
        Ok(self.verdict)
    }
}

/// Well-formed iff every node in the field graph is populated. The real
/// classifier lives out of process; this keeps the boundary runnable.
pub(crate) struct FieldPresenceDetector;

impl StructuralAnomalyDetector for FieldPresenceDetector {
    fn is_well_formed(&self, features: &StructuralFeatures) -> Result<bool, SignalError> {
        Ok(!features.fields.is_empty() && features.fields.iter().all(|field| field.present))
    }
}

/// Similarity already computed by an upstream embedding service.
pub(crate) struct PrecomputedNameSimilarity {
    score: f64,
}

impl PrecomputedNameSimilarity {
    pub(crate) fn new(score: f64) -> Self {
        Self { score }
    }
}

impl NameSimilarityProvider for PrecomputedNameSimilarity {
    fn similarity(&self, _claimed: &str, _extracted: &str) -> Result<f64, SignalError> {
        Ok(self.score.clamp(0.0, 1.0))
    }
}

pub(crate) fn load_scoring_policy(config: &ScreeningConfig) -> Result<ScoringPolicy, PolicyError> {
    match &config.policy_path {
        Some(path) => ScoringPolicy::from_path(path),
        None => {
            let policy = ScoringPolicy::default();
            policy.ensure_valid()?;
            Ok(policy)
        }
    }
}

/// Blacklist loading is best effort: a broken override file falls back to
/// the compiled-in patterns instead of refusing to start.
pub(crate) fn load_aml_screen(config: &ScreeningConfig) -> AmlScreen {
    match &config.blacklist_path {
        Some(path) => match AmlScreen::from_path(path) {
            Ok(screen) => screen,
            Err(err) => {
                warn!(%err, "could not load AML blacklist; using fallback patterns");
                AmlScreen::default()
            }
        },
        None => AmlScreen::default(),
    }
}
