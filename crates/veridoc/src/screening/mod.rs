//! Document fraud screening: signal contracts, declarative scoring policy,
//! deterministic aggregation, AML rules, and the verification service that
//! wires them to the identity registry and review ledgers.

pub mod accuracy;
pub mod aggregator;
pub mod aml;
pub mod checksum;
pub mod domain;
pub mod ledger;
pub mod names;
pub mod policy;
pub mod registry;
pub mod router;
pub mod service;
pub mod signals;

#[cfg(test)]
mod tests;

pub use accuracy::{
    evaluate_name_matching, evaluate_tampering, load_name_fixtures, load_tampering_fixtures,
    AccuracyReport, FixtureError, NameMatchFixture, TamperingFixture,
};
pub use aggregator::RiskAggregator;
pub use aml::{AmlAction, AmlConfigError, AmlFlag, AmlOutcome, AmlScreen};
pub use domain::{
    DocumentSubmission, DocumentType, ImageHandle, RiskAssessment, RiskLevel, Signal, SignalKind,
    StructuralFeatures, VerificationStatus,
};
pub use ledger::{
    AlertError, AlertPublisher, AuditEntry, AuditError, AuditSink, AuditStatus, FraudAlert,
};
pub use names::{normalize_name, NameMatchTier};
pub use policy::{NameThresholds, PolicyError, RiskBands, ScoringPolicy, SignalRule};
pub use registry::{identity_fingerprint, normalize_identifier, IdentityRegistry, RegistryError};
pub use router::verification_router;
pub use service::{
    ExtractedFields, VerificationError, VerificationReport, VerificationRequest,
    VerificationService,
};
pub use signals::{
    LexicalNameSimilarity, NameSimilarityProvider, SignalError, StructuralAnomalyDetector,
    TamperingDetector,
};
