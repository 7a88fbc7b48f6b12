use serde::{Deserialize, Serialize};

/// Document categories accepted during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    NationalId,
    TaxId,
    UtilityBill,
}

impl DocumentType {
    pub const fn label(self) -> &'static str {
        match self {
            DocumentType::NationalId => "national_id",
            DocumentType::TaxId => "tax_id",
            DocumentType::UtilityBill => "utility_bill",
        }
    }
}

/// Opaque reference to the submitted document image. The scoring engine
/// never opens it; only the tampering detector does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHandle(pub String);

/// Per-field summary consumed by the structural anomaly detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFeature {
    pub name: String,
    pub present: bool,
    /// Field length scaled into [0, 1].
    pub normalized_length: f32,
}

/// Field-presence graph handed to the structural anomaly detector. Opaque to
/// the aggregator; it never inspects the detector's representation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuralFeatures {
    pub fields: Vec<FieldFeature>,
}

const FIELD_LENGTH_SCALE: f32 = 50.0;

impl StructuralFeatures {
    /// Build features from extracted field values; absent or empty values
    /// mark the node as missing.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, value)| {
                let trimmed = value.map(str::trim).filter(|value| !value.is_empty());
                FieldFeature {
                    name: name.to_string(),
                    present: trimmed.is_some(),
                    normalized_length: trimmed
                        .map(|value| (value.len() as f32 / FIELD_LENGTH_SCALE).min(1.0))
                        .unwrap_or(0.0),
                }
            })
            .collect();

        Self { fields }
    }
}

/// Immutable scoring input assembled once per verification request and
/// borrowed read-only by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSubmission {
    pub document_type: DocumentType,
    pub claimed_name: String,
    pub extracted_name: String,
    pub id_number: String,
    pub is_duplicate: bool,
    pub image: ImageHandle,
    pub structure: StructuralFeatures,
}

/// Stable identifiers for the evidence checks the aggregator can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    DuplicateSubmission,
    InvalidNationalId,
    InvalidTaxId,
    Tampering,
    StructuralAnomaly,
    NameMismatchMajor,
    NameMismatchMinor,
}

impl SignalKind {
    pub const ALL: [SignalKind; 7] = [
        SignalKind::DuplicateSubmission,
        SignalKind::InvalidNationalId,
        SignalKind::InvalidTaxId,
        SignalKind::Tampering,
        SignalKind::StructuralAnomaly,
        SignalKind::NameMismatchMajor,
        SignalKind::NameMismatchMinor,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            SignalKind::DuplicateSubmission => "duplicate_submission",
            SignalKind::InvalidNationalId => "invalid_national_id",
            SignalKind::InvalidTaxId => "invalid_tax_id",
            SignalKind::Tampering => "tampering",
            SignalKind::StructuralAnomaly => "structural_anomaly",
            SignalKind::NameMismatchMajor => "name_mismatch_major",
            SignalKind::NameMismatchMinor => "name_mismatch_minor",
        }
    }
}

/// One unit of fraud evidence. Computed fresh per submission, never
/// persisted or cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub triggered: bool,
    pub weight: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Discrete risk classification derived from the clamped score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Aggregated verdict for one submission. The reason list preserves the
/// aggregator's evaluation order; downstream reviewers depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub fraud_score: u32,
    pub risk_level: RiskLevel,
    pub reasons: Vec<String>,
}

/// Coarse document disposition derived from the assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    #[serde(rename = "Valid Document")]
    ValidDocument,
    #[serde(rename = "Invalid Document")]
    InvalidDocument,
}

impl VerificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            VerificationStatus::ValidDocument => "Valid Document",
            VerificationStatus::InvalidDocument => "Invalid Document",
        }
    }
}
