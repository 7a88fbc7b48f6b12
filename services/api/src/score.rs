//! `score` command: the base64 process boundary around the aggregator.
//!
//! Decodes one JSON submission, wires the default collaborators, prints the
//! scoring envelope to stdout, then runs any named accuracy fixtures.

use std::path::Path;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use clap::Args;
use serde::Deserialize;
use veridoc::config::AppConfig;
use veridoc::error::AppError;
use veridoc::screening::{
    evaluate_name_matching, evaluate_tampering, load_name_fixtures, load_tampering_fixtures,
    DocumentSubmission, DocumentType, ImageHandle, LexicalNameSimilarity, NameSimilarityProvider,
    RiskAggregator, RiskAssessment, ScoringPolicy, StructuralFeatures, TamperingDetector,
};

use crate::infra::{
    load_scoring_policy, FieldPresenceDetector, FileProbeTamperingDetector,
    PrecomputedNameSimilarity, PrecomputedTamperingDetector,
};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Base64-encoded JSON submission payload
    pub(crate) payload: String,
    /// Path to the submitted document image
    pub(crate) image_path: String,
    /// Optional accuracy fixture files (*tampering_test.json, *name_test.json)
    pub(crate) fixtures: Vec<String>,
}

/// Wire format of the decoded submission payload. Detector verdicts
/// computed upstream ride along as optional fields.
#[derive(Debug, Deserialize)]
struct ScorePayload {
    #[serde(rename = "type")]
    document_type: DocumentType,
    #[serde(default)]
    name_input: String,
    #[serde(default)]
    name_on_doc: String,
    #[serde(default)]
    id_number: String,
    #[serde(default)]
    is_duplicate: bool,
    #[serde(default)]
    has_tampering_signs: Option<bool>,
    #[serde(default)]
    name_similarity_score: Option<f64>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let decoded = BASE64
        .decode(args.payload.as_bytes())
        .map_err(|err| AppError::Payload(format!("not valid base64: {err}")))?;
    let raw = String::from_utf8(decoded)
        .map_err(|err| AppError::Payload(format!("not valid UTF-8: {err}")))?;
    let payload: ScorePayload = serde_json::from_str(&raw)
        .map_err(|err| AppError::Payload(format!("not a valid submission: {err}")))?;

    let config = AppConfig::load()?;
    let policy = load_scoring_policy(&config.screening)?;

    let assessment = score_payload(payload, &args.image_path, policy.clone())?;
    let rendered = serde_json::to_string_pretty(&assessment).map_err(AppError::Render)?;
    println!("{rendered}");

    for fixture in &args.fixtures {
        let path = Path::new(fixture);
        if fixture.ends_with("tampering_test.json") {
            let fixtures = load_tampering_fixtures(path)?;
            let report = evaluate_tampering(&FileProbeTamperingDetector, &fixtures);
            println!(
                "Tampering detection accuracy: {:.2}% ({}/{})",
                report.accuracy() * 100.0,
                report.correct,
                report.total
            );
        } else if fixture.ends_with("name_test.json") {
            let fixtures = load_name_fixtures(path)?;
            let report = evaluate_name_matching(
                &LexicalNameSimilarity,
                &policy.name_thresholds,
                &fixtures,
            );
            println!(
                "Name matching accuracy: {:.2}% ({}/{})",
                report.accuracy() * 100.0,
                report.correct,
                report.total
            );
        } else {
            eprintln!("skipping unrecognized fixture file: {fixture}");
        }
    }

    Ok(())
}

fn score_payload(
    payload: ScorePayload,
    image_path: &str,
    policy: ScoringPolicy,
) -> Result<RiskAssessment, AppError> {
    let tampering: Arc<dyn TamperingDetector> = match payload.has_tampering_signs {
        Some(verdict) => Arc::new(PrecomputedTamperingDetector::new(verdict)),
        None => Arc::new(FileProbeTamperingDetector),
    };
    let names: Arc<dyn NameSimilarityProvider> = match payload.name_similarity_score {
        Some(score) => Arc::new(PrecomputedNameSimilarity::new(score)),
        None => Arc::new(LexicalNameSimilarity),
    };

    let aggregator =
        RiskAggregator::new(policy, tampering, Arc::new(FieldPresenceDetector), names)?;

    let structure = StructuralFeatures::from_fields([
        ("extracted_name", Some(payload.name_on_doc.as_str())),
        ("id_number", Some(payload.id_number.as_str())),
        ("document_type", Some(payload.document_type.label())),
    ]);

    let submission = DocumentSubmission {
        document_type: payload.document_type,
        claimed_name: payload.name_input,
        extracted_name: payload.name_on_doc.clone(),
        id_number: payload.id_number.clone(),
        is_duplicate: payload.is_duplicate,
        image: ImageHandle(image_path.to_string()),
        structure,
    };

    Ok(aggregator.score(&submission)?)
}
