use crate::screening::domain::SignalKind;
use crate::screening::policy::{PolicyError, ScoringPolicy};

#[test]
fn default_policy_is_valid_and_carries_the_documented_weights() {
    let policy = ScoringPolicy::default();
    policy.ensure_valid().expect("default policy is valid");

    assert_eq!(policy.rule(SignalKind::DuplicateSubmission).weight, 50);
    assert_eq!(policy.rule(SignalKind::InvalidNationalId).weight, 30);
    assert_eq!(policy.rule(SignalKind::InvalidTaxId).weight, 30);
    assert_eq!(policy.rule(SignalKind::Tampering).weight, 40);
    assert_eq!(policy.rule(SignalKind::StructuralAnomaly).weight, 25);
    assert_eq!(policy.rule(SignalKind::NameMismatchMajor).weight, 20);
    assert_eq!(policy.rule(SignalKind::NameMismatchMinor).weight, 10);
    assert_eq!(policy.score_cap, 100);
    assert!(policy.tampering_fail_open);
}

#[test]
fn zero_weights_are_rejected_at_load_time() {
    let mut policy = ScoringPolicy::default();
    policy.tampering.weight = 0;

    match policy.ensure_valid() {
        Err(PolicyError::ZeroWeight { signal }) => assert_eq!(signal, "tampering"),
        other => panic!("expected zero-weight rejection, got {other:?}"),
    }
}

#[test]
fn inverted_risk_bands_are_rejected() {
    let mut policy = ScoringPolicy::default();
    policy.bands.low_max = 80;

    assert!(matches!(
        policy.ensure_valid(),
        Err(PolicyError::InvalidBands { .. })
    ));
}

#[test]
fn bands_above_the_cap_are_rejected() {
    let mut policy = ScoringPolicy::default();
    policy.score_cap = 70;

    assert!(matches!(
        policy.ensure_valid(),
        Err(PolicyError::InvalidBands { .. })
    ));
}

#[test]
fn disordered_name_thresholds_are_rejected() {
    let mut policy = ScoringPolicy::default();
    policy.name_thresholds.minor = 0.95;

    assert!(matches!(
        policy.ensure_valid(),
        Err(PolicyError::InvalidNameThresholds { .. })
    ));
}

#[test]
fn partial_json_overrides_merge_into_the_defaults() {
    let policy: ScoringPolicy = serde_json::from_str(
        r#"{
            "duplicate_submission": { "weight": 60, "reason": "Repeat identity detected." },
            "bands": { "low_max": 25, "medium_max": 60 }
        }"#,
    )
    .expect("parses");
    policy.ensure_valid().expect("merged policy is valid");

    assert_eq!(policy.rule(SignalKind::DuplicateSubmission).weight, 60);
    assert_eq!(policy.bands.low_max, 25);
    // Untouched entries keep their defaults.
    assert_eq!(policy.rule(SignalKind::Tampering).weight, 40);
    assert_eq!(policy.score_cap, 100);
}
