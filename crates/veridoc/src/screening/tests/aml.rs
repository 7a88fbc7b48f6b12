use crate::screening::aml::{AmlAction, AmlFlag, AmlScreen};
use crate::screening::domain::{RiskAssessment, RiskLevel};

fn assessment(score: u32, risk_level: RiskLevel) -> RiskAssessment {
    RiskAssessment {
        fraud_score: score,
        risk_level,
        reasons: Vec::new(),
    }
}

#[test]
fn clean_submission_clears() {
    let screen = AmlScreen::default();
    let outcome = screen.screen(
        Some("44 Harbour View Road, Pune"),
        false,
        &assessment(10, RiskLevel::Low),
    );

    assert!(outcome.flags.is_empty());
    assert_eq!(outcome.action, AmlAction::Clear);
    assert!(outcome.notes.is_empty());
}

#[test]
fn duplicate_identity_auto_flags() {
    let screen = AmlScreen::default();
    let outcome = screen.screen(None, true, &assessment(0, RiskLevel::Low));

    assert_eq!(outcome.flags, vec![AmlFlag::DuplicateIdentity]);
    assert_eq!(outcome.action, AmlAction::AutoFlag);
}

#[test]
fn blacklisted_address_auto_flags() {
    let screen = AmlScreen::default();
    let outcome = screen.screen(
        Some("po box 4411, Riverside"),
        false,
        &assessment(0, RiskLevel::Low),
    );

    assert_eq!(outcome.flags, vec![AmlFlag::BlacklistedAddress]);
    assert_eq!(outcome.action, AmlAction::AutoFlag);
}

#[test]
fn blacklist_matching_ignores_case_and_spacing() {
    let screen = AmlScreen::default();
    assert!(screen.is_address_blacklisted("12 Blacklisted   estate"));
    assert!(screen.is_address_blacklisted("POBOX 9"));
    assert!(!screen.is_address_blacklisted("12 Clearwater Estate"));
    assert!(!screen.is_address_blacklisted(""));
}

#[test]
fn high_fraud_risk_routes_to_manual_review() {
    let screen = AmlScreen::default();
    let outcome = screen.screen(None, false, &assessment(75, RiskLevel::High));

    assert_eq!(outcome.flags, vec![AmlFlag::HighFraudRisk]);
    assert_eq!(outcome.action, AmlAction::ManualReview);
    assert!(outcome.notes[0].contains("75"));
}

#[test]
fn auto_flag_outranks_manual_review() {
    let screen = AmlScreen::default();
    let outcome = screen.screen(
        Some("1234 Fraud Lane"),
        true,
        &assessment(90, RiskLevel::High),
    );

    assert_eq!(
        outcome.flags,
        vec![
            AmlFlag::DuplicateIdentity,
            AmlFlag::BlacklistedAddress,
            AmlFlag::HighFraudRisk,
        ]
    );
    assert_eq!(outcome.action, AmlAction::AutoFlag);
    assert_eq!(outcome.notes.len(), 3);
}

#[test]
fn custom_patterns_replace_the_defaults() {
    let screen = AmlScreen::new(vec!["WATCHLIST WHARF".to_string()], 71);

    assert!(screen.is_address_blacklisted("9 watchlist wharf"));
    assert!(!screen.is_address_blacklisted("PO BOX 11"));
}
