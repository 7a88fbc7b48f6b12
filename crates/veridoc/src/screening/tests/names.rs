use super::common::RecordingSimilarity;
use crate::screening::names::{match_names, normalize_name, NameMatchTier};
use crate::screening::policy::ScoringPolicy;
use crate::screening::signals::{LexicalNameSimilarity, NameSimilarityProvider};

fn thresholds() -> crate::screening::policy::NameThresholds {
    ScoringPolicy::default().name_thresholds
}

#[test]
fn normalization_collapses_whitespace_and_strips_punctuation() {
    assert_eq!(normalize_name("  Amit   Kumar "), "amit kumar");
    assert_eq!(normalize_name("Rohan D."), "rohan d");
    assert_eq!(normalize_name("O'Brien, Liam"), "obrien liam");
    assert_eq!(normalize_name(""), "");
}

#[test]
fn exact_match_short_circuits_without_calling_the_provider() {
    let provider = RecordingSimilarity::with_score(0.0);
    let (similarity, tier) =
        match_names(&provider, &thresholds(), "Amit Kumar", "amit   kumar").expect("comparable");

    assert_eq!(similarity, 1.0);
    assert_eq!(tier, NameMatchTier::Match);
    assert_eq!(provider.call_count(), 0);
}

#[test]
fn substring_override_promotes_short_name_variants() {
    // "rohan d" is contained in "rohan das" and the raw score clears the
    // floor, so the pair is treated as a full match.
    let provider = RecordingSimilarity::with_score(0.8);
    let (similarity, tier) =
        match_names(&provider, &thresholds(), "Rohan Das", "Rohan D.").expect("comparable");

    assert_eq!(similarity, 1.0);
    assert_eq!(tier, NameMatchTier::Match);
    assert_eq!(provider.call_count(), 1);
}

#[test]
fn substring_override_requires_the_similarity_floor() {
    let provider = RecordingSimilarity::with_score(0.6);
    let (similarity, tier) =
        match_names(&provider, &thresholds(), "Rohan Das", "Rohan D.").expect("comparable");

    assert_eq!(similarity, 0.6);
    assert_eq!(tier, NameMatchTier::MajorMismatch);
}

#[test]
fn tiering_maps_scores_to_minor_and_major() {
    let minor = RecordingSimilarity::with_score(0.75);
    let (_, tier) = match_names(&minor, &thresholds(), "A B", "C D").expect("comparable");
    assert_eq!(tier, NameMatchTier::MinorDiscrepancy);

    let major = RecordingSimilarity::with_score(0.5);
    let (_, tier) = match_names(&major, &thresholds(), "A B", "C D").expect("comparable");
    assert_eq!(tier, NameMatchTier::MajorMismatch);

    let clean = RecordingSimilarity::with_score(0.95);
    let (_, tier) = match_names(&clean, &thresholds(), "A B", "C D").expect("comparable");
    assert_eq!(tier, NameMatchTier::Match);
}

#[test]
fn missing_names_are_a_major_mismatch() {
    let provider = RecordingSimilarity::with_score(1.0);
    let (similarity, tier) =
        match_names(&provider, &thresholds(), "", "Amit Kumar").expect("comparable");

    assert_eq!(similarity, 0.0);
    assert_eq!(tier, NameMatchTier::MajorMismatch);
    assert_eq!(provider.call_count(), 0);
}

#[test]
fn lexical_similarity_is_symmetric_and_bounded() {
    let provider = LexicalNameSimilarity;
    let forward = provider.similarity("amit kumar", "amit kumaar").expect("scores");
    let backward = provider.similarity("amit kumaar", "amit kumar").expect("scores");

    assert_eq!(forward, backward);
    assert!(forward > 0.0 && forward < 1.0);
    assert_eq!(provider.similarity("amit", "amit").expect("scores"), 1.0);
    assert_eq!(provider.similarity("amit", "xyz").expect("scores"), 0.0);
    assert_eq!(provider.similarity("", "amit").expect("scores"), 0.0);
}
