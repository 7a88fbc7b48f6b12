//! Offline accuracy reports for the tampering and name-similarity
//! collaborators, driven by labeled fixture files. These are batch
//! measurements for tuning, not part of the scoring contract.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::ImageHandle;
use super::names::{self, NameMatchTier};
use super::policy::NameThresholds;
use super::signals::{NameSimilarityProvider, TamperingDetector};

/// Labeled tampering fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TamperingFixture {
    pub image_path: String,
    pub tampered: bool,
}

/// Labeled name-matching fixture; `match` is the expected verdict at the
/// no-signal threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameMatchFixture {
    pub doc_name: String,
    pub input_name: String,
    #[serde(rename = "match")]
    pub expected_match: bool,
}

/// Correct-over-total tally for one evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccuracyReport {
    pub correct: usize,
    pub total: usize,
}

impl AccuracyReport {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

pub fn load_tampering_fixtures(path: &Path) -> Result<Vec<TamperingFixture>, FixtureError> {
    parse_fixture_file(path)
}

pub fn load_name_fixtures(path: &Path) -> Result<Vec<NameMatchFixture>, FixtureError> {
    parse_fixture_file(path)
}

fn parse_fixture_file<T>(path: &Path) -> Result<Vec<T>, FixtureError>
where
    T: serde::de::DeserializeOwned,
{
    let raw = fs::read_to_string(path).map_err(|source| FixtureError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Score the detector against labeled images. Detector failures count as
/// "no tampering evidence", mirroring the fail-open scoring policy.
pub fn evaluate_tampering<D>(detector: &D, fixtures: &[TamperingFixture]) -> AccuracyReport
where
    D: TamperingDetector + ?Sized,
{
    let correct = fixtures
        .iter()
        .filter(|fixture| {
            let predicted = detector
                .is_tampered(&ImageHandle(fixture.image_path.clone()))
                .unwrap_or(false);
            predicted == fixture.tampered
        })
        .count();

    AccuracyReport {
        correct,
        total: fixtures.len(),
    }
}

/// Score the provider against labeled name pairs through the same tiering
/// pipeline the aggregator uses.
pub fn evaluate_name_matching<P>(
    provider: &P,
    thresholds: &NameThresholds,
    fixtures: &[NameMatchFixture],
) -> AccuracyReport
where
    P: NameSimilarityProvider + ?Sized,
{
    let correct = fixtures
        .iter()
        .filter(|fixture| {
            let predicted = names::match_names(
                provider,
                thresholds,
                &fixture.input_name,
                &fixture.doc_name,
            )
            .map(|(_, tier)| tier == NameMatchTier::Match)
            .unwrap_or(false);
            predicted == fixture.expected_match
        })
        .count();

    AccuracyReport {
        correct,
        total: fixtures.len(),
    }
}

/// Fixture file loading failures.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("unable to read fixture file at {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("fixture file is not valid JSON")]
    Parse(#[from] serde_json::Error),
}
