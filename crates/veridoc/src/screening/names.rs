//! Name normalization and the tiered similarity pipeline.

use super::policy::NameThresholds;
use super::signals::{NameSimilarityProvider, SignalError};

/// Outcome of the tiered name comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatchTier {
    Match,
    MinorDiscrepancy,
    MajorMismatch,
}

/// Canonical comparison form: lowercased, trimmed, internal whitespace
/// collapsed, punctuation stripped.
pub fn normalize_name(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut pending_space = false;

    for ch in raw.trim().chars() {
        if ch.is_whitespace() {
            pending_space = !normalized.is_empty();
            continue;
        }
        if !ch.is_alphanumeric() {
            continue;
        }
        if pending_space {
            normalized.push(' ');
            pending_space = false;
        }
        for lowered in ch.to_lowercase() {
            normalized.push(lowered);
        }
    }

    normalized
}

/// Resolve the claimed/extracted name pair to a similarity and tier.
///
/// Character-equal normalized names short-circuit to 1.0 without consulting
/// the provider. A provider score above the substring floor is forced to
/// 1.0 when one normalized name contains the other, which absorbs
/// legal-name vs short-name variants before tiering applies.
pub(crate) fn match_names<P>(
    provider: &P,
    thresholds: &NameThresholds,
    claimed: &str,
    extracted: &str,
) -> Result<(f64, NameMatchTier), SignalError>
where
    P: NameSimilarityProvider + ?Sized,
{
    let claimed = normalize_name(claimed);
    let extracted = normalize_name(extracted);

    let similarity = if claimed.is_empty() || extracted.is_empty() {
        0.0
    } else if claimed == extracted {
        1.0
    } else {
        let raw = provider.similarity(&claimed, &extracted)?.clamp(0.0, 1.0);
        if raw > thresholds.substring_floor
            && (claimed.contains(&extracted) || extracted.contains(&claimed))
        {
            1.0
        } else {
            raw
        }
    };

    let tier = if similarity >= thresholds.full_match {
        NameMatchTier::Match
    } else if similarity >= thresholds.minor {
        NameMatchTier::MinorDiscrepancy
    } else {
        NameMatchTier::MajorMismatch
    };

    Ok((similarity, tier))
}
