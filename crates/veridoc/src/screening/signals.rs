//! Collaborator contracts wrapping the external detection capabilities.
//!
//! Each trait adapts one out-of-process capability (pixel analysis, the
//! structural classifier, the embedding service) into the uniform shape the
//! aggregator consumes. Implementations are injected as process-wide
//! handles; the engine never constructs or caches them itself.

use std::collections::HashMap;

use super::domain::{ImageHandle, StructuralFeatures};

/// Infrastructure failure while computing a signal. Distinct from a
/// triggered signal: an unavailable collaborator is not fraud evidence.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("signal '{signal}' unavailable: {message}")]
    Unavailable {
        signal: &'static str,
        message: String,
    },
}

impl SignalError {
    pub fn unavailable(signal: &'static str, message: impl Into<String>) -> Self {
        Self::Unavailable {
            signal,
            message: message.into(),
        }
    }
}

/// Pixel-level manipulation analysis over the submitted image.
pub trait TamperingDetector: Send + Sync {
    fn is_tampered(&self, image: &ImageHandle) -> Result<bool, SignalError>;
}

/// Binary well-formedness classification of the document's field graph.
pub trait StructuralAnomalyDetector: Send + Sync {
    fn is_well_formed(&self, features: &StructuralFeatures) -> Result<bool, SignalError>;
}

/// Semantic similarity between two names, in [0, 1].
pub trait NameSimilarityProvider: Send + Sync {
    fn similarity(&self, claimed: &str, extracted: &str) -> Result<f64, SignalError>;
}

/// Sorensen-Dice bigram similarity: the compiled-in provider used when no
/// embedding service is wired. Deterministic and cheap, which also makes it
/// the provider of choice in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalNameSimilarity;

impl NameSimilarityProvider for LexicalNameSimilarity {
    fn similarity(&self, claimed: &str, extracted: &str) -> Result<f64, SignalError> {
        Ok(dice_coefficient(claimed, extracted))
    }
}

fn dice_coefficient(a: &str, b: &str) -> f64 {
    let a: String = a.chars().filter(|ch| !ch.is_whitespace()).collect();
    let b: String = b.chars().filter(|ch| !ch.is_whitespace()).collect();

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let left = bigram_counts(&a);
    let right = bigram_counts(&b);
    let left_total: usize = left.values().sum();
    let right_total: usize = right.values().sum();
    if left_total == 0 || right_total == 0 {
        return 0.0;
    }

    let shared: usize = left
        .iter()
        .map(|(bigram, count)| count.min(right.get(bigram).unwrap_or(&0)))
        .sum();

    2.0 * shared as f64 / (left_total + right_total) as f64
}

fn bigram_counts(value: &str) -> HashMap<(char, char), usize> {
    let chars: Vec<char> = value.chars().collect();
    let mut counts = HashMap::new();
    for pair in chars.windows(2) {
        *counts.entry((pair[0], pair[1])).or_insert(0) += 1;
    }
    counts
}
