//! Duplicate-identity lookup backed by hashed identifier fingerprints.
//!
//! Raw identifiers never leave the process: the registry only ever sees
//! SHA-256 fingerprints of the normalized value.

use std::fmt::Write as _;

use sha2::{Digest, Sha256};

/// Canonical identifier form shared by fingerprinting and AML matching:
/// uppercase, all whitespace stripped, OCR "N/A" placeholders dropped.
pub fn normalize_identifier(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();

    if cleaned == "N/A" {
        String::new()
    } else {
        cleaned
    }
}

/// Hex SHA-256 fingerprint of a normalized identifier. Empty identifiers
/// have no fingerprint and can never collide into a duplicate.
pub fn identity_fingerprint(raw: &str) -> Option<String> {
    let normalized = normalize_identifier(raw);
    if normalized.is_empty() {
        return None;
    }

    let digest = Sha256::digest(normalized.as_bytes());
    let mut fingerprint = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(fingerprint, "{byte:02x}");
    }
    Some(fingerprint)
}

/// Lookup/record contract for previously seen identity fingerprints.
pub trait IdentityRegistry: Send + Sync {
    fn contains(&self, fingerprint: &str) -> Result<bool, RegistryError>;
    fn record(&self, fingerprint: &str) -> Result<(), RegistryError>;
}

/// Registry backend failures. Duplicate lookup is a mandatory signal, so
/// these abort the verification instead of silently scoring without it.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("identity registry unavailable: {0}")]
    Unavailable(String),
}
