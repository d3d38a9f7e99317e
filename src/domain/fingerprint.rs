//! Fingerprint value and the hex accumulator that feeds it.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::crypto::{string_hash, SignerCertificate};
use crate::infra::error::FingerprintError;

/// Signing-identity fingerprint: hashes of the accumulated key and
/// signature hex strings. Renders as `"<key_hash>,<sign_hash>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    key_hash: i32,
    sign_hash: i32,
}

impl Fingerprint {
    #[must_use]
    pub fn new(key_hash: i32, sign_hash: i32) -> Self {
        Self {
            key_hash,
            sign_hash,
        }
    }

    /// Hash both accumulated hex strings.
    #[must_use]
    pub fn from_hex(key_hex: &str, sign_hex: &str) -> Self {
        Self::new(string_hash(key_hex), string_hash(sign_hex))
    }

    #[must_use]
    pub fn key_hash(&self) -> i32 {
        self.key_hash
    }

    #[must_use]
    pub fn sign_hash(&self) -> i32 {
        self.sign_hash
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.key_hash, self.sign_hash)
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FingerprintError::InvalidInput(format!("Invalid fingerprint: {s:?}"));
        let (key, sign) = s.split_once(',').ok_or_else(invalid)?;
        let key_hash = key.parse::<i32>().map_err(|_| invalid())?;
        let sign_hash = sign.parse::<i32>().map_err(|_| invalid())?;
        Ok(Self::new(key_hash, sign_hash))
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Append-only key/signature hex buffers, filled entry by entry and
/// certificate by certificate.
#[derive(Debug, Default, Clone)]
pub struct FingerprintAccumulator {
    key_hex: String,
    sign_hex: String,
}

impl FingerprintAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one certificate: key bytes when present, signature bytes always.
    pub fn push(&mut self, certificate: &SignerCertificate) {
        if let Some(key) = certificate.key_bytes() {
            self.key_hex.push_str(&hex::encode_upper(key));
        }
        self.sign_hex
            .push_str(&hex::encode_upper(certificate.signature()));
    }

    #[must_use]
    pub fn key_hex(&self) -> &str {
        &self.key_hex
    }

    #[must_use]
    pub fn sign_hex(&self) -> &str {
        &self.sign_hex
    }

    /// Produce the fingerprint, or nothing when no key bytes were collected.
    ///
    /// Only the key buffer gates the result: signature bytes from
    /// certificates with unsupported keys alone never yield a fingerprint.
    #[must_use]
    pub fn finish(&self) -> Option<Fingerprint> {
        if self.key_hex.is_empty() {
            return None;
        }
        Some(Fingerprint::from_hex(&self.key_hex, &self.sign_hex))
    }
}
