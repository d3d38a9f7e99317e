//! Reporting types produced by the fingerprint and compare workflows.
//!
//! The plain `Option<Fingerprint>` contract of the pipeline stays intact;
//! these types carry the per-entry detail alongside it for callers that want
//! to know why an archive produced no fingerprint.

use serde::Serialize;
use std::path::PathBuf;

use super::crypto::KeyAlgorithm;
use super::fingerprint::Fingerprint;

/// Outcome of fingerprinting one archive.
#[derive(Debug, Clone, Serialize)]
pub struct FingerprintReport {
    /// Archive that was scanned.
    pub archive: PathBuf,
    /// Resulting fingerprint, absent when no key material was collected.
    pub fingerprint: Option<Fingerprint>,
    /// Length of the accumulated key hex string.
    pub key_hex_len: usize,
    /// Length of the accumulated signature hex string.
    pub sign_hex_len: usize,
    /// Signature entries in processing order.
    pub entries: Vec<EntrySummary>,
    /// Recovered per-entry and per-certificate problems.
    pub diagnostics: Vec<EntryDiagnostic>,
}

impl FingerprintReport {
    #[must_use]
    pub fn is_signed(&self) -> bool {
        self.fingerprint.is_some()
    }

    /// Number of certificates that contributed to the fingerprint.
    #[must_use]
    pub fn certificate_count(&self) -> usize {
        self.entries.iter().map(|e| e.certificates.len()).sum()
    }
}

/// One signature entry and the certificates decoded from it.
#[derive(Debug, Clone, Serialize)]
pub struct EntrySummary {
    pub name: String,
    pub size: usize,
    pub certificates: Vec<CertificateSummary>,
}

/// Descriptive fields of one certificate in a certificate path.
#[derive(Debug, Clone, Serialize)]
pub struct CertificateSummary {
    pub subject: String,
    pub issuer: String,
    /// Serial number, uppercase hex of its DER integer bytes.
    pub serial: String,
    pub key_algorithm: KeyAlgorithm,
    /// Object identifier of the subject public key algorithm.
    pub key_algorithm_oid: String,
    pub key_len: usize,
    pub signature_len: usize,
}

/// A problem recovered while processing one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryDiagnostic {
    pub entry: String,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The entry did not decode as a PKCS#7 certificate path.
    DecodeFailure { reason: String },
    /// The entry exceeded the configured size limit and was not decoded.
    TooLarge { size: u64, limit: u64 },
    /// A certificate's key algorithm contributes no key bytes.
    UnsupportedKey {
        certificate_index: usize,
        algorithm_oid: String,
    },
}

/// Same-signer decision for two archives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SignerComparison {
    /// Both archives carry the same fingerprint.
    SameSigner { fingerprint: Fingerprint },
    /// Both archives are fingerprinted, with different results.
    DifferentSigner {
        left: Fingerprint,
        right: Fingerprint,
    },
    /// At least one archive yields no fingerprint.
    Unsigned { left_signed: bool, right_signed: bool },
}

impl SignerComparison {
    #[must_use]
    pub fn from_fingerprints(left: Option<Fingerprint>, right: Option<Fingerprint>) -> Self {
        match (left, right) {
            (Some(left), Some(right)) if left == right => {
                SignerComparison::SameSigner { fingerprint: left }
            }
            (Some(left), Some(right)) => SignerComparison::DifferentSigner { left, right },
            (left, right) => SignerComparison::Unsigned {
                left_signed: left.is_some(),
                right_signed: right.is_some(),
            },
        }
    }

    #[must_use]
    pub fn is_same_signer(&self) -> bool {
        matches!(self, SignerComparison::SameSigner { .. })
    }
}
