//! Error types for package fingerprinting.
//!
//! Only container-level failures ever reach the caller of the top-level
//! fingerprint operation; per-entry failures are recovered by the pipeline
//! and recorded as diagnostics.

use thiserror::Error;

/// Result type for fingerprinting operations
pub type FingerprintResult<T> = Result<T, FingerprintError>;

/// Error types for fingerprinting operations
#[derive(Error, Debug, miette::Diagnostic)]
pub enum FingerprintError {
    #[error("Archive unreadable: {path}: {reason}")]
    #[diagnostic(help("the path must point to a readable ZIP/JAR/APK file"))]
    ArchiveUnreadable { path: String, reason: String },

    #[error("Signature entry {entry} could not be decoded: {reason}")]
    EntryDecodeFailure { entry: String, reason: String },

    #[error("Signature entry {entry} is {size} bytes, limit is {limit}")]
    EntryTooLarge { entry: String, size: u64, limit: u64 },

    #[error("ASN.1 encoding/decoding error: {0}")]
    Asn1Error(String),

    #[error("Certificate error: {0}")]
    CertificateError(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl FingerprintError {
    /// Whether the error is scoped to a single signature entry.
    #[must_use]
    pub fn is_entry_local(&self) -> bool {
        matches!(
            self,
            FingerprintError::EntryDecodeFailure { .. } | FingerprintError::EntryTooLarge { .. }
        )
    }
}

impl From<der::Error> for FingerprintError {
    fn from(error: der::Error) -> Self {
        FingerprintError::Asn1Error(error.to_string())
    }
}

impl From<openssl::error::ErrorStack> for FingerprintError {
    fn from(error: openssl::error::ErrorStack) -> Self {
        FingerprintError::CertificateError(error.to_string())
    }
}

impl From<zip::result::ZipError> for FingerprintError {
    fn from(error: zip::result::ZipError) -> Self {
        FingerprintError::IoError(error.to_string())
    }
}

impl From<std::io::Error> for FingerprintError {
    fn from(error: std::io::Error) -> Self {
        FingerprintError::IoError(error.to_string())
    }
}
