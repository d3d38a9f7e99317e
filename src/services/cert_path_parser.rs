//! Certificate-path decoding for signature blocks.
//!
//! A signature block is a PKCS#7 `SignedData` whose `certificates` field
//! carries the signer's X.509 chain. Both the container and the certificates
//! are decoded with OpenSSL, which accepts the BER encodings and non-canonical
//! fields some signing tools emit.

use openssl::pkcs7::Pkcs7;
use openssl::x509::X509;

use crate::domain::entry::SignatureEntry;
use crate::infra::error::{FingerprintError, FingerprintResult};

/// Stateless PKCS#7 certificate-path parser.
pub struct CertPathParser;

impl CertPathParser {
    /// Decode the certificates of a PKCS#7 signed-data container, in the
    /// order they are encoded.
    pub fn parse(pkcs7_der: &[u8]) -> FingerprintResult<Vec<X509>> {
        let pkcs7 = Pkcs7::from_der(pkcs7_der)?;
        let signed = pkcs7.signed().ok_or_else(|| {
            FingerprintError::CertificateError("PKCS#7 content is not signed-data".to_string())
        })?;

        Ok(signed
            .certificates()
            .map(|stack| stack.iter().map(ToOwned::to_owned).collect())
            .unwrap_or_default())
    }

    /// Decode one signature entry. Every failure is reported as a
    /// [`FingerprintError::EntryDecodeFailure`] naming the entry.
    pub fn parse_entry(entry: &SignatureEntry) -> FingerprintResult<Vec<X509>> {
        Self::parse(entry.content()).map_err(|e| FingerprintError::EntryDecodeFailure {
            entry: entry.name().to_string(),
            reason: e.to_string(),
        })
    }
}
