//! Key material and signature extraction from X.509 certificates.
//!
//! Key and signature bytes come from the OpenSSL certificate objects, so a
//! certificate OpenSSL accepts always contributes to the fingerprint even
//! when its encoding is not strict DER.

use der::asn1::ObjectIdentifier;
use der::Decode;
use openssl::x509::{X509NameRef, X509Ref};
use x509_cert::spki::SubjectPublicKeyInfoOwned;
use x509_cert::Certificate;

use crate::domain::constants::{DSA_OID, RSA_ENCRYPTION_OID};
use crate::domain::crypto::{KeyMaterial, SignerCertificate};
use crate::domain::report::CertificateSummary;

/// Algorithm label for keys whose algorithm identifier cannot be read.
pub const UNKNOWN_KEY_ALGORITHM: &str = "unknown";

/// Stateless extractor turning a certificate into fingerprint inputs.
pub struct KeyExtractor;

impl KeyExtractor {
    /// Key material plus the certificate's own signature bytes.
    ///
    /// Total for any decoded certificate: the signature is always present and
    /// keys that cannot be interpreted are tagged unsupported.
    #[must_use]
    pub fn extract(certificate: &X509Ref) -> SignerCertificate {
        let key = Self::key_material(certificate);
        let signature = certificate.signature().as_slice().to_vec();
        SignerCertificate::new(key, signature)
    }

    /// RSA modulus or DSA public value, as minimal two's-complement bytes.
    #[must_use]
    pub fn key_material(certificate: &X509Ref) -> KeyMaterial {
        let Some(oid) = Self::key_algorithm_oid(certificate) else {
            log::warn!("Public key algorithm could not be determined");
            return KeyMaterial::unsupported(UNKNOWN_KEY_ALGORITHM);
        };

        let decoded = if oid == RSA_ENCRYPTION_OID {
            certificate
                .public_key()
                .and_then(|key| key.rsa())
                .map(|rsa| KeyMaterial::rsa(twos_complement(&rsa.n().to_vec())))
        } else if oid == DSA_OID {
            certificate
                .public_key()
                .and_then(|key| key.dsa())
                .map(|dsa| KeyMaterial::dsa(twos_complement(&dsa.pub_key().to_vec())))
        } else {
            log::debug!("Public key algorithm {oid} contributes no key bytes");
            return KeyMaterial::unsupported(oid.to_string());
        };

        decoded.unwrap_or_else(|e| {
            log::warn!("Malformed public key for algorithm {oid}: {e}");
            KeyMaterial::unsupported(oid.to_string())
        })
    }

    /// Object identifier of the subject public key algorithm.
    ///
    /// Read from OpenSSL's canonical re-encoding of the public key. Keys
    /// OpenSSL cannot load fall back to a strict parse of the certificate.
    #[must_use]
    pub fn key_algorithm_oid(certificate: &X509Ref) -> Option<ObjectIdentifier> {
        let from_key = certificate
            .public_key()
            .and_then(|key| key.public_key_to_der())
            .ok()
            .and_then(|der| SubjectPublicKeyInfoOwned::from_der(&der).ok());
        if let Some(spki) = from_key {
            return Some(spki.algorithm.oid);
        }

        certificate
            .to_der()
            .ok()
            .and_then(|der| Certificate::from_der(&der).ok())
            .map(|cert| cert.tbs_certificate.subject_public_key_info.algorithm.oid)
    }

    /// Descriptive summary for reports.
    #[must_use]
    pub fn summarize(certificate: &X509Ref, extracted: &SignerCertificate) -> CertificateSummary {
        let key_algorithm_oid = match extracted.key() {
            KeyMaterial::Unsupported { algorithm } => algorithm.clone(),
            _ => Self::key_algorithm_oid(certificate)
                .map_or_else(|| UNKNOWN_KEY_ALGORITHM.to_string(), |oid| oid.to_string()),
        };
        let serial = certificate
            .serial_number()
            .to_bn()
            .and_then(|bn| bn.to_hex_str().map(|hex| hex.to_string()))
            .unwrap_or_default();

        CertificateSummary {
            subject: name_to_string(certificate.subject_name()),
            issuer: name_to_string(certificate.issuer_name()),
            serial,
            key_algorithm: extracted.key().algorithm(),
            key_algorithm_oid,
            key_len: extracted.key_bytes().map_or(0, <[u8]>::len),
            signature_len: extracted.signature().len(),
        }
    }
}

/// Minimal big-endian two's-complement form of a non-negative magnitude:
/// leading zeros stripped, one zero byte prepended when the top bit is set,
/// and a single zero byte for zero.
#[must_use]
pub fn twos_complement(magnitude: &[u8]) -> Vec<u8> {
    let start = magnitude
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(magnitude.len());
    let trimmed = &magnitude[start..];
    match trimmed.first() {
        None => vec![0],
        Some(&top) if top & 0x80 != 0 => {
            let mut out = Vec::with_capacity(trimmed.len() + 1);
            out.push(0);
            out.extend_from_slice(trimmed);
            out
        }
        Some(_) => trimmed.to_vec(),
    }
}

// RFC 4514 order: last RDN first.
fn name_to_string(name: &X509NameRef) -> String {
    let mut parts: Vec<String> = name
        .entries()
        .map(|entry| {
            let key = entry
                .object()
                .nid()
                .short_name()
                .map_or_else(|_| entry.object().to_string(), str::to_string);
            let value = entry.data().as_utf8().map_or_else(
                |_| hex::encode_upper(entry.data().as_slice()),
                |value| value.to_string(),
            );
            format!("{key}={value}")
        })
        .collect();
    parts.reverse();
    parts.join(",")
}
