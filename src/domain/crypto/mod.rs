//! Foundational cryptographic domain types.
//!
//! Provides:
//! - Tagged public key material extracted from a certificate
//! - The per-certificate key/signature pair folded into a fingerprint
//! - The 32-bit polynomial string hash used for the fingerprint halves

mod cert;
mod hash;

pub use cert::{KeyAlgorithm, KeyMaterial, SignerCertificate};
pub use hash::string_hash;
