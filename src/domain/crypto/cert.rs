use serde::Serialize;
use std::fmt;

/// Algorithm tag of a certificate's public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyAlgorithm {
    Rsa,
    Dsa,
    Unsupported,
}

impl KeyAlgorithm {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAlgorithm::Rsa => "RSA",
            KeyAlgorithm::Dsa => "DSA",
            KeyAlgorithm::Unsupported => "unsupported",
        }
    }
}

/// Public key material contributing to the key half of a fingerprint.
///
/// Integers are stored in big-endian minimal two's-complement form, so a
/// modulus with its top bit set carries a leading zero byte.
#[derive(Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    Rsa { modulus: Box<[u8]> },
    Dsa { public_value: Box<[u8]> },
    /// Any other algorithm; contributes no key bytes.
    Unsupported { algorithm: String },
}

impl KeyMaterial {
    #[must_use]
    pub fn rsa(modulus: Vec<u8>) -> Self {
        KeyMaterial::Rsa {
            modulus: modulus.into_boxed_slice(),
        }
    }
    #[must_use]
    pub fn dsa(public_value: Vec<u8>) -> Self {
        KeyMaterial::Dsa {
            public_value: public_value.into_boxed_slice(),
        }
    }
    #[must_use]
    pub fn unsupported(algorithm: impl Into<String>) -> Self {
        KeyMaterial::Unsupported {
            algorithm: algorithm.into(),
        }
    }
    #[must_use]
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            KeyMaterial::Rsa { .. } => KeyAlgorithm::Rsa,
            KeyMaterial::Dsa { .. } => KeyAlgorithm::Dsa,
            KeyMaterial::Unsupported { .. } => KeyAlgorithm::Unsupported,
        }
    }
    /// Key bytes, absent for unsupported algorithms.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            KeyMaterial::Rsa { modulus } => Some(&modulus[..]),
            KeyMaterial::Dsa { public_value } => Some(&public_value[..]),
            KeyMaterial::Unsupported { .. } => None,
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMaterial::Rsa { modulus } => write!(f, "Rsa(len={})", modulus.len()),
            KeyMaterial::Dsa { public_value } => write!(f, "Dsa(len={})", public_value.len()),
            KeyMaterial::Unsupported { algorithm } => write!(f, "Unsupported({algorithm})"),
        }
    }
}

/// Key material and raw signature bytes of one certificate in a path.
#[derive(Clone, PartialEq, Eq)]
pub struct SignerCertificate {
    key: KeyMaterial,
    signature: Box<[u8]>,
}

impl SignerCertificate {
    #[must_use]
    pub fn new(key: KeyMaterial, signature: Vec<u8>) -> Self {
        Self {
            key,
            signature: signature.into_boxed_slice(),
        }
    }
    #[must_use]
    pub fn key(&self) -> &KeyMaterial {
        &self.key
    }
    #[must_use]
    pub fn key_bytes(&self) -> Option<&[u8]> {
        self.key.as_bytes()
    }
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }
}

impl fmt::Debug for SignerCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SignerCertificate(key={:?}, signature_len={})",
            self.key,
            self.signature.len()
        )
    }
}
