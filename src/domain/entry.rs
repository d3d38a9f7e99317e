//! Signature entries read out of a package archive.

use std::fmt;

pub use super::constants::{SIGNATURE_DIR_PREFIX, SIGNATURE_SUFFIXES};

/// Whether an archive entry name denotes a signature block.
///
/// The prefix and suffix matches are case-sensitive: `META-INF/CERT.rsa` is
/// not a signature entry.
#[must_use]
pub fn is_signature_entry_name(name: &str) -> bool {
    name.starts_with(SIGNATURE_DIR_PREFIX)
        && SIGNATURE_SUFFIXES
            .iter()
            .any(|suffix| name.ends_with(suffix))
}

/// Immutable snapshot of one signature block and its bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SignatureEntry {
    name: String,
    content: Box<[u8]>,
}

impl SignatureEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content: content.into_boxed_slice(),
        }
    }
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

impl fmt::Debug for SignatureEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SignatureEntry(name={}, len={})",
            self.name,
            self.content.len()
        )
    }
}
