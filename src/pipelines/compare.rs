//! `CompareWorkflow`: decide whether two archives share a signing identity.

use std::path::Path;

use crate::domain::report::SignerComparison;
use crate::infra::error::FingerprintResult;
use crate::pipelines::fingerprint::FingerprintWorkflow;

/// Fingerprints two archives and compares the results.
#[derive(Debug, Clone, Default)]
pub struct CompareWorkflow {
    fingerprints: FingerprintWorkflow,
}

impl CompareWorkflow {
    #[must_use]
    pub fn new(fingerprints: FingerprintWorkflow) -> Self {
        Self { fingerprints }
    }

    /// Compare the signers of `left` and `right`.
    ///
    /// Unreadable archives are errors here; archives without supported key
    /// material compare as [`SignerComparison::Unsigned`].
    pub fn run<L: AsRef<Path>, R: AsRef<Path>>(
        &self,
        left: L,
        right: R,
    ) -> FingerprintResult<SignerComparison> {
        let left = self.fingerprints.run(left)?;
        let right = self.fingerprints.run(right)?;
        Ok(SignerComparison::from_fingerprints(
            left.fingerprint,
            right.fingerprint,
        ))
    }
}
