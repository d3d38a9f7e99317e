//! sigprint
//!
//! Derives a stable signing-identity fingerprint for a signed ZIP package
//! (JAR, APK) from the certificates in its `META-INF/*.RSA` and
//! `META-INF/*.DSA` signature blocks. Two builds carrying the same
//! fingerprint were signed with the same keys.
//!
//! The fingerprint is not a trust decision: no chain, expiry or revocation
//! checks are made and signatures are never verified against the content.
//!
//! ```no_run
//! let left = sigprint::fingerprint("app-v1.apk");
//! let right = sigprint::fingerprint("app-v2.apk");
//! if let (Some(left), Some(right)) = (left, right) {
//!     println!("same signer: {}", left == right);
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod infra;
pub mod pipelines;
pub mod services;

use std::path::{Path, PathBuf};

pub use adapters::{DirectoryPackageLocator, PackageLocator};
pub use domain::crypto::{string_hash, KeyAlgorithm, KeyMaterial, SignerCertificate};
pub use domain::entry::{is_signature_entry_name, SignatureEntry};
pub use domain::fingerprint::{Fingerprint, FingerprintAccumulator};
pub use domain::ordering::{compare_ignore_case, order_by_name};
pub use domain::report::{
    CertificateSummary, DiagnosticKind, EntryDiagnostic, EntrySummary, FingerprintReport,
    SignerComparison,
};
pub use infra::config::{ConfigManager, ExportFormat, FingerprintConfiguration};
pub use infra::error::{FingerprintError, FingerprintResult};
pub use pipelines::{CompareWorkflow, FingerprintWorkflow};

/// Fingerprint of the archive at `path`, as `"<key_hash>,<sign_hash>"`.
///
/// Returns `None` when the archive cannot be opened or when none of its
/// signature blocks yields supported (RSA or DSA) key material.
#[must_use]
pub fn fingerprint<P: AsRef<Path>>(path: P) -> Option<String> {
    FingerprintWorkflow::new()
        .fingerprint(path)
        .map(|fp| fp.to_string())
}

/// Like [`fingerprint`], but reports an unreadable archive as an error
/// instead of folding it into `None`.
pub fn try_fingerprint<P: AsRef<Path>>(path: P) -> FingerprintResult<Option<Fingerprint>> {
    Ok(FingerprintWorkflow::new().run(path)?.fingerprint)
}

/// Fingerprint plus per-entry detail and recovered diagnostics.
pub fn fingerprint_report<P: AsRef<Path>>(path: P) -> FingerprintResult<FingerprintReport> {
    FingerprintWorkflow::new().run(path)
}

/// Fingerprints for many archives, in input order.
#[must_use]
pub fn fingerprint_many(paths: &[PathBuf], parallel: bool) -> Vec<Option<String>> {
    FingerprintWorkflow::new()
        .run_many(paths, parallel)
        .into_iter()
        .map(|result| match result {
            Ok(report) => report.fingerprint.map(|fp| fp.to_string()),
            Err(e) => {
                log::warn!("{e}");
                None
            }
        })
        .collect()
}

/// Whether two archives were signed by the same identity.
pub fn compare_signers<L: AsRef<Path>, R: AsRef<Path>>(
    left: L,
    right: R,
) -> FingerprintResult<SignerComparison> {
    CompareWorkflow::default().run(left, right)
}

/// Fingerprint of an installed package, resolved through `locator`.
///
/// Unknown packages and unreadable archives both yield `None`. Uses the
/// default entry size limit; see [`FingerprintWorkflow::installed_package`].
#[must_use]
pub fn installed_package_signature<L: PackageLocator + ?Sized>(
    locator: &L,
    package_id: &str,
) -> Option<String> {
    FingerprintWorkflow::new()
        .installed_package(locator, package_id)
        .map(|fp| fp.to_string())
}
