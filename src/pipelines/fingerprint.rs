//! `FingerprintWorkflow`: the full scan, order, parse, extract, accumulate
//! and hash pipeline for one package archive.
//!
//! Each run owns its scanner and accumulator, so runs over different (or the
//! same) archives never share state and can execute on any thread.

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::adapters::PackageLocator;
use crate::domain::crypto::KeyMaterial;
use crate::domain::fingerprint::{Fingerprint, FingerprintAccumulator};
use crate::domain::ordering::order_by_name;
use crate::domain::report::{DiagnosticKind, EntryDiagnostic, EntrySummary, FingerprintReport};
use crate::infra::config::{FingerprintConfiguration, DEFAULT_MAX_ENTRY_BYTES};
use crate::infra::error::{FingerprintError, FingerprintResult};
use crate::services::{ArchiveScanner, CertPathParser, EntryLocation, KeyExtractor};

/// Orchestrates fingerprinting of a package archive.
#[derive(Debug, Clone)]
pub struct FingerprintWorkflow {
    max_entry_bytes: u64,
}

impl Default for FingerprintWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl FingerprintWorkflow {
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_entry_bytes: DEFAULT_MAX_ENTRY_BYTES,
        }
    }

    #[must_use]
    pub fn from_config(config: &FingerprintConfiguration) -> Self {
        Self::new().with_max_entry_bytes(config.max_entry_bytes)
    }

    #[must_use]
    pub fn with_max_entry_bytes(mut self, limit: u64) -> Self {
        self.max_entry_bytes = limit;
        self
    }

    /// Fingerprint one archive, returning the per-entry report.
    ///
    /// Only container-level failures are returned as errors; entries that
    /// fail to read or decode are skipped and recorded as diagnostics.
    pub fn run<P: AsRef<Path>>(&self, path: P) -> FingerprintResult<FingerprintReport> {
        let path = path.as_ref();
        let mut scanner = ArchiveScanner::open(path)?.with_max_entry_bytes(self.max_entry_bytes);

        let mut locations = scanner.signature_entries();
        order_by_name(&mut locations, |location| location.name.as_str());
        log::debug!(
            "{}: {} signature entries",
            path.display(),
            locations.len()
        );

        let mut accumulator = FingerprintAccumulator::new();
        let mut entries = Vec::with_capacity(locations.len());
        let mut diagnostics = Vec::new();

        for location in &locations {
            if let Some(summary) =
                Self::process_entry(&mut scanner, location, &mut accumulator, &mut diagnostics)?
            {
                entries.push(summary);
            }
        }

        let fingerprint = accumulator.finish();
        match fingerprint {
            Some(fp) => log::debug!("{}: fingerprint {fp}", path.display()),
            None => log::debug!("{}: no key material collected", path.display()),
        }

        Ok(FingerprintReport {
            archive: path.to_path_buf(),
            fingerprint,
            key_hex_len: accumulator.key_hex().len(),
            sign_hex_len: accumulator.sign_hex().len(),
            entries,
            diagnostics,
        })
    }

    /// Fingerprint one archive, or nothing when it is unreadable or carries
    /// no supported key material.
    #[must_use]
    pub fn fingerprint<P: AsRef<Path>>(&self, path: P) -> Option<Fingerprint> {
        match self.run(path.as_ref()) {
            Ok(report) => report.fingerprint,
            Err(e) => {
                log::warn!("{e}");
                None
            }
        }
    }

    /// Fingerprint of an installed package, resolved through `locator`.
    ///
    /// Unknown packages and unreadable archives both yield nothing.
    #[must_use]
    pub fn installed_package<L: PackageLocator + ?Sized>(
        &self,
        locator: &L,
        package_id: &str,
    ) -> Option<Fingerprint> {
        let Some(path) = locator.locate(package_id) else {
            log::debug!("Package {package_id} could not be resolved");
            return None;
        };
        self.fingerprint(path)
    }

    /// Run over many archives; results keep the input order.
    ///
    /// With `parallel` set each archive runs as an independent rayon task.
    pub fn run_many(
        &self,
        paths: &[PathBuf],
        parallel: bool,
    ) -> Vec<FingerprintResult<FingerprintReport>> {
        if parallel {
            paths.par_iter().map(|path| self.run(path)).collect()
        } else {
            paths.iter().map(|path| self.run(path)).collect()
        }
    }

    fn process_entry(
        scanner: &mut ArchiveScanner,
        location: &EntryLocation,
        accumulator: &mut FingerprintAccumulator,
        diagnostics: &mut Vec<EntryDiagnostic>,
    ) -> FingerprintResult<Option<EntrySummary>> {
        let entry = match scanner.read_entry(location) {
            Ok(entry) => entry,
            Err(e) if e.is_entry_local() => {
                log::warn!("Skipping {}: {e}", location.name);
                diagnostics.push(diagnostic_for(&location.name, e));
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let certificates = match CertPathParser::parse_entry(&entry) {
            Ok(certificates) => certificates,
            Err(e) => {
                log::warn!("Skipping {}: {e}", location.name);
                diagnostics.push(diagnostic_for(&location.name, e));
                return Ok(Some(EntrySummary {
                    name: location.name.clone(),
                    size: entry.content().len(),
                    certificates: Vec::new(),
                }));
            }
        };

        let mut summaries = Vec::with_capacity(certificates.len());
        for (index, certificate) in certificates.iter().enumerate() {
            let extracted = KeyExtractor::extract(certificate);
            if let KeyMaterial::Unsupported { algorithm } = extracted.key() {
                log::warn!(
                    "{} certificate #{index}: unsupported key algorithm {algorithm}",
                    location.name
                );
                diagnostics.push(EntryDiagnostic {
                    entry: location.name.clone(),
                    kind: DiagnosticKind::UnsupportedKey {
                        certificate_index: index,
                        algorithm_oid: algorithm.clone(),
                    },
                });
            }
            accumulator.push(&extracted);
            summaries.push(KeyExtractor::summarize(certificate, &extracted));
        }

        Ok(Some(EntrySummary {
            name: location.name.clone(),
            size: entry.content().len(),
            certificates: summaries,
        }))
    }
}

fn diagnostic_for(entry: &str, error: FingerprintError) -> EntryDiagnostic {
    let kind = match error {
        FingerprintError::EntryTooLarge { size, limit, .. } => DiagnosticKind::TooLarge { size, limit },
        FingerprintError::EntryDecodeFailure { reason, .. } => DiagnosticKind::DecodeFailure { reason },
        other => DiagnosticKind::DecodeFailure {
            reason: other.to_string(),
        },
    };
    EntryDiagnostic {
        entry: entry.to_string(),
        kind,
    }
}
