//! Archive scanning service.
//!
//! Opens a package as a ZIP container and reads its signature entries. The
//! archive handle is owned by the scanner, so it is released exactly once when
//! the scanner goes out of scope, on success and failure alike.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

use crate::domain::entry::{is_signature_entry_name, SignatureEntry};
use crate::infra::config::DEFAULT_MAX_ENTRY_BYTES;
use crate::infra::error::{FingerprintError, FingerprintResult};

/// Position and name of an entry inside the archive's central directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLocation {
    pub index: usize,
    pub name: String,
}

/// Scanner over one opened package archive.
pub struct ArchiveScanner {
    path: PathBuf,
    archive: ZipArchive<File>,
    max_entry_bytes: u64,
}

impl ArchiveScanner {
    /// Open `path` as a ZIP archive.
    ///
    /// Missing files, unreadable files and files that are not ZIP containers
    /// all fail with [`FingerprintError::ArchiveUnreadable`].
    pub fn open<P: AsRef<Path>>(path: P) -> FingerprintResult<Self> {
        let path = path.as_ref().to_path_buf();
        let unreadable = |reason: String| FingerprintError::ArchiveUnreadable {
            path: path.display().to_string(),
            reason,
        };

        let file = File::open(&path).map_err(|e| unreadable(e.to_string()))?;
        let archive = ZipArchive::new(file).map_err(|e| unreadable(e.to_string()))?;
        log::debug!(
            "Opened archive {} ({} entries)",
            path.display(),
            archive.len()
        );

        Ok(Self {
            path,
            archive,
            max_entry_bytes: DEFAULT_MAX_ENTRY_BYTES,
        })
    }

    /// Limit the uncompressed size of signature entries that will be read.
    #[must_use]
    pub fn with_max_entry_bytes(mut self, limit: u64) -> Self {
        self.max_entry_bytes = limit;
        self
    }

    /// Signature entries, in central directory order (not sorted).
    #[must_use]
    pub fn signature_entries(&self) -> Vec<EntryLocation> {
        (0..self.archive.len())
            .filter_map(|index| {
                let name = self.archive.name_for_index(index)?;
                is_signature_entry_name(name).then(|| EntryLocation {
                    index,
                    name: name.to_string(),
                })
            })
            .collect()
    }

    /// Read one entry fully into memory.
    ///
    /// Failing to open the entry stream is a container-level failure
    /// ([`FingerprintError::ArchiveUnreadable`]). Errors while inflating the
    /// stream and oversized entries are local to the entry
    /// ([`FingerprintError::is_entry_local`]).
    pub fn read_entry(&mut self, location: &EntryLocation) -> FingerprintResult<SignatureEntry> {
        let limit = self.max_entry_bytes;
        let mut file = self.archive.by_index(location.index).map_err(|e| {
            FingerprintError::ArchiveUnreadable {
                path: self.path.display().to_string(),
                reason: format!("cannot open entry {}: {e}", location.name),
            }
        })?;

        let declared = file.size();
        if declared > limit {
            return Err(FingerprintError::EntryTooLarge {
                entry: location.name.clone(),
                size: declared,
                limit,
            });
        }

        let mut content = Vec::with_capacity(usize::try_from(declared).unwrap_or_default());
        (&mut file)
            .take(limit.saturating_add(1))
            .read_to_end(&mut content)
            .map_err(|e| FingerprintError::EntryDecodeFailure {
                entry: location.name.clone(),
                reason: e.to_string(),
            })?;

        let actual = content.len() as u64;
        if actual > limit {
            return Err(FingerprintError::EntryTooLarge {
                entry: location.name.clone(),
                size: actual,
                limit,
            });
        }

        log::debug!("Read signature entry {} ({actual} bytes)", location.name);
        Ok(SignatureEntry::new(location.name.clone(), content))
    }
}
