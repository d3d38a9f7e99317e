//! Package identifier resolution.
//!
//! The fingerprint pipeline only ever consumes an archive path. Turning a
//! package identifier into that path belongs to the host platform, which
//! plugs in through [`PackageLocator`]. [`DirectoryPackageLocator`] covers the
//! common case of packages laid out under a few directories on disk.

use std::path::{Path, PathBuf};

/// Resolves a package identifier to its archive, or nothing when unknown.
pub trait PackageLocator {
    fn locate(&self, package_id: &str) -> Option<PathBuf>;
}

impl<F> PackageLocator for F
where
    F: Fn(&str) -> Option<PathBuf>,
{
    fn locate(&self, package_id: &str) -> Option<PathBuf> {
        self(package_id)
    }
}

/// Looks for `<root>/<id>.apk`, then `<root>/<id>/base.apk`, in each root.
#[derive(Debug, Clone, Default)]
pub struct DirectoryPackageLocator {
    roots: Vec<PathBuf>,
}

impl DirectoryPackageLocator {
    #[must_use]
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn candidates(root: &Path, package_id: &str) -> [PathBuf; 2] {
        [
            root.join(format!("{package_id}.apk")),
            root.join(package_id).join("base.apk"),
        ]
    }
}

impl PackageLocator for DirectoryPackageLocator {
    fn locate(&self, package_id: &str) -> Option<PathBuf> {
        if !is_valid_package_id(package_id) {
            log::debug!("Rejecting package identifier {package_id:?}");
            return None;
        }

        let found = self
            .roots
            .iter()
            .flat_map(|root| Self::candidates(root, package_id))
            .find(|candidate| candidate.is_file());

        if found.is_none() {
            log::debug!("Package {package_id} not found in {} roots", self.roots.len());
        }
        found
    }
}

// Identifiers are dotted names; anything that could escape a root is refused.
fn is_valid_package_id(package_id: &str) -> bool {
    !package_id.is_empty()
        && package_id != "."
        && package_id != ".."
        && !package_id.contains(['/', '\\'])
        && !package_id.chars().any(char::is_whitespace)
}
