//! Adapter layer modules for external system integration.
//!
//! Provides adapters for:
//! - Resolving package identifiers to on-disk archives

pub mod package_locator;

pub use package_locator::{DirectoryPackageLocator, PackageLocator};
