//! Service layer module root.
//! Stateless services for each stage of the fingerprint pipeline.

pub mod archive_scanner;
pub mod cert_path_parser;
pub mod key_extractor;

pub use archive_scanner::{ArchiveScanner, EntryLocation};
pub use cert_path_parser::CertPathParser;
pub use key_extractor::KeyExtractor;
