pub mod constants;
pub mod crypto;
pub mod entry;
pub mod fingerprint;
pub mod ordering;
pub mod report;
