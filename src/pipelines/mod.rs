//! Workflow pipelines orchestrating stateless services.

pub mod compare;
pub mod fingerprint;

pub use compare::CompareWorkflow;
pub use fingerprint::FingerprintWorkflow;
