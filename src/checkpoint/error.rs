//! Checkpoint error types.

use thiserror::Error;

/// Errors from writing or loading a shipment checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckpointError {
    #[error("could not encode checkpoint: {0}")]
    Encode(String),

    #[error("could not decode checkpoint: {0}")]
    Decode(String),

    /// Written by an incompatible format version
    #[error("checkpoint format version {found} is not supported (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The snapshot contradicts itself
    #[error("checkpoint rejected: {0}")]
    Inconsistent(String),
}
