//! Checkpoint error types.

use crate::core::StepId;
use thiserror::Error;

/// Errors raised while saving or restoring a wizard checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// The checkpoint was written by a newer format.
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The wizard's state machine cannot reach the saved step.
    #[error("Checkpoint step {0} is not part of this wizard")]
    UnknownStep(StepId),
}
