//! Checkpoint and resume for wizard sessions.
//!
//! A checkpoint captures the active step, the session record and the
//! navigation history so a half-completed wizard survives a reload. Hooks,
//! validators and the state machine itself are not serialized: a checkpoint
//! is restored into a controller built with the same step graph.

use crate::controller::WizardController;
use crate::core::{FieldErrors, StepHistory, StepId, Transition, WizardEvent, WizardStateMachine};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a wizard session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WizardCheckpoint<T> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Step the wizard was on
    pub step: StepId,

    /// Latest form values
    pub values: T,

    /// Validation errors of the active step
    pub errors: FieldErrors,

    /// Pending on-next hook errors
    pub on_next_errors: FieldErrors,

    /// Committed step changes
    pub history: StepHistory,
}

impl<T: Serialize + DeserializeOwned> WizardCheckpoint<T> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }
}

impl<T> WizardCheckpoint<T> {
    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version > CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

impl<T, M> WizardController<T, M>
where
    T: Clone,
    M: WizardStateMachine<T>,
{
    /// Snapshot the current session.
    pub fn checkpoint(&self) -> WizardCheckpoint<T> {
        WizardCheckpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            step: self.current_step(),
            values: self.session.values.clone(),
            errors: self.session.errors.clone(),
            on_next_errors: self.session.on_next_errors.clone(),
            history: self.history.clone(),
        }
    }

    /// Reposition the wizard and reinstate the session from `checkpoint`.
    ///
    /// The step is reached through a GOTO on the state machine regardless of
    /// read-only mode. Fails without touching the controller when the version
    /// is unsupported or the machine does not know the step.
    pub fn restore(&mut self, checkpoint: WizardCheckpoint<T>) -> Result<(), CheckpointError> {
        checkpoint.check_version()?;

        let machine = self.machine.transition_to(
            Transition::Goto,
            WizardEvent::Goto {
                step: &checkpoint.step,
            },
        );
        if machine.current_step() != checkpoint.step {
            return Err(CheckpointError::UnknownStep(checkpoint.step));
        }

        tracing::debug!(
            id = %checkpoint.id,
            step = %checkpoint.step,
            transitions = checkpoint.history.len(),
            "wizard restored"
        );

        self.machine = machine;
        self.session.values = checkpoint.values;
        self.session.errors = checkpoint.errors;
        self.session.on_next_errors = checkpoint.on_next_errors;
        self.history = checkpoint.history;
        Ok(())
    }
}
