//! Mutable per-session record owned by the controller.

use crate::core::FieldErrors;
use serde::{Deserialize, Serialize};

/// Latest values and the two independent error sources of a wizard session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WizardSession<T> {
    /// Latest known form values.
    pub values: T,
    /// Last validation result, restricted to the fields of the active step.
    pub errors: FieldErrors,
    /// Errors returned by the on-next hook on the last Next request.
    pub on_next_errors: FieldErrors,
}

impl<T> WizardSession<T> {
    pub fn new(values: T) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
            on_next_errors: FieldErrors::new(),
        }
    }
}
