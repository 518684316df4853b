//! External hook run before advancing to the next step.

use crate::core::FieldErrors;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type HookFn<T> = dyn Fn(&T, &str, &mut dyn FnMut(&str, Value)) -> FieldErrors + Send + Sync;

/// Side-effecting check run on every Next request.
///
/// The hook receives the current values, the active step and a field setter
/// it may use to derive fields before the wizard advances. A non-empty
/// result blocks the transition.
///
/// # Example
///
/// ```rust
/// use stepwise::controller::NextHook;
/// use stepwise::core::FieldErrors;
/// use serde_json::{json, Value};
///
/// struct Participants {
///     direct: bool,
///     beneficiary_bank_id: Option<String>,
/// }
///
/// let hook = NextHook::new(|values: &Participants, step: &str, set_field_value: &mut dyn FnMut(&str, Value)| {
///     if step == "PARTICIPANTS" && values.direct {
///         set_field_value("beneficiaryBankId", json!(null));
///     }
///     if step == "PARTICIPANTS" && !values.direct && values.beneficiary_bank_id.is_none() {
///         return FieldErrors::from_iter([("beneficiaryBankId", "Select an advising bank")]);
///     }
///     FieldErrors::new()
/// });
///
/// let mut writes = Vec::new();
/// let errors = hook.run(
///     &Participants { direct: true, beneficiary_bank_id: None },
///     "PARTICIPANTS",
///     &mut |field: &str, value: Value| writes.push((field.to_string(), value)),
/// );
///
/// assert!(errors.is_empty());
/// assert_eq!(writes, vec![("beneficiaryBankId".to_string(), json!(null))]);
/// ```
pub struct NextHook<T> {
    hook: Arc<HookFn<T>>,
}

impl<T> NextHook<T> {
    pub fn new<F>(hook: F) -> Self
    where
        F: Fn(&T, &str, &mut dyn FnMut(&str, Value)) -> FieldErrors + Send + Sync + 'static,
    {
        Self {
            hook: Arc::new(hook),
        }
    }

    pub fn run(
        &self,
        values: &T,
        step: &str,
        set_field_value: &mut dyn FnMut(&str, Value),
    ) -> FieldErrors {
        (self.hook)(values, step, set_field_value)
    }
}

impl<T> Clone for NextHook<T> {
    fn clone(&self) -> Self {
        Self {
            hook: Arc::clone(&self.hook),
        }
    }
}

impl<T> fmt::Debug for NextHook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NextHook").finish_non_exhaustive()
    }
}
