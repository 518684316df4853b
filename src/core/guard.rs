//! Guard predicates for wizard navigation.
//!
//! Two kinds live here. [`Guard`] wraps a pure predicate over the form values
//! and is used by step graphs to route NEXT dynamically. The free functions
//! are the navigation guards the controller consults before committing a
//! transition. Everything in this module is pure.

use super::errors::{FieldErrors, Touched};
use super::machine::{Transition, WizardInternalState};
use std::fmt;
use std::sync::Arc;

/// Pure predicate over form values.
///
/// # Example
///
/// ```rust
/// use stepwise::core::Guard;
///
/// struct Application {
///     direct: bool,
/// }
///
/// let is_direct = Guard::new(|values: &Application| values.direct);
///
/// assert!(is_direct.check(&Application { direct: true }));
/// assert!(!is_direct.check(&Application { direct: false }));
/// ```
pub struct Guard<T> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Guard<T> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and free of side effects.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the predicate against `values`.
    pub fn check(&self, values: &T) -> bool {
        (self.predicate)(values)
    }
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

/// True when the active step declares no PREVIOUS transition.
pub fn is_first_step(state: &WizardInternalState) -> bool {
    state.target(Transition::Previous).is_none()
}

/// True when the active step declares no NEXT transition.
///
/// On the last step the host offers submit instead of Next.
pub fn is_last_step(state: &WizardInternalState) -> bool {
    state.target(Transition::Next).is_none()
}

/// Forward navigation requires both error sources to be empty.
pub fn can_go_next(errors: &FieldErrors, on_next_errors: &FieldErrors) -> bool {
    errors.is_empty() && on_next_errors.is_empty()
}

/// Errors on fields the user has already interacted with.
pub fn touched_errors(errors: &FieldErrors, touched: &Touched) -> FieldErrors {
    errors.touched_in(touched)
}

/// Backward navigation is only blocked by errors on touched fields.
pub fn can_go_previous(errors: &FieldErrors, touched: &Touched) -> bool {
    touched_errors(errors, touched).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::machine::{StepDefinition, WizardContext};
    use std::collections::BTreeMap;

    fn state_with(on: &[(Transition, &str)]) -> WizardInternalState {
        let definition = StepDefinition {
            on: on.iter().map(|(t, s)| (*t, s.to_string())).collect(),
            fields: vec![],
        };
        WizardInternalState {
            step: "LC_DETAILS".to_string(),
            states: BTreeMap::from([("LC_DETAILS".to_string(), definition)]),
            context: WizardContext::default(),
        }
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new(|v: &u32| *v > 10);

        assert_eq!(guard.check(&11), guard.check(&11));
        assert!(!guard.check(&3));
    }

    #[test]
    fn cloned_guard_shares_predicate() {
        let guard = Guard::new(|v: &&str| v.starts_with("LC"));
        let cloned = guard.clone();

        assert!(cloned.check(&"LC_TYPE"));
        assert!(!cloned.check(&"REVIEW"));
    }

    #[test]
    fn middle_step_is_neither_first_nor_last() {
        let state = state_with(&[
            (Transition::Next, "LC_DOCUMENTS"),
            (Transition::Previous, "LC_TYPE"),
        ]);

        assert!(!is_first_step(&state));
        assert!(!is_last_step(&state));
    }

    #[test]
    fn missing_next_marks_last_step() {
        let state = state_with(&[(Transition::Previous, "LC_TYPE")]);

        assert!(is_last_step(&state));
        assert!(!is_first_step(&state));
    }

    #[test]
    fn missing_previous_marks_first_step() {
        let state = state_with(&[(Transition::Next, "LC_DOCUMENTS")]);

        assert!(is_first_step(&state));
        assert!(!is_last_step(&state));
    }

    #[test]
    fn next_needs_both_maps_empty() {
        let empty = FieldErrors::new();
        let some = FieldErrors::from_iter([("amount", "required")]);

        assert!(can_go_next(&empty, &empty));
        assert!(!can_go_next(&some, &empty));
        assert!(!can_go_next(&empty, &some));
    }

    #[test]
    fn previous_ignores_untouched_errors() {
        let errors = FieldErrors::from_iter([("documentPresentationDeadlineDays", "error")]);

        assert!(can_go_previous(&errors, &Touched::new()));

        let touched = Touched::from_iter([("documentPresentationDeadlineDays", true)]);
        assert!(!can_go_previous(&errors, &touched));
    }
}
