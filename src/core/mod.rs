//! Core wizard types and pure logic.
//!
//! - Field error maps and touched sets
//! - The state machine contract consulted by the controller
//! - Navigation guards
//! - Immutable navigation history
//!
//! Nothing in this module performs side effects.

mod errors;
mod guard;
mod history;
mod machine;

pub use errors::{FieldErrors, FieldId, Touched};
pub use guard::{can_go_next, can_go_previous, is_first_step, is_last_step, touched_errors, Guard};
pub use history::{StepHistory, StepTransition};
pub use machine::{
    StepDefinition, StepId, Transition, WizardContext, WizardEvent, WizardInternalState,
    WizardStateMachine,
};
