//! Build errors for step graphs and wizard controllers.

use crate::core::{StepId, Transition};
use thiserror::Error;

/// Errors that can occur when building step graphs and controllers.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("No steps defined. Add at least one step")]
    NoSteps,

    #[error("Initial step not specified. Call .initial(step) before .build()")]
    MissingInitialStep,

    #[error("Step '{0}' is defined more than once")]
    DuplicateStep(StepId),

    #[error("Initial step '{0}' is not defined")]
    UnknownInitialStep(StepId),

    #[error("Step '{from}' declares {transition} to undefined step '{to}'")]
    UnknownTarget {
        from: StepId,
        transition: Transition,
        to: StepId,
    },

    #[error("Step '{0}' has conditional routes but no default NEXT target")]
    RouteWithoutDefault(StepId),

    #[error("Initial values not specified. Call .initial_values(values)")]
    MissingInitialValues,

    #[error("State machine not specified. Call .state_machine(machine)")]
    MissingStateMachine,

    #[error("Validator not specified. Call .validator(validator)")]
    MissingValidator,

    #[error("Submit handler not specified. Call .on_submit(handler)")]
    MissingSubmitHandler,
}
