//! Builder API for wizard step graphs.
//!
//! [`StepGraph`] is an immutable implementation of
//! [`WizardStateMachine`](crate::core::WizardStateMachine), assembled with a
//! fluent builder or the [`linear_wizard!`](crate::linear_wizard) macro.

pub mod error;
pub mod graph;
pub mod macros;
pub mod step;

pub use error::BuildError;
pub use graph::{StepGraph, StepGraphBuilder};
pub use step::StepBuilder;
