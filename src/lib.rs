//! Stepwise: a multi-step form wizard controller
//!
//! Stepwise drives a form through an ordered set of steps. An immutable step
//! state machine decides where each transition leads; the controller gates
//! those transitions on validation errors and on an optional on-next hook,
//! and commits a transition by replacing the machine wholesale.
//!
//! # Core Concepts
//!
//! - **State machine**: any [`WizardStateMachine`]; [`StepGraph`] is the bundled one
//! - **Validation**: a plain function or a schema validator, normalized to [`FieldErrors`]
//! - **Controller**: [`WizardController`] handles Next, Previous, GOTO and submit
//! - **View**: [`WizardView`] is the presentation state derived on each render
//! - **Checkpoints**: sessions can be saved and restored as JSON or bincode
//!
//! # Example
//!
//! ```rust
//! use stepwise::controller::{FormState, WizardController};
//! use stepwise::core::FieldErrors;
//! use stepwise::linear_wizard;
//! use stepwise::validation::Validator;
//!
//! #[derive(Clone, Default)]
//! struct Trade {
//!     trade_id: String,
//! }
//!
//! let machine = linear_wizard! {
//!     SUMMARY_OF_TRADE => [tradeId],
//!     REVIEW => [],
//! }
//! .build()
//! .unwrap();
//!
//! let mut wizard = WizardController::builder()
//!     .initial_values(Trade::default())
//!     .state_machine(machine)
//!     .validator(Validator::function(|values: &Trade| {
//!         let mut errors = FieldErrors::new();
//!         if values.trade_id.is_empty() {
//!             errors.insert("tradeId", "'tradeId' should not be empty");
//!         }
//!         errors
//!     }))
//!     .on_submit(|_, _| {})
//!     .build()
//!     .unwrap();
//!
//! let mut form = FormState::new();
//! let values = Trade { trade_id: "T-1".to_string() };
//!
//! assert!(wizard.validate_now(&values).is_ok());
//! assert!(wizard.next(&values, &mut form).moved());
//! assert!(wizard.is_last_step());
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod controller;
pub mod core;
pub mod validation;
pub mod view;

// Re-export commonly used types
pub use builder::{BuildError, StepGraph, StepGraphBuilder};
pub use checkpoint::{CheckpointError, WizardCheckpoint};
pub use config::WizardConfig;
pub use controller::{FormActions, FormState, Navigation, WizardController};
pub use core::{FieldErrors, Touched, Transition, WizardStateMachine};
pub use validation::Validator;
pub use view::WizardView;
