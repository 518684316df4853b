//! The wizard state machine contract.
//!
//! A wizard state machine is an immutable value: [`WizardStateMachine::transition_to`]
//! never mutates, it returns the machine positioned at the next step. Callers hold
//! a single slot with the current machine and replace it wholesale on commit.

use super::errors::FieldId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a wizard step.
pub type StepId = String;

/// Transition kinds understood by a wizard state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Transition {
    Next,
    Previous,
    /// Arbitrary jump, reserved for read-only review of completed steps.
    Goto,
}

impl Transition {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Next => "NEXT",
            Self::Previous => "PREVIOUS",
            Self::Goto => "GOTO",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload accompanying a transition request.
///
/// `Form` carries the current form values for NEXT/PREVIOUS so a machine may
/// pick its target dynamically. `Goto` carries the requested step.
#[derive(Debug)]
pub enum WizardEvent<'a, T> {
    Form { values: &'a T },
    Goto { step: &'a str },
}

impl<T> Clone for WizardEvent<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for WizardEvent<'_, T> {}

/// Outgoing transition table and relevant fields of one step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Transition key to target step. Absence of `Next` marks the last step,
    /// absence of `Previous` the first.
    pub on: BTreeMap<Transition, StepId>,
    /// Fields validated and marked touched while this step is active.
    pub fields: Vec<FieldId>,
}

impl StepDefinition {
    pub fn target(&self, transition: Transition) -> Option<&str> {
        self.on.get(&transition).map(String::as_str)
    }
}

/// Context of the active step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardContext {
    /// Fields of the current step.
    pub fields: Vec<FieldId>,
    /// Every step of the wizard in display order.
    pub steps: Vec<StepId>,
}

/// Immutable snapshot returned by [`WizardStateMachine::value_of`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardInternalState {
    pub step: StepId,
    pub states: BTreeMap<StepId, StepDefinition>,
    pub context: WizardContext,
}

impl WizardInternalState {
    /// Definition of the active step, if the machine declares it.
    pub fn current(&self) -> Option<&StepDefinition> {
        self.states.get(&self.step)
    }

    /// Target of `transition` from the active step.
    pub fn target(&self, transition: Transition) -> Option<&str> {
        self.current().and_then(|def| def.target(transition))
    }
}

/// Contract between the wizard controller and its step graph.
///
/// Implementations must be persistent values: `transition_to` returns a new
/// machine and leaves `self` untouched. A request for a transition the active
/// step does not declare returns a machine at the same step.
///
/// # Example
///
/// ```rust
/// use stepwise::builder::StepGraph;
/// use stepwise::core::{Transition, WizardEvent, WizardStateMachine};
///
/// let machine: StepGraph<()> = StepGraph::builder()
///     .step("TERMS", |s| s.fields(["amount"]).next("REVIEW"))
///     .step("REVIEW", |s| s.previous("TERMS"))
///     .initial("TERMS")
///     .build()
///     .unwrap();
///
/// let advanced = machine.transition_to(Transition::Next, WizardEvent::Form { values: &() });
///
/// assert_eq!(machine.value_of().step, "TERMS");
/// assert_eq!(advanced.value_of().step, "REVIEW");
/// ```
pub trait WizardStateMachine<T>: Clone {
    /// Machine positioned at the target of `transition`, or at the same step
    /// when the transition is not available.
    fn transition_to(&self, transition: Transition, event: WizardEvent<'_, T>) -> Self;

    /// Fresh snapshot of the machine. Snapshots taken before a transition are stale.
    fn value_of(&self) -> WizardInternalState;

    /// Shorthand for `value_of().step`.
    fn current_step(&self) -> StepId {
        self.value_of().step
    }
}
