//! Navigation history of a wizard session.
//!
//! Every committed transition that moves the wizard to a different step is
//! recorded. History is immutable: `record` returns a new history.

use super::machine::{StepId, Transition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed step change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepTransition {
    /// The step being left
    pub from: StepId,
    /// The step being entered
    pub to: StepId,
    /// Which transition moved the wizard
    pub transition: Transition,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

impl StepTransition {
    pub fn now(from: impl Into<StepId>, to: impl Into<StepId>, transition: Transition) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            transition,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of step changes.
///
/// # Example
///
/// ```rust
/// use stepwise::core::{StepHistory, StepTransition, Transition};
///
/// let history = StepHistory::new()
///     .record(StepTransition::now("SUMMARY_OF_TRADE", "CARGO_MOVEMENTS", Transition::Next))
///     .record(StepTransition::now("CARGO_MOVEMENTS", "SUMMARY_OF_TRADE", Transition::Previous));
///
/// assert_eq!(
///     history.path(),
///     vec!["SUMMARY_OF_TRADE", "CARGO_MOVEMENTS", "SUMMARY_OF_TRADE"]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepHistory {
    transitions: Vec<StepTransition>,
}

impl StepHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The receiver is left unchanged.
    pub fn record(&self, transition: StepTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Steps visited, in order: the first origin, then every target.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(first.from.as_str());
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StepTransition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
