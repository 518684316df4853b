//! Builder for a single wizard step.

use crate::core::{FieldId, Guard, StepId};

/// Builder for one step of a [`StepGraph`](super::StepGraph).
pub struct StepBuilder<T> {
    pub(crate) fields: Vec<FieldId>,
    pub(crate) next: Option<StepId>,
    pub(crate) previous: Option<StepId>,
    pub(crate) routes: Vec<(Guard<T>, StepId)>,
}

impl<T> StepBuilder<T> {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            next: None,
            previous: None,
            routes: Vec::new(),
        }
    }

    /// Fields owned by this step. Replaces previously declared fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldId>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Add a single field.
    pub fn field(mut self, field: impl Into<FieldId>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Default NEXT target. A step without one is the last step.
    pub fn next(mut self, step: impl Into<StepId>) -> Self {
        self.next = Some(step.into());
        self
    }

    /// PREVIOUS target. A step without one is the first step.
    pub fn previous(mut self, step: impl Into<StepId>) -> Self {
        self.previous = Some(step.into());
        self
    }

    /// Route NEXT to `step` when the predicate holds for the current values.
    ///
    /// Routes are tried in declaration order before the default target.
    pub fn next_when<F>(self, predicate: F, step: impl Into<StepId>) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.route(Guard::new(predicate), step)
    }

    /// Same as [`next_when`](Self::next_when) with a prebuilt guard.
    pub fn route(mut self, guard: Guard<T>, step: impl Into<StepId>) -> Self {
        self.routes.push((guard, step.into()));
        self
    }
}

impl<T> Default for StepBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
