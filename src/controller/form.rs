//! Boundary with the host form library and the presentation layer.

use crate::core::{FieldErrors, FieldId, Touched};
use serde_json::Value;
use std::collections::BTreeMap;

/// Callbacks the host form library exposes to the wizard.
pub trait FormActions {
    /// Replace the host's touched set.
    fn set_touched(&mut self, touched: Touched);

    /// Write a single field value.
    fn set_field_value(&mut self, field: &str, value: Value);

    /// Replace the errors the host displays.
    fn set_errors(&mut self, errors: FieldErrors);
}

/// Presentation-layer capability to bring the top of the wizard into view.
pub trait Scroller: Send {
    fn to_top(&mut self);
}

/// Scroller for headless use.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopScroller;

impl Scroller for NoopScroller {
    fn to_top(&mut self) {}
}

/// In-memory form host.
///
/// Records whatever the wizard pushes through [`FormActions`] and carries the
/// host flags the view model reads (`dirty`, `is_submitting`). Field writes
/// are kept in `field_values` for the owner to apply to its values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    pub touched: Touched,
    pub errors: FieldErrors,
    pub field_values: BTreeMap<FieldId, Value>,
    pub dirty: bool,
    pub is_submitting: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a single field as touched, as a blur event would.
    pub fn touch(&mut self, field: &str) {
        self.touched.set(field, true);
    }
}

impl FormActions for FormState {
    fn set_touched(&mut self, touched: Touched) {
        self.touched = touched;
    }

    fn set_field_value(&mut self, field: &str, value: Value) {
        self.dirty = true;
        self.field_values.insert(field.to_string(), value);
    }

    fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }
}
