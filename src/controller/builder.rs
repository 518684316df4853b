//! Builder for wizard controllers.

use super::form::{FormActions, NoopScroller, Scroller};
use super::hook::NextHook;
use super::session::WizardSession;
use super::{LabelFn, SubmitHandler, WizardController};
use crate::builder::BuildError;
use crate::config::WizardConfig;
use crate::core::{FieldErrors, StepHistory, WizardStateMachine};
use crate::validation::Validator;
use serde_json::Value;
use std::sync::Arc;

/// Builder for [`WizardController`].
///
/// Initial values, state machine, validator and submit handler are required.
///
/// # Example
///
/// ```rust
/// use stepwise::builder::StepGraph;
/// use stepwise::controller::WizardController;
/// use stepwise::core::FieldErrors;
/// use stepwise::linear_wizard;
/// use stepwise::validation::Validator;
///
/// let machine: StepGraph<u32> = linear_wizard! {
///     AMOUNT => [amount],
///     REVIEW => [],
/// }
/// .build()
/// .unwrap();
///
/// let wizard = WizardController::builder()
///     .initial_values(0u32)
///     .state_machine(machine)
///     .validator(Validator::function(|_: &u32| FieldErrors::new()))
///     .on_submit(|_values: &u32, _form| {})
///     .build()
///     .unwrap();
///
/// assert_eq!(wizard.current_step(), "AMOUNT");
/// assert!(wizard.is_first_step());
/// ```
pub struct WizardBuilder<T, M> {
    initial_values: Option<T>,
    machine: Option<M>,
    validator: Option<Validator<T>>,
    on_next: Option<NextHook<T>>,
    on_submit: Option<SubmitHandler<T>>,
    field_to_label: Option<LabelFn>,
    scroller: Option<Box<dyn Scroller>>,
    config: WizardConfig,
}

impl<T, M> WizardBuilder<T, M>
where
    T: Clone,
    M: WizardStateMachine<T>,
{
    pub fn new() -> Self {
        Self {
            initial_values: None,
            machine: None,
            validator: None,
            on_next: None,
            on_submit: None,
            field_to_label: None,
            scroller: None,
            config: WizardConfig::default(),
        }
    }

    /// Values the session starts from (required).
    pub fn initial_values(mut self, values: T) -> Self {
        self.initial_values = Some(values);
        self
    }

    /// Machine positioned at the initial step (required).
    pub fn state_machine(mut self, machine: M) -> Self {
        self.machine = Some(machine);
        self
    }

    /// Validator run on every validate call (required).
    pub fn validator(mut self, validator: Validator<T>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Hook run on every Next request (optional).
    pub fn on_next<F>(mut self, hook: F) -> Self
    where
        F: Fn(&T, &str, &mut dyn FnMut(&str, Value)) -> FieldErrors + Send + Sync + 'static,
    {
        self.on_next = Some(NextHook::new(hook));
        self
    }

    /// Add a prebuilt hook (optional).
    pub fn next_hook(mut self, hook: NextHook<T>) -> Self {
        self.on_next = Some(hook);
        self
    }

    /// Submit handler (required).
    pub fn on_submit<F>(mut self, handler: F) -> Self
    where
        F: Fn(&T, &mut dyn FormActions) + Send + Sync + 'static,
    {
        self.on_submit = Some(Arc::new(handler));
        self
    }

    /// Label lookup for error messages (optional, defaults to the field name).
    pub fn field_to_label<F>(mut self, labels: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.field_to_label = Some(Arc::new(labels));
        self
    }

    /// Scroll capability (optional, defaults to [`NoopScroller`]).
    pub fn scroller<S: Scroller + 'static>(mut self, scroller: S) -> Self {
        self.scroller = Some(Box::new(scroller));
        self
    }

    pub fn config(mut self, config: WizardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.config.readonly = readonly;
        self
    }

    /// Build the controller.
    /// Returns an error if required parts are missing.
    pub fn build(self) -> Result<WizardController<T, M>, BuildError> {
        let values = self.initial_values.ok_or(BuildError::MissingInitialValues)?;
        let machine = self.machine.ok_or(BuildError::MissingStateMachine)?;
        let validator = self.validator.ok_or(BuildError::MissingValidator)?;
        let on_submit = self.on_submit.ok_or(BuildError::MissingSubmitHandler)?;

        tracing::debug!(
            step = %machine.current_step(),
            readonly = self.config.readonly,
            has_on_next = self.on_next.is_some(),
            "wizard created"
        );

        Ok(WizardController {
            machine,
            session: WizardSession::new(values),
            history: StepHistory::new(),
            config: self.config,
            validator,
            on_next: self.on_next,
            on_submit,
            field_to_label: self
                .field_to_label
                .unwrap_or_else(|| Arc::new(|_: &str, field: &str| field.to_string())),
            scroller: self.scroller.unwrap_or_else(|| Box::new(NoopScroller)),
        })
    }
}

impl<T, M> Default for WizardBuilder<T, M>
where
    T: Clone,
    M: WizardStateMachine<T>,
{
    fn default() -> Self {
        Self::new()
    }
}
