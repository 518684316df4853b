//! The wizard controller.
//!
//! [`WizardController`] owns the current state machine and the session
//! record, merges the validation and on-next error sources, and decides
//! whether Next, Previous and GOTO requests are committed. A committed
//! transition replaces the machine wholesale; a blocked one leaves it as is.
//!
//! All operations are synchronous and single-owner. [`WizardController::validate`]
//! hands back an already-resolved effect for hosts that await validation.

pub mod builder;
pub mod form;
pub mod hook;
pub mod session;

pub use builder::WizardBuilder;
pub use form::{FormActions, FormState, NoopScroller, Scroller};
pub use hook::NextHook;
pub use session::WizardSession;

use crate::config::WizardConfig;
use crate::core::{
    can_go_next, can_go_previous, is_first_step, is_last_step, touched_errors, FieldErrors,
    StepHistory, StepId, StepTransition, Touched, Transition, WizardEvent, WizardStateMachine,
};
use crate::validation::Validator;
use serde_json::Value;
use std::sync::Arc;
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;

/// Handler invoked on submit with the final values and the host callbacks.
pub type SubmitHandler<T> = Arc<dyn Fn(&T, &mut dyn FormActions) + Send + Sync>;

/// Maps `(step, field)` to a display label.
pub type LabelFn = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

/// Outcome of a navigation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// The candidate machine replaced the current one. `from == to` when the
    /// active step declares no such transition.
    Committed { from: StepId, to: StepId },
    /// Errors prevented the transition; the step is unchanged.
    Blocked,
    /// The request is not allowed in the current mode.
    Ignored,
}

impl Navigation {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    /// True only when the wizard ended up on a different step.
    pub fn moved(&self) -> bool {
        matches!(self, Self::Committed { from, to } if from != to)
    }
}

/// Multi-step form controller.
pub struct WizardController<T, M> {
    pub(crate) machine: M,
    pub(crate) session: WizardSession<T>,
    pub(crate) history: StepHistory,
    pub(crate) config: WizardConfig,
    validator: Validator<T>,
    on_next: Option<NextHook<T>>,
    on_submit: SubmitHandler<T>,
    field_to_label: LabelFn,
    scroller: Box<dyn Scroller>,
}

impl<T, M> WizardController<T, M>
where
    T: Clone,
    M: WizardStateMachine<T>,
{
    pub fn builder() -> WizardBuilder<T, M> {
        WizardBuilder::new()
    }

    /// The current state machine. Re-read after every navigation call.
    pub fn state_machine(&self) -> &M {
        &self.machine
    }

    pub fn current_step(&self) -> StepId {
        self.machine.current_step()
    }

    pub fn session(&self) -> &WizardSession<T> {
        &self.session
    }

    pub fn values(&self) -> &T {
        &self.session.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.session.errors
    }

    pub fn on_next_errors(&self) -> &FieldErrors {
        &self.session.on_next_errors
    }

    pub fn history(&self) -> &StepHistory {
        &self.history
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn set_readonly(&mut self, readonly: bool) {
        self.config.readonly = readonly;
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.config.submitting = submitting;
    }

    /// Display label of `field` on `step`, falling back to the field name.
    pub fn field_label(&self, step: &str, field: &str) -> String {
        let label = (self.field_to_label)(step, field);
        if label.is_empty() {
            field.to_string()
        } else {
            label
        }
    }

    pub fn is_first_step(&self) -> bool {
        is_first_step(&self.machine.value_of())
    }

    /// On the last step submit replaces Next.
    pub fn is_last_step(&self) -> bool {
        is_last_step(&self.machine.value_of())
    }

    pub fn can_go_next(&self) -> bool {
        can_go_next(&self.session.errors, &self.session.on_next_errors)
    }

    pub fn can_go_previous(&self, touched: &Touched) -> bool {
        can_go_previous(&self.session.errors, touched)
    }

    /// Validate `values` for the host form library.
    ///
    /// The returned effect is already resolved: it succeeds when the values
    /// are valid and fails with the merged error map otherwise. See
    /// [`validate_now`](Self::validate_now) for the rules.
    pub fn validate(&mut self, values: &T) -> BoxedEffect<(), FieldErrors, ()> {
        match self.validate_now(values) {
            Ok(()) => pure(()).boxed(),
            Err(errors) => fail(errors).boxed(),
        }
    }

    /// Synchronous form of [`validate`](Self::validate).
    ///
    /// Validation errors are restricted to the fields of the active step and
    /// stored as the session errors; the failure carries them merged with the
    /// on-next errors, which win on collision. When validation passes the
    /// session errors are cleared and pending on-next errors alone fail the
    /// call.
    pub fn validate_now(&mut self, values: &T) -> Result<(), FieldErrors> {
        self.session.values = values.clone();
        let found = self.validator.validate(values);

        if found.is_empty() {
            self.session.errors = FieldErrors::new();
            if self.session.on_next_errors.is_empty() {
                tracing::debug!(step = %self.current_step(), "validation passed");
                return Ok(());
            }
            tracing::debug!(
                step = %self.current_step(),
                on_next_errors = self.session.on_next_errors.len(),
                "validation passed with pending on-next errors"
            );
            return Err(self.session.on_next_errors.clone());
        }

        let step_fields = self.machine.value_of().context.fields;
        let errors = found.restricted_to(&step_fields);
        let combined = errors.merged(&self.session.on_next_errors);
        tracing::debug!(
            step = %self.current_step(),
            found = found.len(),
            in_step = errors.len(),
            "validation failed"
        );
        self.session.errors = errors;

        if combined.is_empty() {
            Ok(())
        } else {
            Err(combined)
        }
    }

    /// Handle a Next request.
    ///
    /// Scrolls to the top, marks every field of the active step as touched,
    /// runs the on-next hook if configured, then commits the NEXT transition
    /// only when neither the session validation errors nor the hook's errors
    /// are present.
    pub fn next<F: FormActions>(&mut self, values: &T, form: &mut F) -> Navigation {
        self.scroller.to_top();
        self.session.values = values.clone();

        let validation_errors = self.session.errors.clone();
        let state = self.machine.value_of();
        form.set_touched(Touched::all(&state.context.fields));

        let mut on_next_errors = FieldErrors::new();
        if let Some(hook) = &self.on_next {
            {
                let mut set_field_value =
                    |field: &str, value: Value| form.set_field_value(field, value);
                on_next_errors = hook.run(values, &state.step, &mut set_field_value);
            }
            if on_next_errors.is_empty() {
                self.session.on_next_errors = FieldErrors::new();
                form.set_errors(validation_errors.clone());
            } else {
                self.session.on_next_errors = on_next_errors.clone();
                form.set_errors(validation_errors.merged(&on_next_errors));
            }
        }

        let candidate = self
            .machine
            .transition_to(Transition::Next, WizardEvent::Form { values });

        if can_go_next(&validation_errors, &on_next_errors) {
            self.commit(candidate, Transition::Next)
        } else {
            tracing::debug!(
                step = %state.step,
                errors = validation_errors.len(),
                on_next_errors = on_next_errors.len(),
                "next blocked"
            );
            Navigation::Blocked
        }
    }

    /// Handle a Previous request.
    ///
    /// Only errors on fields in `touched` block going back. When nothing
    /// blocks, the session errors are cleared and PREVIOUS is committed.
    pub fn previous(&mut self, values: &T, touched: &Touched) -> Navigation {
        self.scroller.to_top();
        self.session.values = values.clone();

        let blocking = touched_errors(&self.session.errors, touched);
        if !blocking.is_empty() {
            tracing::debug!(
                step = %self.current_step(),
                touched_errors = blocking.len(),
                "previous blocked"
            );
            return Navigation::Blocked;
        }

        self.session.errors = FieldErrors::new();
        let candidate = self
            .machine
            .transition_to(Transition::Previous, WizardEvent::Form { values });
        self.commit(candidate, Transition::Previous)
    }

    /// Jump to `step`. Only honoured in read-only mode, without validation.
    pub fn goto(&mut self, step: &str) -> Navigation {
        if !self.config.readonly {
            tracing::warn!(step, "goto ignored outside read-only mode");
            return Navigation::Ignored;
        }
        let candidate = self
            .machine
            .transition_to(Transition::Goto, WizardEvent::Goto { step });
        self.commit(candidate, Transition::Goto)
    }

    /// Delegate to the configured submit handler.
    pub fn handle_submit(&self, values: &T, form: &mut dyn FormActions) {
        tracing::debug!(
            step = %self.current_step(),
            transitions = self.history.len(),
            elapsed = ?self.history.duration(),
            "submitting wizard"
        );
        (self.on_submit)(values, form)
    }

    fn commit(&mut self, candidate: M, transition: Transition) -> Navigation {
        let from = self.machine.current_step();
        let to = candidate.current_step();
        self.machine = candidate;

        if from != to {
            self.history = self
                .history
                .record(StepTransition::now(from.clone(), to.clone(), transition));
            tracing::debug!(%from, %to, %transition, "step changed");
        }

        Navigation::Committed { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StepGraph;
    use crate::linear_wizard;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Trade {
        trade_id: String,
        fees_payable_by: String,
    }

    fn trade_graph() -> StepGraph<Trade> {
        linear_wizard! {
            SUMMARY_OF_TRADE => [tradeId],
            PARTICIPANTS => [feesPayableBy, applicantId, direct],
            REVIEW => [],
        }
        .build()
        .unwrap()
    }

    fn trade_validator() -> Validator<Trade> {
        Validator::function(|values: &Trade| {
            let mut errors = FieldErrors::new();
            if values.trade_id.is_empty() {
                errors.insert("tradeId", "'tradeId' should not be empty");
            }
            if !["APPLICANT", "BENEFICIARY"].contains(&values.fees_payable_by.as_str()) {
                errors.insert(
                    "feesPayableBy",
                    "'feesPayableBy' should be equal to one of the allowed values (APPLICANT or BENEFICIARY)",
                );
            }
            errors
        })
    }

    fn wizard() -> WizardBuilder<Trade, StepGraph<Trade>> {
        WizardController::builder()
            .initial_values(Trade::default())
            .state_machine(trade_graph())
            .validator(trade_validator())
            .on_submit(|_, _| {})
    }

    fn valid_trade() -> Trade {
        Trade {
            trade_id: "T-1".to_string(),
            fees_payable_by: "APPLICANT".to_string(),
        }
    }

    type Log = Arc<Mutex<Vec<String>>>;

    struct LoggingScroller(Log);

    impl Scroller for LoggingScroller {
        fn to_top(&mut self) {
            self.0.lock().unwrap().push("scroll".to_string());
        }
    }

    struct LoggingForm(Log);

    impl FormActions for LoggingForm {
        fn set_touched(&mut self, _: Touched) {
            self.0.lock().unwrap().push("set_touched".to_string());
        }

        fn set_field_value(&mut self, field: &str, _: Value) {
            self.0.lock().unwrap().push(format!("set_field_value:{field}"));
        }

        fn set_errors(&mut self, _: FieldErrors) {
            self.0.lock().unwrap().push("set_errors".to_string());
        }
    }

    #[test]
    fn next_touches_step_fields_and_advances() {
        let mut wizard = wizard().build().unwrap();
        let mut form = FormState::new();

        let navigation = wizard.next(&valid_trade(), &mut form);

        assert_eq!(
            navigation,
            Navigation::Committed {
                from: "SUMMARY_OF_TRADE".to_string(),
                to: "PARTICIPANTS".to_string(),
            }
        );
        assert_eq!(form.touched, Touched::from_iter([("tradeId", true)]));
        assert_eq!(wizard.current_step(), "PARTICIPANTS");
        assert_eq!(wizard.history().path(), vec!["SUMMARY_OF_TRADE", "PARTICIPANTS"]);
    }

    #[test]
    fn next_is_blocked_by_validation_errors() {
        let mut wizard = wizard().build().unwrap();
        wizard.session.errors = FieldErrors::from_iter([("tradeId", "'tradeId' should not be empty")]);
        let mut form = FormState::new();

        let navigation = wizard.next(&Trade::default(), &mut form);

        assert_eq!(navigation, Navigation::Blocked);
        assert_eq!(wizard.current_step(), "SUMMARY_OF_TRADE");
        assert!(form.touched.is_touched("tradeId"));
        assert!(wizard.history().is_empty());
    }

    #[test]
    fn hook_errors_are_stored_merged_and_block() {
        let mut wizard = wizard()
            .on_next(|_: &Trade, _: &str, _: &mut dyn FnMut(&str, Value)| {
                FieldErrors::from_iter([("tradeId", "Trade is already financed"), ("next", "error")])
            })
            .build()
            .unwrap();
        wizard.session.errors = FieldErrors::from_iter([("tradeId", "'tradeId' should not be empty")]);
        let mut form = FormState::new();

        let navigation = wizard.next(&valid_trade(), &mut form);

        assert_eq!(navigation, Navigation::Blocked);
        assert_eq!(wizard.on_next_errors().len(), 2);
        assert_eq!(form.errors.get("tradeId"), Some("Trade is already financed"));
        assert_eq!(form.errors.get("next"), Some("error"));
        assert_eq!(wizard.current_step(), "SUMMARY_OF_TRADE");
    }

    #[test]
    fn hook_returning_nothing_clears_previous_hook_errors() {
        let mut wizard = wizard()
            .on_next(|_: &Trade, _: &str, _: &mut dyn FnMut(&str, Value)| FieldErrors::new())
            .build()
            .unwrap();
        wizard.session.on_next_errors = FieldErrors::from_iter([("next", "error")]);
        let mut form = FormState::new();

        let navigation = wizard.next(&valid_trade(), &mut form);

        assert!(navigation.moved());
        assert!(wizard.on_next_errors().is_empty());
        assert!(form.errors.is_empty());
    }

    #[test]
    fn hook_can_write_field_values() {
        let mut wizard = wizard()
            .on_next(|_: &Trade, step: &str, set_field_value: &mut dyn FnMut(&str, Value)| {
                set_field_value("currentStep", json!(step));
                FieldErrors::new()
            })
            .build()
            .unwrap();
        let mut form = FormState::new();

        wizard.next(&valid_trade(), &mut form);

        assert_eq!(form.field_values["currentStep"], json!("SUMMARY_OF_TRADE"));
        assert!(form.dirty);
    }

    #[test]
    fn without_hook_only_validation_errors_gate_next() {
        let mut wizard = wizard().build().unwrap();
        let mut form = FormState::new();

        let navigation = wizard.next(&valid_trade(), &mut form);

        assert!(navigation.moved());
        assert!(form.errors.is_empty());
    }

    #[test]
    fn next_scrolls_once_before_touching_the_form() {
        let log: Log = Arc::default();
        let mut wizard = wizard()
            .scroller(LoggingScroller(Arc::clone(&log)))
            .on_next(|_: &Trade, _: &str, set_field_value: &mut dyn FnMut(&str, Value)| {
                set_field_value("direct", json!(true));
                FieldErrors::new()
            })
            .build()
            .unwrap();
        let mut form = LoggingForm(Arc::clone(&log));

        wizard.next(&valid_trade(), &mut form);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["scroll", "set_touched", "set_field_value:direct", "set_errors"]
        );
    }

    #[test]
    fn next_on_last_step_commits_without_moving() {
        let mut wizard = wizard().readonly(true).build().unwrap();
        wizard.goto("REVIEW");
        let mut form = FormState::new();

        let navigation = wizard.next(&valid_trade(), &mut form);

        assert!(navigation.is_committed());
        assert!(!navigation.moved());
        assert!(wizard.is_last_step());
    }

    #[test]
    fn previous_is_blocked_only_by_touched_errors() {
        let mut wizard = wizard().build().unwrap();
        wizard.next(&valid_trade(), &mut FormState::new());
        wizard.session.errors =
            FieldErrors::from_iter([("feesPayableBy", "'feesPayableBy' should not be empty")]);

        let errors_before = wizard.errors().clone();

        let blocked = wizard.previous(&valid_trade(), &Touched::all(&["feesPayableBy"]));
        assert_eq!(blocked, Navigation::Blocked);
        assert_eq!(wizard.current_step(), "PARTICIPANTS");
        assert_eq!(wizard.errors(), &errors_before);

        let navigation = wizard.previous(&valid_trade(), &Touched::all(&["applicantId"]));
        assert!(navigation.moved());
        assert_eq!(wizard.current_step(), "SUMMARY_OF_TRADE");
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn previous_scrolls_even_when_blocked() {
        let log: Log = Arc::default();
        let mut wizard = wizard()
            .scroller(LoggingScroller(Arc::clone(&log)))
            .build()
            .unwrap();
        wizard.session.errors = FieldErrors::from_iter([("tradeId", "missing")]);

        let navigation = wizard.previous(&Trade::default(), &Touched::all(&["tradeId"]));

        assert_eq!(navigation, Navigation::Blocked);
        assert_eq!(*log.lock().unwrap(), vec!["scroll"]);
    }

    #[test]
    fn goto_requires_readonly() {
        let mut wizard = wizard().build().unwrap();

        assert_eq!(wizard.goto("REVIEW"), Navigation::Ignored);
        assert_eq!(wizard.current_step(), "SUMMARY_OF_TRADE");

        wizard.set_readonly(true);
        assert!(wizard.goto("REVIEW").moved());
        assert_eq!(wizard.current_step(), "REVIEW");
        assert_eq!(wizard.history().transitions()[0].transition, Transition::Goto);
    }

    #[test]
    fn goto_unknown_step_stays_put() {
        let mut wizard = wizard().readonly(true).build().unwrap();

        let navigation = wizard.goto("NOWHERE");

        assert!(navigation.is_committed());
        assert!(!navigation.moved());
        assert!(wizard.history().is_empty());
    }

    #[test]
    fn handle_submit_delegates_to_handler() {
        let submitted: Arc<Mutex<Option<Trade>>> = Arc::default();
        let sink = Arc::clone(&submitted);
        let wizard = wizard()
            .on_submit(move |values: &Trade, form: &mut dyn FormActions| {
                *sink.lock().unwrap() = Some(values.clone());
                form.set_errors(FieldErrors::new());
            })
            .build()
            .unwrap();
        let mut form = FormState::new();
        form.errors = FieldErrors::from_iter([("tradeId", "stale")]);

        wizard.handle_submit(&valid_trade(), &mut form);

        assert_eq!(*submitted.lock().unwrap(), Some(valid_trade()));
        assert!(form.errors.is_empty());
    }

    #[test]
    fn submit_on_last_step_after_walking_the_wizard() {
        let submitted: Arc<Mutex<Vec<Trade>>> = Arc::default();
        let sink = Arc::clone(&submitted);
        let mut wizard = wizard()
            .on_submit(move |values: &Trade, _: &mut dyn FormActions| {
                sink.lock().unwrap().push(values.clone());
            })
            .build()
            .unwrap();
        let mut form = FormState::new();

        wizard.next(&valid_trade(), &mut form);
        wizard.next(&valid_trade(), &mut form);
        assert!(wizard.is_last_step());
        assert!(wizard.history().duration().is_some());

        wizard.handle_submit(&valid_trade(), &mut form);

        assert_eq!(*submitted.lock().unwrap(), vec![valid_trade()]);
        assert_eq!(wizard.history().len(), 2);
    }

    #[test]
    fn validate_rejects_with_step_field_messages() {
        let mut wizard = wizard().build().unwrap();
        wizard.next(&valid_trade(), &mut FormState::new());
        let values = Trade {
            trade_id: "T-1".to_string(),
            fees_payable_by: String::new(),
        };

        let errors = wizard.validate_now(&values).unwrap_err();

        assert_eq!(
            errors.get("feesPayableBy"),
            Some("'feesPayableBy' should be equal to one of the allowed values (APPLICANT or BENEFICIARY)")
        );
        assert_eq!(wizard.errors(), &errors);
        assert_eq!(wizard.values(), &values);
    }

    #[test]
    fn validate_restricts_errors_to_active_step() {
        let mut wizard = wizard().build().unwrap();
        let values = Trade {
            trade_id: "T-1".to_string(),
            fees_payable_by: String::new(),
        };

        assert_eq!(wizard.validate_now(&values), Ok(()));
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn validate_rejects_with_pending_hook_errors_only() {
        let mut wizard = wizard().build().unwrap();
        wizard.session.errors = FieldErrors::from_iter([("tradeId", "stale")]);
        wizard.session.on_next_errors = FieldErrors::from_iter([("next", "error")]);

        let errors = wizard.validate_now(&valid_trade()).unwrap_err();

        assert_eq!(errors, FieldErrors::from_iter([("next", "error")]));
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn validate_merges_hook_errors_over_validation() {
        let mut wizard = wizard().build().unwrap();
        wizard.session.on_next_errors =
            FieldErrors::from_iter([("tradeId", "Trade is already financed"), ("next", "error")]);

        let errors = wizard.validate_now(&Trade::default()).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("tradeId"), Some("Trade is already financed"));
        assert_eq!(wizard.errors().get("tradeId"), Some("'tradeId' should not be empty"));
    }

    #[test]
    fn field_label_falls_back_to_field_name() {
        let wizard = wizard()
            .field_to_label(|step: &str, field: &str| match (step, field) {
                ("SUMMARY_OF_TRADE", "tradeId") => "Trade".to_string(),
                _ => String::new(),
            })
            .build()
            .unwrap();

        assert_eq!(wizard.field_label("SUMMARY_OF_TRADE", "tradeId"), "Trade");
        assert_eq!(wizard.field_label("SUMMARY_OF_TRADE", "currency"), "currency");
    }

    #[tokio::test]
    async fn validate_effect_resolves() {
        let mut wizard = wizard().build().unwrap();

        assert_eq!(wizard.validate(&valid_trade()).run(&()).await, Ok(()));

        let failed = wizard.validate(&Trade::default()).run(&()).await;
        assert_eq!(
            failed,
            Err(FieldErrors::from_iter([("tradeId", "'tradeId' should not be empty")]))
        );
    }
}
