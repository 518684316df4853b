//! Presentation-derived state of a wizard.
//!
//! [`WizardView`] is recomputed from the controller and the host form on
//! every render. It carries no behavior of its own: step clicks map to
//! [`WizardController::goto`], control presses to `previous`, `next` and
//! `handle_submit`.

use crate::controller::{FormState, WizardController};
use crate::core::{StepId, Transition, WizardStateMachine};
use serde::Serialize;

/// Title shown above every visible error message.
pub const ERROR_TITLE: &str = "Please complete all required fields";

/// Sentence-case an identifier: `REQUEST_DECLINED` becomes `Request declined`.
pub fn sentence_case(text: &str) -> String {
    sentence_case_with_acronyms(text, &[] as &[&str])
}

/// Sentence-case an identifier, keeping `acronyms` upper-case.
///
/// ```rust
/// use stepwise::view::sentence_case_with_acronyms;
///
/// assert_eq!(sentence_case_with_acronyms("LC_DETAILS", &["LC"]), "LC details");
/// assert_eq!(sentence_case_with_acronyms("SUMMARY_OF_TRADE", &["LC"]), "Summary of trade");
/// ```
pub fn sentence_case_with_acronyms<S: AsRef<str>>(text: &str, acronyms: &[S]) -> String {
    let words: Vec<String> = text
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .enumerate()
        .map(|(idx, word)| {
            if acronyms
                .iter()
                .any(|acronym| acronym.as_ref().eq_ignore_ascii_case(word))
            {
                word.to_uppercase()
            } else if idx == 0 {
                capitalize(&word.to_lowercase())
            } else {
                word.to_lowercase()
            }
        })
        .collect();
    words.join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One entry of the step list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepItem {
    pub step: StepId,
    pub label: String,
    pub active: bool,
    /// Clicking jumps to the step (read-only mode only).
    pub clickable: bool,
}

/// A visible error message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub field: String,
    pub title: String,
    pub message: String,
}

/// A navigation button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Control {
    pub label: String,
    pub disabled: bool,
    pub loading: bool,
}

impl Control {
    fn enabled(label: String) -> Self {
        Self {
            label,
            disabled: false,
            loading: false,
        }
    }
}

/// Everything a renderer needs for the current frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WizardView {
    pub step: StepId,
    pub steps: Vec<StepItem>,
    /// Touched host errors first, then every on-next error.
    pub errors: Vec<ErrorMessage>,
    pub previous: Option<Control>,
    pub next: Option<Control>,
    pub submit: Option<Control>,
    /// Prompt shown when navigating away, if one is configured.
    pub leave_warning: Option<String>,
}

impl WizardView {
    /// Whether leaving the page should prompt the user.
    pub fn should_prompt_on_leave(&self, dirty: bool, submitting: bool) -> bool {
        self.leave_warning.is_some() && dirty && !submitting
    }
}

impl<T, M> WizardController<T, M>
where
    T: Clone,
    M: WizardStateMachine<T>,
{
    /// Derive the view model from the controller and the host form state.
    pub fn view(&self, form: &FormState) -> WizardView {
        let state = self.machine.value_of();
        let config = &self.config;
        let first = self.is_first_step();
        let last = self.is_last_step();

        let steps = state
            .context
            .steps
            .iter()
            .map(|step| {
                let active = *step == state.step;
                StepItem {
                    step: step.clone(),
                    label: sentence_case_with_acronyms(step, &config.acronyms),
                    active,
                    clickable: config.readonly && !active,
                }
            })
            .collect();

        let visible = form.errors.touched_in(&form.touched);
        let errors = visible
            .iter()
            .chain(self.session.on_next_errors.iter())
            .map(|(field, message)| ErrorMessage {
                field: field.to_string(),
                title: ERROR_TITLE.to_string(),
                message: message.replacen(field, &self.field_label(&state.step, field), 1),
            })
            .collect();

        let previous = (!first).then(|| Control {
            label: sentence_case(Transition::Previous.name()),
            disabled: config.submitting,
            loading: false,
        });
        let next = (!last).then(|| Control::enabled(sentence_case(Transition::Next.name())));
        let submit = (!config.readonly && last).then(|| Control {
            label: sentence_case(config.submit_text()),
            disabled: config.submitting,
            loading: config.submitting,
        });

        WizardView {
            step: state.step,
            steps,
            errors,
            previous,
            next,
            submit,
            leave_warning: config.leave_warning_text.clone(),
        }
    }
}
