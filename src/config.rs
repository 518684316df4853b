//! Wizard configuration.

use serde::{Deserialize, Serialize};

/// Label key used for the submit control when no custom text is set.
pub const SUBMIT_APPLICATION: &str = "SUBMIT_APPLICATION";

fn default_acronyms() -> Vec<String> {
    vec!["LC".to_string()]
}

/// Presentation and mode flags of a wizard.
///
/// # Example
///
/// ```rust
/// use stepwise::config::WizardConfig;
///
/// let config = WizardConfig::from_json(r#"{ "readonly": true, "submitText": "Issue LC" }"#).unwrap();
///
/// assert!(config.readonly);
/// assert_eq!(config.submit_text(), "Issue LC");
/// assert!(!config.submitting);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WizardConfig {
    /// Review mode: GOTO is allowed and submit is hidden.
    pub readonly: bool,
    /// Submission in flight: submit and Previous are disabled.
    pub submitting: bool,
    pub submit_text: Option<String>,
    /// Shown when leaving a dirty wizard that is not submitting.
    pub leave_warning_text: Option<String>,
    /// Words kept upper-case in step labels.
    pub acronyms: Vec<String>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            readonly: false,
            submitting: false,
            submit_text: None,
            leave_warning_text: None,
            acronyms: default_acronyms(),
        }
    }
}

impl WizardConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn with_submitting(mut self, submitting: bool) -> Self {
        self.submitting = submitting;
        self
    }

    pub fn with_submit_text(mut self, text: impl Into<String>) -> Self {
        self.submit_text = Some(text.into());
        self
    }

    pub fn with_leave_warning_text(mut self, text: impl Into<String>) -> Self {
        self.leave_warning_text = Some(text.into());
        self
    }

    pub fn with_acronyms<I, S>(mut self, acronyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.acronyms = acronyms.into_iter().map(Into::into).collect();
        self
    }

    /// Submit label key, falling back to [`SUBMIT_APPLICATION`].
    pub fn submit_text(&self) -> &str {
        self.submit_text.as_deref().unwrap_or(SUBMIT_APPLICATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_editable_mode() {
        let config = WizardConfig::default();

        assert!(!config.readonly);
        assert!(!config.submitting);
        assert_eq!(config.submit_text(), SUBMIT_APPLICATION);
        assert_eq!(config.acronyms, vec!["LC"]);
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = WizardConfig::from_json("{}").unwrap();

        assert_eq!(config, WizardConfig::default());
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let config = WizardConfig::from_json(
            r#"{ "leaveWarningText": "Discard the application?", "acronyms": ["LC", "SBLC"] }"#,
        )
        .unwrap();

        assert_eq!(
            config.leave_warning_text.as_deref(),
            Some("Discard the application?")
        );
        assert_eq!(config.acronyms, vec!["LC", "SBLC"]);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(WizardConfig::from_json("{ readonly: yes }").is_err());
    }

    #[test]
    fn builder_methods_chain() {
        let config = WizardConfig::default()
            .with_readonly(true)
            .with_submitting(true)
            .with_submit_text("custom submit")
            .with_acronyms(["SBLC"]);

        assert!(config.readonly && config.submitting);
        assert_eq!(config.submit_text(), "custom submit");
        assert_eq!(config.acronyms, vec!["SBLC"]);
    }
}
