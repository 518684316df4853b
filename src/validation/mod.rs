//! Uniform validation over function and schema validators.
//!
//! [`Validator`] is resolved once at construction: either a plain function
//! returning a [`FieldErrors`] map, or a [`SchemaValidator`] plus the schema
//! reference to check against. Both produce errors for all fields of the
//! values; scoping to the active step is the controller's job.

mod messages;
mod schema;

pub use messages::to_field_errors;
pub use schema::{
    FieldRule, Keyword, ObjectSchema, SchemaCheck, SchemaRegistry, SchemaValidator,
    SchemaViolation,
};

use crate::core::FieldErrors;
use std::fmt;
use std::sync::Arc;
use stillwater::validation::Validation;

/// Validation function returning per-field messages.
pub type ValidationFn<T> = Arc<dyn Fn(&T) -> FieldErrors + Send + Sync>;

/// A function validator or a schema validator bound to a schema reference.
///
/// # Example
///
/// ```rust
/// use stepwise::core::FieldErrors;
/// use stepwise::validation::Validator;
///
/// struct Terms {
///     amount: f64,
/// }
///
/// let validator = Validator::function(|values: &Terms| {
///     let mut errors = FieldErrors::new();
///     if values.amount <= 0.0 {
///         errors.insert("amount", "'amount' should be positive");
///     }
///     errors
/// });
///
/// assert!(validator.validate(&Terms { amount: 10.0 }).is_empty());
/// assert_eq!(validator.validate(&Terms { amount: 0.0 }).len(), 1);
/// ```
pub enum Validator<T> {
    Function(ValidationFn<T>),
    Schema {
        validator: Arc<dyn SchemaValidator<T>>,
        schema_ref: String,
    },
}

impl<T> Validator<T> {
    pub fn function<F>(validate: F) -> Self
    where
        F: Fn(&T) -> FieldErrors + Send + Sync + 'static,
    {
        Self::Function(Arc::new(validate))
    }

    pub fn schema<V>(validator: V, schema_ref: impl Into<String>) -> Self
    where
        V: SchemaValidator<T> + 'static,
    {
        Self::Schema {
            validator: Arc::new(validator),
            schema_ref: schema_ref.into(),
        }
    }

    /// Validate `values`. An empty map means valid; this never fails.
    pub fn validate(&self, values: &T) -> FieldErrors {
        match self {
            Self::Function(validate) => validate(values),
            Self::Schema {
                validator,
                schema_ref,
            } => match validator.validate(schema_ref, values) {
                Validation::Success(_) => FieldErrors::new(),
                Validation::Failure(violations) => to_field_errors(violations.iter()),
            },
        }
    }
}

impl<T> Clone for Validator<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Function(validate) => Self::Function(Arc::clone(validate)),
            Self::Schema {
                validator,
                schema_ref,
            } => Self::Schema {
                validator: Arc::clone(validator),
                schema_ref: schema_ref.clone(),
            },
        }
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(_) => f.write_str("Validator::Function"),
            Self::Schema { schema_ref, .. } => f
                .debug_struct("Validator::Schema")
                .field("schema_ref", schema_ref)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingSchema {
        calls: Arc<AtomicUsize>,
        seen_ref: Arc<std::sync::Mutex<String>>,
    }

    impl SchemaValidator<u32> for FailingSchema {
        fn validate(&self, schema_ref: &str, _values: &u32) -> SchemaCheck {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_ref.lock().unwrap() = schema_ref.to_string();
            let checks: Vec<SchemaCheck> = vec![
                Validation::fail(SchemaViolation::new(
                    ".feesPayableBy",
                    Keyword::Enum {
                        allowed_values: vec!["APPLICANT".into(), "BENEFICIARY".into(), "SPLIT".into()],
                    },
                )),
                Validation::fail(SchemaViolation::new(
                    "",
                    Keyword::Required {
                        missing_property: "tradeId".into(),
                    },
                )),
            ];
            Validation::all_vec(checks).map(|_| ())
        }
    }

    #[test]
    fn function_validator_is_called_directly() {
        let validator = Validator::function(|v: &u32| {
            if *v == 0 {
                FieldErrors::from_iter([("amount", "zero")])
            } else {
                FieldErrors::new()
            }
        });

        assert_eq!(validator.validate(&0).get("amount"), Some("zero"));
        assert!(validator.validate(&1).is_empty());
    }

    #[test]
    fn schema_validator_receives_schema_ref_and_renders_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen_ref = Arc::new(std::sync::Mutex::new(String::new()));
        let validator = Validator::schema(
            FailingSchema {
                calls: Arc::clone(&calls),
                seen_ref: Arc::clone(&seen_ref),
            },
            "http://komgo.io/schema/lc/1",
        );

        let errors = validator.validate(&7);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*seen_ref.lock().unwrap(), "http://komgo.io/schema/lc/1");
        assert_eq!(
            errors,
            FieldErrors::from_iter([
                (
                    "feesPayableBy",
                    "'feesPayableBy' should be equal to one of the allowed values (APPLICANT or BENEFICIARY or SPLIT)"
                ),
                ("tradeId", "'tradeId' should not be empty"),
            ])
        );
    }

    #[test]
    fn schema_success_is_empty_map() {
        let validator = Validator::schema(SchemaRegistry::new(), "missing");

        assert!(validator.validate(&serde_json::json!({ "a": 1 })).is_empty());
    }

    #[test]
    fn clone_shares_the_validator() {
        let validator = Validator::function(|_: &u32| FieldErrors::from_iter([("a", "b")]));
        let cloned = validator.clone();

        assert_eq!(cloned.validate(&1), validator.validate(&1));
        assert_eq!(format!("{:?}", cloned), "Validator::Function");
    }
}
