//! Declarative schema validation.
//!
//! A [`SchemaValidator`] checks form values against a schema identified by a
//! reference key and reports every violation at once, using stillwater's
//! `Validation` to accumulate failures instead of stopping at the first one.
//! [`SchemaRegistry`] is a rule-based implementation working on the JSON
//! representation of the values.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Constraint kind that failed, with its parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum Keyword {
    Enum { allowed_values: Vec<String> },
    Required { missing_property: String },
    MinLength { limit: usize },
    MaxLength { limit: usize },
    Minimum { limit: f64 },
    Maximum { limit: f64 },
    Pattern { pattern: String },
    Format { format: String },
    Type { expected: String },
    Other { keyword: String, message: String },
}

/// One structured validation failure.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaViolation {
    /// Dotted path of the failing value, e.g. `.feesPayableBy`. For
    /// [`Keyword::Required`] this is the path of the parent object.
    pub data_path: String,
    pub keyword: Keyword,
}

impl SchemaViolation {
    pub fn new(data_path: impl Into<String>, keyword: Keyword) -> Self {
        Self {
            data_path: data_path.into(),
            keyword,
        }
    }
}

/// Outcome of a schema check: success, or every violation found.
pub type SchemaCheck = Validation<(), NonEmptyVec<SchemaViolation>>;

/// Validator that checks values against a schema selected by reference key.
pub trait SchemaValidator<T>: Send + Sync {
    fn validate(&self, schema_ref: &str, values: &T) -> SchemaCheck;
}

/// Constraint applied to one field of a schema.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldRule {
    /// Present, not null and not an empty string.
    Required,
    /// String value must be one of the listed options.
    OneOf(Vec<String>),
    MinLength(usize),
    MaxLength(usize),
    Minimum(f64),
    Maximum(f64),
}

/// Rules for the fields of one form, addressed by dotted path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectSchema {
    fields: Vec<(String, Vec<FieldRule>)>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rules for the field at `path` (`"amount"`, `"trade.buyer"`).
    pub fn field<I>(mut self, path: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = FieldRule>,
    {
        self.fields.push((path.into(), rules.into_iter().collect()));
        self
    }

    fn check(&self, document: &Value) -> SchemaCheck {
        let mut checks: Vec<SchemaCheck> = Vec::new();

        for (path, rules) in &self.fields {
            let value = lookup(document, path);
            for rule in rules {
                checks.push(check_rule(path, rule, value));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

/// Schemas keyed by reference.
///
/// Unknown schema references and values that cannot be represented as JSON
/// are logged and treated as valid; the adapter contract never fails.
///
/// # Example
///
/// ```rust
/// use serde::Serialize;
/// use stepwise::validation::{FieldRule, ObjectSchema, SchemaRegistry, SchemaValidator};
///
/// #[derive(Serialize)]
/// #[serde(rename_all = "camelCase")]
/// struct Fees {
///     fees_payable_by: String,
/// }
///
/// let registry = SchemaRegistry::new().with_schema(
///     "http://komgo.io/schema/lc/1",
///     ObjectSchema::new().field(
///         "feesPayableBy",
///         [FieldRule::OneOf(vec!["APPLICANT".into(), "BENEFICIARY".into(), "SPLIT".into()])],
///     ),
/// );
///
/// let ok = Fees { fees_payable_by: "SPLIT".into() };
/// let bad = Fees { fees_payable_by: "NOBODY".into() };
///
/// assert!(registry.validate("http://komgo.io/schema/lc/1", &ok).is_success());
/// assert!(registry.validate("http://komgo.io/schema/lc/1", &bad).is_failure());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, ObjectSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, schema_ref: impl Into<String>, schema: ObjectSchema) -> Self {
        self.schemas.insert(schema_ref.into(), schema);
        self
    }
}

impl<T: Serialize> SchemaValidator<T> for SchemaRegistry {
    fn validate(&self, schema_ref: &str, values: &T) -> SchemaCheck {
        let Some(schema) = self.schemas.get(schema_ref) else {
            tracing::warn!(schema_ref, "unknown schema reference, skipping validation");
            return Validation::success(());
        };

        match serde_json::to_value(values) {
            Ok(document) => schema.check(&document),
            Err(error) => {
                tracing::warn!(schema_ref, %error, "form values are not representable as JSON");
                Validation::success(())
            }
        }
    }
}

fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |value, segment| value.get(segment))
        .filter(|value| !value.is_null())
}

fn check_rule(path: &str, rule: &FieldRule, value: Option<&Value>) -> SchemaCheck {
    let failed = |keyword: Keyword| -> SchemaCheck {
        Validation::fail(SchemaViolation::new(format!(".{path}"), keyword))
    };

    match (rule, value) {
        (FieldRule::Required, None) => {
            let (parent, property) = match path.rsplit_once('.') {
                Some((parent, property)) => (format!(".{parent}"), property.to_string()),
                None => (String::new(), path.to_string()),
            };
            Validation::fail(SchemaViolation::new(
                parent,
                Keyword::Required {
                    missing_property: property,
                },
            ))
        }
        (FieldRule::Required, Some(Value::String(s))) if s.is_empty() => {
            failed(Keyword::MinLength { limit: 1 })
        }
        (FieldRule::OneOf(allowed), Some(value)) => {
            let matches = value
                .as_str()
                .is_some_and(|s| allowed.iter().any(|a| a == s));
            if matches {
                Validation::success(())
            } else {
                failed(Keyword::Enum {
                    allowed_values: allowed.clone(),
                })
            }
        }
        (FieldRule::MinLength(limit), Some(Value::String(s))) if s.chars().count() < *limit => {
            failed(Keyword::MinLength { limit: *limit })
        }
        (FieldRule::MaxLength(limit), Some(Value::String(s))) if s.chars().count() > *limit => {
            failed(Keyword::MaxLength { limit: *limit })
        }
        (FieldRule::Minimum(limit), Some(Value::Number(n)))
            if n.as_f64().is_some_and(|n| n < *limit) =>
        {
            failed(Keyword::Minimum { limit: *limit })
        }
        (FieldRule::Maximum(limit), Some(Value::Number(n)))
            if n.as_f64().is_some_and(|n| n > *limit) =>
        {
            failed(Keyword::Maximum { limit: *limit })
        }
        _ => Validation::success(()),
    }
}
