//! Rendering of structured schema violations into field error messages.

use super::schema::{Keyword, SchemaViolation};
use crate::core::FieldErrors;

/// Convert schema violations into a [`FieldErrors`] map.
///
/// Each violation becomes one entry keyed by its field path without the
/// leading dot (`.feesPayableBy` → `feesPayableBy`, `.trade.buyer` →
/// `trade.buyer`). Messages quote the leaf field name. Later violations
/// for the same field replace earlier ones.
///
/// # Example
///
/// ```rust
/// use stepwise::validation::{to_field_errors, Keyword, SchemaViolation};
///
/// let violation = SchemaViolation::new(
///     ".feesPayableBy",
///     Keyword::Enum {
///         allowed_values: vec!["APPLICANT".into(), "BENEFICIARY".into(), "SPLIT".into()],
///     },
/// );
///
/// let errors = to_field_errors([&violation]);
/// assert_eq!(
///     errors.get("feesPayableBy"),
///     Some("'feesPayableBy' should be equal to one of the allowed values (APPLICANT or BENEFICIARY or SPLIT)")
/// );
/// ```
pub fn to_field_errors<'a, I>(violations: I) -> FieldErrors
where
    I: IntoIterator<Item = &'a SchemaViolation>,
{
    violations
        .into_iter()
        .map(|violation| {
            let path = field_path(violation);
            let message = render(leaf(&path), &violation.keyword);
            (path, message)
        })
        .collect()
}

fn field_path(violation: &SchemaViolation) -> String {
    let base = violation.data_path.trim_start_matches('.');
    match &violation.keyword {
        Keyword::Required { missing_property } if base.is_empty() => missing_property.clone(),
        Keyword::Required { missing_property } => format!("{base}.{missing_property}"),
        _ => base.to_string(),
    }
}

fn leaf(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

fn render(field: &str, keyword: &Keyword) -> String {
    match keyword {
        Keyword::Enum { allowed_values } => format!(
            "'{field}' should be equal to one of the allowed values ({})",
            allowed_values.join(" or ")
        ),
        Keyword::Required { .. } | Keyword::MinLength { limit: 1 } => {
            format!("'{field}' should not be empty")
        }
        Keyword::MinLength { limit } => {
            format!("'{field}' should NOT be shorter than {limit} characters")
        }
        Keyword::MaxLength { limit } => {
            format!("'{field}' should NOT be longer than {limit} characters")
        }
        Keyword::Minimum { limit } => format!("'{field}' should be >= {limit}"),
        Keyword::Maximum { limit } => format!("'{field}' should be <= {limit}"),
        Keyword::Pattern { pattern } => format!("'{field}' should match pattern \"{pattern}\""),
        Keyword::Format { format } => format!("'{field}' should match format \"{format}\""),
        Keyword::Type { expected } => format!("'{field}' should be {expected}"),
        Keyword::Other { message, .. } => format!("'{field}' {message}"),
    }
}
