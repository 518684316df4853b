//! Field-level error maps and the touched-field set.
//!
//! Both are plain values keyed by field identifier. Merging follows
//! "right side wins" semantics: when two maps carry a message for the
//! same field, the map passed as the argument replaces the receiver's.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Identifier of a single form field.
pub type FieldId = String;

/// Mapping from field identifier to a human-readable message.
///
/// An empty map means "valid". A non-empty map is the designed invalid
/// signal surfaced to the host form library, never a fatal error.
///
/// # Example
///
/// ```rust
/// use stepwise::core::FieldErrors;
///
/// let schema = FieldErrors::from_iter([("amount", "'amount' should not be empty")]);
/// let hook = FieldErrors::from_iter([("amount", "amount exceeds the credit limit")]);
///
/// let merged = schema.merged(&hook);
/// assert_eq!(merged.get("amount"), Some("amount exceeds the credit limit"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(transparent)]
#[error("{} field error(s)", .0.len())]
pub struct FieldErrors(BTreeMap<FieldId, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Insert a message, replacing any previous message for the field.
    pub fn insert(&mut self, field: impl Into<FieldId>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Union of both maps; `other` wins on key collision.
    ///
    /// Pure: neither input is modified.
    pub fn merged(&self, other: &FieldErrors) -> FieldErrors {
        let mut merged = self.0.clone();
        merged.extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self(merged)
    }

    /// Keep only the errors whose field appears in `fields`.
    pub fn restricted_to<S: AsRef<str>>(&self, fields: &[S]) -> FieldErrors {
        self.0
            .iter()
            .filter(|(field, _)| fields.iter().any(|f| f.as_ref() == field.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Keep only the errors whose field has been touched.
    pub fn touched_in(&self, touched: &Touched) -> FieldErrors {
        self.0
            .iter()
            .filter(|(field, _)| touched.is_touched(field))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K: Into<FieldId>, V: Into<String>> FromIterator<(K, V)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for FieldErrors {
    type Item = (FieldId, String);
    type IntoIter = std::collections::btree_map::IntoIter<FieldId, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Set of fields the user has interacted with, as reported by the host.
///
/// A field counts as touched only when its flag is `true`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Touched(BTreeMap<FieldId, bool>);

impl Touched {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Mark every listed field as touched.
    pub fn all<S: AsRef<str>>(fields: &[S]) -> Self {
        fields.iter().map(|f| (f.as_ref(), true)).collect()
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.0.get(field).copied().unwrap_or(false)
    }

    pub fn set(&mut self, field: impl Into<FieldId>, touched: bool) {
        self.0.insert(field.into(), touched);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<FieldId>> FromIterator<(K, bool)> for Touched {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
