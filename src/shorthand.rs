//! Shorthand-or-record declaration slots
//!
//! Several config slots accept either a bare string or a full record:
//!
//! ```toml
//! [[utilities]]
//! name = "bg"
//! property = "background-color"          # shorthand
//!
//! [[utilities]]
//! name = "px"
//! property = { padding-left = "{value}", padding-right = "{value}" }  # record
//! ```
//!
//! [`Shorthand`] keeps the two shapes apart at parse time.
//! [`map_object`] maps either shape into a record, handing a bare string to
//! the transform as-is. [`Shorthand::normalize`] is the template view used
//! for property slots, where a bare property name stands for
//! `{ name: "{value}" }`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder substituted with the resolved value in record templates.
pub const VALUE_PLACEHOLDER: &str = "{value}";

/// A config value given either as a bare string or as a keyed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Shorthand {
    /// Bare string form
    Value(String),
    /// Full record form
    Record(BTreeMap<String, String>),
}

impl Shorthand {
    /// Normalize into a template record.
    ///
    /// A bare value `s` becomes `{ s: "{value}" }`; a record is returned as-is.
    /// Callers substitute [`VALUE_PLACEHOLDER`] in the values.
    pub fn normalize(&self) -> BTreeMap<String, String> {
        match self {
            Shorthand::Value(key) => {
                let mut record = BTreeMap::new();
                record.insert(key.clone(), VALUE_PLACEHOLDER.to_string());
                record
            }
            Shorthand::Record(record) => record.clone(),
        }
    }

    /// Whether this is the bare string form.
    pub fn is_shorthand(&self) -> bool {
        matches!(self, Shorthand::Value(_))
    }
}

impl From<&str> for Shorthand {
    fn from(value: &str) -> Self {
        Shorthand::Value(value.to_string())
    }
}

impl From<BTreeMap<String, String>> for Shorthand {
    fn from(record: BTreeMap<String, String>) -> Self {
        Shorthand::Record(record)
    }
}

/// Apply `f` to the values of `input`.
///
/// A bare value `s` yields `{ s: f(s) }`; a record yields the same keys with
/// `f` applied to every value.
pub fn map_object<F>(input: &Shorthand, mut f: F) -> BTreeMap<String, String>
where
    F: FnMut(&str) -> String,
{
    match input {
        Shorthand::Value(value) => {
            let mut record = BTreeMap::new();
            record.insert(value.clone(), f(value));
            record
        }
        Shorthand::Record(record) => record.iter().map(|(key, value)| (key.clone(), f(value))).collect(),
    }
}

/// Helper functions handed to every generator context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformHelpers;

impl TransformHelpers {
    /// Shorthand-aware record mapping. See [`map_object`].
    pub fn map<F>(&self, input: &Shorthand, f: F) -> BTreeMap<String, String>
    where
        F: FnMut(&str) -> String,
    {
        map_object(input, f)
    }
}
