//! Option sets and per-component option merging

use crate::{HubError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Named option values for a hub request.
///
/// Values are JSON scalars. A `null` value declares an option without a
/// default, so callers can still see it as recognized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet {
    values: BTreeMap<String, Value>,
}

impl OptionSet {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an option, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Get the raw value of an option
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Check whether an option is present (even if null)
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Get an option rendered as a string.
    ///
    /// Strings are returned as-is, numbers and booleans are formatted, and
    /// `null` counts as unset.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            other => Some(other.to_string()),
        }
    }

    /// Get an option as a non-empty string, failing if it is unset
    pub fn require_string(&self, key: &str) -> Result<String> {
        match self.get_string(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(HubError::MissingOption(key.to_string())),
        }
    }

    /// Get an option as an unsigned integer, accepting numeric strings
    pub fn get_u64(&self, key: &str) -> Result<Option<u64>> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_u64().map(Some).ok_or_else(|| HubError::InvalidOption {
                key: key.to_string(),
                message: format!("expected a non-negative integer, got {}", n),
            }),
            Some(Value::String(s)) => {
                s.trim()
                    .parse::<u64>()
                    .map(Some)
                    .map_err(|e| HubError::InvalidOption {
                        key: key.to_string(),
                        message: e.to_string(),
                    })
            }
            Some(other) => Err(HubError::InvalidOption {
                key: key.to_string(),
                message: format!("expected a non-negative integer, got {}", other),
            }),
        }
    }

    /// Iterate over options in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Option names in key order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    /// Number of options
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Compute a component's effective options.
    ///
    /// The result holds exactly the keys of `defaults`; wherever `overrides`
    /// carries the same key its value replaces the default. Keys only present
    /// in `overrides` are dropped, so a component never sees options it did
    /// not declare.
    pub fn effective(defaults: &OptionSet, overrides: &OptionSet) -> OptionSet {
        let values = defaults
            .values
            .iter()
            .map(|(key, default)| {
                let value = overrides.values.get(key).unwrap_or(default);
                (key.clone(), value.clone())
            })
            .collect();

        OptionSet { values }
    }
}

impl<K, V> FromIterator<(K, V)> for OptionSet
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = OptionSet::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for OptionSet
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
