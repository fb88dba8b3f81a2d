//! Body parameter sets and their aggregation across components

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Body parameters destined for the wire, in key order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    fields: BTreeMap<String, String>,
}

impl ParameterSet {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a parameter, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(name.into(), value.into())
    }

    /// Get a parameter value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Check whether a parameter is present
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Remove a parameter
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Iterate over parameters in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for ParameterSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for ParameterSet {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Merges parameter contributions from several components.
///
/// Contributions are expected to be disjoint. When two components emit the
/// same name, the later contribution wins and a warning names both parties.
/// Reserved parameters are applied last and always override contributions.
#[derive(Debug, Default)]
pub struct ParameterAggregator {
    merged: ParameterSet,
    contributors: BTreeMap<String, String>,
}

impl ParameterAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one component's parameters
    pub fn absorb(&mut self, component: &str, parameters: ParameterSet) {
        for (name, value) in parameters {
            if let Some(previous) = self.contributors.get(&name) {
                warn!(
                    parameter = %name,
                    previous = %previous,
                    component = %component,
                    "Parameter contributed by more than one component, keeping the later value"
                );
            }
            self.contributors.insert(name.clone(), component.to_string());
            self.merged.insert(name, value);
        }
    }

    /// Set a reserved parameter that no component may override
    pub fn reserve(&mut self, name: &str, value: impl Into<String>) {
        if let Some(component) = self.contributors.remove(name) {
            warn!(
                parameter = %name,
                component = %component,
                "Component contributed a reserved parameter, discarding it"
            );
        }
        self.merged.insert(name, value);
    }

    /// Name of the component whose value is currently held for `name`
    pub fn contributor(&self, name: &str) -> Option<&str> {
        self.contributors.get(name).map(String::as_str)
    }

    /// Finish aggregation
    pub fn finish(self) -> ParameterSet {
        self.merged
    }
}
