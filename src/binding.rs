//! Concrete value assignments for a signature's fields
//!
//! A [`Binding`] carries the raw string values for one model invocation:
//! input values on the way out, output values parsed from the reply. Keys
//! are field names; iteration is in key order, so validation output is
//! deterministic for a given binding.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field-name to raw-value assignments for one invocation
///
/// Serializes as a flat map, so a binding file is just `name: value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Binding {
    values: BTreeMap<String, String>,
}

impl Binding {
    /// Create an empty binding
    pub fn new() -> Self {
        Binding::default()
    }

    /// Set a field's value, replacing any previous one
    pub fn set(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Get a field's value
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Whether the binding supplies a value for this field
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Field names in key order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Name/value pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of supplied values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are supplied
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<String, String>> for Binding {
    fn from(values: BTreeMap<String, String>) -> Self {
        Binding { values }
    }
}

impl FromIterator<(String, String)> for Binding {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Binding {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let binding = Binding::new()
            .set("question", "What is the capital of France?")
            .set("answer", "Paris");

        assert_eq!(binding.get("question"), Some("What is the capital of France?"));
        assert_eq!(binding.get("answer"), Some("Paris"));
        assert_eq!(binding.get("missing"), None);
        assert!(binding.contains("question"));
        assert_eq!(binding.len(), 2);
    }

    #[test]
    fn test_keys_are_ordered() {
        let binding = Binding::new()
            .set("zeta", "1")
            .set("alpha", "2")
            .set("mid", "3");

        let keys: Vec<&str> = binding.keys().collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_set_replaces_value() {
        let binding = Binding::new().set("answer", "Lyon").set("answer", "Paris");
        assert_eq!(binding.get("answer"), Some("Paris"));
        assert_eq!(binding.len(), 1);
    }

    #[test]
    fn test_flat_map_serialization() {
        let binding = Binding::new().set("confidence", "high").set("answer", "Paris");

        let yaml = serde_yaml::to_string(&binding).unwrap();
        let restored: Binding = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(binding, restored);

        let json = serde_json::to_string(&binding).unwrap();
        assert_eq!(json, r#"{"answer":"Paris","confidence":"high"}"#);
    }
}
