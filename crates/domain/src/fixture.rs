//! Per-suite fixture slots.
//!
//! A fixture carries values from one case to a later case in the same suite,
//! for example the id of an order created by a setup case. Each suite run
//! owns exactly one `Fixture`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key/value state shared by the cases of one suite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fixture {
    slots: BTreeMap<String, Value>,
}

impl Fixture {
    /// Creates an empty fixture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a slot, replacing any previous value.
    ///
    /// Writing JSON `null` clears the slot so that "the create call returned
    /// no id" reads as unset downstream.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        match value.into() {
            Value::Null => {
                self.slots.remove(&key);
            }
            value => {
                self.slots.insert(key, value);
            }
        }
    }

    /// Reads a slot.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.slots.get(key)
    }

    /// Returns true if the slot is set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    /// Returns the first key in `keys` that is not set.
    #[must_use]
    pub fn first_missing<'a>(&self, keys: &'a [String]) -> Option<&'a str> {
        keys.iter()
            .map(String::as_str)
            .find(|key| !self.contains(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_set_and_get() {
        let mut fixture = Fixture::new();
        fixture.set("order_id", 42);
        assert_eq!(fixture.get("order_id"), Some(&json!(42)));
        assert!(fixture.contains("order_id"));
    }

    #[test]
    fn test_null_clears_slot() {
        let mut fixture = Fixture::new();
        fixture.set("order_id", 42);
        fixture.set("order_id", Value::Null);
        assert!(!fixture.contains("order_id"));
    }

    #[test]
    fn test_first_missing() {
        let mut fixture = Fixture::new();
        fixture.set("a", "x");
        let keys = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(fixture.first_missing(&keys), Some("b"));

        fixture.set("b", 1);
        fixture.set("c", true);
        assert_eq!(fixture.first_missing(&keys), None);
    }
}
