//! Parameters handed to a transition attempt.
//!
//! Params travel with one attempt and are visible to every guard and
//! concluder of the resolved rule. Insertion order is preserved; rule
//! contracts (`required`/`allowed`) are checked against the keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered map of parameter names to JSON values.
///
/// # Example
///
/// ```rust
/// use statecraft::core::Params;
///
/// let params = Params::new()
///     .with("driver", "louise")
///     .with("speed", 88);
///
/// assert!(params.contains("driver"));
/// assert_eq!(params.get("speed"), Some(&serde_json::json!(88)));
/// assert_eq!(params.keys().collect::<Vec<_>>(), ["driver", "speed"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Params::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a parameter, replacing any previous value for the key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Look up a parameter by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether a parameter is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insertion_order_is_preserved() {
        let params = Params::new().with("b", 1).with("a", 2).with("c", 3);
        assert_eq!(params.keys().collect::<Vec<_>>(), ["b", "a", "c"]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut params = Params::new().with("a", 1).with("b", 2);
        params.insert("a", 10);
        assert_eq!(params.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(params.get("a"), Some(&json!(10)));
    }

    #[test]
    fn missing_keys_are_absent() {
        let params = Params::new().with("present", true);
        assert!(!params.contains("absent"));
        assert_eq!(params.get("absent"), None);
    }

    #[test]
    fn collects_from_pairs() {
        let params: Params = [("x", json!(1)), ("y", json!("two"))].into_iter().collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("y"), Some(&json!("two")));
    }
}
