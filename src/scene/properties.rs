//! Custom key/value properties attached to host scenes and objects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single custom property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Int(i64),
    Float(f64),
    Str(String),
    Color([f32; 3]),
}

/// Ordered property storage, keyed by the host-visible property name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyMap {
    entries: BTreeMap<String, PropertyValue>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_json_values() {
        let json = r#"{"a": 3, "b": 0.5, "c": "true", "d": [1.0, 0.5, 0.0]}"#;
        let map: PropertyMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.get("a"), Some(&PropertyValue::Int(3)));
        assert_eq!(map.get("b"), Some(&PropertyValue::Float(0.5)));
        assert_eq!(map.get("c"), Some(&PropertyValue::Str("true".into())));
        assert_eq!(map.get("d"), Some(&PropertyValue::Color([1.0, 0.5, 0.0])));
    }
}
