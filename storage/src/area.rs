//! Key/value storage area.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// In-memory key/value store, kept in insertion order.
///
/// Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageArea {
    items: Vec<(String, String)>,
}

impl StorageArea {
    /// An empty area.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|(k, _)| k == key)
    }

    /// Store `value` under `key`.
    pub fn set_item(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(index) => self.items[index].1 = value,
            None => self.items.push((key, value)),
        }
    }

    /// Value under `key`.
    #[must_use]
    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.position(key).map(|index| self.items[index].1.as_str())
    }

    /// Remove `key`, returning its value.
    pub fn remove_item(&mut self, key: &str) -> Option<String> {
        self.position(key).map(|index| self.items.remove(index).1)
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the area holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for StorageArea {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (key, value) in &self.items {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
