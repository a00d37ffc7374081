//! Case-folding key/value mapping.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A mapping from input names to values.
///
/// Keys are folded to lower case on every insert and lookup unless the map
/// was created case-sensitive. The spelling used by the most recent insert is
/// kept so iteration and serialization show keys the way the source wrote
/// them.
///
/// # Examples
///
/// ```rust
/// use directed_inputs::map::InputMap;
/// use serde_json::json;
///
/// let mut inputs = InputMap::new(false);
/// inputs.insert("API_TOKEN", json!("abc"));
///
/// assert_eq!(inputs.get("api_token"), Some(&json!("abc")));
/// assert_eq!(inputs.keys().collect::<Vec<_>>(), vec!["API_TOKEN"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InputMap {
    case_sensitive: bool,
    entries: BTreeMap<String, Entry>,
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    key: String,
    value: Value,
}

impl InputMap {
    /// Create an empty map.
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            case_sensitive,
            entries: BTreeMap::new(),
        }
    }

    /// Build a map from a JSON object.
    pub fn from_object(object: Map<String, Value>, case_sensitive: bool) -> Self {
        let mut map = Self::new(case_sensitive);
        map.extend(object);
        map
    }

    /// Whether keys are compared case-sensitively.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn fold(&self, key: &str) -> String {
        if self.case_sensitive {
            key.to_string()
        } else {
            key.to_lowercase()
        }
    }

    /// Insert a value, returning the value previously stored under the folded key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        self.entries
            .insert(self.fold(&key), Entry { key, value })
            .map(|entry| entry.value)
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(&self.fold(key)).map(|entry| &entry.value)
    }

    /// Look up a value mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        let folded = self.fold(key);
        self.entries.get_mut(&folded).map(|entry| &mut entry.value)
    }

    /// Remove a value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let folded = self.fold(key);
        self.entries.remove(&folded).map(|entry| entry.value)
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&self.fold(key))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keys in their stored spelling.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|entry| entry.key.as_str())
    }

    /// Entries in their stored spelling.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .values()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }

    /// Overlay `other` onto this map, last write wins per key.
    pub fn overlay(&mut self, other: InputMap) {
        self.extend(other);
    }

    /// Convert into a JSON object keyed by the stored spelling.
    pub fn into_object(self) -> Map<String, Value> {
        self.into_iter().collect()
    }

    /// Render as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        )
    }
}

impl Default for InputMap {
    fn default() -> Self {
        Self::new(false)
    }
}

impl<K: Into<String>> Extend<(K, Value)> for InputMap {
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for InputMap {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .into_values()
            .map(|entry| (entry.key, entry.value))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for InputMap {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl Serialize for InputMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl fmt::Display for InputMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(self) {
            Ok(rendered) => f.write_str(&rendered),
            Err(_) => write!(f, "{:?}", self.entries),
        }
    }
}
