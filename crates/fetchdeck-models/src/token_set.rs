use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Prefix used when generating keys for newly added entries.
const GENERATED_KEY_PREFIX: &str = "additionalProp";

#[derive(Error, Debug, PartialEq)]
pub enum TokenSetError {
    #[error("entry index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("duplicate key: {0}")]
    DuplicateKey(String),
}

/// Ordered set of key/value string pairs, serialized as a JSON object.
///
/// Entry order is insertion order and is preserved across serialization and
/// deserialization (it is display-significant). Keys are kept unique by the
/// editing operations: [`TokenSet::add_generated`] never reuses an existing
/// key and [`TokenSet::rename`] rejects collisions instead of silently
/// dropping an entry when the map is serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSet {
    entries: Vec<(String, String)>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, index: usize) -> Option<(&str, &str)> {
        self.entries.get(index).map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Appends an entry with a generated `additionalProp<N>` key and an empty
    /// value, returning the key. `N` starts one past the current entry count
    /// and advances past any existing key, so generated keys never collide.
    pub fn add_generated(&mut self) -> String {
        let mut n = self.entries.len() + 1;
        let mut key = format!("{GENERATED_KEY_PREFIX}{n}");
        while self.contains_key(&key) {
            n += 1;
            key = format!("{GENERATED_KEY_PREFIX}{n}");
        }
        self.entries.push((key.clone(), String::new()));
        key
    }

    /// Replaces the key at `index`, keeping its value and the position of all
    /// other entries. Renaming to a key held by a different entry fails.
    pub fn rename(&mut self, index: usize, key: impl Into<String>) -> Result<(), TokenSetError> {
        let key = key.into();
        let len = self.entries.len();
        if index >= len {
            return Err(TokenSetError::OutOfRange { index, len });
        }
        let collision = self
            .entries
            .iter()
            .enumerate()
            .any(|(i, (k, _))| i != index && *k == key);
        if collision {
            return Err(TokenSetError::DuplicateKey(key));
        }
        self.entries[index].0 = key;
        Ok(())
    }

    /// Replaces the value at `index`, key unchanged.
    pub fn set_value(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), TokenSetError> {
        let len = self.entries.len();
        let Some(entry) = self.entries.get_mut(index) else {
            return Err(TokenSetError::OutOfRange { index, len });
        };
        entry.1 = value.into();
        Ok(())
    }

    /// Removes the entry at `index`; later entries shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<(), TokenSetError> {
        let len = self.entries.len();
        if index >= len {
            return Err(TokenSetError::OutOfRange { index, len });
        }
        self.entries.remove(index);
        Ok(())
    }
}

impl FromIterator<(String, String)> for TokenSet {
    /// Builds a set from pairs, keeping the first occurrence of each key.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut set = TokenSet::new();
        for (key, value) in iter {
            if !set.contains_key(&key) {
                set.entries.push((key, value));
            }
        }
        set
    }
}

impl Serialize for TokenSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TokenSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TokenSetVisitor;

        impl<'de> Visitor<'de> for TokenSetVisitor {
            type Value = TokenSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of string keys to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    entries.push((key, value));
                }
                Ok(TokenSet { entries })
            }
        }

        deserializer.deserialize_map(TokenSetVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TokenSet {
        [("key1", "value1"), ("key2", "value2"), ("key3", "value3")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn serialization_preserves_order() {
        let set = sample();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"key1":"value1","key2":"value2","key3":"value3"}"#);

        let back: TokenSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn generated_keys_skip_existing_suffixes() {
        let mut set = TokenSet::new();
        assert_eq!(set.add_generated(), "additionalProp1");
        assert_eq!(set.add_generated(), "additionalProp2");

        set.rename(0, "additionalProp3").unwrap();
        // len is 2, so the naive candidate is additionalProp3 - taken by the
        // renamed entry, so generation must advance past it.
        assert_eq!(set.add_generated(), "additionalProp4");
    }

    #[test]
    fn rename_rejects_collision_and_keeps_value() {
        let mut set = sample();
        assert_eq!(
            set.rename(2, "key1"),
            Err(TokenSetError::DuplicateKey("key1".into()))
        );
        set.rename(2, "renamed").unwrap();
        assert_eq!(set.get(2), Some(("renamed", "value3")));
        assert_eq!(set.get(0), Some(("key1", "value1")));

        // Renaming an entry to its own key is a no-op, not a collision.
        set.rename(0, "key1").unwrap();
    }

    #[test]
    fn remove_shifts_later_entries_down() {
        let mut set = sample();
        set.remove(1).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0), Some(("key1", "value1")));
        assert_eq!(set.get(1), Some(("key3", "value3")));
    }

    #[test]
    fn positional_ops_reject_out_of_range() {
        let mut set = sample();
        assert_eq!(
            set.set_value(3, "x"),
            Err(TokenSetError::OutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            set.remove(7),
            Err(TokenSetError::OutOfRange { index: 7, len: 3 })
        );
    }

    #[test]
    fn set_value_leaves_other_entries_untouched() {
        let mut set = sample();
        set.set_value(1, "changed").unwrap();
        assert_eq!(set.get(0), Some(("key1", "value1")));
        assert_eq!(set.get(1), Some(("key2", "changed")));
        assert_eq!(set.get(2), Some(("key3", "value3")));
    }
}
