use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A string key that compares, orders and hashes without regard to case.
///
/// The original spelling is kept for display and serialization.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoreCase(String);

impl IgnoreCase {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn folded(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars().flat_map(char::to_lowercase)
    }
}

impl PartialEq for IgnoreCase {
    fn eq(&self, other: &Self) -> bool {
        self.folded().eq(other.folded())
    }
}

impl Eq for IgnoreCase {}

impl PartialOrd for IgnoreCase {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IgnoreCase {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded().cmp(other.folded())
    }
}

impl Hash for IgnoreCase {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.folded() {
            c.hash(state);
        }
    }
}

impl fmt::Debug for IgnoreCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for IgnoreCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IgnoreCase {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for IgnoreCase {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A map keyed by case-insensitive strings.
///
/// Inserting over an existing key replaces the value but keeps the first spelling
/// of the key.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoreCaseMap<V> {
    entries: BTreeMap<IgnoreCase, V>,
}

impl<V> Default for IgnoreCaseMap<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V> IgnoreCaseMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<IgnoreCase>, value: V) -> Option<V> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(&IgnoreCase::new(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(IgnoreCase::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copies every entry of `other` into `self`, overwriting on key collision.
    pub fn extend_overwriting(&mut self, other: IgnoreCaseMap<V>) {
        for (key, value) in other.entries {
            self.entries.insert(key, value);
        }
    }
}

impl<V: PartialEq> PartialEq for IgnoreCaseMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|((ka, va), (kb, vb))| ka.as_str() == kb.as_str() && va == vb)
    }
}

impl<V: fmt::Debug> fmt::Debug for IgnoreCaseMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<K: Into<IgnoreCase>, V> FromIterator<(K, V)> for IgnoreCaseMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookups_ignore_case() {
        let mut map = IgnoreCaseMap::new();
        map.insert("Worker:WorkerBasic_SR_T02", 1);
        assert_eq!(map.get("worker:workerbasic_sr_t02"), Some(&1));
        assert!(map.contains_key("WORKER:WORKERBASIC_SR_T02"));
    }

    #[test]
    fn overwrite_keeps_first_spelling() {
        let mut map = IgnoreCaseMap::new();
        map.insert("SR_T01", 1);
        assert_eq!(map.insert("sr_t01", 2), Some(1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["SR_T01"]);
        assert_eq!(map.get("Sr_T01"), Some(&2));
    }

    #[test]
    fn serializes_as_plain_object() {
        let map: IgnoreCaseMap<u32> = [("b", 2), ("A", 1)].into_iter().collect();
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"A":1,"b":2}"#);

        let back: IgnoreCaseMap<u32> = serde_json::from_str(r#"{"Key":3}"#).unwrap();
        assert_eq!(back.get("KEY"), Some(&3));
    }
}
