//! Field → message maps produced by a validation pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use quill_model::Field;

/// Validation messages keyed by field.
///
/// An error map is the complete result of one validation pass; callers replace
/// it wholesale rather than merging passes together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap<K: Ord = Field>(BTreeMap<K, String>);

impl<K: Ord> Default for ErrorMap<K> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<K: Ord + Copy> ErrorMap<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, message: impl Into<String>) {
        self.0.insert(key, message.into());
    }

    pub fn get(&self, key: K) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: K) -> bool {
        self.0.contains_key(&key)
    }

    /// Drop the message for `key`, if any.
    pub fn remove(&mut self, key: K) -> Option<String> {
        self.0.remove(&key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &str)> + '_ {
        self.0.iter().map(|(key, message)| (*key, message.as_str()))
    }
}

impl<K: Ord + Copy> FromIterator<(K, String)> for ErrorMap<K> {
    fn from_iter<I: IntoIterator<Item = (K, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
