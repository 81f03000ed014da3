//! Struct tag model and codec
//!
//! A struct tag is the raw string attached to a Go struct field, e.g.
//! `json:"name" xml:"name"`. This module turns such strings into a
//! [`TagMap`] and back.
//!
//! # Grammar
//!
//! Only `key:"value"` pairs are recognized. Keys are made of ASCII letters,
//! digits and underscores; values may be anything except a double quote.
//! Fragments that do not match are silently dropped on decode.
//!
//! # Ordering
//!
//! [`encode`] always emits keys in ascending byte order, independent of the
//! order in which they were inserted, so rewritten files produce stable diffs.

mod codec;

pub use codec::{decode, encode, is_valid_key, is_valid_value};

use std::collections::BTreeMap;
use std::fmt;

/// Key to value mapping for a single struct tag
///
/// Backed by a `BTreeMap` so iteration order is always the canonical
/// (lexicographic) encoding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    entries: BTreeMap<String, String>,
}

impl TagMap {
    /// Create an empty tag map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or replace a value, returning the previous one.
    ///
    /// Empty keys are ignored; a tag map never holds an empty key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        if key.is_empty() {
            return None;
        }
        self.entries.insert(key, value.into())
    }

    /// Remove a key, returning its value if it was present
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in encoding order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl fmt::Display for TagMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self))
    }
}
