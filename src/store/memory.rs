//! In-memory property store.
//!
//! The reference implementation of `PropertyStore`. Build it up front, then
//! hand it (or a reference to it) to a `Resolver`; the resolver never writes.

use std::borrow::Cow;

use hashbrown::{HashMap, HashSet};

use super::PropertyStore;

/// Owned key/value snapshot. A key may be present with no value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), Some(value.into()));
        self
    }

    /// Register `key` with an unset (null) value.
    pub fn insert_unset(&mut self, key: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), None);
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        }
    }
}

impl PropertyStore for MemoryStore {
    fn keys(&self) -> HashSet<String> {
        self.values.keys().cloned().collect()
    }

    fn has_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn get_value(&self, key: &str) -> Option<Cow<'_, str>> {
        self.values
            .get(key)
            .and_then(|v| v.as_deref())
            .map(Cow::Borrowed)
    }
}

// ============================================================================
// Tests
// ============================================================================
