//! # Property Store Trait
//!
//! The read-only contract between the resolver and wherever configuration
//! values come from. File parsing and metadata merging happen upstream;
//! the resolver only enumerates keys and looks values up.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | Owned key/value map, values may be unset |
//! | `LayeredStore` | `layered` | Primary then fallback, first value wins |
//! | `HashMap<String, String>` | here | Plain std map |
//!
//! References, `Arc` and `Box` of a store are stores too, so a resolver can
//! borrow rather than own its snapshot.

pub mod memory;
pub mod layered;

use std::borrow::Cow;
use std::sync::Arc;

use hashbrown::HashSet;

pub use memory::MemoryStore;
pub use layered::LayeredStore;

/// Read-only view over a flat key/value configuration snapshot.
///
/// Must not change while a `Resolver` is built on it.
pub trait PropertyStore: Send + Sync {
    /// Every key in the store.
    fn keys(&self) -> HashSet<String>;

    /// Whether `key` exists, even with an unset value.
    fn has_key(&self, key: &str) -> bool;

    /// Raw, unexpanded value. `None` when the key is absent or unset.
    fn get_value(&self, key: &str) -> Option<Cow<'_, str>>;

    /// Layer `self` over `fallback`.
    fn layered_over<F>(self, fallback: F) -> LayeredStore<Self, F>
    where
        Self: Sized,
        F: PropertyStore,
    {
        LayeredStore::new(self, fallback)
    }
}

// ============================================================================
// Forwarding impls
// ============================================================================

impl<S: PropertyStore + ?Sized> PropertyStore for &S {
    fn keys(&self) -> HashSet<String> {
        (**self).keys()
    }

    fn has_key(&self, key: &str) -> bool {
        (**self).has_key(key)
    }

    fn get_value(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).get_value(key)
    }
}

impl<S: PropertyStore + ?Sized> PropertyStore for Arc<S> {
    fn keys(&self) -> HashSet<String> {
        (**self).keys()
    }

    fn has_key(&self, key: &str) -> bool {
        (**self).has_key(key)
    }

    fn get_value(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).get_value(key)
    }
}

impl<S: PropertyStore + ?Sized> PropertyStore for Box<S> {
    fn keys(&self) -> HashSet<String> {
        (**self).keys()
    }

    fn has_key(&self, key: &str) -> bool {
        (**self).has_key(key)
    }

    fn get_value(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).get_value(key)
    }
}

impl PropertyStore for std::collections::HashMap<String, String> {
    fn keys(&self) -> HashSet<String> {
        std::collections::HashMap::keys(self).cloned().collect()
    }

    fn has_key(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn get_value(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_str()))
    }
}
