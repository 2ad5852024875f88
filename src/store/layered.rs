//! Two stores composed, primary first.

use std::borrow::Cow;

use hashbrown::HashSet;

use super::PropertyStore;

/// Looks up `primary` first and falls back to `fallback`.
///
/// Keys are the union of both layers. A value is taken from the first layer
/// that has a non-null one, so an unset key in `primary` does not hide a
/// value in `fallback`. Chain several stores by nesting.
#[derive(Debug, Clone)]
pub struct LayeredStore<P, F> {
    primary: P,
    fallback: F,
}

impl<P: PropertyStore, F: PropertyStore> LayeredStore<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }
}

impl<P: PropertyStore, F: PropertyStore> PropertyStore for LayeredStore<P, F> {
    fn keys(&self) -> HashSet<String> {
        let mut keys = self.primary.keys();
        keys.extend(self.fallback.keys());
        keys
    }

    fn has_key(&self, key: &str) -> bool {
        self.primary.has_key(key) || self.fallback.has_key(key)
    }

    fn get_value(&self, key: &str) -> Option<Cow<'_, str>> {
        self.primary
            .get_value(key)
            .or_else(|| self.fallback.get_value(key))
    }
}
