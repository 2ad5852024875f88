//! # Resolver
//!
//! Expands `${key}` / `${key:default}` references across one store snapshot.
//!
//! ## Guarantees
//!
//! 1. **Never fails**: absent keys give `None`, malformed syntax stays
//!    literal, unresolvable references are re-emitted as `${key}`.
//! 2. **Terminates**: if the dependency graph has any cycle, expansion is
//!    switched off for the whole snapshot and raw values pass through.
//!    Otherwise every key is expanded at most once and a key whose
//!    cumulative substitution count reaches the ceiling keeps its raw value.
//! 3. **Shareable**: one `Resolver` can serve many threads. The memo cache
//!    sits behind a mutex held for the whole of one resolution, so racing
//!    callers converge on a single computation.
//!
//! ## Limitations
//!
//! - **No invalidation**: the graph and cache belong to one snapshot. Build a
//!   new `Resolver` when configuration changes.
//! - **Global pass-through**: a single cycle anywhere disables expansion for
//!   every key, including keys nowhere near the cycle.

mod expand;

use std::borrow::Cow;

use parking_lot::Mutex;

use crate::config::ResolverConfig;
use crate::graph::{self, reachability, DependencyGraph};
use crate::model::{KeyId, ResolvedEntry};
use crate::store::PropertyStore;
use crate::Result;

use expand::{Cache, Expander};

// ============================================================================
// Resolver
// ============================================================================

/// Placeholder resolution engine over a read-only `PropertyStore`.
pub struct Resolver<S: PropertyStore> {
    store: S,
    config: ResolverConfig,
    graph: DependencyGraph,
    cache: Mutex<Cache>,
}

impl<S: PropertyStore> Resolver<S> {
    /// Resolver with the default `${key:default}` syntax and ceiling.
    pub fn new(store: S) -> Self {
        Self::build(store, ResolverConfig::default())
    }

    /// Resolver with a validated custom configuration.
    pub fn with_config(store: S, config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(store, config))
    }

    fn build(store: S, config: ResolverConfig) -> Self {
        let graph = graph::build(&store, &config.syntax);
        Self {
            store,
            config,
            graph,
            cache: Mutex::new(Cache::new()),
        }
    }

    // ========================================================================
    // Values
    // ========================================================================

    /// Expanded value of `key`.
    ///
    /// Returns the raw value unchanged when the graph is cyclic or the key
    /// hit the expansion ceiling, and `None` when the key is absent or unset.
    ///
    /// A present key whose value expands to the empty string returns
    /// `Some("")`, so it stays distinguishable from an absent key. Internally
    /// such a key has no memo entry: `resolve_entry` returns `None` for it,
    /// and a reference to it is treated as unresolved (its default is used,
    /// or the placeholder is kept).
    pub fn get_value(&self, key: &str) -> Option<String> {
        if !self.graph.is_acyclic() {
            return self.store.get_value(key).map(Cow::into_owned);
        }
        match self.resolve_entry(key) {
            Some(entry) => Some(entry.value.to_string()),
            None => self.store.get_value(key).map(|_| String::new()),
        }
    }

    /// Memoized entry for `key`, resolving it on first access.
    ///
    /// `None` in pass-through mode, for absent or unset keys, and for values
    /// that expand to the empty string.
    pub fn resolve_entry(&self, key: &str) -> Option<ResolvedEntry> {
        if !self.graph.is_acyclic() || !self.store.has_key(key) {
            return None;
        }
        let id = self.graph.id(key)?;

        let mut cache = self.cache.lock();
        if let Some(hit) = cache.get(&id) {
            return hit.clone();
        }
        self.expander().resolve(&mut cache, id)
    }

    /// Expand references in arbitrary text against the store.
    ///
    /// Same rules as `get_value`. The text is returned unchanged in
    /// pass-through mode or if it hits the ceiling.
    pub fn expand(&self, text: &str) -> String {
        if !self.graph.is_acyclic() || !text.contains(self.config.syntax.prefix.as_str()) {
            return text.to_string();
        }
        let mut cache = self.cache.lock();
        self.expander()
            .expand_text(&mut cache, text)
            .map(|entry| entry.value.to_string())
            .unwrap_or_default()
    }

    fn expander(&self) -> Expander<'_, S> {
        Expander {
            store: &self.store,
            graph: &self.graph,
            config: &self.config,
        }
    }

    // ========================================================================
    // Graph queries
    // ========================================================================

    /// Whether expansion is enabled for this snapshot.
    pub fn is_acyclic(&self) -> bool {
        self.graph.is_acyclic()
    }

    /// Keys whose values cannot transitively depend on `key`, sorted.
    ///
    /// Any of them can be referenced from `key` without creating a cycle.
    /// Works whether or not the graph is acyclic.
    pub fn independent_properties(&self, key: &str) -> Vec<String> {
        reachability::independent_of(&self.graph, key)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Keys referenced directly by `key`'s value, sorted.
    pub fn dependencies(&self, key: &str) -> Vec<String> {
        let Some(id) = self.graph.id(key) else {
            return Vec::new();
        };
        self.sorted_keys(self.graph.successors(id))
    }

    /// Keys whose values reference `key` directly, sorted.
    pub fn dependents(&self, key: &str) -> Vec<String> {
        let Some(id) = self.graph.id(key) else {
            return Vec::new();
        };
        self.sorted_keys(self.graph.predecessors(id))
    }

    fn sorted_keys(&self, ids: &[KeyId]) -> Vec<String> {
        let mut keys: Vec<String> = ids.iter().map(|&id| self.graph.key(id).to_string()).collect();
        keys.sort();
        keys
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

impl<S: PropertyStore + std::fmt::Debug> std::fmt::Debug for Resolver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("store", &self.store)
            .field("config", &self.config)
            .field("keys", &self.graph.len())
            .field("edges", &self.graph.edge_count())
            .field("cached", &self.cache.lock().len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
