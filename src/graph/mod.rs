//! # Dependency Graph
//!
//! Directed graph over the keys of one store snapshot: an edge `a -> b`
//! means the value of `a` references `b`, and `b` exists in the store.
//!
//! Keys are interned into dense `KeyId`s at build time so traversals work
//! on integer adjacency lists instead of hashing strings.
//!
//! | Query | Module | Algorithm |
//! |-------|--------|-----------|
//! | construction | `builder` | one parse per value |
//! | acyclic check | `cycle` | Kahn's in-degree reduction, computed once |
//! | independent keys | `reachability` | BFS over reversed edges |
//!
//! The graph is immutable once built. A changed store needs a new graph.

pub mod builder;
pub mod cycle;
pub mod reachability;

use std::sync::OnceLock;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::model::KeyId;

pub use builder::build;

/// Neighbour list of one key. Most values reference only a few keys.
pub type Neighbors = SmallVec<[KeyId; 4]>;

/// Adjacency lists indexed by `KeyId`.
pub type Adjacency = Vec<Neighbors>;

/// Immutable reference graph for one store snapshot.
#[derive(Debug)]
pub struct DependencyGraph {
    /// KeyId → key
    keys: Vec<String>,
    /// key → KeyId
    index: HashMap<String, KeyId>,
    /// outgoing edges: key → keys it references
    successors: Adjacency,
    edge_count: usize,
    /// incoming edges, built on first use
    predecessors: OnceLock<Adjacency>,
    acyclic: OnceLock<bool>,
}

impl DependencyGraph {
    /// Graph with `keys` as nodes and no edges. Ids follow iteration order.
    pub(crate) fn with_keys(keys: Vec<String>) -> Self {
        let index = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), KeyId(i as u32)))
            .collect();
        let successors = vec![Neighbors::new(); keys.len()];
        Self {
            keys,
            index,
            successors,
            edge_count: 0,
            predecessors: OnceLock::new(),
            acyclic: OnceLock::new(),
        }
    }

    /// Insert `from -> to`. Duplicate edges collapse; self-loops are kept.
    pub(crate) fn add_edge(&mut self, from: KeyId, to: KeyId) -> bool {
        let out = &mut self.successors[from.index()];
        if out.contains(&to) {
            return false;
        }
        out.push(to);
        self.edge_count += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn id(&self, key: &str) -> Option<KeyId> {
        self.index.get(key).copied()
    }

    pub fn key(&self, id: KeyId) -> &str {
        &self.keys[id.index()]
    }

    /// All keys in id order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Keys referenced by `id`.
    pub fn successors(&self, id: KeyId) -> &[KeyId] {
        &self.successors[id.index()]
    }

    /// Keys whose values reference `id`.
    pub fn predecessors(&self, id: KeyId) -> &[KeyId] {
        &self.reversed()[id.index()]
    }

    pub fn contains_edge(&self, from: KeyId, to: KeyId) -> bool {
        self.successors[from.index()].contains(&to)
    }

    /// Reversed adjacency, computed on first call.
    pub fn reversed(&self) -> &Adjacency {
        self.predecessors.get_or_init(|| {
            let mut reversed = vec![Neighbors::new(); self.keys.len()];
            for (from, out) in self.successors.iter().enumerate() {
                for to in out {
                    reversed[to.index()].push(KeyId(from as u32));
                }
            }
            reversed
        })
    }

    /// Whether the graph has no directed cycle, self-loops included.
    /// Computed at most once.
    pub fn is_acyclic(&self) -> bool {
        *self.acyclic.get_or_init(|| {
            let acyclic = cycle::is_acyclic(&self.successors);
            if acyclic {
                tracing::debug!(
                    keys = self.len(),
                    edges = self.edge_count,
                    "dependency graph is acyclic"
                );
            } else {
                tracing::debug!(
                    keys = self.len(),
                    edges = self.edge_count,
                    "dependency graph has a cycle, placeholder expansion disabled"
                );
            }
            acyclic
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
