//! Memoized resolution result.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Default ceiling on cumulative reference substitutions for one key.
pub const REFERENCE_UPPER_BOUND: u64 = 1_000_000;

/// A resolved value and the number of substitutions it took to produce it.
///
/// An entry whose cost reached the ceiling holds the *unexpanded* raw value;
/// callers treat it as blown up and never inline it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEntry {
    pub value: Arc<str>,
    pub expansion_cost: u64,
}

impl ResolvedEntry {
    pub fn new(value: impl Into<Arc<str>>, expansion_cost: u64) -> Self {
        Self {
            value: value.into(),
            expansion_cost,
        }
    }

    /// True when this entry is the ceiling sentinel for `bound`.
    pub fn is_blown_up(&self, bound: u64) -> bool {
        self.expansion_cost >= bound
    }
}
