//! # Resolution Model
//!
//! Plain data shared by the graph, the resolver and callers.
//! No I/O, no locking, no parsing here.

pub mod key;
pub mod entry;

pub use key::KeyId;
pub use entry::{ResolvedEntry, REFERENCE_UPPER_BOUND};
