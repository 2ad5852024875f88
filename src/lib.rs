//! # propres: Property Placeholder Resolution
//!
//! Expands `${key}` and `${key:default}` references in a flat key/value
//! configuration store, and guarantees termination for cyclic or
//! combinatorially exploding ("billion laughs") reference graphs.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `PropertyStore` is the contract between the engine and
//!    wherever configuration comes from
//! 2. **Parser owns nothing**: raw value → `Expression` is a pure function
//! 3. **Never crash the caller**: every degenerate input has a fallback,
//!    queries never return errors
//! 4. **Snapshot semantics**: graph and memo cache are built for one store
//!    snapshot and never invalidated
//!
//! ## Quick Start
//!
//! ```rust
//! use propres::{MemoryStore, Resolver};
//!
//! let store = MemoryStore::new()
//!     .with("host", "localhost")
//!     .with("url", "http://${host}:${port:8080}/")
//!     .with("app", "demo");
//!
//! let resolver = Resolver::new(store);
//! assert_eq!(resolver.get_value("url").as_deref(), Some("http://localhost:8080/"));
//!
//! // "url" may reference "app" or "host" without closing a cycle.
//! assert_eq!(resolver.independent_properties("url"), vec!["app", "host"]);
//! // "host" must not reference "url".
//! assert_eq!(resolver.independent_properties("host"), vec!["app"]);
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module | Notes |
//! |-------|--------|-------|
//! | Parse | `expression` | lenient, `${` without `}` stays literal |
//! | Graph | `graph` | edges only to keys present in the store |
//! | Cycle check | `graph::cycle` | once per snapshot; any cycle ⇒ pass-through |
//! | Expand | `resolver` | memoized, cost-bounded, explicit work stack |
//! | Independent keys | `graph::reachability` | BFS on reversed edges |

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod model;
pub mod expression;
pub mod store;
pub mod graph;
pub mod resolver;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{PlaceholderSyntax, ResolverConfig};
pub use model::{KeyId, ResolvedEntry, REFERENCE_UPPER_BOUND};
pub use expression::{parse, parse_with, Expression, Reference, Segment};
pub use store::{PropertyStore, MemoryStore, LayeredStore};
pub use graph::DependencyGraph;
pub use resolver::Resolver;

// ============================================================================
// Error Types
// ============================================================================

/// Construction-time failures. Resolution itself never errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
