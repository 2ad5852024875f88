//! End-to-end tests for layered stores and dependency queries.
//!
//! Layering decides which raw value a key has; the resolver then expands
//! across layers as if they were one store. Independent-property queries
//! run on the same graph regardless of cycles.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use propres::{LayeredStore, MemoryStore, PropertyStore, Resolver};

// ============================================================================
// 1. Layering precedence
// ============================================================================

#[test]
fn test_layering_precedence() {
    let first = MemoryStore::new().with("x", "1");
    let second = MemoryStore::new().with("x", "2").with("y", "3");
    let r = Resolver::new(LayeredStore::new(first, second));

    assert_eq!(r.get_value("x").as_deref(), Some("1"));
    assert_eq!(r.get_value("y").as_deref(), Some("3"));
}

// ============================================================================
// 2. References cross layers
// ============================================================================

#[test]
fn test_references_span_layers() {
    let overrides = MemoryStore::new().with("profile", "prod");
    let defaults = MemoryStore::new()
        .with("profile", "dev")
        .with("db.url", "jdbc:${profile}-db");
    let r = Resolver::new(overrides.layered_over(defaults));

    assert_eq!(r.get_value("db.url").as_deref(), Some("jdbc:prod-db"));
}

#[test]
fn test_shared_layers() {
    let base = Arc::new(MemoryStore::new().with("name", "base"));
    let a = Resolver::new(
        MemoryStore::new()
            .with("greet", "hi ${name}")
            .layered_over(Arc::clone(&base)),
    );
    let b = Resolver::new(
        MemoryStore::new()
            .with("name", "b")
            .with("greet", "yo ${name}")
            .layered_over(base),
    );

    assert_eq!(a.get_value("greet").as_deref(), Some("hi base"));
    assert_eq!(b.get_value("greet").as_deref(), Some("yo b"));
}

// ============================================================================
// 3. Independent properties
// ============================================================================

#[test]
fn test_independent_properties() {
    let store: MemoryStore = [("a", "${b}"), ("c", "independent")].into_iter().collect();
    let r = Resolver::new(store);

    let independent = r.independent_properties("a");
    assert!(independent.contains(&"c".to_string()));
    assert!(!independent.contains(&"b".to_string()));
    assert!(!independent.contains(&"a".to_string()));
}

#[test]
fn test_independent_properties_with_target_present() {
    let store: MemoryStore = [("a", "${b}"), ("b", "x"), ("c", "independent")]
        .into_iter()
        .collect();
    let r = Resolver::new(store);

    // a already draws on b, which cannot loop back to a
    assert_eq!(r.independent_properties("a"), vec!["b".to_string(), "c".to_string()]);
    assert_eq!(r.independent_properties("b"), vec!["c".to_string()]);
}

#[test]
fn test_independent_properties_excludes_transitive_dependents() {
    // top -> mid -> base, other stands alone
    let store: MemoryStore = [
        ("top", "${mid}"),
        ("mid", "${base}"),
        ("base", "b"),
        ("other", "o"),
    ]
    .into_iter()
    .collect();
    let r = Resolver::new(store);

    assert_eq!(r.independent_properties("base"), vec!["other".to_string()]);
    assert_eq!(
        r.independent_properties("top"),
        vec!["base".to_string(), "mid".to_string(), "other".to_string()],
    );
}

#[test]
fn test_independent_properties_on_cyclic_graph() {
    let store: MemoryStore = [("a", "${b}"), ("b", "${a}"), ("c", "free")].into_iter().collect();
    let r = Resolver::new(store);

    assert!(!r.is_acyclic());
    assert_eq!(r.independent_properties("a"), vec!["c".to_string()]);
}

// ============================================================================
// 4. Direct dependency queries
// ============================================================================

#[test]
fn test_dependencies_and_dependents() {
    let store: MemoryStore = [("url", "${host}:${port:80}"), ("host", "h"), ("port", "1")]
        .into_iter()
        .collect();
    let r = Resolver::new(store);

    assert_eq!(r.dependencies("url"), vec!["host".to_string(), "port".to_string()]);
    assert_eq!(r.dependents("port"), vec!["url".to_string()]);
    assert!(r.dependents("url").is_empty());
}
