//! Build a `DependencyGraph` from a store snapshot.

use crate::config::PlaceholderSyntax;
use crate::expression::parse_with;
use crate::model::KeyId;
use crate::store::PropertyStore;
use super::DependencyGraph;

/// Scan every key of `store`, parse its value once and record an edge for
/// each reference whose target exists in the store.
///
/// References nested in defaults produce edges too: the resolver follows
/// them whenever the default is taken, so they must take part in the
/// acyclic check.
pub fn build<S: PropertyStore + ?Sized>(store: &S, syntax: &PlaceholderSyntax) -> DependencyGraph {
    let mut keys: Vec<String> = store.keys().into_iter().collect();
    keys.sort_unstable();

    let mut graph = DependencyGraph::with_keys(keys);

    for i in 0..graph.len() {
        let from = KeyId(i as u32);
        let Some(raw) = store.get_value(graph.key(from)) else {
            continue;
        };
        if raw.is_empty() || !raw.contains(syntax.prefix.as_str()) {
            continue;
        }

        let expr = parse_with(&raw, syntax);
        let targets: Vec<_> = expr
            .referenced_keys()
            .into_iter()
            .filter_map(|k| graph.id(k))
            .collect();
        for to in targets {
            graph.add_edge(from, to);
        }
    }

    tracing::debug!(
        keys = graph.len(),
        edges = graph.edge_count(),
        "built property dependency graph"
    );
    graph
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn edges(graph: &DependencyGraph) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for from in graph.keys() {
            let id = graph.id(from).unwrap();
            for to in graph.successors(id) {
                out.push((from.to_string(), graph.key(*to).to_string()));
            }
        }
        out.sort();
        out
    }

    fn pair(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn test_edges_only_for_present_targets() {
        let store = MemoryStore::new()
            .with("a", "${b}-${missing}")
            .with("b", "${c:default}")
            .with("c", "plain");
        let graph = build(&store, &PlaceholderSyntax::default());

        assert_eq!(graph.len(), 3);
        assert_eq!(edges(&graph), vec![pair("a", "b"), pair("b", "c")]);
    }

    #[test]
    fn test_duplicate_references_collapse() {
        let store = MemoryStore::new().with("a", "${b}${b}${b}").with("b", "x");
        let graph = build(&store, &PlaceholderSyntax::default());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_self_reference_recorded() {
        let store = MemoryStore::new().with("a", "${a}");
        let graph = build(&store, &PlaceholderSyntax::default());
        assert_eq!(edges(&graph), vec![pair("a", "a")]);
    }

    #[test]
    fn test_default_references_produce_edges() {
        let store = MemoryStore::new()
            .with("a", "${missing:${b}}")
            .with("b", "x");
        let graph = build(&store, &PlaceholderSyntax::default());
        assert_eq!(edges(&graph), vec![pair("a", "b")]);
    }

    #[test]
    fn test_unset_and_literal_values_have_no_edges() {
        let mut store = MemoryStore::new().with("a", "no refs").with("b", "");
        store.insert_unset("c");
        let graph = build(&store, &PlaceholderSyntax::default());

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_custom_syntax() {
        let store = MemoryStore::new().with("a", "#{b} ${c}").with("b", "1").with("c", "2");
        let syntax = PlaceholderSyntax { prefix: "#{".into(), ..Default::default() };
        let graph = build(&store, &syntax);
        assert_eq!(edges(&graph), vec![pair("a", "b")]);
    }
}
