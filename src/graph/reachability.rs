//! Which keys do not depend on a given key.

use std::collections::VecDeque;

use crate::model::KeyId;
use super::DependencyGraph;

/// Mark every key whose value transitively references `start`, `start`
/// included. BFS over the reversed edges.
pub fn dependents_closure(graph: &DependencyGraph, start: KeyId) -> Vec<bool> {
    let reversed = graph.reversed();
    let mut visited = vec![false; graph.len()];
    let mut queue = VecDeque::from([start]);
    visited[start.index()] = true;

    while let Some(node) = queue.pop_front() {
        for &prev in &reversed[node.index()] {
            if !visited[prev.index()] {
                visited[prev.index()] = true;
                queue.push_back(prev);
            }
        }
    }
    visited
}

/// Keys whose values cannot transitively depend on `key`, in id order.
///
/// Referencing any of them from `key` cannot close a cycle. A key unknown to
/// the graph has no dependents, so every key is independent of it.
pub fn independent_of<'g>(graph: &'g DependencyGraph, key: &str) -> Vec<&'g str> {
    let Some(start) = graph.id(key) else {
        return graph.keys().collect();
    };
    let dependent = dependents_closure(graph, start);
    graph
        .keys()
        .zip(dependent)
        .filter(|(_, dep)| !dep)
        .map(|(k, _)| k)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlaceholderSyntax;
    use crate::graph::build;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn chain() -> DependencyGraph {
        // d -> a -> b, c stands alone
        let store = MemoryStore::new()
            .with("a", "${b}")
            .with("b", "x")
            .with("c", "independent")
            .with("d", "${a}");
        build(&store, &PlaceholderSyntax::default())
    }

    #[test]
    fn test_dependents_closure() {
        let graph = chain();
        let flags = dependents_closure(&graph, graph.id("b").unwrap());
        let marked: Vec<&str> = graph
            .keys()
            .zip(flags)
            .filter(|(_, f)| *f)
            .map(|(k, _)| k)
            .collect();
        assert_eq!(marked, vec!["a", "b", "d"]);
    }

    #[test]
    fn test_excludes_self_and_dependents() {
        let graph = chain();

        assert_eq!(independent_of(&graph, "a"), vec!["b", "c"]);
        assert_eq!(independent_of(&graph, "b"), vec!["c"]);
        assert_eq!(independent_of(&graph, "d"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_reference_target_is_not_a_node() {
        let store = MemoryStore::new().with("a", "${b}").with("c", "independent");
        let graph = build(&store, &PlaceholderSyntax::default());
        assert_eq!(independent_of(&graph, "a"), vec!["c"]);
    }

    #[test]
    fn test_unknown_key() {
        let store = MemoryStore::new().with("a", "1").with("b", "2");
        let graph = build(&store, &PlaceholderSyntax::default());
        assert_eq!(independent_of(&graph, "zzz"), vec!["a", "b"]);
    }

    #[test]
    fn test_works_on_cyclic_graph() {
        let store = MemoryStore::new()
            .with("a", "${b}")
            .with("b", "${a}")
            .with("c", "${a}")
            .with("e", "solo");
        let graph = build(&store, &PlaceholderSyntax::default());

        assert!(!graph.is_acyclic());
        assert_eq!(independent_of(&graph, "a"), vec!["e"]);
    }

    #[test]
    fn test_self_loop_start() {
        let store = MemoryStore::new().with("a", "${a}").with("b", "x");
        let graph = build(&store, &PlaceholderSyntax::default());
        assert_eq!(independent_of(&graph, "a"), vec!["b"]);
    }
}
