//! Directed cycle detection.

use std::collections::VecDeque;

use super::Adjacency;

/// Kahn's algorithm: repeatedly peel off nodes with no incoming edges.
/// Anything left over sits on, or behind, a cycle.
pub(crate) fn is_acyclic(successors: &Adjacency) -> bool {
    let mut in_degree = vec![0usize; successors.len()];
    for out in successors {
        for to in out {
            in_degree[to.index()] += 1;
        }
    }

    let mut ready: VecDeque<usize> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, d)| **d == 0)
        .map(|(i, _)| i)
        .collect();

    let mut peeled = 0;
    while let Some(node) = ready.pop_front() {
        peeled += 1;
        for to in &successors[node] {
            let d = &mut in_degree[to.index()];
            *d -= 1;
            if *d == 0 {
                ready.push_back(to.index());
            }
        }
    }

    peeled == successors.len()
}
