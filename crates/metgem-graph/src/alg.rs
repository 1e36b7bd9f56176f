//! Graph traversal helpers.

use crate::Graph;
use std::collections::VecDeque;

/// Connected components of `g`, in discovery order (BFS from the lowest unseen
/// vertex). Every vertex appears in exactly one component; components are computed
/// fresh from the current graph state on every call.
pub fn connected_components(g: &Graph) -> Vec<Vec<usize>> {
    let mut seen = vec![false; g.vertex_count()];
    let mut out: Vec<Vec<usize>> = Vec::new();

    for start in 0..g.vertex_count() {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut comp: Vec<usize> = Vec::new();
        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(start);
        while let Some(v) = queue.pop_front() {
            comp.push(v);
            for n in g.neighbors(v) {
                if !seen[n] {
                    seen[n] = true;
                    queue.push_back(n);
                }
            }
        }
        out.push(comp);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_has_no_components() {
        assert!(connected_components(&Graph::new()).is_empty());
    }

    #[test]
    fn isolated_vertices_are_singleton_components() {
        let mut g = Graph::new();
        g.add_vertices(3);
        let comps = connected_components(&g);
        assert_eq!(comps, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn components_partition_the_vertex_set() {
        let mut g = Graph::new();
        g.add_vertices(6);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(4, 5).unwrap();

        let comps = connected_components(&g);
        assert_eq!(comps.len(), 3);
        assert_eq!(comps[0], vec![0, 1, 2]);
        assert_eq!(comps[1], vec![3]);
        assert_eq!(comps[2], vec![4, 5]);

        let mut all: Vec<usize> = comps.into_iter().flatten().collect();
        all.sort_unstable();
        assert_eq!(all, (0..6).collect::<Vec<_>>());
    }
}
