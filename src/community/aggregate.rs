//! Phase 2 of a Louvain level: aggregation.
//!
//! Every community becomes one node of a new graph. Edge weights between
//! communities are summed, and edges inside a community (its members'
//! self-loops included) collapse into a self-loop on the community's node.

use crate::graph::EdgeWeight;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Collapse `graph` along `community_map`.
///
/// `community_map[i]` is the community of the node with index `i`. Community
/// ids should be dense (`0..k`); node `c` of the result stands for community
/// `c`, and an id nobody maps to becomes an isolated node. Each undirected
/// edge of `graph` is visited once, so the total edge weight is preserved.
///
/// # Panics
///
/// If `community_map` does not have exactly one entry per node of `graph`.
///
/// ```rust
/// use petgraph::graph::{NodeIndex, UnGraph};
/// use louvain::coarsen;
///
/// let mut graph = UnGraph::<(), f64>::new_undirected();
/// let a = graph.add_node(());
/// let b = graph.add_node(());
/// let c = graph.add_node(());
/// graph.add_edge(a, b, 2.0);
/// graph.add_edge(b, c, 1.0);
///
/// let coarse = coarsen(&graph, &[0, 0, 1]);
/// assert_eq!(coarse.node_count(), 2);
/// let inner = coarse.find_edge(NodeIndex::new(0), NodeIndex::new(0)).unwrap();
/// assert_eq!(coarse[inner], 2.0);
/// ```
pub fn coarsen<N, E: EdgeWeight>(
    graph: &UnGraph<N, E>,
    community_map: &[usize],
) -> UnGraph<(), f64> {
    assert_eq!(
        community_map.len(),
        graph.node_count(),
        "community map has {} entries for a graph of {} nodes",
        community_map.len(),
        graph.node_count()
    );

    let k = community_map.iter().copied().max().map_or(0, |c| c + 1);
    let mut coarse = UnGraph::<(), f64>::with_capacity(k, graph.edge_count());
    for _ in 0..k {
        let _ = coarse.add_node(());
    }

    // Edges are created in first-seen order so the result does not depend on
    // hash iteration order.
    let mut merged: HashMap<(usize, usize), EdgeIndex> = HashMap::new();
    for edge in graph.edge_references() {
        let c1 = community_map[edge.source().index()];
        let c2 = community_map[edge.target().index()];
        let key = if c1 <= c2 { (c1, c2) } else { (c2, c1) };
        let w = edge.weight().weight();

        match merged.get(&key) {
            Some(&e) => coarse[e] += w,
            None => {
                let e = coarse.add_edge(NodeIndex::new(key.0), NodeIndex::new(key.1), w);
                let _ = merged.insert(key, e);
            }
        }
    }

    coarse
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LevelGraph;

    fn weight_between(graph: &UnGraph<(), f64>, a: usize, b: usize) -> Option<f64> {
        graph
            .find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .map(|e| graph[e])
    }

    #[test]
    fn test_coarsen_two_pairs() {
        // {A,B} -> 0, {C,D} -> 1; A-B 2, C-D 3, B-C 1.
        let mut graph = UnGraph::<&str, f64>::new_undirected();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        let d = graph.add_node("D");
        let _ = graph.add_edge(a, b, 2.0);
        let _ = graph.add_edge(c, d, 3.0);
        let _ = graph.add_edge(b, c, 1.0);

        let coarse = coarsen(&graph, &[0, 0, 1, 1]);

        assert_eq!(coarse.node_count(), 2);
        assert_eq!(coarse.edge_count(), 3);
        assert_eq!(weight_between(&coarse, 0, 0), Some(2.0));
        assert_eq!(weight_between(&coarse, 1, 1), Some(3.0));
        assert_eq!(weight_between(&coarse, 0, 1), Some(1.0));
        assert_eq!(weight_between(&coarse, 1, 0), Some(1.0));
    }

    #[test]
    fn test_coarsen_accumulates_self_loops_and_parallel_edges() {
        let mut graph = UnGraph::<(), u32>::new_undirected();
        let nodes: Vec<_> = (0..4).map(|_| graph.add_node(())).collect();
        let _ = graph.add_edge(nodes[0], nodes[0], 4);
        let _ = graph.add_edge(nodes[0], nodes[1], 1);
        let _ = graph.add_edge(nodes[1], nodes[2], 2);
        let _ = graph.add_edge(nodes[3], nodes[0], 5);
        let _ = graph.add_edge(nodes[2], nodes[3], 1);

        let coarse = coarsen(&graph, &[0, 0, 1, 1]);

        assert_eq!(weight_between(&coarse, 0, 0), Some(5.0));
        assert_eq!(weight_between(&coarse, 1, 1), Some(1.0));
        assert_eq!(weight_between(&coarse, 0, 1), Some(7.0));

        // Total weight survives aggregation.
        let before = LevelGraph::from_graph(&graph).size();
        let after = LevelGraph::from_graph(&coarse).size();
        assert_eq!(before, after);
    }

    #[test]
    fn test_coarsen_keeps_isolated_communities() {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let _ = graph.add_node(());
        let _ = graph.add_edge(a, b, ());

        let coarse = coarsen(&graph, &[0, 0, 1]);

        assert_eq!(coarse.node_count(), 2);
        assert_eq!(coarse.edge_count(), 1);
        assert_eq!(weight_between(&coarse, 0, 0), Some(1.0));
        assert_eq!(coarse.edges(NodeIndex::new(1)).count(), 0);
    }

    #[test]
    fn test_coarsen_empty_graph() {
        let graph = UnGraph::<(), ()>::new_undirected();
        let coarse = coarsen(&graph, &[]);
        assert_eq!(coarse.node_count(), 0);
    }

    #[test]
    #[should_panic(expected = "community map has 1 entries")]
    fn test_coarsen_rejects_short_map() {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let _ = graph.add_node(());
        let _ = graph.add_node(());
        let _ = coarsen(&graph, &[0]);
    }
}
