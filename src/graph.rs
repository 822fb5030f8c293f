//! Adapter between petgraph's undirected graphs and the per-level view the
//! optimizer works on.
//!
//! Nodes of a `Graph` are indexed densely (`0..node_count`), so a node's
//! `NodeIndex::index()` doubles as its slot in every per-node array below.
//!
//! Degree convention: a self-loop of weight `w` adds `2w` to its node's degree
//! and `w` to the total size `m`, which keeps `Σ degree == 2m` on every level.

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

/// Weight carried by an edge payload.
///
/// Unweighted graphs (`UnGraph<N, ()>`) weigh every edge as 1.
pub trait EdgeWeight {
    /// The edge's weight as a float.
    fn weight(&self) -> f64;
}

impl EdgeWeight for () {
    fn weight(&self) -> f64 {
        1.0
    }
}

impl EdgeWeight for f64 {
    fn weight(&self) -> f64 {
        *self
    }
}

impl EdgeWeight for f32 {
    fn weight(&self) -> f64 {
        f64::from(*self)
    }
}

macro_rules! impl_edge_weight_lossless {
    ($($t:ty),*) => {
        $(impl EdgeWeight for $t {
            fn weight(&self) -> f64 {
                f64::from(*self)
            }
        })*
    };
}

impl_edge_weight_lossless!(u8, u16, u32, i32);

macro_rules! impl_edge_weight_cast {
    ($($t:ty),*) => {
        $(impl EdgeWeight for $t {
            fn weight(&self) -> f64 {
                *self as f64
            }
        })*
    };
}

impl_edge_weight_cast!(u64, usize, i64);

impl<T: EdgeWeight + ?Sized> EdgeWeight for &T {
    fn weight(&self) -> f64 {
        (**self).weight()
    }
}

/// Index-dense snapshot of one graph level.
#[derive(Debug, Clone)]
pub(crate) struct LevelGraph {
    /// node -> [(neighbor, weight)], self-loops excluded, parallel edges kept.
    adj: Vec<Vec<(usize, f64)>>,
    /// Summed self-loop weight per node.
    self_loops: Vec<f64>,
    /// Weighted degree per node.
    degrees: Vec<f64>,
    /// Total edge weight `m`.
    size: f64,
}

impl LevelGraph {
    pub(crate) fn from_graph<N, E: EdgeWeight>(graph: &UnGraph<N, E>) -> Self {
        let n = graph.node_count();
        let mut adj = vec![Vec::new(); n];
        let mut self_loops = vec![0.0; n];
        let mut degrees = vec![0.0; n];
        let mut size = 0.0;

        for edge in graph.edge_references() {
            let i = edge.source().index();
            let j = edge.target().index();
            let w = edge.weight().weight();
            size += w;
            degrees[i] += w;
            degrees[j] += w;
            if i == j {
                self_loops[i] += w;
            } else {
                adj[i].push((j, w));
                adj[j].push((i, w));
            }
        }

        Self {
            adj,
            self_loops,
            degrees,
            size,
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// Neighbours of `node` other than itself, one entry per edge.
    pub(crate) fn neighbors(&self, node: usize) -> &[(usize, f64)] {
        &self.adj[node]
    }

    pub(crate) fn self_loop(&self, node: usize) -> f64 {
        self.self_loops[node]
    }

    pub(crate) fn degree(&self, node: usize) -> f64 {
        self.degrees[node]
    }

    pub(crate) fn size(&self) -> f64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unweighted_edges_weigh_one() {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let _ = graph.add_edge(a, b, ());

        let level = LevelGraph::from_graph(&graph);
        assert_eq!(level.size(), 1.0);
        assert_eq!(level.degree(0), 1.0);
        assert_eq!(level.neighbors(1), &[(0, 1.0)]);
    }

    #[test]
    fn test_self_loop_counts_twice_in_degree() {
        let mut graph = UnGraph::<(), f64>::new_undirected();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let _ = graph.add_edge(a, a, 2.5);
        let _ = graph.add_edge(a, b, 1.0);

        let level = LevelGraph::from_graph(&graph);
        assert_eq!(level.size(), 3.5);
        assert_eq!(level.self_loop(0), 2.5);
        assert_eq!(level.degree(0), 6.0);
        assert_eq!(level.degree(1), 1.0);
        // Self-loops never show up as neighbours.
        assert_eq!(level.neighbors(0), &[(1, 1.0)]);

        let total: f64 = (0..level.node_count()).map(|i| level.degree(i)).sum();
        assert_eq!(total, 2.0 * level.size());
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let mut graph = UnGraph::<(), u32>::new_undirected();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let _ = graph.add_edge(a, b, 2);
        let _ = graph.add_edge(b, a, 3);

        let level = LevelGraph::from_graph(&graph);
        assert_eq!(level.size(), 5.0);
        assert_eq!(level.neighbors(0).len(), 2);
        assert_eq!(level.degree(1), 5.0);
    }
}
