//! Modularity of a partition.
//!
//! ```text
//! Q = (1/2m) Σ_C Σ_{u,v ∈ C} [A_uv − k_u·k_v / 2m]
//! ```
//!
//! Summing over ordered pairs, an edge inside a community contributes `2w`,
//! and so does a self-loop (the `u == v` pair counts it twice). The degree
//! term factors per community into `Σ_tot(C)² / 2m`, so the score is computed
//! in a single pass over the edges instead of over all member pairs.

use crate::error::{Error, PartitionDefect, Result};
use crate::graph::EdgeWeight;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// Modularity of `partition` on `graph`.
///
/// `partition` must list every node of `graph` exactly once, spread over
/// non-empty communities. The order of communities, and of nodes within a
/// community, does not affect the result.
///
/// # Errors
///
/// - [`Error::DegenerateGraph`] if the graph has zero total edge weight.
/// - [`Error::InvalidPartition`] if `partition` is not an exact cover.
///
/// ```rust
/// use petgraph::graph::UnGraph;
/// use louvain::modularity;
///
/// let mut graph = UnGraph::<(), ()>::new_undirected();
/// let a = graph.add_node(());
/// let b = graph.add_node(());
/// graph.add_edge(a, b, ());
///
/// let q = modularity(&graph, &[vec![a, b]]).unwrap();
/// assert!(q.abs() < 1e-12);
/// ```
pub fn modularity<N, E: EdgeWeight>(
    graph: &UnGraph<N, E>,
    partition: &[Vec<NodeIndex>],
) -> Result<f64> {
    let labels = labels_from_partition(graph.node_count(), partition)?;
    score(graph, &labels, partition.len())
}

/// Modularity of a node -> community map whose ids are below `k`.
pub(crate) fn score<N, E: EdgeWeight>(
    graph: &UnGraph<N, E>,
    labels: &[usize],
    k: usize,
) -> Result<f64> {
    let mut community_degrees = vec![0.0; k];
    let mut internal = 0.0;
    let mut m = 0.0;

    for edge in graph.edge_references() {
        let cu = labels[edge.source().index()];
        let cv = labels[edge.target().index()];
        let w = edge.weight().weight();
        m += w;
        community_degrees[cu] += w;
        community_degrees[cv] += w;
        if cu == cv {
            internal += 2.0 * w;
        }
    }

    if m == 0.0 {
        return Err(Error::DegenerateGraph {
            nodes: graph.node_count(),
        });
    }

    let two_m = 2.0 * m;
    let expected: f64 = community_degrees.iter().map(|k| k * k / two_m).sum();
    Ok((internal - expected) / two_m)
}

/// Turn a list of node groups into a node -> group index map, checking that
/// it is an exact cover of `0..n`.
fn labels_from_partition(n: usize, partition: &[Vec<NodeIndex>]) -> Result<Vec<usize>> {
    let mut labels: Vec<Option<usize>> = vec![None; n];

    for (community, members) in partition.iter().enumerate() {
        if members.is_empty() {
            return Err(Error::InvalidPartition {
                reason: PartitionDefect::EmptyCommunity { community },
            });
        }
        for node in members {
            let i = node.index();
            let slot = labels.get_mut(i).ok_or(Error::InvalidPartition {
                reason: PartitionDefect::UnknownNode { node: i },
            })?;
            if slot.is_some() {
                return Err(Error::InvalidPartition {
                    reason: PartitionDefect::DuplicateNode { node: i },
                });
            }
            *slot = Some(community);
        }
    }

    labels
        .into_iter()
        .enumerate()
        .map(|(node, label)| {
            label.ok_or(Error::InvalidPartition {
                reason: PartitionDefect::MissingNode { node },
            })
        })
        .collect()
}
