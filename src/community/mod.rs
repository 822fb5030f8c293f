//! Community detection for weighted undirected graphs.
//!
//! Given a graph, find natural groupings where nodes within groups are
//! densely connected, and connections between groups are sparse.
//!
//! ## The Modularity Objective
//!
//! Louvain optimizes **modularity** Q, which compares the actual weight of
//! edges within communities to the weight expected in a random graph with the
//! same degree sequence:
//!
//! ```text
//! Q = (1/2m) × Σ[A_ij - (k_i × k_j)/(2m)] × δ(c_i, c_j)
//! ```
//!
//! Where:
//! - m = total edge weight (sum of all edges, self-loops once)
//! - A_ij = edge weight between i and j (a self-loop counts twice on the diagonal)
//! - k_i = weighted degree of node i (a self-loop adds twice its weight)
//! - δ(c_i, c_j) = 1 if i and j are in same community
//!
//! **Intuition**: For each pair in the same community, we add (actual edges) -
//! (expected edges). A good partition has Q > 0, meaning more internal edges
//! than expected by chance. Finding the partition with maximum Q is NP-hard;
//! Louvain is a greedy heuristic and returns a local optimum.
//!
//! ## Usage
//!
//! ```rust
//! use petgraph::graph::UnGraph;
//! use louvain::community::{CommunityDetection, Louvain};
//!
//! let mut graph = UnGraph::<(), f64>::new_undirected();
//! let a = graph.add_node(());
//! let b = graph.add_node(());
//! let c = graph.add_node(());
//! graph.add_edge(a, b, 2.0);
//! graph.add_edge(b, c, 1.0);
//!
//! let communities = Louvain::new().detect(&graph).unwrap();
//! // communities[i] = community ID for node i
//! assert_eq!(communities.len(), 3);
//! ```
//!
//! ## References
//!
//! - Blondel et al. (2008). "Fast unfolding of communities in large networks."
//! - Newman & Girvan (2004). "Finding and evaluating community structure in networks."
//! - Newman (2010). "Networks: An Introduction", §7.7.

mod aggregate;
mod local_moving;
mod louvain;
mod quality;
mod statistics;
mod traits;

pub use aggregate::coarsen;
pub use louvain::{detect_communities, Hierarchy, Louvain};
pub use quality::modularity;
pub use traits::CommunityDetection;
