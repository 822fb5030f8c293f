//! # louvain
//!
//! Multi-level Louvain community detection on weighted undirected graphs,
//! plus a standalone modularity score for any partition.
//!
//! Graphs are `petgraph` [`UnGraph`](petgraph::graph::UnGraph)s. Edge payloads
//! give their weight through [`EdgeWeight`]; unweighted graphs (`()` edges)
//! weigh every edge as 1.
//!
//! ```rust
//! use petgraph::graph::UnGraph;
//! use louvain::{detect_communities, modularity};
//!
//! let mut graph = UnGraph::<&str, ()>::new_undirected();
//! let a = graph.add_node("a");
//! let b = graph.add_node("b");
//! let c = graph.add_node("c");
//! let d = graph.add_node("d");
//! graph.extend_with_edges([(a, b), (c, d)]);
//!
//! let communities = detect_communities(&graph, false).unwrap();
//! assert_eq!(communities, vec![vec![a, b], vec![c, d]]);
//! assert!((modularity(&graph, &communities).unwrap() - 0.5).abs() < 1e-12);
//! ```

pub mod community;
/// Error types used across `louvain`.
pub mod error;
pub mod graph;

pub use community::{
    coarsen, detect_communities, modularity, CommunityDetection, Hierarchy, Louvain,
};
pub use error::{Error, PartitionDefect, Result};
pub use graph::EdgeWeight;
