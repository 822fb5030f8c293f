//! Community detection traits.

use crate::error::Result;
use crate::graph::EdgeWeight;
use petgraph::graph::{NodeIndex, UnGraph};

/// Trait for community detection algorithms.
pub trait CommunityDetection {
    /// Detect communities in a graph.
    ///
    /// Returns a mapping from node index to community ID.
    fn detect<N, E: EdgeWeight>(&self, graph: &UnGraph<N, E>) -> Result<Vec<usize>>;

    /// Detect communities and group node indices by community ID.
    fn partition<N, E: EdgeWeight>(&self, graph: &UnGraph<N, E>) -> Result<Vec<Vec<NodeIndex>>> {
        let labels = self.detect(graph)?;
        let k = labels.iter().copied().max().map_or(0, |c| c + 1);
        let mut groups = vec![Vec::new(); k];
        for (node, &c) in labels.iter().enumerate() {
            groups[c].push(NodeIndex::new(node));
        }
        groups.retain(|g: &Vec<NodeIndex>| !g.is_empty());
        Ok(groups)
    }
}
