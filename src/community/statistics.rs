//! Per-level community bookkeeping.
//!
//! Tracks node degrees and self-loops together with each community's summed
//! degree (`Σ_tot`) and internal weight (`Σ_in`) so that a node move can be
//! evaluated and applied in time proportional to the node's degree.
//!
//! Every mutation is a `remove` followed by an `insert` of the same node. The
//! two are exact inverses, so after each pair `Σ communityDegree == Σ degree`.

use crate::graph::LevelGraph;

#[derive(Debug, Clone)]
pub(crate) struct CommunityStatistics {
    /// Total edge weight of the level.
    m: f64,
    degrees: Vec<f64>,
    self_loops: Vec<f64>,
    community_degrees: Vec<f64>,
    community_self_loops: Vec<f64>,
    /// `None` only between a `remove` and its paired `insert`.
    assignment: Vec<Option<usize>>,
}

impl CommunityStatistics {
    /// Put every node of `graph` into its own community, numbered by node index.
    pub(crate) fn initialize(graph: &LevelGraph) -> Self {
        let n = graph.node_count();
        let degrees: Vec<f64> = (0..n).map(|i| graph.degree(i)).collect();
        let self_loops: Vec<f64> = (0..n).map(|i| graph.self_loop(i)).collect();

        Self {
            m: graph.size(),
            community_degrees: degrees.clone(),
            community_self_loops: self_loops.clone(),
            degrees,
            self_loops,
            assignment: (0..n).map(Some).collect(),
        }
    }

    /// Detach `node` from `community`.
    ///
    /// `incident_weight` is the weight from `node` to the other members of
    /// `community`, excluding its own self-loop.
    ///
    /// # Panics
    ///
    /// If `node` is not currently a member of `community`.
    pub(crate) fn remove(&mut self, node: usize, community: usize, incident_weight: f64) {
        assert_eq!(
            self.assignment[node],
            Some(community),
            "node {node} removed from community {community} it does not belong to"
        );
        self.community_degrees[community] -= self.degrees[node];
        self.community_self_loops[community] -= incident_weight + self.self_loops[node];
        self.assignment[node] = None;
    }

    /// Attach an isolated `node` to `community`. Inverse of [`Self::remove`].
    ///
    /// # Panics
    ///
    /// If `node` is still assigned to a community.
    pub(crate) fn insert(&mut self, node: usize, community: usize, incident_weight: f64) {
        assert!(
            self.assignment[node].is_none(),
            "node {node} inserted into community {community} while still assigned to {:?}",
            self.assignment[node]
        );
        self.community_degrees[community] += self.degrees[node];
        self.community_self_loops[community] += incident_weight + self.self_loops[node];
        self.assignment[node] = Some(community);
    }

    pub(crate) fn m(&self) -> f64 {
        self.m
    }

    pub(crate) fn node_count(&self) -> usize {
        self.degrees.len()
    }

    pub(crate) fn degree(&self, node: usize) -> f64 {
        self.degrees[node]
    }

    pub(crate) fn community_degree(&self, community: usize) -> f64 {
        self.community_degrees[community]
    }

    pub(crate) fn community_self_loop(&self, community: usize) -> f64 {
        self.community_self_loops[community]
    }

    /// Community of `node`.
    ///
    /// # Panics
    ///
    /// If called on a node between its `remove` and `insert`.
    pub(crate) fn community_of(&self, node: usize) -> usize {
        match self.assignment[node] {
            Some(c) => c,
            None => panic!("node {node} is detached from every community"),
        }
    }

    /// Snapshot of the node -> community map.
    ///
    /// # Panics
    ///
    /// If any node is detached.
    pub(crate) fn community_map(&self) -> Vec<usize> {
        (0..self.node_count()).map(|i| self.community_of(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::UnGraph;
    use proptest::prelude::*;

    fn path_with_loop() -> LevelGraph {
        // 0 -- 1 -- 2, plus a self-loop of weight 2 on node 1.
        let mut graph = UnGraph::<(), f64>::new_undirected();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        let _ = graph.add_edge(a, b, 1.0);
        let _ = graph.add_edge(b, c, 3.0);
        let _ = graph.add_edge(b, b, 2.0);
        LevelGraph::from_graph(&graph)
    }

    fn degree_sums(stats: &CommunityStatistics) -> (f64, f64) {
        let nodes: f64 = (0..stats.node_count()).map(|i| stats.degree(i)).sum();
        let comms: f64 = (0..stats.node_count())
            .map(|c| stats.community_degree(c))
            .sum();
        (nodes, comms)
    }

    #[test]
    fn test_initialize_singletons() {
        let stats = CommunityStatistics::initialize(&path_with_loop());

        assert_eq!(stats.m(), 6.0);
        assert_eq!(stats.community_map(), vec![0, 1, 2]);
        assert_eq!(stats.community_degree(1), 8.0);
        assert_eq!(stats.community_self_loop(1), 2.0);
        assert_eq!(stats.community_self_loop(0), 0.0);

        let (nodes, comms) = degree_sums(&stats);
        assert_eq!(nodes, comms);
    }

    #[test]
    fn test_move_keeps_degree_sum() {
        let mut stats = CommunityStatistics::initialize(&path_with_loop());

        // Node 0 joins node 1's community; it has weight 1 towards it.
        stats.remove(0, 0, 0.0);
        stats.insert(0, 1, 1.0);

        assert_eq!(stats.community_of(0), 1);
        assert_eq!(stats.community_degree(0), 0.0);
        assert_eq!(stats.community_degree(1), 9.0);
        assert_eq!(stats.community_self_loop(1), 3.0);

        let (nodes, comms) = degree_sums(&stats);
        assert_eq!(nodes, comms);
    }

    #[test]
    #[should_panic(expected = "does not belong to")]
    fn test_remove_from_wrong_community_panics() {
        let mut stats = CommunityStatistics::initialize(&path_with_loop());
        stats.remove(0, 2, 0.0);
    }

    #[test]
    #[should_panic(expected = "while still assigned")]
    fn test_insert_assigned_node_panics() {
        let mut stats = CommunityStatistics::initialize(&path_with_loop());
        stats.insert(0, 1, 0.0);
    }

    proptest! {
        #[test]
        fn prop_remove_insert_round_trip(
            edges in proptest::collection::vec((0usize..6, 0usize..6, 0.5f64..4.0), 1..20),
            node in 0usize..6,
            incident in 0.0f64..3.0,
        ) {
            let mut graph = UnGraph::<(), f64>::new_undirected();
            let idx: Vec<_> = (0..6).map(|_| graph.add_node(())).collect();
            for &(i, j, w) in &edges {
                let _ = graph.add_edge(idx[i], idx[j], w);
            }
            let level = LevelGraph::from_graph(&graph);
            let mut stats = CommunityStatistics::initialize(&level);
            let before_degrees = stats.community_degrees.clone();
            let before_loops = stats.community_self_loops.clone();

            let community = stats.community_of(node);
            stats.remove(node, community, incident);
            stats.insert(node, community, incident);

            prop_assert_eq!(stats.community_of(node), community);
            for c in 0..6 {
                prop_assert!((stats.community_degrees[c] - before_degrees[c]).abs() < 1e-9);
                prop_assert!((stats.community_self_loops[c] - before_loops[c]).abs() < 1e-9);
            }
            let (nodes, comms) = degree_sums(&stats);
            prop_assert!((nodes - comms).abs() < 1e-9);
        }
    }
}
