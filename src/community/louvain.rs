//! Louvain algorithm for community detection.
//!
//! Fast modularity optimization through local node moves and graph aggregation.
//!
//! ## The Algorithm (Blondel et al. 2008)
//!
//! Louvain is a multi-level, greedy modularity optimization algorithm:
//!
//! 1. **Phase 1 (Local Moving)**: Start with each node in its own community.
//!    Repeatedly move nodes to the neighboring community with the highest
//!    modularity gain until no move helps.
//!
//! 2. **Phase 2 (Aggregation)**: Build a meta-graph where communities become
//!    single nodes. Edge weights are sums of edges between communities.
//!    Self-loops represent internal community edges.
//!
//! 3. **Iterate**: Repeat phases 1-2 on the meta-graph until a level makes no
//!    move at all.
//!
//! Each level's community map is kept, oldest first. Following an original
//! node through every map yields its final community.
//!
//! ## References
//!
//! Blondel et al. (2008). "Fast unfolding of communities in large networks."
//! Journal of Statistical Mechanics: Theory and Experiment, P10008.

use super::aggregate::coarsen;
use super::local_moving::local_moving;
use super::quality::score;
use super::statistics::CommunityStatistics;
use super::traits::CommunityDetection;
use crate::error::{Error, Result};
use crate::graph::{EdgeWeight, LevelGraph};
use petgraph::graph::{NodeIndex, UnGraph};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// Louvain community detection algorithm.
#[derive(Debug, Clone)]
pub struct Louvain {
    /// Shuffle the node visitation order before every sweep.
    randomized: bool,
    /// Seed for the shuffle. Unseeded runs draw from the thread-local generator.
    seed: Option<u64>,
    /// Maximum levels of aggregation.
    max_levels: Option<usize>,
}

impl Louvain {
    /// Create a new Louvain detector: nodes visited in index order, levels
    /// repeated until convergence.
    pub fn new() -> Self {
        Self {
            randomized: false,
            seed: None,
            max_levels: None,
        }
    }

    /// Visit nodes in a fresh random order on every sweep.
    pub fn with_randomized(mut self, randomized: bool) -> Self {
        self.randomized = randomized;
        self
    }

    /// Set random seed. Switches on randomized mode, since the seed only
    /// drives the visitation shuffle.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.randomized = true;
        self
    }

    /// Stop after at most `levels` aggregation levels, even if not converged.
    pub fn with_max_levels(mut self, levels: usize) -> Self {
        self.max_levels = Some(levels);
        self
    }

    fn rng(&self) -> Option<StdRng> {
        if !self.randomized {
            return None;
        }
        Some(match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(&mut rand::rng()),
        })
    }

    /// Run all levels on `graph` and return the full community hierarchy.
    ///
    /// # Errors
    ///
    /// - [`Error::DegenerateGraph`] if `graph` has nodes but no edge weight.
    /// - [`Error::InvalidParameter`] if `max_levels` was set to zero.
    pub fn run<N, E: EdgeWeight>(&self, graph: &UnGraph<N, E>) -> Result<Hierarchy> {
        if self.max_levels == Some(0) {
            return Err(Error::InvalidParameter {
                name: "max_levels",
                message: "must be at least 1",
            });
        }

        let n = graph.node_count();
        if n == 0 {
            return Ok(Hierarchy::default());
        }

        let mut level = LevelGraph::from_graph(graph);
        if level.size() == 0.0 {
            return Err(Error::DegenerateGraph { nodes: n });
        }

        let max_levels = self.max_levels.unwrap_or(usize::MAX);
        let mut rng = self.rng();
        let mut history: Vec<Vec<usize>> = Vec::new();
        let mut coarse: Option<UnGraph<(), f64>> = None;

        while history.len() < max_levels {
            let mut stats = CommunityStatistics::initialize(&level);
            let outcome = local_moving(&level, &mut stats, rng.as_mut());
            debug!(
                level = history.len(),
                nodes = level.node_count(),
                m = level.size(),
                sweeps = outcome.sweeps,
                moves = outcome.moves,
                "local moving finished"
            );

            if !outcome.moved() {
                break;
            }

            let (map, k) = relabel(&stats.community_map());
            let internal: f64 = (0..level.node_count())
                .map(|c| stats.community_self_loop(c))
                .sum();
            debug!(
                level = history.len(),
                communities = k,
                internal_weight = internal,
                "aggregating level"
            );

            let next = match &coarse {
                None => coarsen(graph, &map),
                Some(g) => coarsen(g, &map),
            };
            level = LevelGraph::from_graph(&next);
            coarse = Some(next);
            history.push(map);
        }

        let hierarchy = Hierarchy::compose(graph, history)?;
        info!(
            levels = hierarchy.levels(),
            communities = hierarchy.communities().len(),
            modularity = ?hierarchy.modularity(),
            "louvain converged"
        );
        Ok(hierarchy)
    }
}

impl Default for Louvain {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityDetection for Louvain {
    fn detect<N, E: EdgeWeight>(&self, graph: &UnGraph<N, E>) -> Result<Vec<usize>> {
        Ok(self.run(graph)?.community_map)
    }
}

/// Relabel communities densely (`0..k`) in order of first appearance.
fn relabel(map: &[usize]) -> (Vec<usize>, usize) {
    let bound = map.iter().copied().max().map_or(0, |c| c + 1);
    let mut new_ids: Vec<Option<usize>> = vec![None; bound];
    let mut k = 0;
    let relabeled: Vec<usize> = map
        .iter()
        .map(|&c| {
            *new_ids[c].get_or_insert_with(|| {
                k += 1;
                k - 1
            })
        })
        .collect();
    (relabeled, k)
}

/// Result of a Louvain run: every level's community map plus the final
/// partition of the original graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hierarchy {
    history: Vec<Vec<usize>>,
    community_map: Vec<usize>,
    communities: Vec<Vec<NodeIndex>>,
    modularity: Option<f64>,
}

impl Hierarchy {
    fn compose<N, E: EdgeWeight>(graph: &UnGraph<N, E>, history: Vec<Vec<usize>>) -> Result<Self> {
        let projected = project(graph.node_count(), &history, history.len());

        // Renumber so that a node's community id is its group's position.
        let (community_map, k) = relabel(&projected);
        let mut communities: Vec<Vec<NodeIndex>> = vec![Vec::new(); k];
        for (node, &c) in community_map.iter().enumerate() {
            communities[c].push(NodeIndex::new(node));
        }

        let modularity = score(graph, &community_map, k)?;

        Ok(Self {
            history,
            community_map,
            communities,
            modularity: Some(modularity),
        })
    }

    /// Number of aggregation levels that moved at least one node.
    pub fn levels(&self) -> usize {
        self.history.len()
    }

    /// Per-level community maps, oldest first. Map `k` sends the nodes of
    /// level `k` to the nodes of level `k + 1`.
    pub fn history(&self) -> &[Vec<usize>] {
        &self.history
    }

    /// Final community id of every original node, indexed by node index.
    pub fn community_map(&self) -> &[usize] {
        &self.community_map
    }

    /// Final partition, communities in order of their first member.
    pub fn communities(&self) -> &[Vec<NodeIndex>] {
        &self.communities
    }

    /// Consume the hierarchy, keeping only the final partition.
    pub fn into_communities(self) -> Vec<Vec<NodeIndex>> {
        self.communities
    }

    /// Modularity of the final partition on the original graph. `None` for
    /// an empty graph.
    pub fn modularity(&self) -> Option<f64> {
        self.modularity
    }

    /// Community of every original node after the first `level` levels.
    ///
    /// Level 0 is the identity; levels past the last one return the final
    /// level's ids (before the renumbering applied to
    /// [`community_map`](Self::community_map)).
    pub fn map_at_level(&self, level: usize) -> Vec<usize> {
        project(self.community_map.len(), &self.history, level)
    }
}

/// Follow each of `n` original nodes through the first `depth` maps.
fn project(n: usize, history: &[Vec<usize>], depth: usize) -> Vec<usize> {
    let mut map: Vec<usize> = (0..n).collect();
    for level in history.iter().take(depth) {
        for c in map.iter_mut() {
            *c = level[*c];
        }
    }
    map
}

/// Detect communities with default settings.
///
/// Returns the partition of `graph` as groups of node indices, in order of
/// each group's first member. An empty graph yields an empty partition.
///
/// # Errors
///
/// [`Error::DegenerateGraph`] if `graph` has nodes but zero total edge weight.
///
/// ```rust
/// use petgraph::graph::UnGraph;
/// use louvain::detect_communities;
///
/// let mut graph = UnGraph::<(), ()>::new_undirected();
/// let a = graph.add_node(());
/// let b = graph.add_node(());
/// graph.add_edge(a, b, ());
///
/// let communities = detect_communities(&graph, false).unwrap();
/// assert_eq!(communities, vec![vec![a, b]]);
/// ```
pub fn detect_communities<N, E: EdgeWeight>(
    graph: &UnGraph<N, E>,
    randomized: bool,
) -> Result<Vec<Vec<NodeIndex>>> {
    Louvain::new()
        .with_randomized(randomized)
        .run(graph)
        .map(Hierarchy::into_communities)
}
