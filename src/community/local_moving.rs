//! Phase 1 of a Louvain level: greedy local moving.
//!
//! Each node is pulled out of its community and dropped into the neighbouring
//! community with the largest positive modularity gain, or back where it came
//! from. Sweeps repeat until one full sweep moves nothing.
//!
//! ## Gain
//!
//! For an isolated node `i` joining community `C`:
//!
//! ```text
//! ΔQ ∝ 2·k_i,in − Σ_tot · k_i / m
//! ```
//!
//! The `k_i²/m²` term of the full expression is the same for every candidate of
//! a fixed node, so it is left out; only the arg-max matters.

use super::statistics::CommunityStatistics;
use crate::graph::LevelGraph;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::trace;

/// Summary of one level's local-moving run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PassOutcome {
    /// Number of sweeps over the nodes, including the final quiet one.
    pub(crate) sweeps: usize,
    /// Total node moves across all sweeps.
    pub(crate) moves: usize,
}

impl PassOutcome {
    /// Whether any node changed community during the pass.
    pub(crate) fn moved(&self) -> bool {
        self.moves > 0
    }
}

/// Weight from one node to each neighbouring community.
///
/// Dense scratch indexed by community id, reused for every node of a level.
struct NeighbourCommunities {
    weights: Vec<f64>,
    seen: Vec<bool>,
    touched: Vec<usize>,
}

impl NeighbourCommunities {
    fn new(n: usize) -> Self {
        Self {
            weights: vec![0.0; n],
            seen: vec![false; n],
            touched: Vec::new(),
        }
    }

    /// Gather the communities adjacent to `node`, sorted by id.
    fn collect(&mut self, graph: &LevelGraph, stats: &CommunityStatistics, node: usize) {
        self.clear();
        for &(neighbor, w) in graph.neighbors(node) {
            let c = stats.community_of(neighbor);
            if !self.seen[c] {
                self.seen[c] = true;
                self.touched.push(c);
            }
            self.weights[c] += w;
        }
        self.touched.sort_unstable();
    }

    fn get(&self, community: usize) -> f64 {
        if self.seen[community] {
            self.weights[community]
        } else {
            0.0
        }
    }

    fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.touched.iter().map(|&c| (c, self.weights[c]))
    }

    fn clear(&mut self) {
        for &c in &self.touched {
            self.weights[c] = 0.0;
            self.seen[c] = false;
        }
        self.touched.clear();
    }
}

/// Reduced modularity gain of inserting isolated `node` into `community`.
fn delta_q(
    stats: &CommunityStatistics,
    node: usize,
    community: usize,
    incident_weight: f64,
) -> f64 {
    2.0 * incident_weight - stats.community_degree(community) * stats.degree(node) / stats.m()
}

/// Run local moving on `graph` until a sweep makes no move.
///
/// With `rng` set, the visitation order is reshuffled before every sweep;
/// otherwise nodes are visited in index order. Ties between equally good
/// communities resolve to the lowest community id.
///
/// `stats` must have been initialized from `graph`, and `graph.size()` must be
/// positive.
pub(crate) fn local_moving(
    graph: &LevelGraph,
    stats: &mut CommunityStatistics,
    mut rng: Option<&mut StdRng>,
) -> PassOutcome {
    debug_assert!(stats.m() > 0.0, "local moving on a graph with zero weight");

    let n = graph.node_count();
    let mut order: Vec<usize> = (0..n).collect();
    let mut neighbours = NeighbourCommunities::new(n);
    let mut outcome = PassOutcome { sweeps: 0, moves: 0 };

    loop {
        outcome.sweeps += 1;
        if let Some(rng) = rng.as_deref_mut() {
            order.shuffle(rng);
        }

        let mut improved = false;
        for &node in &order {
            neighbours.collect(graph, stats, node);

            let old_community = stats.community_of(node);
            stats.remove(node, old_community, neighbours.get(old_community));

            let mut best_community = old_community;
            let mut best_gain = 0.0;
            for (community, incident_weight) in neighbours.iter() {
                let gain = delta_q(stats, node, community, incident_weight);
                if gain > best_gain {
                    best_gain = gain;
                    best_community = community;
                }
            }

            stats.insert(node, best_community, neighbours.get(best_community));

            if best_community != old_community {
                trace!(
                    node,
                    from = old_community,
                    to = best_community,
                    gain = best_gain,
                    "moved node"
                );
                improved = true;
                outcome.moves += 1;
            }
        }

        if !improved {
            return outcome;
        }
    }
}
