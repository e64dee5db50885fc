//! Backtracking search for a semi-transitive orientation.
//!
//! Edges are oriented one at a time in a fixed order. An arc is only committed
//! if it keeps the orientation acyclic, so every complete orientation reached
//! is a DAG and only the shortcut condition has to be verified at the leaves.
//!
//! Two reductions keep the tree small without changing the answer:
//! - The first edge is only tried in one direction. Reversing every arc of a
//!   semi-transitive orientation gives another one.
//! - With [`SearchConfig::prune_partial_shortcuts`], a branch is cut as soon as
//!   the partial orientation contains a shortcut whose missing pair is not an
//!   edge of the graph. No later arc can fill such a pair.

use crate::graph::Graph;
use crate::orientation::Orientation;
use std::cmp::Reverse;
use tracing::trace;

// ============================================================================
// Configuration
// ============================================================================

/// Tuning knobs for the orientation search. None of them change the result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Cut branches whose partial orientation already has an unrepairable shortcut.
    pub prune_partial_shortcuts: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            prune_partial_shortcuts: true,
        }
    }
}

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search nodes entered (partial orientations visited).
    pub nodes: u64,
    /// Complete acyclic orientations checked for shortcuts.
    pub leaves: u64,
    /// Branches cut by partial-shortcut pruning.
    pub pruned: u64,
}

// ============================================================================
// Public API
// ============================================================================

/// Returns `true` iff the graph admits a semi-transitive orientation.
pub fn has_semi_transitive_orientation(graph: &Graph) -> bool {
    has_semi_transitive_orientation_with(graph, &SearchConfig::default())
}

/// [`has_semi_transitive_orientation`] with explicit configuration.
pub fn has_semi_transitive_orientation_with(graph: &Graph, cfg: &SearchConfig) -> bool {
    OrientationSearch::new(graph, cfg, false).run().0
}

/// Returns a semi-transitive orientation of the graph if one exists.
pub fn find_semi_transitive_orientation(graph: &Graph) -> Option<Orientation> {
    find_semi_transitive_orientation_with(graph, &SearchConfig::default()).0
}

/// [`find_semi_transitive_orientation`] with explicit configuration; also
/// returns the search counters.
pub fn find_semi_transitive_orientation_with(
    graph: &Graph,
    cfg: &SearchConfig,
) -> (Option<Orientation>, SearchStats) {
    let mut search = OrientationSearch::new(graph, cfg, true);
    let mut orientation = Orientation::new(graph.order());
    search.extend(&mut orientation, 0);
    (search.witness, search.stats)
}

/// Edges by strictly decreasing endpoint-degree sum; ties keep `(u, v)` order.
pub fn orientation_order(graph: &Graph) -> Vec<(usize, usize)> {
    let mut edges = graph.edges();
    edges.sort_by_key(|&(u, v)| Reverse(graph.degree(u) + graph.degree(v)));
    edges
}

// ============================================================================
// Search
// ============================================================================

struct OrientationSearch<'a> {
    graph: &'a Graph,
    cfg: &'a SearchConfig,
    edges: Vec<(usize, usize)>,
    record_witness: bool,
    witness: Option<Orientation>,
    stats: SearchStats,
}

impl<'a> OrientationSearch<'a> {
    fn new(graph: &'a Graph, cfg: &'a SearchConfig, record_witness: bool) -> Self {
        Self {
            graph,
            cfg,
            edges: orientation_order(graph),
            record_witness,
            witness: None,
            stats: SearchStats::default(),
        }
    }

    fn run(mut self) -> (bool, SearchStats) {
        let mut orientation = Orientation::new(self.graph.order());
        let found = self.extend(&mut orientation, 0);
        debug_assert_eq!(orientation.arc_count(), 0, "search left arcs behind");
        trace!(
            nodes = self.stats.nodes,
            leaves = self.stats.leaves,
            pruned = self.stats.pruned,
            found,
            "orientation search finished"
        );
        (found, self.stats)
    }

    fn extend(&mut self, orientation: &mut Orientation, depth: usize) -> bool {
        self.stats.nodes += 1;

        let Some(&(u, v)) = self.edges.get(depth) else {
            self.stats.leaves += 1;
            if orientation.find_shortcut().is_some() {
                return false;
            }
            if self.record_witness {
                self.witness = Some(orientation.clone());
            }
            return true;
        };

        let tries = if depth == 0 { 1 } else { 2 };
        for &(from, to) in &[(u, v), (v, u)][..tries] {
            if orientation.would_create_cycle(from, to) {
                continue;
            }
            let mut committed = orientation.commit(from, to);
            if self.cfg.prune_partial_shortcuts
                && committed
                    .find_unrepairable_shortcut(self.graph, from)
                    .is_some()
            {
                self.stats.pruned += 1;
                continue;
            }
            if self.extend(&mut committed, depth + 1) {
                return true;
            }
        }
        false
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(rim: usize) -> Graph {
        let mut edges: Vec<_> = (0..rim).map(|v| (v, (v + 1) % rim)).collect();
        edges.extend((0..rim).map(|v| (v, rim)));
        Graph::from_edges(rim + 1, &edges).unwrap()
    }

    fn both_configs() -> [SearchConfig; 2] {
        [
            SearchConfig::default(),
            SearchConfig {
                prune_partial_shortcuts: false,
            },
        ]
    }

    #[test]
    fn edgeless_graphs_are_orientable() {
        for n in [0, 1, 5] {
            let g = Graph::empty(n).unwrap();
            assert!(has_semi_transitive_orientation(&g));
            let o = find_semi_transitive_orientation(&g).unwrap();
            assert_eq!(o.arc_count(), 0);
        }
    }

    #[test]
    fn complete_graphs_are_orientable() {
        for n in 1..8 {
            let g = Graph::complete(n).unwrap();
            for cfg in both_configs() {
                let (o, _) = find_semi_transitive_orientation_with(&g, &cfg);
                let o = o.unwrap();
                assert!(o.orients(&g));
                assert!(o.is_semi_transitive(), "K{n}");
            }
        }
    }

    #[test]
    fn odd_wheels_are_not_orientable() {
        for rim in [5, 7] {
            let g = wheel(rim);
            for cfg in both_configs() {
                assert!(
                    !has_semi_transitive_orientation_with(&g, &cfg),
                    "W{rim} with {cfg:?}"
                );
            }
        }
    }

    #[test]
    fn even_wheels_are_orientable() {
        for rim in [4, 6] {
            let g = wheel(rim);
            let o = find_semi_transitive_orientation(&g).unwrap();
            assert!(o.orients(&g));
            assert!(o.is_semi_transitive());
        }
    }

    #[test]
    fn pruning_never_changes_the_answer_and_shrinks_the_tree() {
        let g = wheel(5);
        let (with, pruned_stats) =
            find_semi_transitive_orientation_with(&g, &SearchConfig::default());
        let (without, full_stats) = find_semi_transitive_orientation_with(
            &g,
            &SearchConfig {
                prune_partial_shortcuts: false,
            },
        );
        assert!(with.is_none() && without.is_none());
        assert!(pruned_stats.pruned > 0);
        assert_eq!(full_stats.pruned, 0);
        assert!(pruned_stats.nodes < full_stats.nodes);
    }

    #[test]
    fn search_restores_state_after_failure() {
        let g = wheel(5);
        let cfg = SearchConfig::default();
        let mut search = OrientationSearch::new(&g, &cfg, false);
        let mut orientation = Orientation::new(g.order());
        assert!(!search.extend(&mut orientation, 0));
        assert_eq!(orientation, Orientation::new(g.order()));
    }

    #[test]
    fn search_restores_state_after_success() {
        let g = Graph::complete(5).unwrap();
        let cfg = SearchConfig::default();
        let mut search = OrientationSearch::new(&g, &cfg, true);
        let mut orientation = Orientation::new(g.order());
        assert!(search.extend(&mut orientation, 0));
        assert_eq!(orientation.arc_count(), 0);
        assert!(search.witness.unwrap().orients(&g));
    }

    #[test]
    fn edge_order_is_by_decreasing_degree_sum() {
        // Path 0-1-2-3 plus pendant 4 on vertex 1.
        let g = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (1, 4)]).unwrap();
        assert_eq!(orientation_order(&g), vec![(1, 2), (0, 1), (1, 4), (2, 3)]);
    }
}
