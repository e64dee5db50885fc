//! Word-representability test: 3-colorable OR semi-transitively orientable.
//!
//! The coloring search is far cheaper, so it runs first and the orientation
//! search only sees graphs that need at least four colors.

use crate::coloring::is_3_colorable;
use crate::graph::Graph;
use crate::semi_transitive::{has_semi_transitive_orientation_with, SearchConfig};
use std::fmt;
use tracing::debug;

/// Which check settled the question for a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// A proper 3-coloring exists.
    ThreeColorable,
    /// Not 3-colorable, but a semi-transitive orientation exists.
    SemiTransitive,
    /// Neither check succeeded.
    NotWordRepresentable,
}

impl Verdict {
    /// Returns `true` unless the graph was found non-word-representable.
    #[inline]
    pub fn is_word_representable(self) -> bool {
        self != Verdict::NotWordRepresentable
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::ThreeColorable => "3-colorable",
            Verdict::SemiTransitive => "semi-transitive",
            Verdict::NotWordRepresentable => "not word-representable",
        })
    }
}

/// Classifies a graph, running the orientation search only when coloring fails.
pub fn decide(graph: &Graph, cfg: &SearchConfig) -> Verdict {
    let verdict = if is_3_colorable(graph) {
        Verdict::ThreeColorable
    } else if has_semi_transitive_orientation_with(graph, cfg) {
        Verdict::SemiTransitive
    } else {
        Verdict::NotWordRepresentable
    };
    debug!(
        n = graph.order(),
        edges = graph.edge_count(),
        %verdict,
        "decided graph"
    );
    verdict
}

/// Returns `true` iff the graph is 3-colorable or semi-transitively orientable.
pub fn is_word_representable(graph: &Graph) -> bool {
    decide(graph, &SearchConfig::default()).is_word_representable()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorable_graphs_short_circuit() {
        let path = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        assert_eq!(decide(&path, &SearchConfig::default()), Verdict::ThreeColorable);
        assert!(is_word_representable(&Graph::empty(0).unwrap()));
        assert!(is_word_representable(&Graph::empty(1).unwrap()));
    }

    #[test]
    fn k4_needs_the_orientation_search() {
        let k4 = Graph::complete(4).unwrap();
        assert_eq!(decide(&k4, &SearchConfig::default()), Verdict::SemiTransitive);
        assert!(is_word_representable(&k4));
    }

    #[test]
    fn w5_is_not_word_representable() {
        let mut edges: Vec<_> = (0..5).map(|v| (v, (v + 1) % 5)).collect();
        edges.extend((0..5).map(|v| (v, 5)));
        let w5 = Graph::from_edges(6, &edges).unwrap();
        let verdict = decide(&w5, &SearchConfig::default());
        assert_eq!(verdict, Verdict::NotWordRepresentable);
        assert!(!verdict.is_word_representable());
        assert_eq!(verdict.to_string(), "not word-representable");
    }
}
