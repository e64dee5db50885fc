//! Exact 3-colorability by degree-ordered backtracking.
//!
//! Each color class is a vertex bitset, so "is color `c` legal for `v`" is a
//! single `classes[c] & N(v) == 0` test. A vertex is never given a color whose
//! predecessor class is still empty; this removes the `3!` relabelings of every
//! coloring without changing which graphs are accepted.

use crate::graph::{bit, Graph};
use std::cmp::Reverse;
use std::ops::{Deref, DerefMut};

/// Number of colors available.
pub const COLORS: usize = 3;

// ============================================================================
// Public API
// ============================================================================

/// Returns `true` iff the graph has a proper 3-coloring.
pub fn is_3_colorable(graph: &Graph) -> bool {
    ColoringSearch::new(graph, false).run().is_some()
}

/// Returns a proper 3-coloring (`colors[v]` in `0..3`) if one exists.
pub fn find_3_coloring(graph: &Graph) -> Option<Vec<u8>> {
    ColoringSearch::new(graph, true).run()
}

/// Checks that `colors` assigns every vertex a color in `0..3` and no edge is
/// monochromatic.
pub fn is_proper_coloring(graph: &Graph, colors: &[u8]) -> bool {
    colors.len() == graph.order()
        && colors.iter().all(|&c| usize::from(c) < COLORS)
        && graph.edges().iter().all(|&(u, v)| colors[u] != colors[v])
}

/// Vertices by strictly decreasing degree; ties keep index order.
pub fn coloring_order(graph: &Graph) -> Vec<usize> {
    let mut order: Vec<usize> = (0..graph.order()).collect();
    order.sort_by_key(|&v| Reverse(graph.degree(v)));
    order
}

// ============================================================================
// Search
// ============================================================================

struct ColoringSearch<'g> {
    graph: &'g Graph,
    order: Vec<usize>,
    classes: [u64; COLORS],
    record_witness: bool,
    witness: Option<Vec<u8>>,
}

impl<'g> ColoringSearch<'g> {
    fn new(graph: &'g Graph, record_witness: bool) -> Self {
        Self {
            graph,
            order: coloring_order(graph),
            classes: [0; COLORS],
            record_witness,
            witness: None,
        }
    }

    /// Runs the search; `Some` carries the witness (empty when not recorded).
    fn run(mut self) -> Option<Vec<u8>> {
        if self.extend(0) {
            Some(self.witness.unwrap_or_default())
        } else {
            None
        }
    }

    fn extend(&mut self, depth: usize) -> bool {
        let Some(&v) = self.order.get(depth) else {
            if self.record_witness {
                self.witness = Some(self.snapshot());
            }
            return true;
        };

        let neighbors = self.graph.neighbors(v);
        let opened = self.classes.iter().take_while(|&&class| class != 0).count();
        for color in 0..COLORS.min(opened + 1) {
            if self.classes[color] & neighbors != 0 {
                continue;
            }
            let mut painted = Painted::new(self, v, color);
            if painted.extend(depth + 1) {
                return true;
            }
        }
        false
    }

    fn snapshot(&self) -> Vec<u8> {
        (0..self.graph.order())
            .map(|v| {
                self.classes
                    .iter()
                    .position(|&class| class & bit(v) != 0)
                    .map_or(0, |c| c as u8)
            })
            .collect()
    }
}

/// A color assignment that is withdrawn when the guard goes out of scope.
struct Painted<'s, 'g> {
    search: &'s mut ColoringSearch<'g>,
    vertex: usize,
    color: usize,
}

impl<'s, 'g> Painted<'s, 'g> {
    fn new(search: &'s mut ColoringSearch<'g>, vertex: usize, color: usize) -> Self {
        debug_assert_eq!(search.classes.iter().fold(0u64, |acc, c| acc | c) & bit(vertex), 0);
        search.classes[color] |= bit(vertex);
        Self {
            search,
            vertex,
            color,
        }
    }
}

impl<'g> Deref for Painted<'_, 'g> {
    type Target = ColoringSearch<'g>;

    fn deref(&self) -> &Self::Target {
        &*self.search
    }
}

impl DerefMut for Painted<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.search
    }
}

impl Drop for Painted<'_, '_> {
    fn drop(&mut self) {
        self.search.classes[self.color] &= !bit(self.vertex);
    }
}

// ============================================================================
// Tests
// ============================================================================
