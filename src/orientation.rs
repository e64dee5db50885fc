//! Partial and complete edge orientations, with the acyclicity and shortcut
//! predicates that define semi-transitivity.
//!
//! An orientation stores, for every vertex, the bitset of vertices it points
//! to and the bitset of vertices pointing to it. Reachability is a bitset
//! flood fill; shortcut detection walks simple directed paths with an
//! explicit frame stack, so memory stays bounded by the path length.

use crate::graph::{all_bits, bit, bits, Graph, GraphError, MAX_VERTICES};
use std::fmt;
use std::ops::{Deref, DerefMut};

// ============================================================================
// Shortcut
// ============================================================================

/// A violation of semi-transitivity.
///
/// `path` is a simple directed path `v0 -> v1 -> ... -> vk` whose endpoints are
/// also joined by the arc `v0 -> vk`, and `missing` is a pair `(vi, vj)`,
/// `i < j`, of path vertices that is not joined by an arc `vi -> vj`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shortcut {
    /// The directed path, start to end.
    pub path: Vec<usize>,
    /// The first pair along the path without the required arc.
    pub missing: (usize, usize),
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path: Vec<String> = self.path.iter().map(ToString::to_string).collect();
        write!(
            f,
            "shortcut {} lacks arc {} -> {}",
            path.join(" -> "),
            self.missing.0,
            self.missing.1
        )
    }
}

// ============================================================================
// Orientation
// ============================================================================

/// A set of arcs over vertices `0..n`, at most one arc per vertex pair.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Orientation {
    n: usize,
    out: Vec<u64>,
    inn: Vec<u64>,
    arcs: usize,
}

impl Orientation {
    /// Creates an orientation with no arcs.
    ///
    /// # Panics
    /// Panics in debug builds if `n > 64`.
    pub fn new(n: usize) -> Self {
        debug_assert!(n <= MAX_VERTICES, "orientation assumes n <= 64");
        Self {
            n,
            out: vec![0; n],
            inn: vec![0; n],
            arcs: 0,
        }
    }

    /// Builds an orientation from a list of arcs `(from, to)`.
    ///
    /// # Errors
    /// Returns an error for out-of-range endpoints, loops, or two arcs on the
    /// same vertex pair (in either direction).
    pub fn from_arcs(n: usize, arcs: &[(usize, usize)]) -> Result<Self, GraphError> {
        if n > MAX_VERTICES {
            return Err(GraphError::TooManyVertices { n });
        }
        let mut o = Self::new(n);
        for &(u, v) in arcs {
            for vertex in [u, v] {
                if vertex >= n {
                    return Err(GraphError::VertexOutOfRange { vertex, n });
                }
            }
            if u == v {
                return Err(GraphError::SelfLoop { vertex: u });
            }
            if o.has_arc(u, v) || o.has_arc(v, u) {
                return Err(GraphError::DuplicateEdge {
                    u: u.min(v),
                    v: u.max(v),
                });
            }
            o.add_arc(u, v);
        }
        Ok(o)
    }

    /// Number of vertices.
    #[inline(always)]
    pub fn order(&self) -> usize {
        self.n
    }

    /// Number of arcs.
    #[inline(always)]
    pub fn arc_count(&self) -> usize {
        self.arcs
    }

    /// Returns whether the arc `u -> v` is present.
    #[inline(always)]
    pub fn has_arc(&self, u: usize, v: usize) -> bool {
        self.out[u] & bit(v) != 0
    }

    /// Out-neighbor bitset of `v`.
    #[inline(always)]
    pub fn out_neighbors(&self, v: usize) -> u64 {
        self.out[v]
    }

    /// In-neighbor bitset of `v`.
    #[inline(always)]
    pub fn in_neighbors(&self, v: usize) -> u64 {
        self.inn[v]
    }

    /// All arcs, ordered by tail then head.
    pub fn arcs(&self) -> Vec<(usize, usize)> {
        (0..self.n)
            .flat_map(|u| bits(self.out[u]).map(move |v| (u, v)))
            .collect()
    }

    #[inline]
    pub(crate) fn add_arc(&mut self, u: usize, v: usize) {
        debug_assert!(u != v && !self.has_arc(u, v) && !self.has_arc(v, u));
        self.out[u] |= bit(v);
        self.inn[v] |= bit(u);
        self.arcs += 1;
    }

    #[inline]
    pub(crate) fn remove_arc(&mut self, u: usize, v: usize) {
        debug_assert!(self.has_arc(u, v));
        self.out[u] &= !bit(v);
        self.inn[v] &= !bit(u);
        self.arcs -= 1;
    }

    /// Adds `u -> v` for the lifetime of the returned guard.
    pub fn commit(&mut self, u: usize, v: usize) -> CommittedArc<'_> {
        self.add_arc(u, v);
        CommittedArc {
            orientation: self,
            from: u,
            to: v,
        }
    }

    /// Vertices reachable from `v` by a nonempty directed path.
    pub fn descendants(&self, v: usize) -> u64 {
        flood(&self.out, self.out[v])
    }

    /// Vertices that reach `v` by a nonempty directed path.
    pub fn ancestors(&self, v: usize) -> u64 {
        flood(&self.inn, self.inn[v])
    }

    /// Returns whether `to` is reachable from `from` (a vertex reaches itself).
    pub fn reaches(&self, from: usize, to: usize) -> bool {
        let target = bit(to);
        let mut seen = bit(from);
        let mut frontier = seen;
        while frontier != 0 {
            if seen & target != 0 {
                return true;
            }
            let v = frontier.trailing_zeros() as usize;
            frontier &= frontier - 1;
            let fresh = self.out[v] & !seen;
            seen |= fresh;
            frontier |= fresh;
        }
        seen & target != 0
    }

    /// Returns whether adding `u -> v` would close a directed cycle.
    #[inline]
    pub fn would_create_cycle(&self, u: usize, v: usize) -> bool {
        self.reaches(v, u)
    }

    /// Returns whether the arcs form a DAG.
    pub fn is_acyclic(&self) -> bool {
        // Repeatedly strip vertices with no remaining in-arcs.
        let mut remaining = all_bits(self.n);
        while remaining != 0 {
            let sources = bits(remaining)
                .filter(|&v| self.inn[v] & remaining == 0)
                .fold(0u64, |acc, v| acc | bit(v));
            if sources == 0 {
                return false;
            }
            remaining &= !sources;
        }
        true
    }

    /// Returns whether every edge of `graph` carries exactly one arc and no
    /// arc joins non-adjacent vertices.
    pub fn orients(&self, graph: &Graph) -> bool {
        self.n == graph.order()
            && (0..self.n).all(|v| self.out[v] | self.inn[v] == graph.neighbors(v))
            && self.arcs == graph.edge_count()
    }

    /// Finds a shortcut missing one of its transitive arcs, if any.
    ///
    /// Enumerates every simple directed path from every vertex; stops at the
    /// first violation.
    pub fn find_shortcut(&self) -> Option<Shortcut> {
        self.find_shortcut_among(all_bits(self.n), &self.out)
    }

    /// Returns whether the orientation is acyclic and has no shortcut violation.
    pub fn is_semi_transitive(&self) -> bool {
        self.is_acyclic() && self.find_shortcut().is_none()
    }

    /// Finds a shortcut starting at `tail` or one of its ancestors whose
    /// missing pair is not an edge of `graph` at all.
    ///
    /// Such a shortcut survives any further arcs, so no completion of this
    /// partial orientation can be semi-transitive.
    pub fn find_unrepairable_shortcut(&self, graph: &Graph, tail: usize) -> Option<Shortcut> {
        self.find_shortcut_among(self.ancestors(tail) | bit(tail), graph.adj())
    }

    /// Walks all simple directed paths whose first vertex is in `starts`.
    ///
    /// A path `p0 .. pk` is flagged when `p0 -> pk` is an arc and some pair
    /// `pi, pj` (`i < j`) has `pj` outside `required[pi]`. Each frame carries
    /// the intersection of `required` over the path so far, which makes the
    /// pair test for a new vertex a single mask lookup.
    fn find_shortcut_among(&self, starts: u64, required: &[u64]) -> Option<Shortcut> {
        struct Frame {
            vertex: usize,
            pending: u64,
            common: u64,
            closed: bool,
        }

        let mut frames: Vec<Frame> = Vec::with_capacity(self.n);
        for start in bits(starts) {
            let shortcut_heads = self.out[start];
            let mut on_path = bit(start);
            frames.push(Frame {
                vertex: start,
                pending: self.out[start],
                common: required[start],
                closed: true,
            });

            while let Some(top) = frames.last_mut() {
                if top.pending == 0 {
                    on_path &= !bit(top.vertex);
                    frames.pop();
                    continue;
                }
                let next = top.pending.trailing_zeros() as usize;
                top.pending &= top.pending - 1;

                let closed = top.closed && top.common & bit(next) != 0;
                let common = top.common & required[next];
                if !closed && shortcut_heads & bit(next) != 0 {
                    let mut path: Vec<usize> = frames.iter().map(|f| f.vertex).collect();
                    path.push(next);
                    if let Some(missing) = first_missing_pair(&path, required) {
                        return Some(Shortcut { path, missing });
                    }
                }

                on_path |= bit(next);
                frames.push(Frame {
                    vertex: next,
                    pending: self.out[next] & !on_path,
                    common,
                    closed,
                });
            }
        }
        None
    }

    /// Renders the orientation as an `n x n` matrix where row `i`, column `j`
    /// is `'1'` iff `i -> j` is an arc.
    pub fn to_arc_matrix(&self) -> String {
        let mut s = String::with_capacity(self.n * (self.n + 1));
        for i in 0..self.n {
            for j in 0..self.n {
                s.push(if self.has_arc(i, j) { '1' } else { '0' });
            }
            s.push('\n');
        }
        s
    }
}

impl fmt::Debug for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orientation")
            .field("n", &self.n)
            .field("arcs", &self.arcs())
            .finish()
    }
}

/// Closure of `seed` under the successor bitsets `next`.
fn flood(next: &[u64], seed: u64) -> u64 {
    let mut seen = seed;
    let mut frontier = seed;
    while frontier != 0 {
        let v = frontier.trailing_zeros() as usize;
        frontier &= frontier - 1;
        let fresh = next[v] & !seen;
        seen |= fresh;
        frontier |= fresh;
    }
    seen
}

/// First pair `(path[i], path[j])`, `i < j`, with `path[j]` outside
/// `required[path[i]]`, scanning `i` then `j` in path order.
fn first_missing_pair(path: &[usize], required: &[u64]) -> Option<(usize, usize)> {
    path.iter().enumerate().find_map(|(i, &a)| {
        path[i + 1..]
            .iter()
            .find(|&&b| required[a] & bit(b) == 0)
            .map(|&b| (a, b))
    })
}

// ============================================================================
// Scoped arc
// ============================================================================

/// An arc that is removed again when the guard is dropped.
///
/// Dereferences to the underlying [`Orientation`], so a search can recurse
/// through the guard and rely on the arc being withdrawn on every exit path.
pub struct CommittedArc<'a> {
    orientation: &'a mut Orientation,
    from: usize,
    to: usize,
}

impl CommittedArc<'_> {
    /// The committed arc as `(from, to)`.
    pub fn arc(&self) -> (usize, usize) {
        (self.from, self.to)
    }
}

impl Deref for CommittedArc<'_> {
    type Target = Orientation;

    fn deref(&self) -> &Orientation {
        &*self.orientation
    }
}

impl DerefMut for CommittedArc<'_> {
    fn deref_mut(&mut self) -> &mut Orientation {
        &mut *self.orientation
    }
}

impl Drop for CommittedArc<'_> {
    fn drop(&mut self) {
        self.orientation.remove_arc(self.from, self.to);
    }
}

// ============================================================================
// Tests
// ============================================================================
