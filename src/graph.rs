//! Simple undirected graphs on at most 64 vertices, stored as neighbor bitsets.

use rand::Rng;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

/// Largest supported order; one `u64` bitset per vertex.
pub const MAX_VERTICES: usize = 64;

// ============================================================================
// Bit helpers
// ============================================================================

/// Returns a mask with the lowest `n` bits set.
#[inline(always)]
pub const fn all_bits(n: usize) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

#[inline(always)]
pub(crate) const fn bit(v: usize) -> u64 {
    1u64 << v
}

/// Iterates the set bits of `mask`, lowest first.
#[inline]
pub(crate) fn bits(mut mask: u64) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let v = mask.trailing_zeros() as usize;
        mask &= mask - 1;
        Some(v)
    })
}

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while building, parsing or decoding a graph.
///
/// Every search in this crate assumes a valid simple graph, so malformed input
/// is rejected here rather than discovered mid-search.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The order exceeds [`MAX_VERTICES`].
    #[error("graph has {n} vertices; this implementation supports n <= {MAX_VERTICES}")]
    TooManyVertices {
        /// Requested order.
        n: usize,
    },
    /// An edge endpoint or adjacency bit lies outside `0..n`.
    #[error("vertex {vertex} is out of range for a graph on {n} vertices")]
    VertexOutOfRange {
        /// The offending vertex index.
        vertex: usize,
        /// Order of the graph.
        n: usize,
    },
    /// An edge joins a vertex to itself.
    #[error("self-loop detected at vertex {vertex}")]
    SelfLoop {
        /// The vertex with a self-loop.
        vertex: usize,
    },
    /// The same undirected edge was listed twice.
    #[error("duplicate edge {{{u}, {v}}}")]
    DuplicateEdge {
        /// Smaller endpoint.
        u: usize,
        /// Larger endpoint.
        v: usize,
    },
    /// `A[i][j] != A[j][i]`.
    #[error("adjacency is not symmetric at ({i},{j})")]
    NotSymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },
    /// Matrix row with the wrong number of columns.
    #[error("adjacency matrix is not square: row {row} has length {got}, expected {expected}")]
    NonSquare {
        /// The row index with wrong length.
        row: usize,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// Encountered a non `0/1` character in a matrix.
    #[error("invalid character at ({row}, {col}): {ch:?} (expected '0' or '1')")]
    InvalidChar {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The invalid character.
        ch: char,
    },
    /// The graph does not have the order the caller declared.
    #[error("graph order mismatch: expected {expected} vertices, got {got}")]
    MismatchedOrder {
        /// Declared order.
        expected: usize,
        /// Actual order.
        got: usize,
    },
    /// A graph6 byte outside the printable range `63..=126`.
    #[error("invalid graph6 byte {byte:#04x} at offset {offset}")]
    InvalidGraph6Byte {
        /// Offset into the encoded string.
        offset: usize,
        /// The rejected byte.
        byte: u8,
    },
    /// A graph6 string whose body does not match its declared order.
    #[error("graph6 body has {got} bytes, expected {expected}")]
    Graph6Length {
        /// Bytes required by the declared order.
        expected: usize,
        /// Bytes present.
        got: usize,
    },
    /// Trailing padding bits of a graph6 body are not zero.
    #[error("graph6 padding bits are not zero")]
    Graph6Padding,
    /// I/O error (file not found, etc.).
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<io::Error> for GraphError {
    fn from(e: io::Error) -> Self {
        GraphError::Io(e.to_string())
    }
}

// ============================================================================
// Graph
// ============================================================================

/// A simple undirected graph on vertices `0..n`.
///
/// Representation:
/// - `adj[v]` is the neighbor bitset of vertex `v`.
/// - The bitsets are symmetric, have no diagonal bits and no bits at or above `n`.
///
/// All constructors validate these invariants, so a `Graph` value is always a
/// valid simple graph.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Graph {
    n: usize,
    adj: Vec<u64>,
}

impl Graph {
    /// Creates a graph on `n` vertices with no edges.
    ///
    /// # Errors
    /// Returns [`GraphError::TooManyVertices`] if `n > 64`.
    pub fn empty(n: usize) -> Result<Self, GraphError> {
        check_order(n)?;
        Ok(Self {
            n,
            adj: vec![0u64; n],
        })
    }

    /// Creates the complete graph `K_n`.
    ///
    /// # Errors
    /// Returns [`GraphError::TooManyVertices`] if `n > 64`.
    pub fn complete(n: usize) -> Result<Self, GraphError> {
        check_order(n)?;
        let mask = all_bits(n);
        let adj = (0..n).map(|v| mask & !bit(v)).collect();
        Ok(Self { n, adj })
    }

    /// Creates a graph from an undirected edge list.
    ///
    /// # Errors
    /// Returns an error on an out-of-range endpoint, a self-loop or a repeated edge.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        let mut g = Self::empty(n)?;
        for &(u, v) in edges {
            g.insert_edge(u, v)?;
        }
        Ok(g)
    }

    /// Creates a graph from neighbor bitsets, one per vertex.
    ///
    /// # Errors
    /// Returns an error if the bitsets contain bits outside `0..n`, self-loops,
    /// or are not symmetric.
    pub fn from_adj(adj: Vec<u64>) -> Result<Self, GraphError> {
        let n = adj.len();
        check_order(n)?;
        let mask = all_bits(n);

        for (v, &row) in adj.iter().enumerate() {
            if row & !mask != 0 {
                let vertex = (row & !mask).trailing_zeros() as usize;
                return Err(GraphError::VertexOutOfRange { vertex, n });
            }
            if row & bit(v) != 0 {
                return Err(GraphError::SelfLoop { vertex: v });
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                let a_ij = (adj[i] >> j) & 1;
                let a_ji = (adj[j] >> i) & 1;
                if a_ij != a_ji {
                    return Err(GraphError::NotSymmetric { i, j });
                }
            }
        }
        Ok(Self { n, adj })
    }

    /// Samples an Erdős–Rényi graph `G(n, p)`.
    ///
    /// # Errors
    /// Returns [`GraphError::TooManyVertices`] if `n > 64`.
    pub fn random<R: Rng>(n: usize, p: f64, rng: &mut R) -> Result<Self, GraphError> {
        debug_assert!((0.0..=1.0).contains(&p), "p must be in [0, 1]");
        let mut g = Self::empty(n)?;
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.random_bool(p) {
                    g.adj[i] |= bit(j);
                    g.adj[j] |= bit(i);
                }
            }
        }
        Ok(g)
    }

    fn insert_edge(&mut self, u: usize, v: usize) -> Result<(), GraphError> {
        for vertex in [u, v] {
            if vertex >= self.n {
                return Err(GraphError::VertexOutOfRange { vertex, n: self.n });
            }
        }
        if u == v {
            return Err(GraphError::SelfLoop { vertex: u });
        }
        if self.has_edge(u, v) {
            return Err(GraphError::DuplicateEdge {
                u: u.min(v),
                v: u.max(v),
            });
        }
        self.adj[u] |= bit(v);
        self.adj[v] |= bit(u);
        Ok(())
    }

    /// Number of vertices.
    #[inline(always)]
    pub fn order(&self) -> usize {
        self.n
    }

    /// Returns a reference to the adjacency bitsets.
    #[inline(always)]
    pub fn adj(&self) -> &[u64] {
        &self.adj
    }

    /// Neighbor bitset of `v`.
    #[inline(always)]
    pub fn neighbors(&self, v: usize) -> u64 {
        self.adj[v]
    }

    /// Returns whether the edge `(u, v)` exists.
    #[inline(always)]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        debug_assert!(u < self.n && v < self.n);
        (self.adj[u] & bit(v)) != 0
    }

    /// Returns the degree of vertex `v`.
    #[inline(always)]
    pub fn degree(&self, v: usize) -> u32 {
        self.adj[v].count_ones()
    }

    /// Returns the total number of edges in the graph.
    #[inline]
    pub fn edge_count(&self) -> usize {
        let sum: u32 = self.adj.iter().map(|row| row.count_ones()).sum();
        (sum as usize) / 2
    }

    /// Returns all edges as `(u, v)` with `u < v`, in lexicographic order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(self.edge_count());
        for u in 0..self.n {
            out.extend(bits(self.adj[u] & !all_bits(u + 1)).map(|v| (u, v)));
        }
        out
    }

    /// Renders the graph as an `n x n` matrix of `0/1` characters, one
    /// newline-terminated row per vertex.
    pub fn to_adjacency_matrix(&self) -> String {
        let mut s = String::with_capacity(self.n * (self.n + 1));
        for i in 0..self.n {
            for j in 0..self.n {
                s.push(if self.has_edge(i, j) { '1' } else { '0' });
            }
            s.push('\n');
        }
        s
    }

    /// Writes the adjacency matrix to a writer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        w.write_all(self.to_adjacency_matrix().as_bytes())
    }

    /// Saves the adjacency matrix to a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn save_to_file(&self, filename: impl AsRef<Path>) -> io::Result<()> {
        let mut w = BufWriter::new(File::create(filename)?);
        self.write_to(&mut w)?;
        w.flush()
    }

    /// Loads a graph from a file containing an adjacency matrix.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the matrix is malformed.
    pub fn load_from_file(filename: impl AsRef<Path>) -> Result<Self, GraphError> {
        let mut text = String::new();
        File::open(filename)?.read_to_string(&mut text)?;
        parse_adjacency_matrix(&text)
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("n", &self.n)
            .field("edges", &self.edges())
            .finish()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_adjacency_matrix())
    }
}

#[inline]
fn check_order(n: usize) -> Result<(), GraphError> {
    if n > MAX_VERTICES {
        return Err(GraphError::TooManyVertices { n });
    }
    Ok(())
}

// ============================================================================
// Parsing
// ============================================================================

/// Parses a `0/1` adjacency matrix from text.
///
/// Rules:
/// - Blank lines are ignored; text with no rows is the graph on zero vertices.
/// - The matrix must be square, symmetric, and have a zero diagonal.
/// - `n` must be `<= 64`.
///
/// # Errors
/// Returns an error if the input is non-square, contains invalid characters,
/// has self-loops, or is not symmetric.
pub fn parse_adjacency_matrix(text: &str) -> Result<Graph, GraphError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let n = lines.len();
    check_order(n)?;

    let mut rows = Vec::with_capacity(n);
    for (i, line) in lines.iter().enumerate() {
        let bytes = line.as_bytes();
        if bytes.len() != n {
            return Err(GraphError::NonSquare {
                row: i,
                expected: n,
                got: bytes.len(),
            });
        }
        let mut mask = 0u64;
        for (j, &b) in bytes.iter().enumerate() {
            match b {
                b'0' => {}
                b'1' => mask |= bit(j),
                _ => {
                    return Err(GraphError::InvalidChar {
                        row: i,
                        col: j,
                        ch: b as char,
                    })
                }
            }
        }
        rows.push(mask);
    }

    Graph::from_adj(rows)
}

// ============================================================================
// Tests
// ============================================================================
