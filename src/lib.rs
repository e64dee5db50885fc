//! # Word-Representability Census
//!
//! Decides whether undirected graphs are *word-representable*, and scans
//! whole families of graphs for counterexamples.
//!
//! A graph is word-representable iff it is 3-colorable or admits a
//! semi-transitive orientation: an acyclic orientation in which every
//! directed path `v0 -> v1 -> ... -> vk` (k >= 3) with an arc `v0 -> vk` is
//! transitively closed. This crate provides:
//! - A compact bitset graph (`n <= 64`) with adjacency-matrix and graph6 I/O.
//! - An exact backtracking 3-coloring search.
//! - An exact backtracking semi-transitive orientation search with
//!   incremental acyclicity and optional partial-shortcut pruning.
//! - A parallel census driver that streams graphs from `geng` and archives
//!   every non-word-representable graph into a ZIP file.
//!
//! ## Quick Start
//!
//! ```
//! use wordrep::prelude::*;
//!
//! // K4 needs four colors but is semi-transitive.
//! let k4 = Graph::complete(4).unwrap();
//! assert!(!is_3_colorable(&k4));
//! assert!(has_semi_transitive_orientation(&k4));
//! assert!(is_word_representable(&k4));
//!
//! // The wheel W5 is the smallest graph that is not word-representable.
//! let mut edges: Vec<_> = (0..5).map(|v| (v, (v + 1) % 5)).collect();
//! edges.extend((0..5).map(|v| (v, 5)));
//! let w5 = Graph::from_edges(6, &edges).unwrap();
//! assert_eq!(decide(&w5, &SearchConfig::default()), Verdict::NotWordRepresentable);
//! ```
//!
//! ## Witnesses
//!
//! ```
//! use wordrep::prelude::*;
//!
//! let g = graph6::decode("C~").unwrap();
//! let orientation = find_semi_transitive_orientation(&g).unwrap();
//! assert!(orientation.orients(&g));
//! assert!(orientation.is_acyclic());
//! assert!(orientation.find_shortcut().is_none());
//! ```
//!
//! ## Running a Census
//!
//! ```no_run
//! use wordrep::census::{run_census, CensusConfig};
//!
//! let summary = run_census(&CensusConfig::new(7)).unwrap();
//! println!("{} of {} are not word-representable",
//!     summary.non_word_representable, summary.total);
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: Bitset graph, validation errors and adjacency-matrix text.
//! - [`graph6`]: graph6 codec.
//! - [`coloring`]: Exact 3-coloring search.
//! - [`orientation`]: Partial orientations, reachability and shortcut detection.
//! - [`semi_transitive`]: Semi-transitive orientation search.
//! - [`decision`]: The combined word-representability test.
//! - [`census`]: Parallel census over a graph6 stream.
//! - [`archive`]: ZIP archive of counterexamples.
//!
//! ## Performance Notes
//!
//! - The graph representation uses `u64` bitsets, limiting graphs to 64 vertices.
//! - Both searches are exponential in the worst case; the coloring search runs
//!   first because it settles most graphs cheaply.
//! - For maximum performance, compile with: `RUSTFLAGS="-C target-cpu=native" cargo build --release`

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::inline_always)] // Bitset accessors on the search hot path
#![allow(clippy::many_single_char_names)] // Mathematical variable names
#![allow(clippy::doc_markdown)]
#![allow(clippy::multiple_crate_versions)] // Cargo.lock management is external

pub mod archive;
pub mod census;
pub mod coloring;
pub mod decision;
pub mod graph;
pub mod graph6;
pub mod orientation;
pub mod semi_transitive;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::coloring::{find_3_coloring, is_3_colorable, is_proper_coloring};
    pub use crate::decision::{decide, is_word_representable, Verdict};
    pub use crate::graph::{parse_adjacency_matrix, Graph, GraphError, MAX_VERTICES};
    pub use crate::graph6;
    pub use crate::orientation::{Orientation, Shortcut};
    pub use crate::semi_transitive::{
        find_semi_transitive_orientation, has_semi_transitive_orientation, SearchConfig,
    };
}
