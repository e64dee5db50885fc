//! Census over a stream of graph6-encoded graphs.
//!
//! Graphs are read line by line, decided in parallel batches with rayon, and
//! every non-word-representable graph is appended to the archive in input
//! order, so member `nonWR_k.txt` is always the `k`-th counterexample seen.

use crate::archive::{ArchiveError, ArchiveWriter};
use crate::decision::decide;
use crate::graph::{Graph, GraphError, MAX_VERTICES};
use crate::graph6;
use crate::semi_transitive::SearchConfig;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;
use tracing::{debug, info, warn};

// ============================================================================
// Configuration
// ============================================================================

/// Where the graphs come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphSource {
    /// Run `<program> -c <n>` (nauty's `geng`, connected graphs only).
    Geng {
        /// Path or name of the generator executable.
        program: PathBuf,
    },
    /// Read graph6 lines from a file.
    File(PathBuf),
    /// Read graph6 lines from standard input.
    Stdin,
}

/// Census parameters.
#[derive(Clone, Debug)]
pub struct CensusConfig {
    /// Order every input graph must have.
    pub order: usize,
    /// Graph source.
    pub source: GraphSource,
    /// Archive path for the counterexamples.
    pub output: PathBuf,
    /// Graphs decided per parallel batch.
    pub batch_size: usize,
    /// Orientation search settings.
    pub search: SearchConfig,
}

impl CensusConfig {
    /// Default census of connected graphs on `order` vertices via `geng`.
    pub fn new(order: usize) -> Self {
        Self {
            order,
            source: GraphSource::Geng {
                program: PathBuf::from("geng"),
            },
            output: default_archive_path(order),
            batch_size: 4096,
            search: SearchConfig::default(),
        }
    }
}

/// `<n>vertex_nonWR.zip`.
pub fn default_archive_path(order: usize) -> PathBuf {
    PathBuf::from(format!("{order}vertex_nonWR.zip"))
}

// ============================================================================
// Results and errors
// ============================================================================

/// Outcome of a census run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CensusSummary {
    /// Graphs examined.
    pub total: usize,
    /// Graphs found not word-representable.
    pub non_word_representable: usize,
    /// Archive holding the counterexamples.
    pub archive: PathBuf,
}

/// Errors that abort a census.
#[derive(Debug, Error)]
pub enum CensusError {
    /// The requested order cannot be represented.
    #[error("invalid order: {0}")]
    Order(#[source] GraphError),
    /// The generator could not be started.
    #[error("failed to start graph generator `{program}`: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The generator exited unsuccessfully.
    #[error("graph generator exited with {0}")]
    Generator(ExitStatus),
    /// An input line is not a valid graph of the declared order.
    #[error("input line {line}: {source}")]
    Decode {
        /// 1-based input line number.
        line: usize,
        /// Decoding or validation failure.
        #[source]
        source: GraphError,
    },
    /// Reading the input failed.
    #[error("failed to read graphs: {0}")]
    Io(#[from] io::Error),
    /// Writing the archive failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

// ============================================================================
// Public API
// ============================================================================

/// Runs a census from the configured source.
///
/// For a generator source the archive is only written after the generator has
/// exited successfully.
///
/// # Errors
/// Returns an error if the source cannot be read, an input line is malformed,
/// the generator fails, or the archive cannot be written.
pub fn run_census(cfg: &CensusConfig) -> Result<CensusSummary, CensusError> {
    if cfg.order > MAX_VERTICES {
        return Err(CensusError::Order(GraphError::TooManyVertices { n: cfg.order }));
    }

    match &cfg.source {
        GraphSource::Geng { program } => {
            let mut archive = ArchiveWriter::create(&cfg.output)?;
            info!(program = %program.display(), n = cfg.order, "starting generator");
            let mut child = Command::new(program)
                .arg("-c")
                .arg(cfg.order.to_string())
                .stdout(Stdio::piped())
                .spawn()
                .map_err(|source| CensusError::Spawn {
                    program: program.display().to_string(),
                    source,
                })?;
            let stdout = child
                .stdout
                .take()
                .ok_or_else(|| io::Error::other("generator stdout was not captured"))?;
            let scanned = scan(BufReader::new(stdout), cfg, &mut archive);
            if scanned.is_err() {
                // Stop the generator rather than let it block on a full pipe.
                let _ = child.kill();
            }
            let status = child.wait()?;
            let total = scanned?;
            if !status.success() {
                return Err(CensusError::Generator(status));
            }
            finish(total, archive)
        }
        GraphSource::File(path) => census_from_reader(BufReader::new(File::open(path)?), cfg),
        GraphSource::Stdin => census_from_reader(io::stdin().lock(), cfg),
    }
}

/// Runs a census over graph6 lines from `reader`.
///
/// Blank lines and `>`-prefixed generator messages are skipped.
///
/// The archive only replaces `cfg.output` once every line has been processed;
/// a failed run leaves any previous file at that path as it was.
///
/// # Errors
/// Returns an error on unreadable input, a malformed line, a graph of the
/// wrong order, or an archive failure.
pub fn census_from_reader<R: BufRead>(
    reader: R,
    cfg: &CensusConfig,
) -> Result<CensusSummary, CensusError> {
    let mut archive = ArchiveWriter::create(&cfg.output)?;
    let total = scan(reader, cfg, &mut archive)?;
    finish(total, archive)
}

// ============================================================================
// Internal
// ============================================================================

/// Decides every graph from `reader`, appending counterexamples to `archive`.
/// Returns the number of graphs examined.
fn scan<R: BufRead>(
    reader: R,
    cfg: &CensusConfig,
    archive: &mut ArchiveWriter,
) -> Result<usize, CensusError> {
    let batch_size = cfg.batch_size.max(1);
    let mut batch: Vec<Graph> = Vec::with_capacity(batch_size);
    let mut total = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let encoded = line.trim();
        if encoded.is_empty() {
            continue;
        }
        if encoded.starts_with('>') && !encoded.starts_with(graph6::HEADER) {
            warn!(line = idx + 1, text = encoded, "skipping generator message");
            continue;
        }
        let graph = decode_line(encoded, cfg.order)
            .map_err(|source| CensusError::Decode { line: idx + 1, source })?;
        batch.push(graph);
        if batch.len() == batch_size {
            total += flush_batch(&mut batch, archive, &cfg.search)?;
        }
    }
    total += flush_batch(&mut batch, archive, &cfg.search)?;
    Ok(total)
}

fn finish(total: usize, archive: ArchiveWriter) -> Result<CensusSummary, CensusError> {
    let non_word_representable = archive.len();
    let archive = archive.finish()?;
    info!(
        total,
        non_word_representable,
        archive = %archive.display(),
        "census finished"
    );
    Ok(CensusSummary {
        total,
        non_word_representable,
        archive,
    })
}

fn decode_line(encoded: &str, order: usize) -> Result<Graph, GraphError> {
    let graph = graph6::decode(encoded)?;
    if graph.order() != order {
        return Err(GraphError::MismatchedOrder {
            expected: order,
            got: graph.order(),
        });
    }
    Ok(graph)
}

/// Decides a batch in parallel, then archives its counterexamples in order.
fn flush_batch(
    batch: &mut Vec<Graph>,
    archive: &mut ArchiveWriter,
    search: &SearchConfig,
) -> Result<usize, CensusError> {
    let size = batch.len();
    if size == 0 {
        return Ok(0);
    }
    let verdicts: Vec<_> = batch.par_iter().map(|g| decide(g, search)).collect();
    for (graph, verdict) in batch.drain(..).zip(verdicts) {
        if !verdict.is_word_representable() {
            let k = archive.append(&graph)?;
            info!(graph6 = %graph6::encode(&graph), "Found non-WR #{k}");
        }
    }
    debug!(size, found = archive.len(), "batch done");
    Ok(size)
}

// ============================================================================
// Tests
// ============================================================================
