//! Word-representability census CLI.
//!
//! Enumerates connected graphs on `n` vertices with nauty's `geng` (or reads
//! graph6 lines from a file or stdin), tests each one, and stores every
//! non-word-representable graph in a ZIP archive.
//!
//! # Usage
//!
//! ```bash
//! # All connected graphs on 7 vertices, archive in 7vertex_nonWR.zip
//! wordrep 7
//!
//! # Pre-generated input, custom archive, 8 worker threads
//! geng -c 8 > g8.g6
//! wordrep 8 --input g8.g6 --output g8.zip --threads 8
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use wordrep::census::{default_archive_path, run_census, CensusConfig, GraphSource};
use wordrep::semi_transitive::SearchConfig;

/// Word-representability census over connected graphs
#[derive(Parser, Debug)]
#[command(name = "wordrep")]
#[command(version)]
#[command(about = "Find all connected graphs on n vertices that are not word-representable")]
struct Cli {
    /// Number of vertices
    n: usize,

    /// graph generator executable, run as `<GENG> -c <n>`
    #[arg(long, default_value = "geng")]
    geng: PathBuf,

    /// Read graph6 lines from a file instead of running the generator ("-" for stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Archive path (default: <n>vertex_nonWR.zip)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Worker threads (default: all cores)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Disable partial-shortcut pruning in the orientation search
    #[arg(long)]
    no_prune: bool,

    /// Graphs decided per parallel batch
    #[arg(long, default_value = "4096")]
    batch_size: usize,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn census_config(&self) -> CensusConfig {
        let source = match &self.input {
            None => GraphSource::Geng {
                program: self.geng.clone(),
            },
            Some(path) if path.as_os_str() == "-" => GraphSource::Stdin,
            Some(path) => GraphSource::File(path.clone()),
        };
        CensusConfig {
            order: self.n,
            source,
            output: self
                .output
                .clone()
                .unwrap_or_else(|| default_archive_path(self.n)),
            batch_size: self.batch_size,
            search: SearchConfig {
                prune_partial_shortcuts: !self.no_prune,
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    let cfg = cli.census_config();
    println!(
        "Enumerating connected non-isomorphic graphs on {} vertices...",
        cfg.order
    );
    let summary = run_census(&cfg)
        .with_context(|| format!("census on {} vertices failed", cfg.order))?;

    println!("=====================================");
    println!("Total connected graphs: {}", summary.total);
    println!("Non-word-representable: {}", summary.non_word_representable);
    println!("=====================================");
    println!("Saved ZIP → {}", summary.archive.display());
    Ok(())
}
