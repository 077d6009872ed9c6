//! # grcmap CLI entry point
//!
//! Parses command-line arguments, loads the library once, and dispatches
//! to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use grcmap_cli::infer::{run_infer, InferArgs};
use grcmap_cli::paths::{run_paths, run_reachable, PathsArgs, ReachableArgs};
use grcmap_cli::stats::run_stats;

/// Cross-framework compliance mapping.
///
/// Loads a directory of library files (frameworks and requirement mapping
/// sets) and answers path and inference queries against it.
#[derive(Parser, Debug)]
#[command(name = "grcmap", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory of library YAML/JSON files.
    #[arg(long, value_name = "DIR", env = "GRCMAP_LIBRARY")]
    library: PathBuf,

    /// Path to engine configuration file.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print all shortest mapping paths between two frameworks.
    Paths(PathsArgs),

    /// Print every minimal path from a framework to each framework it reaches.
    Reachable(ReachableArgs),

    /// Infer an audit's results onto another framework.
    Infer(InferArgs),

    /// Print the load report and repository statistics.
    Stats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let (engine, report) = grcmap_cli::load_engine(&cli.library, cli.config.as_deref())?;

    match cli.command {
        Commands::Paths(args) => run_paths(&args, &engine),
        Commands::Reachable(args) => run_reachable(&args, &engine),
        Commands::Infer(args) => run_infer(&args, &engine),
        Commands::Stats => run_stats(&report, &engine),
    }
}
