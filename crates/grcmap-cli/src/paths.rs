//! # Paths and Reachable Subcommands
//!
//! Diagnostic views of the mapping graph.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use grcmap_core::FrameworkUrn;
use grcmap_mapping::{FrameworkPath, MappingEngine};

/// Arguments for `grcmap paths`.
#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Framework URN the audit was performed against.
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Framework URN to map onto.
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Longest path considered, in hops. Defaults to the configured bound.
    #[arg(long)]
    pub max_depth: Option<usize>,
}

/// Arguments for `grcmap reachable`.
#[derive(Args, Debug)]
pub struct ReachableArgs {
    /// Framework URN to start from.
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Longest path considered, in hops. Defaults to the configured bound.
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Stop after this many paths.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct PathsReport<'a> {
    source: &'a FrameworkUrn,
    target: &'a FrameworkUrn,
    hops: Option<usize>,
    paths: &'a [FrameworkPath],
}

/// Execute `grcmap paths`.
///
/// Returns exit code 0 when at least one path exists, 1 otherwise.
pub fn run_paths(args: &PathsArgs, engine: &MappingEngine) -> Result<u8> {
    let source = crate::parse_framework(&args.source)?;
    let target = crate::parse_framework(&args.target)?;

    let paths = engine.all_paths_between(&source, &target, args.max_depth);
    crate::print_json(&PathsReport {
        source: &source,
        target: &target,
        hops: paths.first().map(|p| p.len() - 1),
        paths: &paths,
    })?;

    Ok(if paths.is_empty() { 1 } else { 0 })
}

/// Execute `grcmap reachable`.
pub fn run_reachable(args: &ReachableArgs, engine: &MappingEngine) -> Result<u8> {
    let source = crate::parse_framework(&args.source)?;

    let reachable = engine.all_paths_from(&source, args.max_depth);
    let paths: Vec<FrameworkPath> = match args.limit {
        Some(limit) => reachable.take(limit).collect(),
        None => reachable.collect(),
    };
    tracing::debug!(source = %source, paths = paths.len(), "enumerated reachable paths");

    crate::print_json(&paths)?;
    Ok(0)
}
