//! # grcmap-cli: Command-Line Access to the Mapping Engine
//!
//! Provides the `grcmap` binary for diagnostic and bulk use of the
//! cross-framework mapping engine against a library directory.
//!
//! ## Subcommands
//!
//! - `grcmap paths`: All shortest mapping paths between two frameworks.
//! - `grcmap reachable`: Every framework reachable from a source, with its minimal paths.
//! - `grcmap infer`: Project an audit file onto a target framework.
//! - `grcmap stats`: Load report and repository statistics.
//!
//! ```bash
//! grcmap --library ./library paths urn:fw:iso27001-2022 urn:fw:nist-csf-2.0
//! grcmap --library ./library infer --audit audit.yaml --target urn:fw:nist-csf-2.0
//! ```
//!
//! ## Exit Codes
//!
//! `0` on success, `1` when the query found no path or only a partial
//! mapping, `2` on operational error (unreadable library, bad input).
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from engine work.
//! - Handlers print JSON on stdout; diagnostics go to stderr via `tracing`.

pub mod audit;
pub mod infer;
pub mod paths;
pub mod stats;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use grcmap_core::FrameworkUrn;
use grcmap_mapping::{DirectoryLibrary, EngineConfig, LoadReport, MappingEngine};

/// Build an engine from an optional config file and load `library` into it.
pub fn load_engine(library: &Path, config: Option<&Path>) -> Result<(MappingEngine, LoadReport)> {
    let config = match config {
        Some(path) => EngineConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = MappingEngine::new(config).context("failed to construct mapping engine")?;

    let store = DirectoryLibrary::new(library);
    let report = engine
        .load(&store, None)
        .with_context(|| format!("failed to load library: {}", library.display()))?;

    tracing::info!(
        library = %library.display(),
        mapping_sets = report.mapping_sets_loaded,
        skipped = report.skipped,
        frameworks_skipped = report.frameworks_skipped,
        "library loaded"
    );
    Ok((engine, report))
}

/// Parse a framework URN argument.
pub fn parse_framework(value: &str) -> Result<FrameworkUrn> {
    FrameworkUrn::new(value).with_context(|| format!("invalid framework URN: {value:?}"))
}

/// Write `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{out}");
    Ok(())
}
