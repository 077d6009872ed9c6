//! # Stats Subcommand
//!
//! Reports what the library load produced.

use anyhow::Result;
use serde::Serialize;

use grcmap_mapping::{LoadReport, MappingEngine, RepositoryStats};

#[derive(Debug, Serialize)]
struct StatsReport<'a> {
    load: &'a LoadReport,
    repository: RepositoryStats,
}

/// Execute `grcmap stats`.
///
/// Returns exit code 1 when any library content was skipped, framework
/// records included.
pub fn run_stats(report: &LoadReport, engine: &MappingEngine) -> Result<u8> {
    crate::print_json(&StatsReport {
        load: report,
        repository: engine.stats(),
    })?;
    let clean = report.skipped == 0 && report.frameworks_skipped == 0;
    Ok(if clean { 0 } else { 1 })
}
