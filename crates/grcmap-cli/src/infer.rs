//! # Infer Subcommand
//!
//! Projects an audit file onto a target framework over the best available
//! mapping path and prints the inferred results.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use grcmap_core::{FrameworkUrn, RequirementResult, RequirementUrn, ResultRecord};
use grcmap_mapping::MappingEngine;

use crate::audit::AuditFile;

/// Arguments for `grcmap infer`.
#[derive(Args, Debug)]
pub struct InferArgs {
    /// Assessment export (YAML, or JSON with a `.json` extension).
    #[arg(long, value_name = "FILE")]
    pub audit: PathBuf,

    /// Framework URN to map onto.
    #[arg(long, value_name = "URN")]
    pub target: String,

    /// Longest path considered, in hops. Defaults to the configured bound.
    #[arg(long)]
    pub max_depth: Option<usize>,
}

#[derive(Debug, Serialize)]
struct InferReport<'a> {
    source: &'a FrameworkUrn,
    target: &'a FrameworkUrn,
    path: &'a [FrameworkUrn],
    hops_walked: usize,
    complete: bool,
    summary: BTreeMap<RequirementResult, usize>,
    results: &'a BTreeMap<RequirementUrn, ResultRecord>,
}

/// Execute `grcmap infer`.
///
/// Returns exit code 0 for a complete mapping, 1 when no path exists or
/// the best path could only be partially translated.
pub fn run_infer(args: &InferArgs, engine: &MappingEngine) -> Result<u8> {
    let target = crate::parse_framework(&args.target)?;
    let (source, audit) = AuditFile::read(&args.audit)?.into_source_audit()?;

    let outcome = engine.best_mapping_inferences(&audit, &source, &target, args.max_depth)?;
    let complete = outcome.is_complete();

    crate::print_json(&InferReport {
        source: &source,
        target: &target,
        path: &outcome.path,
        hops_walked: outcome.hops_walked,
        complete,
        summary: outcome.summary(),
        results: &outcome.results,
    })?;

    if outcome.path.is_empty() {
        tracing::warn!(source = %source, target = %target, "no mapping path");
    }
    Ok(if complete { 0 } else { 1 })
}
