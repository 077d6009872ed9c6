//! # Audit Files
//!
//! The `infer` subcommand reads a compliance assessment export:
//!
//! ```yaml
//! framework: urn:fw:iso27001-2022
//! min_score: 0
//! max_score: 100
//! requirement_assessments:
//!   - requirement: urn:req:iso27001-2022:a.5.1
//!     result: compliant
//!     status: done
//!     score: 80
//!     is_scored: true
//! ```
//!
//! `.json` files are parsed as JSON; anything else as YAML.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use grcmap_core::{AssessmentRow, FrameworkUrn, ScoreRange, SourceAudit};

fn default_max_score() -> i64 {
    100
}

/// An assessment export.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditFile {
    /// Framework the assessment was performed against.
    pub framework: FrameworkUrn,
    #[serde(default)]
    pub min_score: i64,
    #[serde(default = "default_max_score")]
    pub max_score: i64,
    #[serde(default)]
    pub requirement_assessments: Vec<AssessmentRow>,
}

impl AuditFile {
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read audit file: {}", path.display()))?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse JSON: {}", path.display()))
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("failed to parse YAML: {}", path.display()))
        }
    }

    /// Convert into the engine's input form. Consumes the rows.
    pub fn into_source_audit(self) -> Result<(FrameworkUrn, SourceAudit)> {
        let range = ScoreRange::new(self.min_score, self.max_score)
            .with_context(|| format!("invalid score range for {}", self.framework))?;
        let audit = SourceAudit::from_assessments(range, self.requirement_assessments);
        Ok((self.framework, audit))
    }
}
