//! # Best-Path Selector
//!
//! Walks every shortest path from the audited framework to the target,
//! translating hop by hop, and keeps the path whose final result set has
//! the most requirement entries.
//!
//! Quantity is the only criterion. A path that preserves more entries wins
//! even if those entries were downgraded along the way. Ties go to the
//! path found first; the path finder enumerates in URN order, so the choice
//! is stable for a given repository.
//!
//! A hop whose mapping set is missing ends the walk for that path. What was
//! accumulated up to that hop still competes.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;

use grcmap_core::{
    summary_counts, FrameworkUrn, RequirementMappingSet, RequirementResult, RequirementUrn,
    ResultRecord, SourceAudit,
};

use crate::error::MappingResult;
use crate::metadata::FrameworkIndex;
use crate::paths::{all_paths_between, FrameworkPath};
use crate::repository::RepositorySnapshot;
use crate::translate::translate;

/// Inferred results at the target framework and the path that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InferenceOutcome {
    /// Target requirement URN → inferred record.
    pub results: BTreeMap<RequirementUrn, ResultRecord>,
    /// The winning candidate path. Empty when none exists.
    pub path: FrameworkPath,
    /// Hops of `path` actually translated.
    pub hops_walked: usize,
}

impl InferenceOutcome {
    /// Outcome for a query whose source and target are the same framework.
    pub fn identity(audit: &SourceAudit, framework: &FrameworkUrn) -> Self {
        Self {
            results: audit.requirements.clone(),
            path: vec![framework.clone()],
            hops_walked: 0,
        }
    }

    /// Whether every hop of a non-empty path was translated. A `false` here
    /// on a non-empty path means the mapping is partial.
    pub fn is_complete(&self) -> bool {
        !self.path.is_empty() && self.hops_walked + 1 == self.path.len()
    }

    pub fn summary(&self) -> BTreeMap<RequirementResult, usize> {
        summary_counts(&self.results)
    }
}

/// Infer `audit` (taken against `source`) onto `dest` over the best
/// shortest path in `snapshot`.
///
/// `source == dest` is not special-cased here; it finds no path and
/// returns an empty outcome. [`MappingEngine`](crate::MappingEngine)
/// handles identity before calling in.
///
/// # Errors
///
/// Only [`MappingError::CacheCorruption`](crate::MappingError::CacheCorruption).
pub fn best_mapping_inferences(
    snapshot: &RepositorySnapshot,
    frameworks: &FrameworkIndex,
    audit: &SourceAudit,
    source: &FrameworkUrn,
    dest: &FrameworkUrn,
    max_depth: Option<usize>,
) -> MappingResult<InferenceOutcome> {
    let candidates = all_paths_between(snapshot.graph(), source, dest, max_depth);
    select_best(candidates, audit, frameworks, |s, t| snapshot.get(s, t))
}

fn select_best<F>(
    candidates: Vec<FrameworkPath>,
    audit: &SourceAudit,
    frameworks: &FrameworkIndex,
    mut fetch: F,
) -> MappingResult<InferenceOutcome>
where
    F: FnMut(&FrameworkUrn, &FrameworkUrn) -> MappingResult<Option<RequirementMappingSet>>,
{
    let candidate_count = candidates.len();
    let mut best: Option<InferenceOutcome> = None;

    for path in candidates {
        let (results, hops_walked) = walk(&path, audit, frameworks, &mut fetch)?;
        // Strictly greater: the first path keeps ties.
        if best.as_ref().map_or(true, |b| results.len() > b.results.len()) {
            best = Some(InferenceOutcome {
                results,
                path,
                hops_walked,
            });
        }
    }

    let outcome = best.unwrap_or_default();
    tracing::debug!(
        candidates = candidate_count,
        path_len = outcome.path.len(),
        hops_walked = outcome.hops_walked,
        results = outcome.results.len(),
        "best path selected"
    );
    Ok(outcome)
}

/// Translate `audit` along `path` until the end or the first missing set.
fn walk<F>(
    path: &[FrameworkUrn],
    audit: &SourceAudit,
    frameworks: &FrameworkIndex,
    fetch: &mut F,
) -> MappingResult<(BTreeMap<RequirementUrn, ResultRecord>, usize)>
where
    F: FnMut(&FrameworkUrn, &FrameworkUrn) -> MappingResult<Option<RequirementMappingSet>>,
{
    let mut current = Cow::Borrowed(audit);
    let mut hops = 0;
    for pair in path.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        let Some(set) = fetch(from, to)? else {
            tracing::debug!(source = %from, target = %to, hops, "mapping set missing, path is partial");
            break;
        };
        current = Cow::Owned(translate(&set, &current, frameworks.get(to)));
        hops += 1;
    }
    Ok((current.into_owned().requirements, hops))
}
