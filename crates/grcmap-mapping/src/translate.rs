//! # Result Translator
//!
//! Moves a framework's requirement results across one mapping hop.
//!
//! For each entry `(src, dst, relationship)` whose `src` has a record:
//!
//! | Relationship | Output at `dst` |
//! |---|---|
//! | `equal`, `superset`, same score range | full copy of the record |
//! | `equal`, `superset`, different or unknown range | `result`, `status`, `observation` only |
//! | `subset`, `intersect` | `result` only, downgraded (see [`downgrade_for_partial`]) |
//! | anything else | nothing |
//!
//! Entries are applied in order; a later entry targeting the same `dst`
//! replaces the earlier record. Requirements without a usable entry are
//! absent from the output.

use grcmap_core::{
    Relationship, RequirementMappingSet, RequirementResult, ResultRecord, ScoreRange, SourceAudit,
};

/// Result carried across a partial (`subset` / `intersect`) relationship.
///
/// Never upgrades: `compliant` becomes `partially_compliant`, worse states
/// pass through, and `not_applicable` does not propagate.
pub fn downgrade_for_partial(result: RequirementResult) -> Option<RequirementResult> {
    match result {
        RequirementResult::NotAssessed | RequirementResult::NonCompliant => Some(result),
        RequirementResult::Compliant | RequirementResult::PartiallyCompliant => {
            Some(RequirementResult::PartiallyCompliant)
        }
        RequirementResult::NotApplicable => None,
    }
}

/// Translate one record across one relationship.
pub fn translate_record(
    record: &ResultRecord,
    relationship: &Relationship,
    scores_compatible: bool,
) -> Option<ResultRecord> {
    match relationship {
        Relationship::Equal | Relationship::Superset => Some(if scores_compatible {
            record.clone()
        } else {
            record.without_score()
        }),
        Relationship::Subset | Relationship::Intersect => {
            downgrade_for_partial(record.result).map(ResultRecord::new)
        }
        Relationship::Other(_) => None,
    }
}

/// Project `audit` through `set` onto the set's target framework.
///
/// `target_range` is the target framework's score range, if known. The
/// returned audit carries it, so it can feed the next hop.
pub fn translate(
    set: &RequirementMappingSet,
    audit: &SourceAudit,
    target_range: Option<ScoreRange>,
) -> SourceAudit {
    let scores_compatible =
        ScoreRange::is_compatible(audit.score_range.as_ref(), target_range.as_ref());
    let mut out = SourceAudit::new(target_range);

    for mapping in &set.requirement_mappings {
        let Some(record) = audit.get(&mapping.source_requirement) else {
            continue;
        };
        if let Some(translated) =
            translate_record(record, &mapping.relationship, scores_compatible)
        {
            out.insert(mapping.target_requirement.clone(), translated);
        }
    }

    tracing::debug!(
        source_framework = %set.source_framework,
        target_framework = %set.target_framework,
        entries = set.requirement_mappings.len(),
        inputs = audit.len(),
        outputs = out.len(),
        scores_compatible,
        "translated mapping hop"
    );
    out
}
