//! # Requirement Results
//!
//! The unit of information moved across a mapping hop is a
//! [`ResultRecord`]: the assessed state of a single requirement. A
//! [`SourceAudit`] is the read-only snapshot of every assessable
//! requirement's record for one framework, together with that framework's
//! score range.
//!
//! Records produced by a lossy hop keep the `result` and drop some or all
//! of the optional fields, so one type serves both the source assessment
//! and every intermediate or final inference.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::framework::ScoreRange;
use crate::identity::RequirementUrn;

// ---------------------------------------------------------------------------
// RequirementResult
// ---------------------------------------------------------------------------

/// Compliance status of a single requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementResult {
    /// The requirement is fully met.
    Compliant,
    /// The requirement is met in part.
    PartiallyCompliant,
    /// The requirement is not met.
    NonCompliant,
    /// The requirement does not apply to the audited scope.
    NotApplicable,
    /// The requirement has not been assessed yet.
    NotAssessed,
}

impl RequirementResult {
    /// Every variant, in reporting order.
    pub const ALL: [RequirementResult; 5] = [
        RequirementResult::Compliant,
        RequirementResult::PartiallyCompliant,
        RequirementResult::NonCompliant,
        RequirementResult::NotApplicable,
        RequirementResult::NotAssessed,
    ];

    /// The snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::PartiallyCompliant => "partially_compliant",
            Self::NonCompliant => "non_compliant",
            Self::NotApplicable => "not_applicable",
            Self::NotAssessed => "not_assessed",
        }
    }
}

impl fmt::Display for RequirementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AssessmentStatus
// ---------------------------------------------------------------------------

/// Workflow status of a requirement assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    ToDo,
    InProgress,
    InReview,
    Done,
}

// ---------------------------------------------------------------------------
// ResultRecord
// ---------------------------------------------------------------------------

/// Assessed state of one requirement.
///
/// `result` is always present. `score` and `is_scored` only survive hops
/// between frameworks sharing a score range; `status` and `observation`
/// survive `equal`/`superset` hops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Compliance status.
    pub result: RequirementResult,
    /// Workflow status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AssessmentStatus>,
    /// Numeric score on the owning framework's scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    /// Whether `score` was set by the assessor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_scored: Option<bool>,
    /// Free-text observation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
}

impl ResultRecord {
    /// A record carrying only a compliance status.
    pub fn new(result: RequirementResult) -> Self {
        Self {
            result,
            status: None,
            score: None,
            is_scored: None,
            observation: None,
        }
    }

    /// Set the workflow status.
    pub fn with_status(mut self, status: AssessmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the score and mark the record as scored.
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self.is_scored = Some(true);
        self
    }

    /// Set the observation text.
    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observation = Some(observation.into());
        self
    }

    /// Copy of this record without the numeric fields.
    pub fn without_score(&self) -> Self {
        Self {
            result: self.result,
            status: self.status,
            score: None,
            is_scored: None,
            observation: self.observation.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// SourceAudit
// ---------------------------------------------------------------------------

/// One row of a compliance assessment, as handed over by the assessment
/// store. Only assessable requirements are included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRow {
    /// The assessed requirement.
    pub requirement: RequirementUrn,
    pub result: RequirementResult,
    #[serde(default)]
    pub status: Option<AssessmentStatus>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub is_scored: Option<bool>,
    #[serde(default)]
    pub observation: Option<String>,
}

/// Per-requirement results of one framework, plus its score range.
///
/// Used both as the engine's read-only input and as the value carried
/// between hops. `score_range` is `None` when the framework's metadata
/// is unknown, which makes scores non-transferable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAudit {
    /// Scoring scale of the framework these results belong to.
    pub score_range: Option<ScoreRange>,
    /// Requirement URN → result record.
    pub requirements: BTreeMap<RequirementUrn, ResultRecord>,
}

impl SourceAudit {
    /// Create an empty audit for a framework with the given scale.
    pub fn new(score_range: Option<ScoreRange>) -> Self {
        Self {
            score_range,
            requirements: BTreeMap::new(),
        }
    }

    /// Build an audit from assessment store rows. A later row for the same
    /// requirement replaces an earlier one.
    pub fn from_assessments(
        score_range: ScoreRange,
        rows: impl IntoIterator<Item = AssessmentRow>,
    ) -> Self {
        let requirements = rows
            .into_iter()
            .map(|row| {
                (
                    row.requirement,
                    ResultRecord {
                        result: row.result,
                        status: row.status,
                        score: row.score,
                        is_scored: row.is_scored,
                        observation: row.observation,
                    },
                )
            })
            .collect();
        Self {
            score_range: Some(score_range),
            requirements,
        }
    }

    /// Record the result for a requirement.
    pub fn insert(&mut self, requirement: RequirementUrn, record: ResultRecord) {
        self.requirements.insert(requirement, record);
    }

    /// Look up a requirement's record.
    pub fn get(&self, requirement: &RequirementUrn) -> Option<&ResultRecord> {
        self.requirements.get(requirement)
    }

    /// Number of requirements carrying a result.
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Whether no requirement carries a result.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

/// Tally of records per compliance status.
///
/// Every status appears in the output, with zero when absent.
pub fn summary_counts(
    results: &BTreeMap<RequirementUrn, ResultRecord>,
) -> BTreeMap<RequirementResult, usize> {
    let mut counts: BTreeMap<RequirementResult, usize> =
        RequirementResult::ALL.iter().map(|r| (*r, 0)).collect();
    for record in results.values() {
        *counts.entry(record.result).or_default() += 1;
    }
    counts
}
