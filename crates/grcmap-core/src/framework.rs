//! # Framework Metadata
//!
//! The only framework attributes the mapping engine consumes are the
//! bounds of its scoring scale. Two frameworks with identical bounds can
//! exchange numeric scores; any difference makes scores incomparable.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::FrameworkUrn;

/// Default lower bound of a framework's scoring scale.
pub const DEFAULT_MIN_SCORE: i64 = 0;
/// Default upper bound of a framework's scoring scale.
pub const DEFAULT_MAX_SCORE: i64 = 100;

/// Inclusive numeric range used by every scored requirement of a framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreRange {
    /// Lowest score a requirement may carry.
    pub min_score: i64,
    /// Highest score a requirement may carry.
    pub max_score: i64,
}

impl ScoreRange {
    /// Build a range, rejecting `min_score > max_score`.
    pub fn new(min_score: i64, max_score: i64) -> Result<Self, ValidationError> {
        if min_score > max_score {
            return Err(ValidationError::InvertedScoreRange {
                min: min_score,
                max: max_score,
            });
        }
        Ok(Self {
            min_score,
            max_score,
        })
    }

    /// Whether a score from `self` can be copied verbatim into `other`.
    ///
    /// Absent metadata on either side is never compatible.
    pub fn is_compatible(this: Option<&Self>, other: Option<&Self>) -> bool {
        matches!((this, other), (Some(a), Some(b)) if a == b)
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            max_score: DEFAULT_MAX_SCORE,
        }
    }
}

fn default_min_score() -> i64 {
    DEFAULT_MIN_SCORE
}

fn default_max_score() -> i64 {
    DEFAULT_MAX_SCORE
}

/// A framework as yielded by the framework store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkRecord {
    /// Framework identifier.
    pub urn: FrameworkUrn,
    /// Lower score bound; libraries that omit it use 0.
    #[serde(default = "default_min_score")]
    pub min_score: i64,
    /// Upper score bound; libraries that omit it use 100.
    #[serde(default = "default_max_score")]
    pub max_score: i64,
}

impl FrameworkRecord {
    /// The record's score range, validated.
    pub fn score_range(&self) -> Result<ScoreRange, ValidationError> {
        ScoreRange::new(self.min_score, self.max_score)
    }
}
