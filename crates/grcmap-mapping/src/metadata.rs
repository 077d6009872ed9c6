//! # Framework Metadata Index
//!
//! O(1) lookup from framework URN to its score range. The translator uses
//! it to decide whether numeric fields may cross a hop. A framework with
//! no entry is treated as having an incompatible scale.

use std::collections::HashMap;

use grcmap_core::{FrameworkRecord, FrameworkUrn, ScoreRange};

use crate::error::{LibraryError, MappingResult};
use crate::library::FrameworkStore;

/// Immutable URN → score range map.
#[derive(Debug, Clone, Default)]
pub struct FrameworkIndex {
    ranges: HashMap<FrameworkUrn, ScoreRange>,
}

impl FrameworkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index records, skipping any with an inverted range. Returns the index
    /// and the number of records skipped. A later record for the same URN
    /// replaces an earlier one.
    pub fn from_records(records: impl IntoIterator<Item = FrameworkRecord>) -> (Self, usize) {
        let mut ranges = HashMap::new();
        let mut skipped = 0;
        for record in records {
            match record.score_range() {
                Ok(range) => {
                    ranges.insert(record.urn, range);
                }
                Err(e) => {
                    tracing::warn!(framework = %record.urn, error = %e, "skipping framework with invalid score range");
                    skipped += 1;
                }
            }
        }
        (Self { ranges }, skipped)
    }

    /// Like [`from_records`](Self::from_records), but over records that
    /// may have failed validation upstream. Failed records are logged and
    /// counted with the skipped ones.
    pub fn from_results(
        records: impl IntoIterator<Item = Result<FrameworkRecord, LibraryError>>,
    ) -> (Self, usize) {
        let mut rejected = 0;
        let valid: Vec<_> = records
            .into_iter()
            .filter_map(|record| {
                record
                    .map_err(|e| {
                        tracing::warn!(error = %e, "skipping malformed framework");
                        rejected += 1;
                    })
                    .ok()
            })
            .collect();
        let (index, skipped) = Self::from_records(valid);
        (index, skipped + rejected)
    }

    /// Read every framework from `store` and index it.
    pub fn load(store: &dyn FrameworkStore) -> MappingResult<(Self, usize)> {
        Ok(Self::from_results(store.frameworks()?))
    }

    pub fn get(&self, framework: &FrameworkUrn) -> Option<ScoreRange> {
        self.ranges.get(framework).copied()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
