//! # Mapping Engine
//!
//! The service object request handlers share. It owns the repository and
//! the framework index, is constructed explicitly, and is loaded
//! explicitly; there is no process-global state.
//!
//! Queries take a snapshot of both at entry and run against it, so a
//! concurrent [`reload`](MappingEngine::reload) is never observed halfway
//! through a single query's path walk.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use grcmap_core::{FrameworkUrn, RequirementMappingSet, ScoreRange, SourceAudit};

use crate::config::EngineConfig;
use crate::error::MappingResult;
use crate::inference::{self, InferenceOutcome};
use crate::library::{frameworks_in, FrameworkStore, LibraryStore};
use crate::metadata::FrameworkIndex;
use crate::paths::{self, FrameworkPath, ReachablePaths};
use crate::repository::{LoadReport, MappingRepository, RepositoryStats};

/// Cross-framework mapping engine.
#[derive(Debug)]
pub struct MappingEngine {
    config: EngineConfig,
    repository: MappingRepository,
    frameworks: RwLock<Arc<FrameworkIndex>>,
    load_lock: Mutex<()>,
}

impl MappingEngine {
    /// Create an empty engine. Call [`load`](Self::load) before querying.
    pub fn new(config: EngineConfig) -> MappingResult<Self> {
        config.validate()?;
        Ok(Self {
            repository: MappingRepository::new(config.compression_level),
            frameworks: RwLock::new(Arc::new(FrameworkIndex::new())),
            load_lock: Mutex::new(()),
            config,
        })
    }

    /// Load framework metadata and every mapping set.
    ///
    /// The library is read once. Frameworks embedded in its documents and
    /// the mapping sets come from that same batch; records from
    /// `frameworks`, when given, are indexed after the embedded ones and win
    /// on a shared URN.
    ///
    /// Aborts only if a store cannot be read at all; per-document and
    /// per-record failures are counted in the returned report.
    pub fn load(
        &self,
        library: &dyn LibraryStore,
        frameworks: Option<&dyn FrameworkStore>,
    ) -> MappingResult<LoadReport> {
        let _guard = self.load_lock.lock();

        let documents = library.documents()?;
        let mut records = frameworks_in(&documents);
        if let Some(store) = frameworks {
            records.extend(store.frameworks()?);
        }
        let (index, frameworks_skipped) = FrameworkIndex::from_results(records);
        let mut report = self.repository.load_documents(&documents)?;
        report.frameworks_indexed = index.len();
        report.frameworks_skipped = frameworks_skipped;
        *self.frameworks.write() = Arc::new(index);

        tracing::info!(
            frameworks = report.frameworks_indexed,
            frameworks_skipped,
            "framework index loaded"
        );
        Ok(report)
    }

    /// Replace the loaded state. Same contract as [`load`](Self::load).
    pub fn reload(
        &self,
        library: &dyn LibraryStore,
        frameworks: Option<&dyn FrameworkStore>,
    ) -> MappingResult<LoadReport> {
        let previous = self.repository.stats();
        tracing::info!(
            mapping_sets = previous.mapping_sets,
            edges = previous.edges,
            loaded_at = ?previous.loaded_at,
            "reloading mapping library"
        );
        self.load(library, frameworks)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Decoded copy of the mapping set for `(source, target)`.
    pub fn get_mapping_set(
        &self,
        source: &FrameworkUrn,
        target: &FrameworkUrn,
    ) -> MappingResult<Option<RequirementMappingSet>> {
        self.repository.get(source, target)
    }

    pub fn framework_range(&self, framework: &FrameworkUrn) -> Option<ScoreRange> {
        self.frameworks.read().get(framework)
    }

    /// All shortest paths from `source` to `dest`. `max_depth` defaults to
    /// the configured bound.
    pub fn all_paths_between(
        &self,
        source: &FrameworkUrn,
        dest: &FrameworkUrn,
        max_depth: Option<usize>,
    ) -> Vec<FrameworkPath> {
        let snapshot = self.repository.snapshot();
        paths::all_paths_between(snapshot.graph(), source, dest, Some(self.depth(max_depth)))
    }

    /// Lazily enumerate every minimal path from `source`. The iterator
    /// holds the graph it started on and is unaffected by later reloads.
    pub fn all_paths_from(&self, source: &FrameworkUrn, max_depth: Option<usize>) -> ReachablePaths {
        let snapshot = self.repository.snapshot();
        paths::all_paths_from(Arc::clone(snapshot.graph()), source, Some(self.depth(max_depth)))
    }

    /// Infer `audit`, taken against `source`, onto `dest`.
    ///
    /// When `source == dest` the audit's records are returned unchanged
    /// with a single-framework path.
    pub fn best_mapping_inferences(
        &self,
        audit: &SourceAudit,
        source: &FrameworkUrn,
        dest: &FrameworkUrn,
        max_depth: Option<usize>,
    ) -> MappingResult<InferenceOutcome> {
        metrics::counter!("grcmap_inferences_total").increment(1);
        if source == dest {
            return Ok(InferenceOutcome::identity(audit, source));
        }

        let snapshot = self.repository.snapshot();
        let frameworks = Arc::clone(&self.frameworks.read());
        let outcome = inference::best_mapping_inferences(
            &snapshot,
            &frameworks,
            audit,
            source,
            dest,
            Some(self.depth(max_depth)),
        )?;

        if !outcome.path.is_empty() && !outcome.is_complete() {
            metrics::counter!("grcmap_inference_partial_total").increment(1);
            tracing::warn!(
                source = %source,
                dest = %dest,
                hops_walked = outcome.hops_walked,
                path_len = outcome.path.len(),
                "partial mapping"
            );
        }
        Ok(outcome)
    }

    pub fn stats(&self) -> RepositoryStats {
        self.repository.stats()
    }

    fn depth(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.config.max_depth)
    }
}
