//! # Mapping Repository
//!
//! Owns every loaded mapping set, keyed by ordered framework pair, and the
//! [`MappingGraph`] derived from those keys.
//!
//! ## Storage
//!
//! Sets are stored as [`CompressedPayload`]s and decoded on every
//! [`get`](RepositorySnapshot::get). Callers always receive a fresh copy,
//! never a reference into the cache.
//!
//! ## Concurrency
//!
//! State lives in an immutable [`RepositorySnapshot`] behind
//! `RwLock<Arc<_>>`. [`MappingRepository::load`] builds a complete new
//! snapshot off to the side and swaps it in. Readers clone the `Arc` under
//! a momentary read lock and then work lock-free. Loads are serialized by
//! a separate mutex so two reloads never interleave.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use grcmap_core::{EdgeKey, FrameworkUrn, RequirementMappingSet};

use crate::codec::CompressedPayload;
use crate::error::{LibraryError, MappingError, MappingResult};
use crate::graph::MappingGraph;
use crate::library::{extract_mapping_sets, LibraryDocument, LibraryStore};

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Outcome of a load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Documents the store yielded, readable or not.
    pub documents_read: usize,
    /// Mapping sets accepted, counting sets later superseded in the same load.
    pub mapping_sets_loaded: usize,
    /// Unreadable documents plus rejected mapping sets.
    pub skipped: usize,
    /// One message per skipped item.
    pub skipped_details: Vec<String>,
    /// Keys present now but not before this load.
    pub added: usize,
    /// Keys present before and now, with different content.
    pub changed: usize,
    /// Keys present before but not now.
    pub removed: usize,
    /// Frameworks indexed for score ranges.
    pub frameworks_indexed: usize,
    /// Framework records rejected.
    pub frameworks_skipped: usize,
}

impl LoadReport {
    fn skip(&mut self, reason: impl ToString) {
        let reason = reason.to_string();
        tracing::warn!(reason = %reason, "skipping library content");
        self.skipped += 1;
        self.skipped_details.push(reason);
    }
}

/// Point-in-time repository metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryStats {
    pub mapping_sets: usize,
    pub edges: usize,
    pub frameworks: usize,
    pub compressed_bytes: usize,
    pub uncompressed_bytes: usize,
    pub loaded_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// RepositorySnapshot
// ---------------------------------------------------------------------------

/// Immutable view of the repository after one load.
#[derive(Debug, Default)]
pub struct RepositorySnapshot {
    payloads: HashMap<EdgeKey, CompressedPayload>,
    graph: Arc<MappingGraph>,
    loaded_at: Option<DateTime<Utc>>,
}

impl RepositorySnapshot {
    /// Decode the mapping set for `(source, target)`.
    ///
    /// `Ok(None)` when no set exists for the pair.
    ///
    /// # Errors
    ///
    /// [`MappingError::CacheCorruption`] if the stored payload cannot be
    /// decoded.
    pub fn get(
        &self,
        source: &FrameworkUrn,
        target: &FrameworkUrn,
    ) -> MappingResult<Option<RequirementMappingSet>> {
        if !self.graph.has_edge(source, target) {
            return Ok(None);
        }
        let key = EdgeKey::new(source.clone(), target.clone());
        let Some(payload) = self.payloads.get(&key) else {
            return Ok(None);
        };
        match payload.decode() {
            Ok(set) => Ok(Some(set)),
            Err(e) => {
                tracing::error!(edge = %key, error = %e, "cached mapping set failed to decode");
                Err(MappingError::CacheCorruption {
                    key,
                    detail: e.to_string(),
                })
            }
        }
    }

    /// The direct-edge graph.
    pub fn graph(&self) -> &Arc<MappingGraph> {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    pub fn stats(&self) -> RepositoryStats {
        RepositoryStats {
            mapping_sets: self.payloads.len(),
            edges: self.graph.edge_count(),
            frameworks: self.graph.nodes().len(),
            compressed_bytes: self.payloads.values().map(CompressedPayload::compressed_len).sum(),
            uncompressed_bytes: self
                .payloads
                .values()
                .map(CompressedPayload::uncompressed_len)
                .sum(),
            loaded_at: self.loaded_at,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_payload(mut self, key: EdgeKey, payload: CompressedPayload) -> Self {
        let mut graph = (*self.graph).clone();
        graph.insert_edge(&key);
        self.graph = Arc::new(graph);
        self.payloads.insert(key, payload);
        self
    }
}

// ---------------------------------------------------------------------------
// MappingRepository
// ---------------------------------------------------------------------------

/// Process-lifetime store of compressed mapping sets.
#[derive(Debug)]
pub struct MappingRepository {
    state: RwLock<Arc<RepositorySnapshot>>,
    load_lock: Mutex<()>,
    compression_level: i32,
}

impl MappingRepository {
    /// Create an empty repository compressing at `compression_level`.
    pub fn new(compression_level: i32) -> Self {
        Self {
            state: RwLock::new(Arc::new(RepositorySnapshot::default())),
            load_lock: Mutex::new(()),
            compression_level,
        }
    }

    /// Replace the repository contents with every mapping set in `store`.
    ///
    /// Malformed documents and sets are skipped and counted; they never
    /// abort the load. Within one load, a later set for the same key
    /// replaces an earlier one. Keys missing from `store` are dropped.
    ///
    /// # Errors
    ///
    /// [`MappingError::Store`] if the store cannot be listed at all;
    /// [`MappingError::Encode`] if a validated set cannot be encoded.
    pub fn load(&self, store: &dyn LibraryStore) -> MappingResult<LoadReport> {
        let documents = store.documents()?;
        self.load_documents(&documents)
    }

    /// Replace the repository contents with the mapping sets in an already
    /// read batch of documents. Same contract as [`load`](Self::load) minus
    /// the store read.
    pub fn load_documents(
        &self,
        documents: &[Result<LibraryDocument, LibraryError>],
    ) -> MappingResult<LoadReport> {
        let _guard = self.load_lock.lock();
        let previous = self.snapshot();

        let mut report = LoadReport::default();
        let mut payloads: HashMap<EdgeKey, CompressedPayload> = HashMap::new();

        for document in documents {
            report.documents_read += 1;
            let document = match document {
                Ok(d) => d,
                Err(e) => {
                    report.skip(e);
                    continue;
                }
            };
            for set in extract_mapping_sets(document) {
                let set = match set {
                    Ok(s) => s,
                    Err(e) => {
                        report.skip(e);
                        continue;
                    }
                };
                let key = set.key();
                let payload = CompressedPayload::encode(&set, self.compression_level).map_err(
                    |e| MappingError::Encode {
                        key: key.clone(),
                        detail: e.to_string(),
                    },
                )?;
                report.mapping_sets_loaded += 1;
                if payloads.insert(key.clone(), payload).is_some() {
                    tracing::debug!(edge = %key, origin = %document.origin, "mapping set superseded within load");
                }
            }
        }

        for (key, payload) in &payloads {
            match previous.payloads.get(key) {
                None => report.added += 1,
                Some(old) if old.digest() != payload.digest() => report.changed += 1,
                Some(_) => {}
            }
        }
        report.removed = previous
            .payloads
            .keys()
            .filter(|k| !payloads.contains_key(*k))
            .count();

        let snapshot = RepositorySnapshot {
            graph: Arc::new(MappingGraph::from_edges(payloads.keys())),
            payloads,
            loaded_at: Some(Utc::now()),
        };
        let stats = snapshot.stats();
        *self.state.write() = Arc::new(snapshot);

        metrics::counter!("grcmap_mapping_sets_loaded_total")
            .increment(report.mapping_sets_loaded as u64);
        metrics::counter!("grcmap_documents_skipped_total").increment(report.skipped as u64);
        tracing::info!(
            documents = report.documents_read,
            mapping_sets = stats.mapping_sets,
            edges = stats.edges,
            skipped = report.skipped,
            added = report.added,
            changed = report.changed,
            removed = report.removed,
            compressed_bytes = stats.compressed_bytes,
            uncompressed_bytes = stats.uncompressed_bytes,
            "mapping repository loaded"
        );
        Ok(report)
    }

    /// The current snapshot. Hold it for the duration of a query to see a
    /// consistent repository state.
    pub fn snapshot(&self) -> Arc<RepositorySnapshot> {
        Arc::clone(&self.state.read())
    }

    /// Decode the mapping set for `(source, target)` from the current snapshot.
    pub fn get(
        &self,
        source: &FrameworkUrn,
        target: &FrameworkUrn,
    ) -> MappingResult<Option<RequirementMappingSet>> {
        self.snapshot().get(source, target)
    }

    pub fn stats(&self) -> RepositoryStats {
        self.snapshot().stats()
    }
}
