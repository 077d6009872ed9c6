//! # grcmap-mapping: Cross-Framework Compliance Mapping Engine
//!
//! Projects a compliance assessment performed against one framework onto
//! another framework, using librarian-supplied requirement mapping sets.
//!
//! - **Library** (`library.rs`): Typed parsing boundary for raw library
//!   documents, plus the [`LibraryStore`] / [`FrameworkStore`] seams and
//!   their directory and in-memory implementations.
//!
//! - **Repository** (`repository.rs`): Indexes mapping sets by ordered
//!   framework pair and keeps each one compressed (`codec.rs`) until read.
//!
//! - **Metadata** (`metadata.rs`): Framework URN → score range lookup.
//!
//! - **Graph & Paths** (`graph.rs`, `paths.rs`): The directed framework
//!   graph and the shortest-path searches over it.
//!
//! - **Translation** (`translate.rs`): Moves result records across one
//!   mapping hop according to each entry's relationship.
//!
//! - **Inference** (`inference.rs`): Walks every shortest path and keeps
//!   the one whose final result set is largest.
//!
//! - **Engine** (`engine.rs`): The explicitly constructed, explicitly
//!   loaded service object that request handlers share by reference.
//!
//! ## Concurrency
//!
//! Loading builds a complete new snapshot and swaps it in under a short
//! write lock. Queries clone the current `Arc` snapshot and run without
//! holding any lock, so a concurrent reload never blocks or corrupts an
//! in-flight query.

pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod inference;
pub mod library;
pub mod metadata;
pub mod paths;
pub mod repository;
pub mod translate;

pub use config::EngineConfig;
pub use engine::MappingEngine;
pub use error::{LibraryError, MappingError, MappingResult};
pub use graph::MappingGraph;
pub use inference::{best_mapping_inferences, InferenceOutcome};
pub use library::{
    DirectoryLibrary, FrameworkStore, InMemoryLibrary, LibraryDocument, LibraryStore,
};
pub use metadata::FrameworkIndex;
pub use paths::{all_paths_between, all_paths_from, FrameworkPath, ReachablePaths};
pub use repository::{LoadReport, MappingRepository, RepositorySnapshot, RepositoryStats};
pub use translate::translate;
