//! # grcmap-core: Foundational Types for Cross-Framework Mapping
//!
//! This crate is the leaf of the grcmap workspace. It defines the typed
//! vocabulary that every other crate speaks: which framework a requirement
//! belongs to, what an assessed requirement looks like, and how a librarian
//! declares that requirements of two frameworks relate.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** [`FrameworkUrn`] and
//!    [`RequirementUrn`] validate at construction and on deserialization.
//!    You cannot pass a requirement URN where a framework URN is expected.
//!
//! 2. **One result record type across hops.** [`ResultRecord`] keeps the
//!    compliance status mandatory and every other field optional, so the
//!    same type represents both a fully assessed requirement and the
//!    partial record produced by a lossy mapping hop.
//!
//! 3. **Closed relationship set with an open escape hatch.**
//!    [`Relationship`] has four semantic variants plus `Other(String)`,
//!    which is carried through parsing but never propagates results.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `grcmap-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod framework;
pub mod identity;
pub mod mapping;
pub mod result;

// Re-export primary types for ergonomic imports.
pub use error::ValidationError;
pub use framework::{FrameworkRecord, ScoreRange};
pub use identity::{FrameworkUrn, RequirementUrn};
pub use mapping::{EdgeKey, Relationship, RequirementMapping, RequirementMappingSet};
pub use result::{
    summary_counts, AssessmentRow, AssessmentStatus, RequirementResult, ResultRecord, SourceAudit,
};
