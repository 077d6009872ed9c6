//! # Error Types
//!
//! Validation errors raised when constructing core types from untrusted
//! input. All errors use `thiserror` for derive-based `Display` and
//! `Error` implementations.

use thiserror::Error;

/// Rejection of a value at a core type's construction boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Identifier was empty or whitespace only.
    #[error("{kind} must not be empty")]
    EmptyIdentifier {
        /// Which identifier namespace was being constructed.
        kind: &'static str,
    },

    /// Identifier contained whitespace.
    #[error("{kind} {value:?} must not contain whitespace")]
    WhitespaceInIdentifier {
        /// Which identifier namespace was being constructed.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Score range with `min_score > max_score`.
    #[error("invalid score range: min_score {min} exceeds max_score {max}")]
    InvertedScoreRange {
        /// Lower bound as supplied.
        min: i64,
        /// Upper bound as supplied.
        max: i64,
    },
}
