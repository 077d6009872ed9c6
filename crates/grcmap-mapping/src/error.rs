//! Mapping-engine error types.
//!
//! [`LibraryError`] covers everything that can go wrong reading and
//! validating library documents; those are recovered per document during
//! a load. [`MappingError`] is what escapes the engine's public API. During
//! queries only [`MappingError::CacheCorruption`] is ever returned.

use std::path::PathBuf;

use grcmap_core::{EdgeKey, ValidationError};
use thiserror::Error;

/// Errors reading or validating library documents.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The library directory does not exist or is not a directory.
    #[error("library directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A required identifier is missing or blank.
    #[error("{origin}: mapping set is missing `{field}`")]
    MissingField {
        origin: String,
        field: &'static str,
    },

    /// Source and target framework are the same.
    #[error("{origin}: mapping set maps framework {framework} onto itself")]
    SelfMapping { origin: String, framework: String },

    /// An identifier failed validation.
    #[error("{origin}: {source}")]
    InvalidIdentifier {
        origin: String,
        source: ValidationError,
    },

    /// The object has the wrong shape (e.g. a string where a map is expected).
    #[error("{origin}: malformed {what}: {detail}")]
    Malformed {
        origin: String,
        what: &'static str,
        detail: String,
    },

    /// I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors surfaced by the mapping engine.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The library or framework store could not be read at all.
    #[error("library store error: {0}")]
    Store(#[from] LibraryError),

    /// Engine configuration rejected.
    #[error("invalid engine configuration: {0}")]
    Config(String),

    /// A cached payload could not be decoded. The engine wrote it, so this
    /// is an internal invariant violation.
    #[error("cached mapping set {key} is corrupt: {detail}")]
    CacheCorruption { key: EdgeKey, detail: String },

    /// A mapping set could not be encoded for the cache.
    #[error("failed to encode mapping set {key}: {detail}")]
    Encode { key: EdgeKey, detail: String },
}

/// Result type alias for mapping-engine operations.
pub type MappingResult<T> = Result<T, MappingError>;
