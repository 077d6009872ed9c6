//! # Library Documents
//!
//! Library documents are the raw material of the engine: YAML or JSON
//! files published by librarians, each bundling frameworks and/or
//! requirement mapping sets. This module is the only place that sees
//! their untyped shape.
//!
//! ## Document layout
//!
//! Mapping-set objects are looked up at the top level of a document and
//! inside its `objects` map, under either key:
//!
//! - `requirement_mapping_set`: a single object
//! - `requirement_mapping_sets`: a list of objects
//!
//! Frameworks are found the same way under `framework` / `frameworks`.
//!
//! ## Validation
//!
//! Every object is validated into a typed value before it leaves this
//! module. A mapping set missing either framework URN, or mapping a
//! framework onto itself, is rejected as a whole. An individual mapping
//! entry with a missing or invalid requirement URN is dropped with a
//! warning and the rest of the set survives.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use grcmap_core::{
    FrameworkRecord, FrameworkUrn, Relationship, RequirementMapping, RequirementMappingSet,
    RequirementUrn,
};

use crate::error::LibraryError;

/// Keys under which a document carries one or many mapping sets.
const MAPPING_SET_KEY: &str = "requirement_mapping_set";
const MAPPING_SETS_KEY: &str = "requirement_mapping_sets";
/// Keys under which a document carries one or many frameworks.
const FRAMEWORK_KEY: &str = "framework";
const FRAMEWORKS_KEY: &str = "frameworks";
/// Nested container used by published library files.
const OBJECTS_KEY: &str = "objects";

// ---------------------------------------------------------------------------
// Store seams
// ---------------------------------------------------------------------------

/// A raw library document and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryDocument {
    /// File path or other provenance label, used in diagnostics.
    pub origin: String,
    /// The parsed document.
    pub content: Value,
}

impl LibraryDocument {
    pub fn new(origin: impl Into<String>, content: Value) -> Self {
        Self {
            origin: origin.into(),
            content,
        }
    }
}

/// Source of library documents.
///
/// The outer error means the store is unreachable and aborts a load. Inner
/// errors are per-document failures; the load skips them and continues.
pub trait LibraryStore: Send + Sync {
    fn documents(&self) -> Result<Vec<Result<LibraryDocument, LibraryError>>, LibraryError>;
}

/// Source of framework score ranges kept outside the library documents.
///
/// Framework objects embedded in library documents are taken from the same
/// document batch as the mapping sets and need no store of their own. Error
/// nesting matches [`LibraryStore`]: inner errors are per-record rejections.
pub trait FrameworkStore: Send + Sync {
    fn frameworks(&self) -> Result<Vec<Result<FrameworkRecord, LibraryError>>, LibraryError>;
}

// ---------------------------------------------------------------------------
// Raw wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawMappingSet {
    #[serde(default)]
    urn: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    source_framework_urn: Option<String>,
    #[serde(default)]
    target_framework_urn: Option<String>,
    #[serde(default)]
    requirement_mappings: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawRequirementMapping {
    #[serde(default)]
    source_requirement_urn: Option<String>,
    #[serde(default)]
    target_requirement_urn: Option<String>,
    #[serde(default)]
    relationship: Option<String>,
    #[serde(default)]
    annotation: Option<String>,
    #[serde(default)]
    rationale: Option<String>,
    #[serde(default)]
    strength_of_relationship: Option<i64>,
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// The document itself plus its `objects` map, when present.
fn containers(content: &Value) -> Vec<&Value> {
    let mut out = vec![content];
    if let Some(objects) = content.get(OBJECTS_KEY).filter(|v| v.is_object()) {
        out.push(objects);
    }
    out
}

/// Collect the objects stored under a singular and a plural key.
fn collect_objects<'a>(content: &'a Value, single: &str, plural: &str) -> Vec<&'a Value> {
    let mut out = Vec::new();
    for container in containers(content) {
        for key in [single, plural] {
            match container.get(key) {
                Some(Value::Array(items)) => out.extend(items.iter()),
                Some(value) => out.push(value),
                None => {}
            }
        }
    }
    out
}

/// Extract and validate every mapping set in a document.
pub fn extract_mapping_sets(
    document: &LibraryDocument,
) -> Vec<Result<RequirementMappingSet, LibraryError>> {
    collect_objects(&document.content, MAPPING_SET_KEY, MAPPING_SETS_KEY)
        .into_iter()
        .map(|value| parse_mapping_set(&document.origin, value))
        .collect()
}

/// Extract and validate every framework record in a document.
pub fn extract_frameworks(document: &LibraryDocument) -> Vec<Result<FrameworkRecord, LibraryError>> {
    collect_objects(&document.content, FRAMEWORK_KEY, FRAMEWORKS_KEY)
        .into_iter()
        .map(|value| {
            FrameworkRecord::deserialize(value).map_err(|e| LibraryError::Malformed {
                origin: document.origin.clone(),
                what: "framework",
                detail: e.to_string(),
            })
        })
        .collect()
}

fn required_framework(
    origin: &str,
    value: Option<String>,
    field: &'static str,
) -> Result<FrameworkUrn, LibraryError> {
    let value = value
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| LibraryError::MissingField {
            origin: origin.to_string(),
            field,
        })?;
    FrameworkUrn::new(value).map_err(|source| LibraryError::InvalidIdentifier {
        origin: origin.to_string(),
        source,
    })
}

/// Validate one raw mapping-set object.
fn parse_mapping_set(origin: &str, value: &Value) -> Result<RequirementMappingSet, LibraryError> {
    let raw = RawMappingSet::deserialize(value).map_err(|e| LibraryError::Malformed {
        origin: origin.to_string(),
        what: "requirement mapping set",
        detail: e.to_string(),
    })?;

    let source_framework =
        required_framework(origin, raw.source_framework_urn, "source_framework_urn")?;
    let target_framework =
        required_framework(origin, raw.target_framework_urn, "target_framework_urn")?;
    if source_framework == target_framework {
        return Err(LibraryError::SelfMapping {
            origin: origin.to_string(),
            framework: source_framework.to_string(),
        });
    }

    let mut requirement_mappings = Vec::with_capacity(raw.requirement_mappings.len());
    for (index, entry) in raw.requirement_mappings.iter().enumerate() {
        match parse_mapping_entry(entry) {
            Ok(mapping) => requirement_mappings.push(mapping),
            Err(reason) => tracing::warn!(
                origin,
                source_framework = %source_framework,
                target_framework = %target_framework,
                index,
                reason = %reason,
                "dropping malformed requirement mapping entry"
            ),
        }
    }

    Ok(RequirementMappingSet {
        urn: raw.urn,
        name: raw.name,
        source_framework,
        target_framework,
        requirement_mappings,
    })
}

fn parse_mapping_entry(value: &Value) -> Result<RequirementMapping, String> {
    let raw = RawRequirementMapping::deserialize(value).map_err(|e| e.to_string())?;
    let source = raw
        .source_requirement_urn
        .ok_or("missing source_requirement_urn")?;
    let target = raw
        .target_requirement_urn
        .ok_or("missing target_requirement_urn")?;
    let relationship = raw.relationship.ok_or("missing relationship")?;
    Ok(RequirementMapping {
        source_requirement: RequirementUrn::new(source).map_err(|e| e.to_string())?,
        target_requirement: RequirementUrn::new(target).map_err(|e| e.to_string())?,
        relationship: Relationship::parse(&relationship),
        annotation: raw.annotation,
        rationale: raw.rationale,
        strength_of_relationship: raw.strength_of_relationship,
    })
}

/// Framework records found in a batch of documents, one result per record.
/// Unreadable documents contribute nothing here; the repository counts them.
pub fn frameworks_in(
    documents: &[Result<LibraryDocument, LibraryError>],
) -> Vec<Result<FrameworkRecord, LibraryError>> {
    documents
        .iter()
        .filter_map(|d| d.as_ref().ok())
        .flat_map(extract_frameworks)
        .collect()
}

// ---------------------------------------------------------------------------
// DirectoryLibrary
// ---------------------------------------------------------------------------

/// Library store backed by a directory of `*.yaml`, `*.yml`, and `*.json`
/// files. Files are read in file-name order; subdirectories are ignored.
#[derive(Debug, Clone)]
pub struct DirectoryLibrary {
    root: PathBuf,
}

impl DirectoryLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_paths(&self) -> Result<Vec<PathBuf>, LibraryError> {
        if !self.root.is_dir() {
            return Err(LibraryError::DirectoryNotFound {
                path: self.root.clone(),
            });
        }
        let io_err = |source| LibraryError::Io {
            path: self.root.clone(),
            source,
        };
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&self.root).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let is_document = path.is_file()
                && matches!(
                    path.extension().and_then(|e| e.to_str()),
                    Some("yaml" | "yml" | "json")
                );
            if is_document {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

/// Read one library file, choosing the parser by extension.
pub fn load_document(path: &Path) -> Result<LibraryDocument, LibraryError> {
    let content = std::fs::read_to_string(path).map_err(|source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = if path.extension().and_then(|e| e.to_str()) == Some("json") {
        serde_json::from_str(&content).map_err(|source| LibraryError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_yaml::from_str(&content).map_err(|source| LibraryError::YamlParse {
            path: path.to_path_buf(),
            source,
        })?
    };
    Ok(LibraryDocument::new(path.display().to_string(), value))
}

impl LibraryStore for DirectoryLibrary {
    fn documents(&self) -> Result<Vec<Result<LibraryDocument, LibraryError>>, LibraryError> {
        let paths = self.document_paths()?;
        tracing::debug!(root = %self.root.display(), files = paths.len(), "reading library directory");
        Ok(paths.iter().map(|p| load_document(p)).collect())
    }
}

// ---------------------------------------------------------------------------
// InMemoryLibrary
// ---------------------------------------------------------------------------

/// Library store holding documents and frameworks in memory. Records added
/// with [`with_framework`](Self::with_framework) are served through
/// [`FrameworkStore`]; frameworks inside documents travel with the documents.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLibrary {
    documents: Vec<LibraryDocument>,
    frameworks: Vec<FrameworkRecord>,
}

impl InMemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw document.
    pub fn with_document(mut self, origin: impl Into<String>, content: Value) -> Self {
        self.documents.push(LibraryDocument::new(origin, content));
        self
    }

    /// Add a typed mapping set, wrapped as a single-set document.
    pub fn with_mapping_set(self, set: &RequirementMappingSet) -> Self {
        let origin = format!("memory:{}", set.key());
        let content = serde_json::json!({ MAPPING_SET_KEY: set });
        self.with_document(origin, content)
    }

    /// Add a framework record.
    pub fn with_framework(mut self, record: FrameworkRecord) -> Self {
        self.frameworks.push(record);
        self
    }
}

impl LibraryStore for InMemoryLibrary {
    fn documents(&self) -> Result<Vec<Result<LibraryDocument, LibraryError>>, LibraryError> {
        Ok(self.documents.iter().cloned().map(Ok).collect())
    }
}

impl FrameworkStore for InMemoryLibrary {
    fn frameworks(&self) -> Result<Vec<Result<FrameworkRecord, LibraryError>>, LibraryError> {
        Ok(self.frameworks.iter().cloned().map(Ok).collect())
    }
}
