//! # Requirement Mapping Sets
//!
//! A [`RequirementMappingSet`] is a librarian-authored, directional
//! document declaring how requirements of a source framework relate to
//! requirements of a target framework. Exactly one set exists per ordered
//! framework pair, identified by its [`EdgeKey`].
//!
//! These are the *validated* types. Raw library documents are parsed and
//! checked by `grcmap-mapping` before anything here is constructed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::{FrameworkUrn, RequirementUrn};

// ---------------------------------------------------------------------------
// Relationship
// ---------------------------------------------------------------------------

/// Semantic link between a source and a target requirement.
///
/// Unknown wire values are preserved in `Other` rather than rejected;
/// they never propagate results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Relationship {
    /// Both requirements demand the same thing.
    Equal,
    /// The source requirement covers all of the target.
    Superset,
    /// The source requirement covers only part of the target.
    Subset,
    /// The requirements overlap without either containing the other.
    Intersect,
    /// Any other value found in a library document.
    Other(String),
}

impl Relationship {
    /// Parse a wire value. Matching ignores ASCII case and surrounding
    /// whitespace.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "equal" => Self::Equal,
            "superset" => Self::Superset,
            "subset" => Self::Subset,
            "intersect" => Self::Intersect,
            _ => Self::Other(value.to_string()),
        }
    }

    /// The wire value.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Equal => "equal",
            Self::Superset => "superset",
            Self::Subset => "subset",
            Self::Intersect => "intersect",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Relationship {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Relationship> for String {
    fn from(rel: Relationship) -> Self {
        match rel {
            Relationship::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RequirementMapping
// ---------------------------------------------------------------------------

/// One entry of a mapping set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementMapping {
    /// Requirement of the source framework.
    #[serde(rename = "source_requirement_urn")]
    pub source_requirement: RequirementUrn,
    /// Requirement of the target framework.
    #[serde(rename = "target_requirement_urn")]
    pub target_requirement: RequirementUrn,
    pub relationship: Relationship,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength_of_relationship: Option<i64>,
}

impl RequirementMapping {
    /// An entry without annotations.
    pub fn new(
        source_requirement: RequirementUrn,
        target_requirement: RequirementUrn,
        relationship: Relationship,
    ) -> Self {
        Self {
            source_requirement,
            target_requirement,
            relationship,
            annotation: None,
            rationale: None,
            strength_of_relationship: None,
        }
    }
}

// ---------------------------------------------------------------------------
// EdgeKey
// ---------------------------------------------------------------------------

/// Ordered (source, target) framework pair. Keys a mapping set and is an
/// edge of the mapping graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub source: FrameworkUrn,
    pub target: FrameworkUrn,
}

impl EdgeKey {
    pub fn new(source: FrameworkUrn, target: FrameworkUrn) -> Self {
        Self { source, target }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

// ---------------------------------------------------------------------------
// RequirementMappingSet
// ---------------------------------------------------------------------------

/// Directional mapping from one framework's requirements to another's.
/// Entry order is significant: later entries win on target collisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementMappingSet {
    /// Library-assigned identifier of the set, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urn: Option<String>,
    /// Human-readable name, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "source_framework_urn")]
    pub source_framework: FrameworkUrn,
    #[serde(rename = "target_framework_urn")]
    pub target_framework: FrameworkUrn,
    #[serde(default)]
    pub requirement_mappings: Vec<RequirementMapping>,
}

impl RequirementMappingSet {
    /// An unnamed set with the given entries.
    pub fn new(
        source_framework: FrameworkUrn,
        target_framework: FrameworkUrn,
        requirement_mappings: Vec<RequirementMapping>,
    ) -> Self {
        Self {
            urn: None,
            name: None,
            source_framework,
            target_framework,
            requirement_mappings,
        }
    }

    /// The graph edge this set provides.
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.source_framework.clone(), self.target_framework.clone())
    }
}
