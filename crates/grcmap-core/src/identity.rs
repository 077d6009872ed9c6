//! # Identifier Newtypes
//!
//! Frameworks and requirements are identified by stable URN-like strings
//! issued by library authors (e.g. `urn:intuitem:risk:framework:iso27001-2022`).
//! Each namespace is a distinct type: a [`RequirementUrn`] cannot be used
//! as a graph node, and a [`FrameworkUrn`] cannot key a result map.
//!
//! ## Validation
//!
//! Both types reject empty values and values containing whitespace. The
//! check runs in the constructor and during deserialization
//! (`#[serde(try_from = "String")]`), so a malformed identifier never
//! reaches the graph or the translator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

fn validate(kind: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyIdentifier { kind });
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ValidationError::WhitespaceInIdentifier {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// FrameworkUrn
// ---------------------------------------------------------------------------

/// Identifier of a compliance framework. A node of the mapping graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FrameworkUrn(String);

impl FrameworkUrn {
    /// Create a framework URN, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the value is empty or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        validate("framework URN", &s)?;
        Ok(Self(s))
    }

    /// Access the URN string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FrameworkUrn {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FrameworkUrn> for String {
    fn from(urn: FrameworkUrn) -> Self {
        urn.0
    }
}

impl fmt::Display for FrameworkUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// RequirementUrn
// ---------------------------------------------------------------------------

/// Identifier of an individually assessable requirement within a framework.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RequirementUrn(String);

impl RequirementUrn {
    /// Create a requirement URN, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the value is empty or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        validate("requirement URN", &s)?;
        Ok(Self(s))
    }

    /// Access the URN string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RequirementUrn {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RequirementUrn> for String {
    fn from(urn: RequirementUrn) -> Self {
        urn.0
    }
}

impl fmt::Display for RequirementUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_urn_accepts_urn() {
        let urn = FrameworkUrn::new("urn:intuitem:risk:framework:iso27001-2022").unwrap();
        assert_eq!(urn.as_str(), "urn:intuitem:risk:framework:iso27001-2022");
        assert_eq!(urn.to_string(), urn.as_str());
    }

    #[test]
    fn framework_urn_rejects_empty() {
        assert_eq!(
            FrameworkUrn::new("   "),
            Err(ValidationError::EmptyIdentifier {
                kind: "framework URN"
            })
        );
    }

    #[test]
    fn requirement_urn_rejects_whitespace() {
        let err = RequirementUrn::new("urn:req a.1").unwrap_err();
        assert!(matches!(err, ValidationError::WhitespaceInIdentifier { .. }));
    }

    #[test]
    fn deserialization_validates() {
        let ok: FrameworkUrn = serde_json::from_str("\"urn:fw:a\"").unwrap();
        assert_eq!(ok.as_str(), "urn:fw:a");
        assert!(serde_json::from_str::<FrameworkUrn>("\"\"").is_err());
        assert!(serde_json::from_str::<RequirementUrn>("\"a b\"").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let urn = RequirementUrn::new("urn:req:a.5.1").unwrap();
        assert_eq!(serde_json::to_string(&urn).unwrap(), "\"urn:req:a.5.1\"");
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = FrameworkUrn::new("urn:fw:a").unwrap();
        let b = FrameworkUrn::new("urn:fw:b").unwrap();
        assert!(a < b);
    }
}
