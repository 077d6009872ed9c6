//! Engine configuration.
//!
//! Loaded from YAML. Every field has a default, so an empty file (or no
//! file at all) yields a usable configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MappingError, MappingResult};

/// Default bound on path length for externally reachable searches.
pub const DEFAULT_MAX_DEPTH: usize = 5;
/// Default zstd level for cached mapping sets.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

/// Tunables for a [`MappingEngine`](crate::MappingEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Longest path, in hops, any search will consider when the caller
    /// does not supply its own bound.
    pub max_depth: usize,
    /// zstd compression level, `1..=22`.
    pub compression_level: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl EngineConfig {
    /// Read and validate a YAML configuration file.
    pub fn from_yaml_file(path: &Path) -> MappingResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MappingError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
            .map_err(|e| MappingError::Config(format!("{}: {e}", path.display())))
    }

    /// Parse and validate YAML configuration text.
    pub fn from_yaml_str(content: &str) -> MappingResult<Self> {
        // serde_yaml rejects an empty document for a struct; treat it as all defaults.
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| MappingError::Config(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MappingResult<()> {
        if self.max_depth == 0 {
            return Err(MappingError::Config(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if !(1..=22).contains(&self.compression_level) {
            return Err(MappingError::Config(format!(
                "compression_level must be in 1..=22, got {}",
                self.compression_level
            )));
        }
        Ok(())
    }
}
