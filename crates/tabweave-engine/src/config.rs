//! Engine configuration

use crate::EngineError;
use serde::{Deserialize, Serialize};

/// Default number of entries per memoization cache
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Configuration for the classification engine
///
/// # Examples
///
/// ```
/// use tabweave_engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.cache_capacity, 1000);
/// assert_eq!(config.default_sorting, vec!["pinned", "recency"]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Entries per cache before the whole cache is cleared
    pub cache_capacity: usize,

    /// Sorting strategies used when the caller passes none
    pub default_sorting: Vec<String>,

    /// Colors assigned to partitions by hashing
    pub palette: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            default_sorting: vec!["pinned".to_string(), "recency".to_string()],
            palette: ["blue", "cyan", "green", "orange", "purple", "red", "yellow"]
                .iter()
                .map(|color| color.to_string())
                .collect(),
        }
    }
}

impl EngineConfig {
    /// Configuration with tiny caches, for exercising the overflow path
    pub fn small_caches(capacity: usize) -> Self {
        Self {
            cache_capacity: capacity,
            ..Self::default()
        }
    }

    /// Check the configuration for values the engine cannot run with
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.cache_capacity == 0 {
            return Err(EngineError::Config(
                "cache_capacity must be at least 1".to_string(),
            ));
        }
        if self.palette.is_empty() {
            return Err(EngineError::Config("palette must not be empty".to_string()));
        }
        if self.default_sorting.iter().any(|id| id.is_empty()) {
            return Err(EngineError::Config(
                "default_sorting contains an empty strategy id".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.palette.len(), 7);
        assert_eq!(config.palette[0], "blue");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = EngineConfig::small_caches(0);
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_empty_palette_rejected() {
        let config = EngineConfig {
            palette: Vec::new(),
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EngineConfig = toml::from_str("cache_capacity = 16").unwrap();
        assert_eq!(config.cache_capacity, 16);
        assert_eq!(config.default_sorting, vec!["pinned", "recency"]);
    }
}
