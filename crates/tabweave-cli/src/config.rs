//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tabweave_domain::CustomStrategy;
use tabweave_engine::EngineConfig;
use tracing::debug;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Engine tuning
    #[serde(default)]
    pub engine: EngineConfig,

    /// Persisted strategy preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Strategy preferences, as the options page would persist them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Grouping strategy ids used when none are passed
    #[serde(default)]
    pub grouping: Vec<String>,

    /// Sorting strategy ids used when none are passed
    #[serde(default)]
    pub sorting: Vec<String>,

    /// User-defined strategies
    #[serde(default)]
    pub custom_strategies: Vec<CustomStrategy>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".tabweave").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// and a missing file yields the default configuration.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    debug!(path = %path.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };
        config.engine.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tabweave_domain::RuleSource;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert!(config.preferences.custom_strategies.is_empty());
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_parse_preferences() {
        let config = Config::from_toml(
            r#"
            [settings]
            format = "json"

            [engine]
            cache_capacity = 50

            [preferences]
            grouping = ["domain", "projects"]
            sorting = ["pinned"]

            [[preferences.customStrategies]]
            id = "projects"
            label = "Projects"
            fallback = "Other"

            [[preferences.customStrategies.groupingRules]]
            source = "field"
            value = "title"
            transform = "regex"
            transformPattern = "^(Project [A-Z])"
            "#,
        )
        .unwrap();

        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert_eq!(config.engine.cache_capacity, 50);
        assert_eq!(config.engine.default_sorting, vec!["pinned", "recency"]);
        assert_eq!(config.preferences.grouping, vec!["domain", "projects"]);

        let projects = &config.preferences.custom_strategies[0];
        assert_eq!(projects.fallback_label(), "Other");
        assert_eq!(projects.grouping_rules[0].source, RuleSource::Field);
        assert!(projects.is_grouping());
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[preferences]\nsorting = [\"title\"]").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.preferences.sorting, vec!["title"]);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(Some(Path::new("/nonexistent/tabweave.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_load_rejects_invalid_engine_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[engine]\ncache_capacity = 0").unwrap();
        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(CliError::Engine(_))));
    }
}
