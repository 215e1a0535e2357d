//! Error types for the tabweave binary.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Failures surfaced to the user before exiting with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be located or read
    #[error("Configuration error: {0}")]
    Config(String),

    /// The engine rejected its configuration
    #[error(transparent)]
    Engine(#[from] tabweave_engine::EngineError),

    /// Tab snapshot file could not be read
    #[error("Cannot read tabs from {}: {source}", path.display())]
    TabInput {
        /// File that failed
        path: PathBuf,
        /// Underlying failure
        source: std::io::Error,
    },

    /// Neither the command line nor the preferences name a grouping strategy
    #[error("No grouping strategies given. Pass --strategy or set preferences.grouping")]
    NoStrategies,

    /// Reading stdin or writing output failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Snapshot input or JSON output was malformed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file is not valid TOML
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}
