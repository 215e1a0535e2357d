//! Engine error types

use thiserror::Error;

/// Errors raised by the engine's fallible leaf helpers
///
/// Apart from [`EngineError::Config`], none of these cross the engine
/// boundary: callers of the grouping and sorting entry points only ever see
/// degraded data (no match, sentinel domain, empty transform result).
#[derive(Error, Debug)]
pub enum EngineError {
    /// A user-supplied pattern failed to compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Compiler diagnostic
        #[source]
        source: regex::Error,
    },

    /// A tab URL could not be parsed
    #[error("Failed to parse URL '{url}': {source}")]
    UrlParse {
        /// The offending URL
        url: String,
        /// Parser diagnostic
        #[source]
        source: url::ParseError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
