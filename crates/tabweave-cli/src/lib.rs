//! Tabweave CLI library.
//!
//! This library provides the host side of the tabweave command-line
//! interface: configuration loading, tab snapshot input, command execution
//! and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod source;

pub use cli::{Cli, Command};
pub use config::{Config, OutputFormat};
pub use error::{CliError, Result};
pub use output::{Formatter, WriterSink};
pub use source::JsonTabSource;
