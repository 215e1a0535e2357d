//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tabweave CLI - Group and order browser tab snapshots.
#[derive(Debug, Parser)]
#[command(name = "tabweave")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TABWEAVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log engine decisions at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (ids only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Partition tabs into groups
    Group(RunArgs),

    /// Order tabs
    Sort(RunArgs),

    /// Group tabs, then order tabs and groups
    Calculate(RunArgs),

    /// List available strategies
    Strategies(StrategiesArgs),
}

/// Arguments shared by the group, sort and calculate commands.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// JSON file with an array of tab snapshots ("-" reads stdin)
    #[arg(short, long, default_value = "-")]
    pub tabs: String,

    /// Strategy ids in priority order (repeatable or comma-separated)
    #[arg(short, long = "strategy", value_delimiter = ',')]
    pub strategies: Vec<String>,
}

/// Arguments for the strategies command.
#[derive(Debug, Parser)]
pub struct StrategiesArgs {
    /// Report whether these strategy ids need page-context data
    #[arg(short, long = "check", value_delimiter = ',')]
    pub check: Vec<String>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
