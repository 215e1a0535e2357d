//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use colored::*;
use std::io::Write;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use tabweave_domain::traits::PartitionSink;
use tabweave_domain::{Partition, StrategyDescriptor, TabSnapshot};

const MAX_CELL_WIDTH: usize = 48;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format partitions.
    pub fn format_partitions(&self, partitions: &[Partition]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(partitions)?),
            OutputFormat::Quiet => Ok(partitions
                .iter()
                .map(|p| format!("{}\t{}", p.id, join_ids(&p.tab_ids())))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => Ok(self.partitions_table(partitions)),
        }
    }

    fn partitions_table(&self, partitions: &[Partition]) -> String {
        if partitions.is_empty() {
            return self.colorize("No groups formed.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Label", "Color", "Scope", "Window", "Tabs", "Reason"]);
        for partition in partitions {
            let scope = if partition.is_global() {
                format!("global ({})", partition.window_mode.as_str())
            } else {
                "window".to_string()
            };
            builder.push_record([
                truncate(&partition.label),
                self.colorize(&partition.color, &partition.color),
                scope,
                partition.window_id.to_string(),
                join_ids(&partition.tab_ids()),
                partition.reason.clone(),
            ]);
        }
        render(builder)
    }

    /// Format an ordered tab list.
    pub fn format_tabs(&self, tabs: &[TabSnapshot]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(tabs)?),
            OutputFormat::Quiet => Ok(join_ids(&tabs.iter().map(|t| t.id).collect::<Vec<_>>())),
            OutputFormat::Table => {
                if tabs.is_empty() {
                    return Ok(self.colorize("No tabs.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Window", "Pinned", "Title", "URL"]);
                for tab in tabs {
                    builder.push_record([
                        tab.id.to_string(),
                        tab.window_id.to_string(),
                        if tab.pinned { "yes" } else { "" }.to_string(),
                        truncate(&tab.title),
                        truncate(&tab.url),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format the strategy catalog.
    pub fn format_strategies(&self, strategies: &[StrategyDescriptor]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(strategies)?),
            OutputFormat::Quiet => Ok(strategies
                .iter()
                .map(|s| s.id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["ID", "Label", "Group", "Sort", "Source"]);
                for strategy in strategies {
                    builder.push_record([
                        strategy.id.clone(),
                        strategy.label.clone(),
                        check_mark(strategy.is_grouping),
                        check_mark(strategy.is_sorting),
                        if strategy.is_custom { "custom" } else { "built-in" }.to_string(),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format whether page-context analysis is needed.
    pub fn context_requirement(&self, strategy_ids: &[String], required: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "strategies": strategy_ids,
                "requiresContextAnalysis": required,
            }))?),
            OutputFormat::Quiet => Ok(required.to_string()),
            OutputFormat::Table => {
                let message = format!("Page context required for [{}]", strategy_ids.join(", "));
                if required {
                    Ok(self.warning(&message))
                } else {
                    Ok(self.info(&format!("No page context needed for [{}]", strategy_ids.join(", "))))
                }
            }
        }
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "purple" => text.magenta().to_string(),
            "orange" => text.truecolor(255, 165, 0).to_string(),
            "grey" | "gray" => text.bright_black().to_string(),
            "pink" => text.bright_magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Writes formatted partitions to any writer.
pub struct WriterSink<'a, W: Write> {
    formatter: &'a Formatter,
    writer: W,
}

impl<'a, W: Write> WriterSink<'a, W> {
    /// Create a sink over `writer`.
    pub fn new(formatter: &'a Formatter, writer: W) -> Self {
        Self { formatter, writer }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PartitionSink for WriterSink<'_, W> {
    type Error = CliError;

    fn apply(&mut self, partitions: &[Partition]) -> Result<()> {
        writeln!(self.writer, "{}", self.formatter.format_partitions(partitions)?)?;
        Ok(())
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

fn check_mark(flag: bool) -> String {
    if flag { "✓" } else { "" }.to_string()
}

fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_CELL_WIDTH {
        let head: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
        format!("{}…", head)
    } else {
        text.to_string()
    }
}
