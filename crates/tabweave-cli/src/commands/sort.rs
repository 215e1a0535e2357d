//! Sort command implementation.

use super::load_tabs;
use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::io::Write;
use tabweave_engine::TabEngine;

/// Execute the sort command.
///
/// Without `--strategy` the configured sorting preference is used; if that
/// is empty too, the engine's default sorting applies.
pub fn execute_sort<W: Write>(
    args: RunArgs,
    config: &Config,
    engine: &TabEngine,
    formatter: &Formatter,
    mut out: W,
) -> Result<()> {
    let ids = if args.strategies.is_empty() {
        config.preferences.sorting.clone()
    } else {
        args.strategies.clone()
    };
    let tabs = load_tabs(&args)?;
    let sorted = engine.sort_tabs(&tabs, &ids, &config.preferences.custom_strategies);
    writeln!(out, "{}", formatter.format_tabs(&sorted)?)?;
    Ok(())
}
