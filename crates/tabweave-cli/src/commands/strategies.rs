//! Strategies command implementation.

use crate::cli::StrategiesArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::io::Write;
use tabweave_engine::TabEngine;

/// Execute the strategies command.
pub fn execute_strategies<W: Write>(
    args: StrategiesArgs,
    config: &Config,
    engine: &TabEngine,
    formatter: &Formatter,
    mut out: W,
) -> Result<()> {
    let custom = &config.preferences.custom_strategies;
    if args.check.is_empty() {
        writeln!(out, "{}", formatter.format_strategies(&engine.strategies(custom))?)?;
    } else {
        let required = engine.requires_context_analysis(&args.check, custom);
        writeln!(out, "{}", formatter.context_requirement(&args.check, required)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tabweave_domain::{CustomStrategy, GroupingRule};

    fn run(args: StrategiesArgs, config: &Config) -> String {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let mut out = Vec::new();
        execute_strategies(args, config, &TabEngine::with_defaults(), &formatter, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_lists_builtins_and_custom() {
        let mut config = Config::default();
        let mut genre = CustomStrategy::new("genre", "Genre");
        genre.grouping_rules = vec![GroupingRule::field("genre")];
        config.preferences.custom_strategies = vec![genre];

        let output = run(StrategiesArgs { check: Vec::new() }, &config);
        let ids: Vec<&str> = output.lines().collect();
        assert_eq!(ids.len(), 12);
        assert_eq!(ids[0], "domain");
        assert_eq!(ids[11], "genre");
    }

    #[test]
    fn test_context_check() {
        let config = Config::default();
        let output = run(StrategiesArgs { check: vec!["context".to_string()] }, &config);
        assert_eq!(output, "true\n");
        let output = run(StrategiesArgs { check: vec!["domain".to_string()] }, &config);
        assert_eq!(output, "false\n");
    }
}
