//! Group command implementation.

use super::{grouping_ids, load_tabs};
use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{Formatter, WriterSink};
use std::io::Write;
use tabweave_domain::traits::PartitionSink;
use tabweave_engine::TabEngine;
use tracing::info;

/// Execute the group command.
pub fn execute_group<W: Write>(
    args: RunArgs,
    config: &Config,
    engine: &TabEngine,
    formatter: &Formatter,
    out: W,
) -> Result<()> {
    let ids = grouping_ids(&args, config)?;
    let tabs = load_tabs(&args)?;
    let custom = &config.preferences.custom_strategies;

    if engine.requires_context_analysis(&ids, custom) && tabs.iter().all(|tab| tab.context_data.is_none()) {
        info!("strategies read page context but no snapshot carries contextData");
    }

    let partitions = engine.group_tabs(&tabs, &ids, custom);
    WriterSink::new(formatter, out).apply(&partitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::io::Write as _;

    #[test]
    fn test_group_writes_partitions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{ "id": 1, "windowId": 1, "title": "G", "url": "https://www.google.com/search" }},
                {{ "id": 2, "windowId": 1, "title": "GH", "url": "https://github.com/a/b" }}
            ]"#
        )
        .unwrap();
        let args = RunArgs {
            tabs: file.path().display().to_string(),
            strategies: vec!["domain".to_string()],
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let mut out = Vec::new();

        execute_group(args, &Config::default(), &TabEngine::with_defaults(), &formatter, &mut out).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert_eq!(
            written,
            "window-1::domain:google.com\t1\nwindow-1::domain:github.com\t2\n"
        );
    }

    #[test]
    fn test_group_requires_strategies() {
        let args = RunArgs {
            tabs: "-".to_string(),
            strategies: Vec::new(),
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let result = execute_group(args, &Config::default(), &TabEngine::with_defaults(), &formatter, Vec::new());
        assert!(matches!(result, Err(crate::CliError::NoStrategies)));
    }
}
