//! Calculate command implementation.

use super::{grouping_ids, load_tabs};
use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{Formatter, WriterSink};
use std::io::Write;
use tabweave_domain::traits::PartitionSink;
use tabweave_engine::TabEngine;
use tracing::debug;

/// Execute the calculate command: group, order members, order groups.
pub fn execute_calculate<W: Write>(
    args: RunArgs,
    config: &Config,
    engine: &TabEngine,
    formatter: &Formatter,
    out: W,
) -> Result<()> {
    let ids = grouping_ids(&args, config)?;
    let tabs = load_tabs(&args)?;
    let partitions = engine.calculate_groups(&tabs, &ids, &config.preferences.custom_strategies);
    debug!(cache = ?engine.cache_stats(), "calculation finished");
    WriterSink::new(formatter, out).apply(&partitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::io::Write as _;

    #[test]
    fn test_calculate_orders_members() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{ "id": 4, "windowId": 1, "title": "b", "url": "https://a.com/b" }},
                {{ "id": 1, "windowId": 1, "title": "a", "url": "https://a.com/a" }}
            ]"#
        )
        .unwrap();
        let args = RunArgs {
            tabs: file.path().display().to_string(),
            strategies: vec!["domain".to_string()],
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let mut out = Vec::new();

        execute_calculate(args, &Config::default(), &TabEngine::with_defaults(), &formatter, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "window-1::domain:a.com\t1,4\n");
    }
}
