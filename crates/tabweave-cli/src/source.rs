//! Tab snapshot input.

use crate::error::{CliError, Result};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tabweave_domain::traits::TabSource;
use tabweave_domain::TabSnapshot;
use tracing::warn;

/// Reads a JSON array of tab snapshots from a file or stdin.
#[derive(Debug, Clone)]
pub enum JsonTabSource {
    /// Read from a file
    File(PathBuf),
    /// Read from standard input
    Stdin,
}

impl JsonTabSource {
    /// Source for a command-line argument (`-` means stdin).
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Self::File(path) => fs::read_to_string(path).map_err(|source| CliError::TabInput {
                path: path.clone(),
                source,
            }),
            Self::Stdin => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

impl TabSource for JsonTabSource {
    type Error = CliError;

    fn tabs(&self) -> Result<Vec<TabSnapshot>> {
        parse_tabs(&self.read()?)
    }
}

/// Parse a JSON array of snapshots.
///
/// Entries that are not valid snapshots (for example without `id` or
/// `windowId`) are skipped with a warning.
pub fn parse_tabs(json: &str) -> Result<Vec<TabSnapshot>> {
    let entries: Vec<Value> = serde_json::from_str(json)?;
    let total = entries.len();
    let tabs: Vec<TabSnapshot> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| match serde_json::from_value(entry) {
            Ok(tab) => Some(tab),
            Err(e) => {
                warn!(position, error = %e, "skipping invalid tab snapshot");
                None
            }
        })
        .collect();
    if tabs.len() < total {
        warn!(skipped = total - tabs.len(), "some tab snapshots were ignored");
    }
    Ok(tabs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_tabs_skips_incomplete_entries() {
        let tabs = parse_tabs(
            r#"[
                { "id": 1, "windowId": 2, "title": "A", "url": "https://a.com", "pinned": true },
                { "windowId": 2, "title": "no id", "url": "https://b.com" },
                { "id": 3, "title": "no window", "url": "https://c.com" }
            ]"#,
        )
        .unwrap();
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].id, 1);
        assert!(tabs[0].pinned);
    }

    #[test]
    fn test_parse_tabs_rejects_non_array() {
        assert!(matches!(parse_tabs("{}"), Err(CliError::Json(_))));
    }

    #[test]
    fn test_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{ "id": 7, "windowId": 1, "url": "https://x.org" }}]"#).unwrap();
        let source = JsonTabSource::from_arg(file.path().to_str().unwrap());
        let tabs = source.tabs().unwrap();
        assert_eq!(tabs[0].id, 7);
        assert_eq!(tabs[0].title, "");
    }

    #[test]
    fn test_missing_file() {
        let source = JsonTabSource::from_arg("/nonexistent/tabs.json");
        assert!(matches!(source.tabs(), Err(CliError::TabInput { .. })));
    }
}
