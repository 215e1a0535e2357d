//! Command implementations.

pub mod calculate;
pub mod group;
pub mod sort;
pub mod strategies;

pub use self::calculate::execute_calculate;
pub use self::group::execute_group;
pub use self::sort::execute_sort;
pub use self::strategies::execute_strategies;

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::source::JsonTabSource;
use tabweave_domain::traits::TabSource;
use tabweave_domain::TabSnapshot;

/// Read the snapshots named by `--tabs`.
fn load_tabs(args: &RunArgs) -> Result<Vec<TabSnapshot>> {
    JsonTabSource::from_arg(&args.tabs).tabs()
}

/// Grouping ids from the command line, else from preferences.
fn grouping_ids(args: &RunArgs, config: &Config) -> Result<Vec<String>> {
    let ids = if args.strategies.is_empty() {
        config.preferences.grouping.clone()
    } else {
        args.strategies.clone()
    };
    if ids.is_empty() {
        return Err(CliError::NoStrategies);
    }
    Ok(ids)
}
