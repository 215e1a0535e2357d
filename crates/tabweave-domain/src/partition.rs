//! Partition module - the output bucket of the grouping engine

use crate::{TabSnapshot, WindowMode};
use serde::{Deserialize, Serialize};

/// A group of tabs sharing one composite grouping key
///
/// Created fresh per grouping call and handed to the platform layer, which
/// turns it into real window/tab-group operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partition {
    /// Composite bucket key (`window-<w>::...` or `global::...`)
    pub id: String,

    /// Window of the first tab placed in the partition
    pub window_id: i64,

    /// Human-readable label
    pub label: String,

    /// Color name
    pub color: String,

    /// Member tabs, in input order
    pub tabs: Vec<TabSnapshot>,

    /// Contributing strategy ids joined with `" + "`
    pub reason: String,

    /// Scope of the partition
    pub window_mode: WindowMode,
}

impl Partition {
    /// Ids of the member tabs
    pub fn tab_ids(&self) -> Vec<u64> {
        self.tabs.iter().map(|tab| tab.id).collect()
    }

    /// Whether the partition spans windows
    pub fn is_global(&self) -> bool {
        self.window_mode != WindowMode::Current
    }
}
