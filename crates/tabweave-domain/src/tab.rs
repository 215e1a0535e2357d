//! Tab module - the immutable input record of the engine

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A snapshot of one open browser tab
///
/// Snapshots are produced by the platform enumeration layer and are never
/// mutated by the engine. Records lacking an `id` or `windowId` are filtered
/// out upstream and cannot be deserialized into this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSnapshot {
    /// Unique tab identifier
    pub id: u64,

    /// Owning window
    pub window_id: i64,

    /// Page title
    #[serde(default)]
    pub title: String,

    /// Page URL (pending URL when still loading)
    #[serde(default)]
    pub url: String,

    /// Whether the tab is pinned
    #[serde(default)]
    pub pinned: bool,

    /// Last access time in epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<f64>,

    /// Tab that opened this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opener_tab_id: Option<u64>,

    /// Favicon URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fav_icon_url: Option<String>,

    /// Platform tab-group id (`-1` when ungrouped on most platforms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,

    /// Position inside the window
    #[serde(default)]
    pub index: i64,

    /// Whether the tab is the active one in its window
    #[serde(default)]
    pub active: bool,

    /// Loading status (`loading`, `complete`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Whether the tab is highlighted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,

    /// Context label assigned by page-context analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Free-form page context (`genre`, `siteName`, enrichments, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_data: Option<Map<String, Value>>,
}

impl TabSnapshot {
    /// Create a snapshot with the required identity plus title and URL
    ///
    /// # Examples
    ///
    /// ```
    /// use tabweave_domain::TabSnapshot;
    ///
    /// let tab = TabSnapshot::new(1, 10, "GitHub", "https://github.com");
    /// assert_eq!(tab.window_id, 10);
    /// assert!(!tab.pinned);
    /// ```
    pub fn new(id: u64, window_id: i64, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            window_id,
            title: title.into(),
            url: url.into(),
            pinned: false,
            last_accessed: None,
            opener_tab_id: None,
            fav_icon_url: None,
            group_id: None,
            index: 0,
            active: false,
            status: None,
            selected: None,
            context: None,
            context_data: None,
        }
    }

    /// Set the pinned flag
    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Set the last access time (epoch ms)
    pub fn with_last_accessed(mut self, last_accessed: f64) -> Self {
        self.last_accessed = Some(last_accessed);
        self
    }

    /// Set the opener tab
    pub fn with_opener(mut self, opener_tab_id: u64) -> Self {
        self.opener_tab_id = Some(opener_tab_id);
        self
    }

    /// Set the context label
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Insert one `contextData` entry
    pub fn with_context_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context_data
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Read one `contextData` entry
    pub fn context_value(&self, key: &str) -> Option<&Value> {
        self.context_data.as_ref()?.get(key)
    }

    /// Resolve a top-level attribute by its camelCase name
    ///
    /// Returns `None` when the attribute is unknown or unset (the "undefined"
    /// case), which is distinct from a present JSON `null`.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::from(self.id)),
            "windowId" => Some(Value::from(self.window_id)),
            "title" => Some(Value::from(self.title.as_str())),
            "url" => Some(Value::from(self.url.as_str())),
            "pinned" => Some(Value::Bool(self.pinned)),
            "lastAccessed" => self.last_accessed.map(number_value),
            "openerTabId" => self.opener_tab_id.map(Value::from),
            "favIconUrl" => self.fav_icon_url.as_deref().map(Value::from),
            "groupId" => self.group_id.map(Value::from),
            "index" => Some(Value::from(self.index)),
            "active" => Some(Value::Bool(self.active)),
            "status" => self.status.as_deref().map(Value::from),
            "selected" => self.selected.map(Value::Bool),
            "context" => self.context.as_deref().map(Value::from),
            "contextData" => self.context_data.clone().map(Value::Object),
            _ => None,
        }
    }
}

/// Integral floats become JSON integers so they print without a fraction
fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_snapshot() {
        let tab: TabSnapshot = serde_json::from_str(
            r#"{
                "id": 7,
                "windowId": 2,
                "title": "Docs",
                "url": "https://docs.rs",
                "lastAccessed": 1700000000000,
                "openerTabId": 3,
                "contextData": { "genre": "Reference" }
            }"#,
        )
        .unwrap();

        assert_eq!(tab.id, 7);
        assert_eq!(tab.window_id, 2);
        assert_eq!(tab.last_accessed, Some(1_700_000_000_000.0));
        assert_eq!(tab.opener_tab_id, Some(3));
        assert_eq!(tab.context_value("genre"), Some(&Value::from("Reference")));
    }

    #[test]
    fn test_missing_window_id_is_rejected() {
        let result = serde_json::from_str::<TabSnapshot>(r#"{ "id": 1, "title": "x" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_attribute_distinguishes_unset() {
        let tab = TabSnapshot::new(1, 1, "a", "https://a.com");
        assert_eq!(tab.attribute("openerTabId"), None);
        assert_eq!(tab.attribute("nonexistent"), None);
        assert_eq!(tab.attribute("pinned"), Some(Value::Bool(false)));
    }

    #[test]
    fn test_integral_last_accessed_is_integer() {
        let tab = TabSnapshot::new(1, 1, "a", "https://a.com").with_last_accessed(42.0);
        assert_eq!(tab.attribute("lastAccessed"), Some(Value::from(42)));

        let tab = tab.with_last_accessed(42.5);
        assert_eq!(tab.attribute("lastAccessed").unwrap().as_f64(), Some(42.5));
    }
}
