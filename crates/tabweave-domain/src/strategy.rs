//! Strategy module - rule vocabulary for grouping and sorting
//!
//! Strategies are persisted by the preferences layer as camelCase JSON. Any
//! operator or transform name this version does not know deserializes to an
//! explicit `Unknown` variant instead of failing the whole preference blob.

use serde::{Deserialize, Serialize};

/// Comparison operator of a rule condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    /// Substring test
    Contains,
    /// Negated substring test
    DoesNotContain,
    /// Case-insensitive regular expression
    Matches,
    /// Exact (case-insensitive) equality
    Equals,
    /// Prefix test
    StartsWith,
    /// Suffix test
    EndsWith,
    /// Attribute is defined
    Exists,
    /// Attribute is undefined
    DoesNotExist,
    /// Attribute is an explicit null
    IsNull,
    /// Attribute is not an explicit null
    IsNotNull,
    /// Unrecognized operator; never matches
    #[serde(other)]
    Unknown,
}

/// Named string transform applied to an extracted value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Transform {
    /// Identity
    #[default]
    None,
    /// Remove a trailing `.com|.org|.gov|.net|.edu|.io`
    StripTld,
    /// Lower-case
    Lowercase,
    /// Upper-case
    Uppercase,
    /// First character only
    FirstChar,
    /// Parse as URL, hostname without `www.`
    Domain,
    /// Parse as URL, raw hostname
    Hostname,
    /// Concatenate the capture groups of a pattern
    Regex,
    /// Unrecognized transform; identity
    #[serde(other)]
    Unknown,
}

/// Where a grouping rule takes its value from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSource {
    /// `value` names a tab field
    Field,
    /// `value` is used verbatim
    #[default]
    #[serde(alias = "fixed")]
    Literal,
}

/// Scope of a partition
///
/// Priority when several rules vote: `New` > `Compound` > `Current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    /// Confined to the tab's own window
    #[default]
    Current,
    /// Moved into a freshly created window
    New,
    /// Merged across windows
    Compound,
}

impl WindowMode {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowMode::Current => "current",
            WindowMode::New => "new",
            WindowMode::Compound => "compound",
        }
    }

    fn priority(&self) -> u8 {
        match self {
            WindowMode::Current => 0,
            WindowMode::Compound => 1,
            WindowMode::New => 2,
        }
    }

    /// Combine two votes, keeping the higher-priority mode
    ///
    /// # Examples
    ///
    /// ```
    /// use tabweave_domain::WindowMode;
    ///
    /// assert_eq!(WindowMode::Compound.strongest(WindowMode::New), WindowMode::New);
    /// assert_eq!(WindowMode::Current.strongest(WindowMode::Compound), WindowMode::Compound);
    /// ```
    pub fn strongest(self, other: WindowMode) -> WindowMode {
        if other.priority() > self.priority() {
            other
        } else {
            self
        }
    }

    /// Resolve a set of votes; no votes means `Current`
    pub fn resolve<I: IntoIterator<Item = WindowMode>>(votes: I) -> WindowMode {
        votes.into_iter().fold(WindowMode::Current, WindowMode::strongest)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Descending
    Desc,
    /// Ascending (also used for any unrecognized order)
    #[default]
    #[serde(other)]
    Asc,
}

/// One filter condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCondition {
    /// Field name (see the field extractor for the vocabulary)
    pub field: String,

    /// Comparison operator
    pub operator: Operator,

    /// Pattern compared against the field
    #[serde(default)]
    pub value: String,
}

/// One component of a custom grouping key
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingRule {
    /// Field lookup or literal
    #[serde(default)]
    pub source: RuleSource,

    /// Field name or literal text
    #[serde(default)]
    pub value: String,

    /// Transform applied to the resolved value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,

    /// Pattern for the `regex` transform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_pattern: Option<String>,

    /// Scope vote of this rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_mode: Option<WindowMode>,

    /// `random`, `match`, `field` or a literal color name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Field hashed into a color when `color == "field"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_field: Option<String>,

    /// Transform applied to the color field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_transform: Option<Transform>,

    /// Pattern for a `regex` color transform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_transform_pattern: Option<String>,
}

impl GroupingRule {
    /// Rule that reads a tab field
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            source: RuleSource::Field,
            value: name.into(),
            ..Self::default()
        }
    }

    /// Rule that contributes fixed text
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            source: RuleSource::Literal,
            value: text.into(),
            ..Self::default()
        }
    }
}

/// One key of a custom sort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortingRule {
    /// Field compared between tabs
    pub field: String,

    /// Direction
    #[serde(default)]
    pub order: SortOrder,
}

impl SortingRule {
    /// Ascending rule on `field`
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    /// Descending rule on `field`
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

/// Legacy first-match-wins rule
///
/// `result` may embed `$1`, `$2`, ... which are replaced by the capture groups
/// of a matching `matches` condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRule {
    /// Field name
    pub field: String,

    /// Comparison operator
    pub operator: Operator,

    /// Pattern
    #[serde(default)]
    pub value: String,

    /// Grouping key template
    #[serde(default)]
    pub result: String,
}

/// A user-defined strategy
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomStrategy {
    /// Strategy id (may shadow a built-in id)
    pub id: String,

    /// Display label
    #[serde(default)]
    pub label: String,

    /// AND-ed filter conditions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<RuleCondition>,

    /// OR of AND-ed condition groups; takes precedence over `filters`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter_groups: Vec<Vec<RuleCondition>>,

    /// Ordered grouping key components
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grouping_rules: Vec<GroupingRule>,

    /// Ordered sort keys
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sorting_rules: Vec<SortingRule>,

    /// Ordered sort keys applied to partitions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_sorting_rules: Vec<SortingRule>,

    /// Legacy first-match rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<StrategyRule>,

    /// Label used when no rule yields a value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,

    /// Run automatically when tabs change
    #[serde(default)]
    pub auto_run: bool,

    /// Order partitions with this strategy
    #[serde(default)]
    pub sort_groups: bool,
}

impl CustomStrategy {
    /// Create an empty strategy
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Whether this strategy can produce grouping keys
    pub fn is_grouping(&self) -> bool {
        !self.grouping_rules.is_empty() || !self.rules.is_empty()
    }

    /// Whether this strategy can order tabs
    pub fn is_sorting(&self) -> bool {
        !self.sorting_rules.is_empty() || !self.rules.is_empty()
    }

    /// Whether this strategy orders partitions
    pub fn sorts_groups(&self) -> bool {
        self.sort_groups || !self.group_sorting_rules.is_empty()
    }

    /// Fallback label, `Misc` when unset or empty
    pub fn fallback_label(&self) -> &str {
        match self.fallback.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => "Misc",
        }
    }
}

/// Registry entry describing one available strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyDescriptor {
    /// Strategy id
    pub id: String,

    /// Display label
    pub label: String,

    /// Usable for grouping
    pub is_grouping: bool,

    /// Usable for sorting
    pub is_sorting: bool,

    /// Capability tags (`group`, `sort`)
    pub tags: Vec<String>,

    /// Auto-run flag of a custom strategy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_run: Option<bool>,

    /// Whether the entry comes from a custom strategy
    #[serde(default)]
    pub is_custom: bool,
}

impl StrategyDescriptor {
    /// Describe a built-in strategy (always grouping and sorting capable)
    pub fn builtin(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            is_grouping: true,
            is_sorting: true,
            tags: vec!["group".to_string(), "sort".to_string()],
            auto_run: None,
            is_custom: false,
        }
    }

    /// Describe a custom strategy, deriving capabilities from its rule arrays
    pub fn custom(strategy: &CustomStrategy) -> Self {
        let is_grouping = strategy.is_grouping();
        let is_sorting = strategy.is_sorting();
        let mut tags = Vec::new();
        if is_grouping {
            tags.push("group".to_string());
        }
        if is_sorting {
            tags.push("sort".to_string());
        }

        Self {
            id: strategy.id.clone(),
            label: strategy.label.clone(),
            is_grouping,
            is_sorting,
            tags,
            auto_run: Some(strategy.auto_run),
            is_custom: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_operator_and_transform() {
        let condition: RuleCondition =
            serde_json::from_str(r#"{ "field": "url", "operator": "fuzzy", "value": "x" }"#).unwrap();
        assert_eq!(condition.operator, Operator::Unknown);

        let rule: GroupingRule =
            serde_json::from_str(r#"{ "source": "field", "value": "url", "transform": "rot13" }"#)
                .unwrap();
        assert_eq!(rule.transform, Some(Transform::Unknown));
    }

    #[test]
    fn test_fixed_source_alias() {
        let rule: GroupingRule =
            serde_json::from_str(r#"{ "source": "fixed", "value": "Work", "windowMode": "new" }"#)
                .unwrap();
        assert_eq!(rule.source, RuleSource::Literal);
        assert_eq!(rule.window_mode, Some(WindowMode::New));
    }

    #[test]
    fn test_custom_strategy_capabilities() {
        let mut strategy = CustomStrategy::new("s", "S");
        assert!(!strategy.is_grouping());
        assert!(!strategy.is_sorting());

        strategy.rules.push(StrategyRule {
            field: "url".to_string(),
            operator: Operator::Contains,
            value: "x".to_string(),
            result: "X".to_string(),
        });
        assert!(strategy.is_grouping());
        assert!(strategy.is_sorting());
    }

    #[test]
    fn test_fallback_label() {
        let mut strategy = CustomStrategy::new("s", "S");
        assert_eq!(strategy.fallback_label(), "Misc");
        strategy.fallback = Some(String::new());
        assert_eq!(strategy.fallback_label(), "Misc");
        strategy.fallback = Some("Other".to_string());
        assert_eq!(strategy.fallback_label(), "Other");
    }

    #[test]
    fn test_window_mode_resolution() {
        assert_eq!(WindowMode::resolve(std::iter::empty()), WindowMode::Current);
        assert_eq!(
            WindowMode::resolve([WindowMode::Compound, WindowMode::Current]),
            WindowMode::Compound
        );
        assert_eq!(
            WindowMode::resolve([WindowMode::New, WindowMode::Compound]),
            WindowMode::New
        );
    }

    #[test]
    fn test_sort_order_defaults_to_asc() {
        let rule: SortingRule = serde_json::from_str(r#"{ "field": "title" }"#).unwrap();
        assert_eq!(rule.order, SortOrder::Asc);
        let rule: SortingRule =
            serde_json::from_str(r#"{ "field": "title", "order": "sideways" }"#).unwrap();
        assert_eq!(rule.order, SortOrder::Asc);
        let rule: SortingRule = serde_json::from_str(r#"{ "field": "title", "order": "desc" }"#).unwrap();
        assert_eq!(rule.order, SortOrder::Desc);
        assert_eq!(serde_json::to_value(SortOrder::Asc).unwrap(), "asc");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_mode() -> impl Strategy<Value = WindowMode> {
        prop_oneof![
            Just(WindowMode::Current),
            Just(WindowMode::New),
            Just(WindowMode::Compound),
        ]
    }

    proptest! {
        /// Property: vote order never changes the resolved mode
        #[test]
        fn test_resolution_is_order_independent(votes in proptest::collection::vec(any_mode(), 0..8)) {
            let forward = WindowMode::resolve(votes.iter().copied());
            let backward = WindowMode::resolve(votes.iter().rev().copied());
            prop_assert_eq!(forward, backward);
        }
    }
}
