//! Built-in strategies and strategy-id resolution
//!
//! Strategy ids arrive as strings. Each engine resolves an id exactly once
//! into a [`StrategyKind`]; everything downstream matches on the enum.

use tabweave_domain::{CustomStrategy, TabSnapshot};

const HOUR_MS: f64 = 3_600_000.0;
const DAY_MS: f64 = 24.0 * HOUR_MS;

/// The fixed catalog of built-in strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinStrategy {
    /// Hostname without `www.` (label strips the TLD)
    Domain,
    /// Hostname without `www.`
    DomainFull,
    /// Keyword bucket over title and URL
    Topic,
    /// Page-context label
    Context,
    /// Opener chain
    Lineage,
    /// Pinned vs. unpinned
    Pinned,
    /// Last access time
    Recency,
    /// Last access bucket (Just now, Today, ...)
    Age,
    /// Raw URL
    Url,
    /// Child vs. root tab
    Nesting,
    /// Raw title
    Title,
}

impl BuiltinStrategy {
    /// Catalog in registry order
    pub const ALL: [BuiltinStrategy; 11] = [
        BuiltinStrategy::Domain,
        BuiltinStrategy::DomainFull,
        BuiltinStrategy::Topic,
        BuiltinStrategy::Context,
        BuiltinStrategy::Lineage,
        BuiltinStrategy::Pinned,
        BuiltinStrategy::Recency,
        BuiltinStrategy::Age,
        BuiltinStrategy::Url,
        BuiltinStrategy::Nesting,
        BuiltinStrategy::Title,
    ];

    /// Strategy id
    pub fn id(&self) -> &'static str {
        match self {
            BuiltinStrategy::Domain => "domain",
            BuiltinStrategy::DomainFull => "domain_full",
            BuiltinStrategy::Topic => "topic",
            BuiltinStrategy::Context => "context",
            BuiltinStrategy::Lineage => "lineage",
            BuiltinStrategy::Pinned => "pinned",
            BuiltinStrategy::Recency => "recency",
            BuiltinStrategy::Age => "age",
            BuiltinStrategy::Url => "url",
            BuiltinStrategy::Nesting => "nesting",
            BuiltinStrategy::Title => "title",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            BuiltinStrategy::Domain => "Domain",
            BuiltinStrategy::DomainFull => "Full Domain",
            BuiltinStrategy::Topic => "Topic",
            BuiltinStrategy::Context => "Context",
            BuiltinStrategy::Lineage => "Lineage",
            BuiltinStrategy::Pinned => "Pinned",
            BuiltinStrategy::Recency => "Recency",
            BuiltinStrategy::Age => "Age",
            BuiltinStrategy::Url => "URL",
            BuiltinStrategy::Nesting => "Nesting",
            BuiltinStrategy::Title => "Title",
        }
    }

    /// Look up a built-in by id
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.id() == id)
    }
}

/// How a strategy id is evaluated
#[derive(Debug, Clone, Copy)]
pub enum StrategyKind<'a> {
    /// One of the built-in strategies
    Builtin(BuiltinStrategy),
    /// A user-defined strategy
    Custom(&'a CustomStrategy),
    /// Any other id, treated as a field name
    Field(&'a str),
}

impl<'a> StrategyKind<'a> {
    /// Resolve an id for grouping: custom wins, then built-in, then field
    pub fn resolve(id: &'a str, custom: &'a [CustomStrategy]) -> Self {
        if let Some(strategy) = find_custom(id, custom) {
            return StrategyKind::Custom(strategy);
        }
        match BuiltinStrategy::parse(id) {
            Some(builtin) => StrategyKind::Builtin(builtin),
            None => StrategyKind::Field(id),
        }
    }
}

/// Custom strategy with the given id; a later duplicate wins, as in the registry
pub fn find_custom<'a>(id: &str, custom: &'a [CustomStrategy]) -> Option<&'a CustomStrategy> {
    custom.iter().rev().find(|strategy| strategy.id == id)
}

/// Keyword bucket for the `topic` strategy
///
/// The first matching keyword set wins; the scan is a case-insensitive
/// substring search over `"<title> <url>"`.
pub fn semantic_bucket(title: &str, url: &str) -> &'static str {
    const BUCKETS: [(&str, &[&str]); 5] = [
        ("Docs", &["doc", "readme", "guide"]),
        ("Chat", &["mail", "inbox"]),
        ("Dash", &["dashboard", "console"]),
        ("Tasks", &["issue", "ticket"]),
        ("Files", &["drive", "storage"]),
    ];

    let haystack = format!("{} {}", title, url).to_lowercase();
    BUCKETS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| haystack.contains(keyword)))
        .map_or("Misc", |(bucket, _)| bucket)
}

/// Key for the `lineage` strategy
pub fn navigation_key(tab: &TabSnapshot) -> String {
    match tab.opener_tab_id {
        Some(opener) => format!("child-of-{}", opener),
        None => format!("window-{}", tab.window_id),
    }
}

/// Bucket for the `age` strategy; a missing access time counts as epoch 0
pub fn age_bucket(last_accessed: Option<f64>, now_ms: f64) -> &'static str {
    let elapsed = now_ms - last_accessed.unwrap_or(0.0);
    if elapsed < HOUR_MS {
        "Just now"
    } else if elapsed < DAY_MS {
        "Today"
    } else if elapsed < 2.0 * DAY_MS {
        "Yesterday"
    } else if elapsed < 7.0 * DAY_MS {
        "This Week"
    } else {
        "Older"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_catalog() {
        for builtin in BuiltinStrategy::ALL {
            assert_eq!(BuiltinStrategy::parse(builtin.id()), Some(builtin));
        }
        assert_eq!(BuiltinStrategy::parse("youtubeChannel"), None);
    }

    #[test]
    fn test_custom_shadows_builtin() {
        let custom = vec![CustomStrategy::new("domain", "My Domain")];
        assert!(matches!(StrategyKind::resolve("domain", &custom), StrategyKind::Custom(_)));
        assert!(matches!(
            StrategyKind::resolve("domain", &[]),
            StrategyKind::Builtin(BuiltinStrategy::Domain)
        ));
        assert!(matches!(StrategyKind::resolve("genre", &[]), StrategyKind::Field("genre")));
    }

    #[test]
    fn test_semantic_bucket_priority() {
        assert_eq!(semantic_bucket("README", "https://x.com"), "Docs");
        assert_eq!(semantic_bucket("Inbox", "https://mail.google.com"), "Chat");
        // "doc" wins over "issue" because Docs is checked first
        assert_eq!(semantic_bucket("Issue about docs", ""), "Docs");
        assert_eq!(semantic_bucket("AWS Console", ""), "Dash");
        assert_eq!(semantic_bucket("Ticket 42", ""), "Tasks");
        assert_eq!(semantic_bucket("", "https://drive.google.com"), "Files");
        assert_eq!(semantic_bucket("Weather", "https://weather.com"), "Misc");
    }

    #[test]
    fn test_navigation_key() {
        let root = TabSnapshot::new(1, 4, "a", "https://a.com");
        assert_eq!(navigation_key(&root), "window-4");
        assert_eq!(navigation_key(&root.with_opener(9)), "child-of-9");
    }

    #[test]
    fn test_age_buckets() {
        let now = 10.0 * DAY_MS;
        assert_eq!(age_bucket(Some(now - 1000.0), now), "Just now");
        assert_eq!(age_bucket(Some(now - 2.0 * HOUR_MS), now), "Today");
        assert_eq!(age_bucket(Some(now - 30.0 * HOUR_MS), now), "Yesterday");
        assert_eq!(age_bucket(Some(now - 3.0 * DAY_MS), now), "This Week");
        assert_eq!(age_bucket(None, now), "Older");
    }
}
