//! Partition label synthesis

use crate::builtin::{age_bucket, semantic_bucket, BuiltinStrategy, StrategyKind};
use crate::fields::{domain_from_url, strip_tld};
use crate::grouping::{context_or_default, field_key, EvalContext};
use std::collections::{BTreeSet, HashMap};
use tabweave_domain::TabSnapshot;

/// Components that never make it into a label
const PLACEHOLDERS: [&str; 5] = ["Unknown", "Group", "URL Group", "Time Group", "Misc"];

/// Label used when every component is a placeholder
pub const DEFAULT_LABEL: &str = "Group";

const PARENT_TITLE_LIMIT: usize = 20;

/// Human-readable label for a partition
///
/// One component per applied strategy (paired with the key that strategy
/// produced); placeholders are dropped, duplicates removed in first-seen
/// order and the rest joined with `" - "`.
pub fn partition_label(
    tabs: &[TabSnapshot],
    applied: &[(StrategyKind<'_>, &str)],
    tabs_by_id: &HashMap<u64, &TabSnapshot>,
    ctx: &EvalContext<'_>,
) -> String {
    let Some(first) = tabs.first() else {
        return DEFAULT_LABEL.to_string();
    };

    let mut components: Vec<String> = Vec::new();
    for (kind, key) in applied {
        let component = match kind {
            StrategyKind::Builtin(builtin) => builtin_component(*builtin, tabs, first, tabs_by_id, ctx),
            StrategyKind::Custom(_) | StrategyKind::Field(_) => key.to_string(),
        };
        if component.is_empty() || PLACEHOLDERS.contains(&component.as_str()) {
            continue;
        }
        if !components.contains(&component) {
            components.push(component);
        }
    }

    if components.is_empty() {
        DEFAULT_LABEL.to_string()
    } else {
        components.join(" - ")
    }
}

fn builtin_component(
    builtin: BuiltinStrategy,
    tabs: &[TabSnapshot],
    first: &TabSnapshot,
    tabs_by_id: &HashMap<u64, &TabSnapshot>,
    ctx: &EvalContext<'_>,
) -> String {
    match builtin {
        BuiltinStrategy::Domain => match shared_site_name(tabs) {
            Some(site_name) => strip_tld(&site_name),
            None => strip_tld(&domain_from_url(&first.url, ctx.caches)),
        },
        BuiltinStrategy::DomainFull => domain_from_url(&first.url, ctx.caches),
        BuiltinStrategy::Topic => semantic_bucket(&first.title, &first.url).to_string(),
        BuiltinStrategy::Lineage => lineage_component(first, tabs_by_id),
        BuiltinStrategy::Context => context_or_default(first),
        BuiltinStrategy::Pinned => if first.pinned { "Pinned" } else { "Unpinned" }.to_string(),
        BuiltinStrategy::Age => age_bucket(first.last_accessed, ctx.now_ms).to_string(),
        BuiltinStrategy::Url => "URL Group".to_string(),
        BuiltinStrategy::Recency => "Time Group".to_string(),
        BuiltinStrategy::Nesting => if first.opener_tab_id.is_some() { "Children" } else { "Roots" }.to_string(),
        BuiltinStrategy::Title => field_key(first, builtin.id(), ctx.caches),
    }
}

/// The `siteName` every tab agrees on, ignoring tabs without one
fn shared_site_name(tabs: &[TabSnapshot]) -> Option<String> {
    let names: BTreeSet<&str> = tabs
        .iter()
        .filter_map(|tab| tab.context_value("siteName"))
        .filter_map(|value| value.as_str())
        .filter(|name| !name.is_empty())
        .collect();
    match names.len() {
        1 => names.into_iter().next().map(str::to_string),
        _ => None,
    }
}

fn lineage_component(tab: &TabSnapshot, tabs_by_id: &HashMap<u64, &TabSnapshot>) -> String {
    let Some(opener) = tab.opener_tab_id else {
        return format!("Window {}", tab.window_id);
    };
    match tabs_by_id.get(&opener) {
        Some(parent) => format!("From: {}", truncate_title(&parent.title)),
        None => format!("From: Tab {}", opener),
    }
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() > PARENT_TITLE_LIMIT {
        let head: String = title.chars().take(PARENT_TITLE_LIMIT).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}
