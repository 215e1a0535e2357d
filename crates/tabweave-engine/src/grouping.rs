//! Grouping engine
//!
//! Every applied strategy computes a key per tab. The keys of one tab are
//! combined into a composite partition id; tabs sharing an id form one
//! [`Partition`]. Colors and labels are resolved once all tabs are placed.

use crate::builtin::{age_bucket, navigation_key, semantic_bucket, BuiltinStrategy, StrategyKind};
use crate::color::color_for_key;
use crate::fields::{domain_from_url, get_field, stringify};
use crate::labels;
use crate::predicate::{evaluate, passes_filters};
use crate::registry;
use crate::transform;
use crate::EngineCaches;
use serde_json::Value;
use std::collections::HashMap;
use tabweave_domain::{CustomStrategy, Partition, RuleSource, TabSnapshot, WindowMode};
use tracing::debug;

/// Color value meaning "no preference"
const RANDOM_COLOR: &str = "random";
const MATCH_COLOR: &str = "match";
const FIELD_COLOR: &str = "field";

/// Inputs shared by every evaluation in one grouping or sorting pass
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    /// Custom strategies in effect
    pub custom: &'a [CustomStrategy],
    /// Memoization caches
    pub caches: &'a EngineCaches,
    /// Palette for hashed colors
    pub palette: &'a [String],
    /// Reference time for age buckets
    pub now_ms: f64,
}

/// Key one strategy produced for one tab
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyKey {
    /// Grouping key
    pub key: String,
    /// Resolved scope vote of the strategy
    pub window_mode: WindowMode,
}

impl StrategyKey {
    fn current(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            window_mode: WindowMode::Current,
        }
    }
}

/// Grouping key of `tab` under a custom strategy; `None` when filtered out
pub fn custom_key(tab: &TabSnapshot, strategy: &CustomStrategy, caches: &EngineCaches) -> Option<StrategyKey> {
    if !passes_filters(&strategy.filters, &strategy.filter_groups, tab, caches) {
        return None;
    }

    if !strategy.grouping_rules.is_empty() {
        let mut parts = Vec::new();
        let mut votes = Vec::new();
        for rule in &strategy.grouping_rules {
            let raw = match rule.source {
                RuleSource::Field => stringify(get_field(tab, &rule.value, caches).as_ref()),
                RuleSource::Literal => rule.value.clone(),
            };
            let value = if raw.is_empty() {
                raw
            } else {
                transform::apply(&raw, rule.transform, rule.transform_pattern.as_deref(), caches)
            };
            if value.is_empty() {
                continue;
            }
            parts.push(value);
            if let Some(mode) = rule.window_mode {
                votes.push(mode);
            }
        }
        let key = if parts.is_empty() {
            strategy.fallback_label().to_string()
        } else {
            parts.join(" - ")
        };
        return Some(StrategyKey {
            key,
            window_mode: WindowMode::resolve(votes),
        });
    }

    if !strategy.rules.is_empty() {
        for rule in &strategy.rules {
            let raw = get_field(tab, &rule.field, caches);
            let outcome = evaluate(rule.operator, raw.as_ref(), &rule.value);
            if outcome.matched {
                return Some(StrategyKey::current(substitute(&rule.result, &outcome.captures)));
            }
        }
    }

    Some(StrategyKey::current(strategy.fallback_label()))
}

/// Replace `$1..$n` in a legacy result template
fn substitute(template: &str, captures: &[String]) -> String {
    captures
        .iter()
        .enumerate()
        .fold(template.to_string(), |result, (i, capture)| {
            result.replace(&format!("${}", i + 1), capture)
        })
}

/// Grouping key of `tab` under a built-in strategy
pub fn builtin_key(tab: &TabSnapshot, builtin: BuiltinStrategy, caches: &EngineCaches, now_ms: f64) -> String {
    match builtin {
        BuiltinStrategy::Domain | BuiltinStrategy::DomainFull => domain_from_url(&tab.url, caches),
        BuiltinStrategy::Topic => semantic_bucket(&tab.title, &tab.url).to_string(),
        BuiltinStrategy::Lineage => navigation_key(tab),
        BuiltinStrategy::Context => context_or_default(tab),
        BuiltinStrategy::Pinned => if tab.pinned { "pinned" } else { "unpinned" }.to_string(),
        BuiltinStrategy::Age => age_bucket(tab.last_accessed, now_ms).to_string(),
        BuiltinStrategy::Url => tab.url.clone(),
        BuiltinStrategy::Title => tab.title.clone(),
        BuiltinStrategy::Recency => {
            let last_accessed = tab.attribute("lastAccessed").unwrap_or_else(|| Value::from(0));
            stringify(Some(&last_accessed))
        }
        BuiltinStrategy::Nesting => if tab.opener_tab_id.is_some() { "child" } else { "root" }.to_string(),
    }
}

pub(crate) fn context_or_default(tab: &TabSnapshot) -> String {
    tab.context
        .as_deref()
        .filter(|context| !context.is_empty())
        .unwrap_or("Uncategorized")
        .to_string()
}

/// Key of a field-named strategy: the stringified field, or `Unknown`
pub fn field_key(tab: &TabSnapshot, field: &str, caches: &EngineCaches) -> String {
    match get_field(tab, field, caches) {
        Some(value) => {
            let text = stringify(Some(&value));
            if text.is_empty() {
                "Unknown".to_string()
            } else {
                text
            }
        }
        None => "Unknown".to_string(),
    }
}

/// Grouping key of `tab` under any strategy kind
pub fn strategy_key(tab: &TabSnapshot, kind: StrategyKind<'_>, ctx: &EvalContext<'_>) -> Option<StrategyKey> {
    match kind {
        StrategyKind::Custom(strategy) => custom_key(tab, strategy, ctx.caches),
        StrategyKind::Builtin(builtin) => Some(StrategyKey::current(builtin_key(tab, builtin, ctx.caches, ctx.now_ms))),
        StrategyKind::Field(field) => Some(StrategyKey::current(field_key(tab, field, ctx.caches))),
    }
}

/// A strategy that contributed to a partition, with its key
#[derive(Debug, Clone, Copy)]
struct Applied<'a> {
    id: &'a str,
    kind: StrategyKind<'a>,
}

struct Bucket<'a> {
    partition: Partition,
    /// Partition id without the scope prefix
    value_key: String,
    applied: Vec<(Applied<'a>, String)>,
    created_at: usize,
}

/// Partition `tabs` by the grouping-capable ids among `strategy_ids`
///
/// Ids that are not grouping-capable are ignored. Tabs for which no strategy
/// produced a key are left out. Partitions come back in discovery order.
pub fn group_tabs(tabs: &[TabSnapshot], strategy_ids: &[String], ctx: &EvalContext<'_>) -> Vec<Partition> {
    let strategies: Vec<Applied<'_>> = strategy_ids
        .iter()
        .filter(|id| registry::is_grouping(id, ctx.custom))
        .map(|id| Applied {
            id: id.as_str(),
            kind: StrategyKind::resolve(id, ctx.custom),
        })
        .collect();

    if strategies.is_empty() {
        debug!(requested = strategy_ids.len(), "no grouping strategies in effect");
        return Vec::new();
    }

    let mut buckets: Vec<Bucket<'_>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for tab in tabs {
        let mut applied = Vec::new();
        let mut modes = Vec::new();
        for strategy in &strategies {
            if let Some(result) = strategy_key(tab, strategy.kind, ctx) {
                modes.push(result.window_mode);
                applied.push((*strategy, result.key));
            }
        }
        if applied.is_empty() {
            continue;
        }

        let window_mode = WindowMode::resolve(modes);
        let parts: Vec<String> = applied
            .iter()
            .map(|(strategy, key)| format!("{}:{}", strategy.id, key))
            .collect();
        let prefix = match window_mode {
            WindowMode::Current => format!("window-{}::", tab.window_id),
            _ => "global::".to_string(),
        };
        let value_key = parts.join("::");
        let partition_id = format!("{}{}", prefix, value_key);

        match index.get(&partition_id) {
            Some(&slot) => buckets[slot].partition.tabs.push(tab.clone()),
            None => {
                let slot = buckets.len();
                let reason = applied
                    .iter()
                    .map(|(strategy, _)| strategy.id)
                    .collect::<Vec<_>>()
                    .join(" + ");
                index.insert(partition_id.clone(), slot);
                buckets.push(Bucket {
                    partition: Partition {
                        id: partition_id,
                        window_id: tab.window_id,
                        label: String::new(),
                        color: String::new(),
                        tabs: vec![tab.clone()],
                        reason,
                        window_mode,
                    },
                    value_key,
                    applied,
                    created_at: slot,
                });
            }
        }
    }

    let tabs_by_id: HashMap<u64, &TabSnapshot> = tabs.iter().map(|tab| (tab.id, tab)).collect();
    buckets
        .into_iter()
        .map(|mut bucket| {
            bucket.partition.color = resolve_color(&bucket, ctx);
            let keyed: Vec<(StrategyKind<'_>, &str)> = bucket
                .applied
                .iter()
                .map(|(strategy, key)| (strategy.kind, key.as_str()))
                .collect();
            bucket.partition.label = labels::partition_label(&bucket.partition.tabs, &keyed, &tabs_by_id, ctx);
            bucket.partition
        })
        .collect()
}

fn resolve_color(bucket: &Bucket<'_>, ctx: &EvalContext<'_>) -> String {
    for (strategy, _) in bucket.applied.iter().rev() {
        let StrategyKind::Custom(custom) = strategy.kind else {
            continue;
        };
        let chosen = custom.grouping_rules.iter().rev().find_map(|rule| {
            rule.color
                .as_deref()
                .filter(|color| !color.is_empty() && *color != RANDOM_COLOR)
                .map(|color| (rule, color))
        });
        let Some((rule, color)) = chosen else {
            continue;
        };

        return match (color, rule.color_field.as_deref()) {
            (MATCH_COLOR, _) => color_for_key(&bucket.value_key, 0, ctx.palette),
            (FIELD_COLOR, Some(field)) => {
                // Lowest id keeps the color independent of input order
                let representative = bucket.partition.tabs.iter().min_by_key(|tab| tab.id);
                let raw = stringify(representative.and_then(|tab| get_field(tab, field, ctx.caches)).as_ref());
                let value = transform::apply(
                    &raw,
                    rule.color_transform,
                    rule.color_transform_pattern.as_deref(),
                    ctx.caches,
                );
                color_for_key(&value, 0, ctx.palette)
            }
            (literal, _) => literal.to_string(),
        };
    }
    color_for_key(&bucket.partition.id, bucket.created_at, ctx.palette)
}
