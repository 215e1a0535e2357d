//! Sorting engine
//!
//! Builds one comparator from an ordered strategy list. Built-in and
//! field-named strategies fall through to the next strategy on a tie and
//! the whole sort ends with an ascending `id` tie-break. A custom strategy
//! with `sortingRules` behaves differently: its result is final even when
//! every rule ties, so later strategies and the `id` tie-break are skipped.

use crate::builtin::{age_bucket, find_custom, navigation_key, semantic_bucket, BuiltinStrategy, StrategyKind};
use crate::fields::{domain_from_url, get_field, stringify};
use crate::grouping::{strategy_key, EvalContext};
use serde_json::Value;
use std::cmp::Ordering;
use tabweave_domain::{CustomStrategy, Partition, SortOrder, SortingRule, TabSnapshot};
use tracing::debug;

/// How one strategy id compares two tabs
#[derive(Debug, Clone, Copy)]
pub enum Comparator<'a> {
    /// Custom `sortingRules`; a tie ends the comparison
    Rules(&'a [SortingRule]),
    /// Fixed built-in comparison
    Builtin(BuiltinStrategy),
    /// Field comparison with a grouping-key fallback
    Generic {
        /// Field named by the strategy id
        field: &'a str,
        /// Grouping evaluation for the same id
        grouping: StrategyKind<'a>,
    },
}

impl<'a> Comparator<'a> {
    /// Resolve an id: custom rules, then built-in, then generic
    pub fn resolve(id: &'a str, custom: &'a [CustomStrategy]) -> Self {
        if let Some(strategy) = find_custom(id, custom).filter(|s| !s.sorting_rules.is_empty()) {
            return Comparator::Rules(&strategy.sorting_rules);
        }
        match BuiltinStrategy::parse(id) {
            Some(builtin) => Comparator::Builtin(builtin),
            None => Comparator::Generic {
                field: id,
                grouping: StrategyKind::resolve(id, custom),
            },
        }
    }

    /// Compare two tabs under this strategy alone
    pub fn compare(&self, a: &TabSnapshot, b: &TabSnapshot, ctx: &EvalContext<'_>) -> Ordering {
        match *self {
            Comparator::Rules(rules) => compare_rules(a, b, rules, ctx),
            Comparator::Builtin(builtin) => compare_builtin(a, b, builtin, ctx),
            Comparator::Generic { field, grouping } => {
                match (get_field(a, field, ctx.caches), get_field(b, field, ctx.caches)) {
                    (Some(left), Some(right)) => loose_compare(Some(&left), Some(&right)),
                    _ => {
                        let key = |tab: &TabSnapshot| {
                            strategy_key(tab, grouping, ctx)
                                .map(|result| result.key)
                                .unwrap_or_default()
                        };
                        locale_compare(&key(a), &key(b))
                    }
                }
            }
        }
    }
}

/// Compare two field values the way a loosely typed `<` would
///
/// Two numbers compare numerically; anything else compares as text, with
/// undefined and null reading as the empty string.
pub fn loose_compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(Value::Number(left)), Some(Value::Number(right))) = (a, b) {
        if let (Some(left), Some(right)) = (left.as_f64(), right.as_f64()) {
            return left.total_cmp(&right);
        }
    }
    stringify(a).cmp(&stringify(b))
}

/// Case-insensitive comparison; lower case sorts first on case-only differences
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

fn compare_rules(a: &TabSnapshot, b: &TabSnapshot, rules: &[SortingRule], ctx: &EvalContext<'_>) -> Ordering {
    for rule in rules {
        let left = get_field(a, &rule.field, ctx.caches);
        let right = get_field(b, &rule.field, ctx.caches);
        let ordering = loose_compare(left.as_ref(), right.as_ref());
        if ordering != Ordering::Equal {
            return match rule.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
        }
    }
    Ordering::Equal
}

fn compare_builtin(a: &TabSnapshot, b: &TabSnapshot, builtin: BuiltinStrategy, ctx: &EvalContext<'_>) -> Ordering {
    match builtin {
        BuiltinStrategy::Recency => {
            let last = |tab: &TabSnapshot| tab.last_accessed.unwrap_or(0.0);
            last(b).total_cmp(&last(a))
        }
        BuiltinStrategy::Nesting => a.opener_tab_id.is_some().cmp(&b.opener_tab_id.is_some()),
        BuiltinStrategy::Pinned => b.pinned.cmp(&a.pinned),
        BuiltinStrategy::Title => locale_compare(&a.title, &b.title),
        BuiltinStrategy::Url => locale_compare(&a.url, &b.url),
        BuiltinStrategy::Context => locale_compare(
            a.context.as_deref().unwrap_or(""),
            b.context.as_deref().unwrap_or(""),
        ),
        BuiltinStrategy::Domain | BuiltinStrategy::DomainFull => locale_compare(
            &domain_from_url(&a.url, ctx.caches),
            &domain_from_url(&b.url, ctx.caches),
        ),
        BuiltinStrategy::Topic => {
            locale_compare(semantic_bucket(&a.title, &a.url), semantic_bucket(&b.title, &b.url))
        }
        BuiltinStrategy::Lineage => locale_compare(&navigation_key(a), &navigation_key(b)),
        BuiltinStrategy::Age => locale_compare(
            age_bucket(a.last_accessed, ctx.now_ms),
            age_bucket(b.last_accessed, ctx.now_ms),
        ),
    }
}

/// Comparator over an ordered list of strategies
pub struct TabComparator<'a> {
    comparators: Vec<Comparator<'a>>,
}

impl<'a> TabComparator<'a> {
    /// Resolve every id once
    pub fn new(strategy_ids: &'a [String], custom: &'a [CustomStrategy]) -> Self {
        Self {
            comparators: strategy_ids
                .iter()
                .map(|id| Comparator::resolve(id, custom))
                .collect(),
        }
    }

    /// Compare two tabs
    pub fn compare(&self, a: &TabSnapshot, b: &TabSnapshot, ctx: &EvalContext<'_>) -> Ordering {
        for comparator in &self.comparators {
            let ordering = comparator.compare(a, b, ctx);
            if matches!(comparator, Comparator::Rules(_)) || ordering != Ordering::Equal {
                return ordering;
            }
        }
        a.id.cmp(&b.id)
    }
}

/// Return `tabs` in strategy order; the sort is stable
pub fn sort_tabs(tabs: &[TabSnapshot], strategy_ids: &[String], ctx: &EvalContext<'_>) -> Vec<TabSnapshot> {
    let comparator = TabComparator::new(strategy_ids, ctx.custom);
    let mut sorted = tabs.to_vec();
    sorted.sort_by(|a, b| comparator.compare(a, b, ctx));
    sorted
}

/// Order partitions by the first requested strategy that sorts groups
///
/// Each partition is represented by its first tab. Without such a strategy
/// the order is left unchanged.
pub fn sort_partitions(partitions: &mut [Partition], strategy_ids: &[String], ctx: &EvalContext<'_>) {
    let Some(sorter) = strategy_ids
        .iter()
        .filter_map(|id| find_custom(id, ctx.custom))
        .find(|strategy| strategy.sorts_groups())
    else {
        return;
    };
    debug!(strategy = %sorter.id, "ordering partitions");

    let comparator = if sorter.group_sorting_rules.is_empty() {
        Comparator::resolve(&sorter.id, ctx.custom)
    } else {
        Comparator::Rules(&sorter.group_sorting_rules)
    };
    partitions.sort_by(|a, b| match (a.tabs.first(), b.tabs.first()) {
        (Some(left), Some(right)) => comparator.compare(left, right, ctx),
        _ => Ordering::Equal,
    });
}
