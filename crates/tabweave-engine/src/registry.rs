//! Strategy registry
//!
//! Merges the built-in catalog with user-defined strategies. A custom
//! strategy whose id matches an existing entry replaces it in place; any
//! other custom strategy is appended.

use crate::builtin::{find_custom, BuiltinStrategy};
use tabweave_domain::{CustomStrategy, GroupingRule, RuleSource, StrategyDescriptor};

/// Descriptors for the built-in catalog, in catalog order
pub fn builtin_descriptors() -> Vec<StrategyDescriptor> {
    BuiltinStrategy::ALL
        .iter()
        .map(|builtin| StrategyDescriptor::builtin(builtin.id(), builtin.label()))
        .collect()
}

/// Full strategy list: built-ins merged with `custom`
///
/// # Examples
///
/// ```
/// use tabweave_domain::CustomStrategy;
/// use tabweave_engine::registry::resolve;
///
/// let descriptors = resolve(&[CustomStrategy::new("project", "Project")]);
/// assert_eq!(descriptors.len(), 12);
/// assert_eq!(descriptors[0].id, "domain");
/// assert_eq!(descriptors[11].id, "project");
/// ```
pub fn resolve(custom: &[CustomStrategy]) -> Vec<StrategyDescriptor> {
    let mut descriptors = builtin_descriptors();
    for strategy in custom {
        let descriptor = StrategyDescriptor::custom(strategy);
        match descriptors.iter_mut().find(|existing| existing.id == strategy.id) {
            Some(existing) => *existing = descriptor,
            None => descriptors.push(descriptor),
        }
    }
    descriptors
}

/// Whether `id` is grouping-capable after merging
pub fn is_grouping(id: &str, custom: &[CustomStrategy]) -> bool {
    if let Some(strategy) = find_custom(id, custom) {
        return strategy.is_grouping();
    }
    BuiltinStrategy::parse(id).is_some()
}

const CONTEXT_FIELDS: [&str; 3] = ["context", "genre", "siteName"];

fn is_context_field(field: &str) -> bool {
    CONTEXT_FIELDS.contains(&field) || field.starts_with("contextData.")
}

fn rule_reads_context(rule: &GroupingRule) -> bool {
    rule.source == RuleSource::Field && is_context_field(&rule.value)
}

fn strategy_reads_context(strategy: &CustomStrategy) -> bool {
    strategy.grouping_rules.iter().any(rule_reads_context)
        || strategy
            .sorting_rules
            .iter()
            .chain(&strategy.group_sorting_rules)
            .any(|rule| is_context_field(&rule.field))
        || strategy
            .filters
            .iter()
            .chain(strategy.filter_groups.iter().flatten())
            .any(|condition| is_context_field(&condition.field))
}

/// Whether any requested strategy needs page-context data on the tabs
///
/// The host can skip context extraction entirely when this is false. The
/// `context` id always needs it, even when a custom strategy takes it over.
pub fn requires_context_analysis(ids: &[String], custom: &[CustomStrategy]) -> bool {
    ids.iter().any(|id| {
        id == BuiltinStrategy::Context.id() || find_custom(id, custom).is_some_and(strategy_reads_context)
    })
}
