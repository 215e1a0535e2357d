//! Predicate evaluation
//!
//! String operators compare lower-cased text on both sides. `matches` compiles
//! the raw pattern case-insensitively and tests the original text, so capture
//! groups keep their case for legacy `$n` substitution.

use crate::fields::{get_field, stringify};
use crate::{EngineCaches, EngineError};
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use tabweave_domain::{Operator, RuleCondition, TabSnapshot};
use tracing::debug;

/// Result of evaluating one operator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PredicateOutcome {
    /// Whether the value satisfied the operator
    pub matched: bool,

    /// Capture groups 1..n of a successful `matches` (missing groups are empty)
    pub captures: Vec<String>,
}

impl PredicateOutcome {
    fn from_bool(matched: bool) -> Self {
        Self {
            matched,
            captures: Vec::new(),
        }
    }
}

/// Build a case-insensitive regex from a user pattern
pub fn case_insensitive_regex(pattern: &str) -> Result<Regex, EngineError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| EngineError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Evaluate `operator` against a raw field value and a configured pattern
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tabweave_domain::Operator;
/// use tabweave_engine::predicate::evaluate;
///
/// let value = json!("https://Twitter.com/home");
/// assert!(evaluate(Operator::Contains, Some(&value), "twitter").matched);
/// assert!(!evaluate(Operator::StartsWith, Some(&value), "http://").matched);
/// ```
pub fn evaluate(operator: Operator, raw: Option<&Value>, pattern: &str) -> PredicateOutcome {
    let text = || stringify(raw).to_lowercase();
    let needle = || pattern.to_lowercase();

    match operator {
        Operator::Contains => PredicateOutcome::from_bool(text().contains(&needle())),
        Operator::DoesNotContain => PredicateOutcome::from_bool(!text().contains(&needle())),
        Operator::Equals => PredicateOutcome::from_bool(text() == needle()),
        Operator::StartsWith => PredicateOutcome::from_bool(text().starts_with(&needle())),
        Operator::EndsWith => PredicateOutcome::from_bool(text().ends_with(&needle())),
        Operator::Exists => PredicateOutcome::from_bool(raw.is_some()),
        Operator::DoesNotExist => PredicateOutcome::from_bool(raw.is_none()),
        Operator::IsNull => PredicateOutcome::from_bool(matches!(raw, Some(Value::Null))),
        Operator::IsNotNull => PredicateOutcome::from_bool(!matches!(raw, Some(Value::Null))),
        Operator::Matches => match case_insensitive_regex(pattern) {
            Ok(regex) => regex_outcome(&regex, &stringify(raw)),
            Err(e) => {
                debug!(error = %e, "invalid pattern in condition");
                PredicateOutcome::default()
            }
        },
        Operator::Unknown => PredicateOutcome::default(),
    }
}

fn regex_outcome(regex: &Regex, text: &str) -> PredicateOutcome {
    match regex.captures(text) {
        Some(captures) => PredicateOutcome {
            matched: true,
            captures: (1..captures.len())
                .map(|i| captures.get(i).map_or("", |m| m.as_str()).to_string())
                .collect(),
        },
        None => PredicateOutcome::default(),
    }
}

/// Whether a tab satisfies one filter condition
pub fn check_condition(condition: &RuleCondition, tab: &TabSnapshot, caches: &EngineCaches) -> bool {
    let raw = get_field(tab, &condition.field, caches);
    evaluate(condition.operator, raw.as_ref(), &condition.value).matched
}

/// Whether a tab passes a strategy's filters
///
/// Non-empty `filter_groups` win: at least one group must pass entirely (an
/// empty group always passes). Otherwise every entry of `filters` must pass.
/// With neither, everything passes.
pub fn passes_filters(
    filters: &[RuleCondition],
    filter_groups: &[Vec<RuleCondition>],
    tab: &TabSnapshot,
    caches: &EngineCaches,
) -> bool {
    if !filter_groups.is_empty() {
        filter_groups
            .iter()
            .any(|group| group.iter().all(|condition| check_condition(condition, tab, caches)))
    } else {
        filters
            .iter()
            .all(|condition| check_condition(condition, tab, caches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn condition(field: &str, operator: Operator, value: &str) -> RuleCondition {
        RuleCondition {
            field: field.to_string(),
            operator,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_string_operators_ignore_case() {
        let value = json!("GitHub Issues");
        assert!(evaluate(Operator::Contains, Some(&value), "ISSUES").matched);
        assert!(evaluate(Operator::Equals, Some(&value), "github issues").matched);
        assert!(evaluate(Operator::StartsWith, Some(&value), "git").matched);
        assert!(evaluate(Operator::EndsWith, Some(&value), "Issues").matched);
        assert!(!evaluate(Operator::DoesNotContain, Some(&value), "hub").matched);
    }

    #[test]
    fn test_undefined_stringifies_empty() {
        assert!(evaluate(Operator::Equals, None, "").matched);
        assert!(evaluate(Operator::DoesNotContain, None, "x").matched);
        assert!(evaluate(Operator::Contains, Some(&Value::Null), "").matched);
    }

    #[test]
    fn test_existence_operators() {
        let null = Value::Null;
        let text = json!("x");
        assert!(evaluate(Operator::Exists, Some(&null), "").matched);
        assert!(!evaluate(Operator::Exists, None, "").matched);
        assert!(evaluate(Operator::DoesNotExist, None, "").matched);
        assert!(evaluate(Operator::IsNull, Some(&null), "").matched);
        assert!(!evaluate(Operator::IsNull, None, "").matched);
        assert!(evaluate(Operator::IsNotNull, None, "").matched);
        assert!(evaluate(Operator::IsNotNull, Some(&text), "").matched);
    }

    #[test]
    fn test_matches_returns_captures() {
        let value = json!("https://example.com/Docs/intro");
        let outcome = evaluate(Operator::Matches, Some(&value), r"https://(EXAMPLE)\.com/(\w+)(/zzz)?");
        assert!(outcome.matched);
        assert_eq!(outcome.captures, vec!["example", "Docs", ""]);
    }

    #[test]
    fn test_invalid_regex_is_no_match() {
        let value = json!("anything");
        let outcome = evaluate(Operator::Matches, Some(&value), "([unclosed");
        assert_eq!(outcome, PredicateOutcome::default());
    }

    #[test]
    fn test_unknown_operator_never_matches() {
        assert!(!evaluate(Operator::Unknown, Some(&json!("x")), "x").matched);
    }

    #[test]
    fn test_filter_groups_take_precedence() {
        let caches = EngineCaches::new(10);
        let tab = TabSnapshot::new(1, 1, "Google Search", "https://google.com");
        let failing = vec![condition("title", Operator::Contains, "bing")];
        let passing = vec![condition("title", Operator::Contains, "google")];

        assert!(passes_filters(&failing, &[passing.clone()], &tab, &caches));
        assert!(!passes_filters(&passing, &[failing.clone()], &tab, &caches));
        assert!(passes_filters(&[], &[failing, Vec::new()], &tab, &caches));
        assert!(passes_filters(&[], &[], &tab, &caches));
    }
}
