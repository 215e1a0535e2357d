//! Transform pipeline - named string-to-string functions

use crate::fields::{domain_from_url, parse_hostname, strip_tld};
use crate::EngineCaches;
use tabweave_domain::Transform;
use tracing::debug;

/// Apply one transform to a value
///
/// `None`, `Transform::None` and unknown transforms are the identity. The
/// `regex` transform compiles `pattern` once (cached) and concatenates capture
/// groups 1..n; no match, a missing pattern or an invalid pattern yields an
/// empty string.
///
/// # Examples
///
/// ```
/// use tabweave_domain::Transform;
/// use tabweave_engine::{transform::apply, EngineCaches};
///
/// let caches = EngineCaches::default();
/// assert_eq!(apply("facebook.com", Some(Transform::StripTld), None, &caches), "facebook");
/// assert_eq!(
///     apply("Project A - Urgent", Some(Transform::Regex), Some("^(Project [A-Z])"), &caches),
///     "Project A"
/// );
/// ```
pub fn apply(value: &str, kind: Option<Transform>, pattern: Option<&str>, caches: &EngineCaches) -> String {
    match kind.unwrap_or_default() {
        Transform::None | Transform::Unknown => value.to_string(),
        Transform::StripTld => strip_tld(value),
        Transform::Lowercase => value.to_lowercase(),
        Transform::Uppercase => value.to_uppercase(),
        Transform::FirstChar => value.chars().next().map(String::from).unwrap_or_default(),
        Transform::Domain => domain_from_url(value, caches),
        Transform::Hostname => parse_hostname(value).unwrap_or_else(|_| value.to_string()),
        Transform::Regex => extract_captures(value, pattern, caches),
    }
}

fn extract_captures(value: &str, pattern: Option<&str>, caches: &EngineCaches) -> String {
    let Some(pattern) = pattern.filter(|p| !p.is_empty()) else {
        return String::new();
    };
    let regex = match caches.regex(pattern) {
        Ok(regex) => regex,
        Err(e) => {
            debug!(error = %e, "invalid pattern in transform");
            return String::new();
        }
    };
    match regex.captures(value) {
        Some(captures) => (1..captures.len())
            .filter_map(|i| captures.get(i))
            .map(|m| m.as_str())
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(value: &str, kind: Transform, pattern: Option<&str>) -> String {
        apply(value, Some(kind), pattern, &EngineCaches::new(10))
    }

    #[test]
    fn test_identity() {
        let caches = EngineCaches::new(10);
        assert_eq!(apply("Keep", None, None, &caches), "Keep");
        assert_eq!(run("Keep", Transform::None, None), "Keep");
        assert_eq!(run("Keep", Transform::Unknown, None), "Keep");
    }

    #[test]
    fn test_case_and_first_char() {
        assert_eq!(run("MiXeD", Transform::Lowercase, None), "mixed");
        assert_eq!(run("MiXeD", Transform::Uppercase, None), "MIXED");
        assert_eq!(run("Élan", Transform::FirstChar, None), "É");
        assert_eq!(run("", Transform::FirstChar, None), "");
    }

    #[test]
    fn test_domain_and_hostname() {
        assert_eq!(run("https://www.github.com/x", Transform::Domain, None), "github.com");
        assert_eq!(run("https://www.github.com/x", Transform::Hostname, None), "www.github.com");
        assert_eq!(run("not a url", Transform::Hostname, None), "not a url");
        assert_eq!(run("not a url", Transform::Domain, None), "unknown");
    }

    #[test]
    fn test_regex_concatenates_groups() {
        assert_eq!(
            run("2024-05-17", Transform::Regex, Some(r"(\d{4})-(\d{2})-(?:\d{2})")),
            "202405"
        );
        assert_eq!(run("abc", Transform::Regex, Some("(x)?(b)")), "b");
    }

    #[test]
    fn test_regex_failures_yield_empty() {
        assert_eq!(run("abc", Transform::Regex, Some("zzz(.)")), "");
        assert_eq!(run("abc", Transform::Regex, Some("(unclosed")), "");
        assert_eq!(run("abc", Transform::Regex, None), "");
    }

    #[test]
    fn test_regex_is_cached() {
        let caches = EngineCaches::new(10);
        apply("a1", Some(Transform::Regex), Some(r"(\d)"), &caches);
        apply("b2", Some(Transform::Regex), Some(r"(\d)"), &caches);
        assert_eq!(caches.stats().patterns, 1);
    }
}
