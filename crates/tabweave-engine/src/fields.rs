//! Field extraction
//!
//! Resolves a named attribute of a tab. Besides the direct attributes of
//! [`TabSnapshot`] this covers `genre`/`siteName` (read from `contextData`),
//! the computed `domain`/`subdomain`, and dotted paths such as
//! `contextData.youtube.channelName`.

use crate::{EngineCaches, EngineError};
use serde_json::Value;
use tabweave_domain::TabSnapshot;
use tracing::debug;
use url::Url;

/// Sentinel domain for URLs that fail to parse
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Raw hostname of a URL (empty for URLs without a host, e.g. `about:blank`)
pub fn parse_hostname(url: &str) -> Result<String, EngineError> {
    let parsed = Url::parse(url).map_err(|source| EngineError::UrlParse {
        url: url.to_string(),
        source,
    })?;
    Ok(parsed.host_str().unwrap_or_default().to_string())
}

fn strip_www(hostname: &str) -> &str {
    hostname.strip_prefix("www.").unwrap_or(hostname)
}

/// Hostname of `url` without a leading `www.`, memoized
///
/// # Examples
///
/// ```
/// use tabweave_engine::{fields::domain_from_url, EngineCaches};
///
/// let caches = EngineCaches::default();
/// assert_eq!(domain_from_url("https://www.github.com/x", &caches), "github.com");
/// assert_eq!(domain_from_url("not a url", &caches), "unknown");
/// ```
pub fn domain_from_url(url: &str, caches: &EngineCaches) -> String {
    caches.domain(url, || match parse_hostname(url) {
        Ok(hostname) => strip_www(&hostname).to_string(),
        Err(e) => {
            debug!(error = %e, "failed to parse domain");
            UNKNOWN_DOMAIN.to_string()
        }
    })
}

/// Every hostname label before the last two, memoized
///
/// Empty when the hostname (minus `www.`) has two labels or fewer, or when the
/// URL does not parse.
pub fn subdomain_from_url(url: &str, caches: &EngineCaches) -> String {
    caches.subdomain(url, || match parse_hostname(url) {
        Ok(hostname) => {
            let labels: Vec<&str> = strip_www(&hostname).split('.').collect();
            if labels.len() > 2 {
                labels[..labels.len() - 2].join(".")
            } else {
                String::new()
            }
        }
        Err(e) => {
            debug!(error = %e, "failed to parse subdomain");
            String::new()
        }
    })
}

/// Resolve a field of a tab; `None` means the field is undefined
pub fn get_field(tab: &TabSnapshot, name: &str, caches: &EngineCaches) -> Option<Value> {
    match name {
        "genre" | "siteName" => tab.context_value(name).cloned(),
        "domain" => Some(Value::String(domain_from_url(&tab.url, caches))),
        "subdomain" => Some(Value::String(subdomain_from_url(&tab.url, caches))),
        _ if name.contains('.') => resolve_path(tab, name),
        _ => tab.attribute(name),
    }
}

fn resolve_path(tab: &TabSnapshot, path: &str) -> Option<Value> {
    let mut segments = path.split('.');
    let root = tab.attribute(segments.next()?)?;
    segments.try_fold(root, |current, segment| match current {
        Value::Object(mut map) => map.remove(segment),
        Value::Array(mut items) => {
            let index = segment.parse::<usize>().ok()?;
            (index < items.len()).then(|| items.swap_remove(index))
        }
        _ => None,
    })
}

/// Render a field value as text
///
/// Undefined and null render as the empty string; arrays join their elements
/// with commas; objects render as `[object Object]`.
pub fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => format_number(number),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| stringify(Some(item)))
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

fn format_number(number: &serde_json::Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() < 1e21 => format!("{:.0}", value),
        Some(value) => value.to_string(),
        None => number.to_string(),
    }
}

/// Remove a trailing `.com|.org|.gov|.net|.edu|.io` (case-insensitive)
///
/// # Examples
///
/// ```
/// use tabweave_engine::fields::strip_tld;
///
/// assert_eq!(strip_tld("facebook.com"), "facebook");
/// assert_eq!(strip_tld("docs.rs"), "docs.rs");
/// ```
pub fn strip_tld(domain: &str) -> String {
    const SUFFIXES: [&str; 6] = [".com", ".org", ".gov", ".net", ".edu", ".io"];
    for suffix in SUFFIXES {
        let cut = domain.len().saturating_sub(suffix.len());
        if domain.len() >= suffix.len()
            && domain.is_char_boundary(cut)
            && domain[cut..].eq_ignore_ascii_case(suffix)
        {
            return domain[..cut].to_string();
        }
    }
    domain.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn caches() -> EngineCaches {
        EngineCaches::new(100)
    }

    #[test]
    fn test_domain_strips_www() {
        let caches = caches();
        assert_eq!(domain_from_url("https://www.google.com/search", &caches), "google.com");
        assert_eq!(domain_from_url("https://maps.google.com", &caches), "maps.google.com");
    }

    #[test]
    fn test_domain_without_host() {
        let caches = caches();
        assert_eq!(domain_from_url("about:blank", &caches), "");
        assert_eq!(domain_from_url("", &caches), UNKNOWN_DOMAIN);
    }

    #[test]
    fn test_subdomain() {
        let caches = caches();
        assert_eq!(subdomain_from_url("https://a.b.c.example.com", &caches), "a.b.c");
        assert_eq!(subdomain_from_url("https://www.example.com", &caches), "");
        assert_eq!(subdomain_from_url("https://example.com", &caches), "");
        assert_eq!(subdomain_from_url("::::", &caches), "");
    }

    #[test]
    fn test_direct_and_context_fields() {
        let caches = caches();
        let tab = TabSnapshot::new(3, 9, "Title", "https://www.youtube.com/watch")
            .with_context_value("genre", "Music")
            .with_context_value("siteName", "YouTube");

        assert_eq!(get_field(&tab, "id", &caches), Some(json!(3)));
        assert_eq!(get_field(&tab, "windowId", &caches), Some(json!(9)));
        assert_eq!(get_field(&tab, "genre", &caches), Some(json!("Music")));
        assert_eq!(get_field(&tab, "siteName", &caches), Some(json!("YouTube")));
        assert_eq!(get_field(&tab, "domain", &caches), Some(json!("youtube.com")));
        assert_eq!(get_field(&tab, "lastAccessed", &caches), None);
    }

    #[test]
    fn test_dotted_path() {
        let caches = caches();
        let tab = TabSnapshot::new(1, 1, "t", "https://a.com")
            .with_context_value("youtube", json!({ "channelName": "Rustacean", "tags": ["a", "b"] }))
            .with_context_value("progress", Value::Null);

        assert_eq!(
            get_field(&tab, "contextData.youtube.channelName", &caches),
            Some(json!("Rustacean"))
        );
        assert_eq!(get_field(&tab, "contextData.youtube.tags.1", &caches), Some(json!("b")));
        assert_eq!(get_field(&tab, "contextData.progress", &caches), Some(Value::Null));
        assert_eq!(get_field(&tab, "contextData.progress.value", &caches), None);
        assert_eq!(get_field(&tab, "title.length", &caches), None);
        assert_eq!(get_field(&tab, "missing.path", &caches), None);
    }

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(None), "");
        assert_eq!(stringify(Some(&Value::Null)), "");
        assert_eq!(stringify(Some(&json!(12))), "12");
        assert_eq!(stringify(Some(&json!(1.5))), "1.5");
        assert_eq!(stringify(Some(&json!(3.0))), "3");
        assert_eq!(stringify(Some(&json!(true))), "true");
        assert_eq!(stringify(Some(&json!(["a", 1]))), "a,1");
        assert_eq!(stringify(Some(&json!({ "a": 1 }))), "[object Object]");
    }

    #[test]
    fn test_strip_tld_case_insensitive() {
        assert_eq!(strip_tld("EXAMPLE.ORG"), "EXAMPLE");
        assert_eq!(strip_tld("crates.io"), "crates");
        assert_eq!(strip_tld(".com"), "");
        assert_eq!(strip_tld("com"), "com");
    }
}
