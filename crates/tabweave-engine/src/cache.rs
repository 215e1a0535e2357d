//! Bounded memoization caches
//!
//! Each cache holds at most `capacity` entries. Inserting into a full cache
//! clears the *entire* cache first; there is no LRU ordering. The caches are
//! the only state shared between engine calls, so they sit behind mutexes and
//! can be shared across threads through an `Arc<EngineCaches>`.

use crate::EngineError;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A string-keyed map that empties itself when full
#[derive(Debug)]
pub struct BoundedCache<V> {
    entries: HashMap<String, V>,
    capacity: usize,
    clears: u64,
}

impl<V: Clone> BoundedCache<V> {
    /// Create an empty cache
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            clears: 0,
        }
    }

    /// Look up a cached value
    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key).cloned()
    }

    /// Insert a value, clearing everything first when at capacity
    pub fn insert(&mut self, key: String, value: V) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            tracing::trace!(capacity = self.capacity, "cache full, clearing");
            self.entries.clear();
            self.clears += 1;
        }
        self.entries.insert(key, value);
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many times the cache overflowed
    pub fn clears(&self) -> u64 {
        self.clears
    }

    fn reset(&mut self) {
        self.entries.clear();
    }
}

/// Snapshot of cache occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Entries in the URL → domain cache
    pub domains: usize,
    /// Entries in the URL → subdomain cache
    pub subdomains: usize,
    /// Entries in the pattern → regex cache
    pub patterns: usize,
    /// Total overflow clears across the three caches
    pub clears: u64,
}

/// The three caches used by field extraction and transforms
#[derive(Debug)]
pub struct EngineCaches {
    domains: Mutex<BoundedCache<String>>,
    subdomains: Mutex<BoundedCache<String>>,
    patterns: Mutex<BoundedCache<Regex>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl EngineCaches {
    /// Create caches with the given per-cache capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            domains: Mutex::new(BoundedCache::new(capacity)),
            subdomains: Mutex::new(BoundedCache::new(capacity)),
            patterns: Mutex::new(BoundedCache::new(capacity)),
        }
    }

    /// Memoized URL → domain lookup
    pub fn domain(&self, url: &str, compute: impl FnOnce() -> String) -> String {
        memoize(&self.domains, url, compute)
    }

    /// Memoized URL → subdomain lookup
    pub fn subdomain(&self, url: &str, compute: impl FnOnce() -> String) -> String {
        memoize(&self.subdomains, url, compute)
    }

    /// Compiled pattern, compiling and caching it on first use
    ///
    /// Patterns that fail to compile are not cached.
    pub fn regex(&self, pattern: &str) -> Result<Regex, EngineError> {
        let mut cache = lock(&self.patterns);
        if let Some(regex) = cache.get(pattern) {
            return Ok(regex);
        }
        let regex = Regex::new(pattern).map_err(|source| EngineError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        cache.insert(pattern.to_string(), regex.clone());
        Ok(regex)
    }

    /// Current occupancy
    pub fn stats(&self) -> CacheStats {
        let domains = lock(&self.domains);
        let subdomains = lock(&self.subdomains);
        let patterns = lock(&self.patterns);
        CacheStats {
            domains: domains.len(),
            subdomains: subdomains.len(),
            patterns: patterns.len(),
            clears: domains.clears() + subdomains.clears() + patterns.clears(),
        }
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        lock(&self.domains).reset();
        lock(&self.subdomains).reset();
        lock(&self.patterns).reset();
    }
}

impl Default for EngineCaches {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CACHE_CAPACITY)
    }
}

fn memoize(cache: &Mutex<BoundedCache<String>>, key: &str, compute: impl FnOnce() -> String) -> String {
    if let Some(hit) = lock(cache).get(key) {
        return hit;
    }
    let value = compute();
    lock(cache).insert(key.to_string(), value.clone());
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_clear_at_capacity() {
        let mut cache = BoundedCache::new(3);
        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);
        cache.insert("c".to_string(), 3);
        assert_eq!(cache.len(), 3);

        cache.insert("d".to_string(), 4);
        assert_eq!(cache.len(), 1, "whole cache is cleared, not one entry evicted");
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("d"), Some(4));
        assert_eq!(cache.clears(), 1);
    }

    #[test]
    fn test_overwrite_does_not_clear() {
        let mut cache = BoundedCache::new(2);
        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);
        cache.insert("a".to_string(), 10);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), Some(10));
        assert_eq!(cache.clears(), 0);
    }

    #[test]
    fn test_memoize_computes_once() {
        let caches = EngineCaches::new(10);
        let mut calls = 0;
        let first = caches.domain("https://a.com", || {
            calls += 1;
            "a.com".to_string()
        });
        let second = caches.domain("https://a.com", || {
            calls += 1;
            "other".to_string()
        });
        assert_eq!(first, "a.com");
        assert_eq!(second, "a.com");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_invalid_pattern_not_cached() {
        let caches = EngineCaches::new(10);
        assert!(matches!(
            caches.regex("(unclosed"),
            Err(EngineError::InvalidPattern { .. })
        ));
        assert_eq!(caches.stats().patterns, 0);

        assert!(caches.regex("^a(b)$").is_ok());
        assert_eq!(caches.stats().patterns, 1);
    }

    #[test]
    fn test_clear_empties_all_caches() {
        let caches = EngineCaches::new(10);
        caches.domain("u", || "d".to_string());
        caches.subdomain("u", || "s".to_string());
        caches.regex("x").unwrap();
        caches.clear();
        assert_eq!(caches.stats(), CacheStats::default());
    }
}
