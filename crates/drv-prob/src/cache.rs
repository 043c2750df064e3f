//! Time-to-live result cache owned by the caller.
//!
//! Entries are keyed by a request fingerprint (SHA-256 of the request's JSON
//! form). Nothing here is global: whoever wants caching creates a
//! [`ResultCache`] and passes it along. Every time-dependent call takes the
//! current [`Instant`] so expiry can be driven explicitly.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use drv_core::Result;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Default lifetime of a cached entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// SHA-256 hex digest of the JSON encoding of `request`.
pub fn fingerprint<T: Serialize + ?Sized>(request: &T) -> Result<String> {
    let bytes = serde_json::to_vec(request)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

struct CachedEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Cache hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Fingerprint-keyed cache with a fixed time-to-live.
pub struct ResultCache<V> {
    entries: HashMap<String, CachedEntry<V>>,
    ttl: Duration,
    stats: CacheStats,
}

impl<V: Clone> ResultCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self { entries: HashMap::new(), ttl, stats: CacheStats::default() }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of stored entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live value for `key` at `now`; an expired entry is dropped.
    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if now <= entry.expires_at => {
                self.stats.hits += 1;
                Some(entry.value.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                self.stats.misses += 1;
                None
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Store `value`, expiring `ttl` after `now`. Replaces any previous entry.
    pub fn insert_at(&mut self, key: impl Into<String>, value: V, now: Instant) {
        self.entries.insert(key.into(), CachedEntry { value, expires_at: now + self.ttl });
    }

    /// Cached value, or compute, store and return it. Errors are not cached.
    pub fn get_or_try_insert_with_at<F>(&mut self, key: &str, now: Instant, f: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Some(v) = self.get_at(key, now) {
            return Ok(v);
        }
        let value = f()?;
        self.insert_at(key, value.clone(), now);
        Ok(value)
    }

    /// Drop every entry expired at `now`; returns how many were removed.
    pub fn purge_expired_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| now <= entry.expires_at);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<V: Clone> Default for ResultCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drv_core::Error;

    #[test]
    fn test_fingerprint_is_stable() {
        let a = fingerprint(&("binomial", [10.0, 0.5])).unwrap();
        let b = fingerprint(&("binomial", [10.0, 0.5])).unwrap();
        let c = fingerprint(&("binomial", [10.0, 0.25])).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_expiry() {
        let t0 = Instant::now();
        let mut cache = ResultCache::new(Duration::from_secs(10));
        cache.insert_at("k", 1u32, t0);
        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(10)), Some(1));
        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(11)), None);
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_get_or_try_insert_computes_once() {
        let t0 = Instant::now();
        let mut cache = ResultCache::new(Duration::from_secs(60));
        let mut calls = 0;
        for _ in 0..3 {
            let v = cache
                .get_or_try_insert_with_at("k", t0, || {
                    calls += 1;
                    Ok(42)
                })
                .unwrap();
            assert_eq!(v, 42);
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let t0 = Instant::now();
        let mut cache: ResultCache<u32> = ResultCache::default();
        let r = cache.get_or_try_insert_with_at("k", t0, || Err(Error::EmptySupport));
        assert!(r.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_purge() {
        let t0 = Instant::now();
        let mut cache = ResultCache::new(Duration::from_secs(5));
        cache.insert_at("old", 1, t0);
        cache.insert_at("new", 2, t0 + Duration::from_secs(4));
        assert_eq!(cache.purge_expired_at(t0 + Duration::from_secs(6)), 1);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
