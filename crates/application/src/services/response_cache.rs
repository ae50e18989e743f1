use crate::ports::Clock;
use bytes::Bytes;
use dashmap::DashMap;
use ferrous_watch_domain::config::CacheConfig;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Body and content type of a successful GET response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub content_type: Option<String>,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at_ms: u64,
    ttl_ms: u64,
    /// Insertion order, breaks `stored_at_ms` ties during eviction.
    sequence: u64,
}

impl<V> CacheEntry<V> {
    #[inline]
    fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.stored_at_ms) > self.ttl_ms
    }
}

#[derive(Default)]
struct ResponseCacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    insertions: AtomicU64,
    evictions: AtomicU64,
    batch_evictions: AtomicU64,
    expirations: AtomicU64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResponseCacheStats {
    pub entries: usize,
    pub max_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
    pub batch_evictions: u64,
    pub expirations: u64,
    pub hit_rate: f64,
}

pub struct ResponseCacheSettings {
    pub max_entries: usize,
    pub eviction_fraction: f64,
}

impl From<&CacheConfig> for ResponseCacheSettings {
    fn from(config: &CacheConfig) -> Self {
        Self {
            max_entries: config.max_entries,
            eviction_fraction: config.eviction_fraction,
        }
    }
}

/// Key/value store with per-entry TTL and oldest-first batch eviction.
///
/// Reads never refresh an entry: an entry lives exactly `ttl` from the moment
/// it was stored. Expired entries found on lookup are removed immediately.
pub struct ResponseCache<V = CachedResponse> {
    entries: DashMap<String, CacheEntry<V>, FxBuildHasher>,
    max_entries: usize,
    eviction_fraction: f64,
    clock: Arc<dyn Clock>,
    sequence: AtomicU64,
    metrics: ResponseCacheMetrics,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new(settings: ResponseCacheSettings, clock: Arc<dyn Clock>) -> Self {
        info!(
            max_entries = settings.max_entries,
            eviction_fraction = settings.eviction_fraction,
            "Initializing response cache"
        );

        Self {
            entries: DashMap::with_capacity_and_hasher(settings.max_entries, FxBuildHasher),
            max_entries: settings.max_entries.max(1),
            eviction_fraction: settings.eviction_fraction,
            clock,
            sequence: AtomicU64::new(0),
            metrics: ResponseCacheMetrics::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let now_ms = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now_ms) => {
                self.metrics.hits.fetch_add(1, AtomicOrdering::Relaxed);
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired
            && self
                .entries
                .remove_if(key, |_, entry| entry.is_expired_at(now_ms))
                .is_some()
        {
            self.metrics.expirations.fetch_add(1, AtomicOrdering::Relaxed);
        }

        self.metrics.misses.fetch_add(1, AtomicOrdering::Relaxed);
        None
    }

    pub fn put(&self, key: impl Into<String>, value: V, ttl: Duration) {
        if self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }

        let key = key.into();
        let entry = CacheEntry {
            value,
            stored_at_ms: self.clock.now_ms(),
            ttl_ms: ttl.as_millis() as u64,
            sequence: self.sequence.fetch_add(1, AtomicOrdering::Relaxed),
        };

        debug!(key = %key, ttl_ms = entry.ttl_ms, "Stored response in cache");
        self.entries.insert(key, entry);
        self.metrics.insertions.fetch_add(1, AtomicOrdering::Relaxed);
    }

    /// Drop everything, or only keys matching `pattern` (regex). Returns the number removed.
    pub fn clear(&self, pattern: Option<&str>) -> usize {
        let Some(pattern) = pattern else {
            let removed = self.entries.len();
            self.entries.clear();
            info!(removed, "Response cache cleared");
            return removed;
        };

        let regex = match fancy_regex::Regex::new(pattern) {
            Ok(regex) => regex,
            Err(e) => {
                warn!(pattern, error = %e, "Invalid cache clear pattern, nothing removed");
                return 0;
            }
        };

        let mut removed = 0usize;
        self.entries.retain(|key, _| {
            let matched = regex.is_match(key).unwrap_or(false);
            if matched {
                removed += 1;
            }
            !matched
        });

        info!(pattern, removed, "Response cache entries cleared by pattern");
        removed
    }

    /// Physically remove every expired entry.
    pub fn purge_expired(&self) -> usize {
        let now_ms = self.clock.now_ms();
        let mut removed = 0usize;
        self.entries.retain(|_, entry| {
            let expired = entry.is_expired_at(now_ms);
            if expired {
                removed += 1;
            }
            !expired
        });

        if removed > 0 {
            self.metrics
                .expirations
                .fetch_add(removed as u64, AtomicOrdering::Relaxed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn stats(&self) -> ResponseCacheStats {
        let hits = self.metrics.hits.load(AtomicOrdering::Relaxed);
        let misses = self.metrics.misses.load(AtomicOrdering::Relaxed);
        let lookups = hits + misses;

        ResponseCacheStats {
            entries: self.entries.len(),
            max_entries: self.max_entries,
            hits,
            misses,
            insertions: self.metrics.insertions.load(AtomicOrdering::Relaxed),
            evictions: self.metrics.evictions.load(AtomicOrdering::Relaxed),
            batch_evictions: self.metrics.batch_evictions.load(AtomicOrdering::Relaxed),
            expirations: self.metrics.expirations.load(AtomicOrdering::Relaxed),
            hit_rate: if lookups > 0 {
                (hits as f64 / lookups as f64) * 100.0
            } else {
                0.0
            },
        }
    }

    fn evict_oldest(&self) {
        let mut by_age: Vec<(u64, u64, String)> = self
            .entries
            .iter()
            .map(|entry| (entry.stored_at_ms, entry.sequence, entry.key().clone()))
            .collect();

        let to_evict = ((by_age.len() as f64 * self.eviction_fraction).floor() as usize)
            .max(1)
            .min(by_age.len());
        if to_evict == 0 {
            return;
        }

        by_age.sort_unstable_by_key(|(stored_at, sequence, _)| (*stored_at, *sequence));

        let mut evicted = 0u64;
        for (_, _, key) in by_age.into_iter().take(to_evict) {
            if self.entries.remove(&key).is_some() {
                evicted += 1;
            }
        }

        self.metrics
            .evictions
            .fetch_add(evicted, AtomicOrdering::Relaxed);
        self.metrics
            .batch_evictions
            .fetch_add(1, AtomicOrdering::Relaxed);

        debug!(
            evicted,
            cache_size = self.entries.len(),
            "Response cache batch eviction"
        );
    }
}

/// Cache key for an HTTP response, scoped to the caller and tenant.
///
/// `method:path:user:workspace:query` where a missing user is `anonymous`,
/// a missing workspace is `default` and the query is serialized as sorted JSON.
/// Builds the cache key. Query pairs are grouped by name in sorted order;
/// repeated names keep every value in the order they arrived.
pub fn response_cache_key(
    method: &str,
    path: &str,
    user_id: Option<&str>,
    workspace_id: Option<&str>,
    query: &[(String, String)],
) -> String {
    let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (name, value) in query {
        grouped.entry(name).or_default().push(value);
    }

    let query: serde_json::Map<String, serde_json::Value> = grouped
        .into_iter()
        .map(|(name, values)| {
            let value = match values.as_slice() {
                [single] => serde_json::Value::from(*single),
                many => serde_json::Value::from(many.to_vec()),
            };
            (name.to_string(), value)
        })
        .collect();

    format!(
        "{}:{}:{}:{}:{}",
        method,
        path,
        user_id.unwrap_or("anonymous"),
        workspace_id.unwrap_or("default"),
        serde_json::Value::Object(query)
    )
}
