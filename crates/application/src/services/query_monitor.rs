use super::query_advisor::{suggest, QuerySuggestion};
use crate::ports::Clock;
use dashmap::DashSet;
use ferrous_watch_domain::config::MonitoringConfig;
use ferrous_watch_domain::{QueryCall, QueryMetricRecord};
use rustc_hash::{FxBuildHasher, FxHashMap};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryTimeShare {
    pub model_action: String,
    pub count: u64,
    pub total_duration_ms: u64,
}

/// Aggregates over a recent slice of the query buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryPerformanceReport {
    pub window_secs: u64,
    pub total_queries: usize,
    pub average_duration_ms: f64,
    pub max_duration_ms: u64,
    pub slow_queries: usize,
    pub slow_query_percentage: f64,
    pub top_by_total_time: Vec<QueryTimeShare>,
}

/// Lifetime counters plus buffer-based averages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryStatsSnapshot {
    pub total_queries: u64,
    pub slow_queries: u64,
    pub failed_queries: u64,
    pub average_duration_ms: f64,
    pub buffered_queries: usize,
    pub slow_query_keys: Vec<String>,
}

pub struct QueryMonitorSettings {
    pub slow_threshold_ms: u64,
    pub very_slow_threshold_ms: u64,
    pub capacity: usize,
}

impl From<&MonitoringConfig> for QueryMonitorSettings {
    fn from(config: &MonitoringConfig) -> Self {
        Self {
            slow_threshold_ms: config.slow_query_threshold_ms,
            very_slow_threshold_ms: config.very_slow_query_threshold_ms,
            capacity: config.query_buffer_capacity,
        }
    }
}

const TOP_QUERIES: usize = 5;

/// Times every instrumented database call and keeps the slow-query set.
pub struct QueryPerformanceMonitor {
    buffer: Mutex<VecDeque<QueryMetricRecord>>,
    capacity: usize,
    slow_keys: DashSet<String, FxBuildHasher>,
    slow_threshold_ms: u64,
    very_slow_threshold_ms: u64,
    total_queries: AtomicU64,
    slow_queries: AtomicU64,
    failed_queries: AtomicU64,
    clock: Arc<dyn Clock>,
}

impl QueryPerformanceMonitor {
    pub fn new(settings: QueryMonitorSettings, clock: Arc<dyn Clock>) -> Self {
        let capacity = settings.capacity.max(1);
        Self {
            buffer: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            slow_keys: DashSet::with_hasher(FxBuildHasher),
            slow_threshold_ms: settings.slow_threshold_ms,
            very_slow_threshold_ms: settings.very_slow_threshold_ms,
            total_queries: AtomicU64::new(0),
            slow_queries: AtomicU64::new(0),
            failed_queries: AtomicU64::new(0),
            clock,
        }
    }

    /// Await `query`, recording its duration whether it succeeds or fails.
    /// The result is handed back untouched.
    pub async fn observe<T, E, F>(&self, call: &QueryCall, query: F) -> Result<T, E>
    where
        E: Display,
        F: Future<Output = Result<T, E>>,
    {
        let start = Instant::now();
        let result = query.await;
        let duration_ms = start.elapsed().as_millis() as u64;

        if let Err(e) = &result {
            error!(
                model = %call.model,
                action = %call.action,
                duration_ms,
                error = %e,
                "Database query failed"
            );
        }

        self.record(call, duration_ms, result.is_err());
        result
    }

    /// Record a finished call. Returns the advisories emitted when it was slow.
    pub fn record(&self, call: &QueryCall, duration_ms: u64, failed: bool) -> Vec<QuerySuggestion> {
        let model_action = call.key();

        {
            let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
            buffer.push_back(QueryMetricRecord {
                model_action: model_action.clone(),
                duration_ms,
                timestamp: self.clock.now_ms(),
                failed,
            });
            while buffer.len() > self.capacity {
                buffer.pop_front();
            }
        }

        self.total_queries.fetch_add(1, AtomicOrdering::Relaxed);
        if failed {
            self.failed_queries.fetch_add(1, AtomicOrdering::Relaxed);
        }

        if duration_ms <= self.slow_threshold_ms {
            return Vec::new();
        }

        self.slow_queries.fetch_add(1, AtomicOrdering::Relaxed);
        self.slow_keys.insert(model_action.clone());

        warn!(
            query = %model_action,
            duration_ms,
            threshold_ms = self.slow_threshold_ms,
            "Slow query detected"
        );

        let suggestions = suggest(call, duration_ms, self.very_slow_threshold_ms);
        for suggestion in &suggestions {
            warn!(query = %model_action, suggestion = %suggestion, "Query optimization suggestion");
        }
        suggestions
    }

    pub fn performance_report(&self, window: Duration) -> QueryPerformanceReport {
        let since = self
            .clock
            .now_ms()
            .saturating_sub(window.as_millis() as u64);

        let recent: Vec<(String, u64)> = {
            let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
            buffer
                .iter()
                .filter(|r| r.timestamp >= since)
                .map(|r| (r.model_action.clone(), r.duration_ms))
                .collect()
        };

        let total_queries = recent.len();
        let total_duration: u64 = recent.iter().map(|(_, d)| d).sum();
        let max_duration_ms = recent.iter().map(|(_, d)| *d).max().unwrap_or(0);
        let slow_queries = recent
            .iter()
            .filter(|(_, d)| *d > self.slow_threshold_ms)
            .count();

        let mut by_key: FxHashMap<String, (u64, u64)> = FxHashMap::default();
        for (key, duration) in recent {
            let slot = by_key.entry(key).or_insert((0, 0));
            slot.0 += 1;
            slot.1 += duration;
        }

        let mut top_by_total_time: Vec<QueryTimeShare> = by_key
            .into_iter()
            .map(|(model_action, (count, total_duration_ms))| QueryTimeShare {
                model_action,
                count,
                total_duration_ms,
            })
            .collect();
        top_by_total_time.sort_by(|a, b| {
            b.total_duration_ms
                .cmp(&a.total_duration_ms)
                .then_with(|| a.model_action.cmp(&b.model_action))
        });
        top_by_total_time.truncate(TOP_QUERIES);

        QueryPerformanceReport {
            window_secs: window.as_secs(),
            total_queries,
            average_duration_ms: if total_queries > 0 {
                total_duration as f64 / total_queries as f64
            } else {
                0.0
            },
            max_duration_ms,
            slow_queries,
            slow_query_percentage: if total_queries > 0 {
                slow_queries as f64 / total_queries as f64 * 100.0
            } else {
                0.0
            },
            top_by_total_time,
        }
    }

    /// Drop buffered records older than `max_age`. The slow-query set is kept.
    pub fn prune_older_than(&self, max_age: Duration) -> usize {
        let cutoff = self
            .clock
            .now_ms()
            .saturating_sub(max_age.as_millis() as u64);

        let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        let before = buffer.len();
        buffer.retain(|r| r.timestamp >= cutoff);
        let removed = before - buffer.len();

        if removed > 0 {
            debug!(removed, remaining = buffer.len(), "Pruned query metrics");
        }
        removed
    }

    pub fn stats(&self) -> QueryStatsSnapshot {
        let (buffered_queries, average_duration_ms) = {
            let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
            let total: u64 = buffer.iter().map(|r| r.duration_ms).sum();
            let avg = if buffer.is_empty() {
                0.0
            } else {
                total as f64 / buffer.len() as f64
            };
            (buffer.len(), avg)
        };

        QueryStatsSnapshot {
            total_queries: self.total_queries.load(AtomicOrdering::Relaxed),
            slow_queries: self.slow_queries.load(AtomicOrdering::Relaxed),
            failed_queries: self.failed_queries.load(AtomicOrdering::Relaxed),
            average_duration_ms,
            buffered_queries,
            slow_query_keys: self.slow_query_keys(),
        }
    }

    pub fn slow_query_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.slow_keys.iter().map(|k| k.key().clone()).collect();
        keys.sort();
        keys
    }

    pub fn is_slow(&self, model_action: &str) -> bool {
        self.slow_keys.contains(model_action)
    }

    pub fn slow_threshold_ms(&self) -> u64 {
        self.slow_threshold_ms
    }
}
