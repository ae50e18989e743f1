use crate::ports::{Clock, ProcessResources, ResourceProbe};
use dashmap::DashMap;
use ferrous_watch_domain::{RequestMetricRecord, RouteKey};
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMetrics {
    pub route: RouteKey,
    pub requests: u64,
    pub errors: u64,
    pub error_rate: f64,
}

/// Aggregates computed from the rolling buffer and counter maps at call time.
#[derive(Debug, Clone, Serialize)]
pub struct RequestMetricsSnapshot {
    /// Every request recorded since process start.
    pub total_requests: u64,
    pub total_errors: u64,
    pub error_rate: f64,
    /// Mean latency over the records still in the buffer.
    pub average_response_time_ms: f64,
    pub p95_response_time_ms: u64,
    pub buffered_requests: usize,
    pub routes: Vec<RouteMetrics>,
    pub system: ProcessResources,
}

/// Collects per-request tuples in a bounded rolling buffer plus lifetime
/// request/error counters keyed by `METHOD:route`.
pub struct RequestMetricsCollector {
    buffer: Mutex<VecDeque<RequestMetricRecord>>,
    capacity: usize,
    requests: DashMap<RouteKey, AtomicU64, FxBuildHasher>,
    errors: DashMap<RouteKey, AtomicU64, FxBuildHasher>,
    total_requests: AtomicU64,
    total_errors: AtomicU64,
    clock: Arc<dyn Clock>,
    resources: Arc<dyn ResourceProbe>,
}

impl RequestMetricsCollector {
    pub fn new(capacity: usize, clock: Arc<dyn Clock>, resources: Arc<dyn ResourceProbe>) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            requests: DashMap::with_hasher(FxBuildHasher),
            errors: DashMap::with_hasher(FxBuildHasher),
            total_requests: AtomicU64::new(0),
            total_errors: AtomicU64::new(0),
            clock,
            resources,
        }
    }

    pub fn record(&self, method: &str, route: &str, status_code: u16, duration_ms: u64) {
        let record = RequestMetricRecord {
            method: method.to_string(),
            route: route.to_string(),
            status_code,
            duration_ms,
            timestamp: self.clock.now_ms(),
        };
        let key = record.route_key();
        let is_error = record.is_error();

        {
            let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
            buffer.push_back(record);
            while buffer.len() > self.capacity {
                buffer.pop_front();
            }
        }

        Self::increment(&self.requests, &key);
        self.total_requests.fetch_add(1, AtomicOrdering::Relaxed);

        if is_error {
            Self::increment(&self.errors, &key);
            self.total_errors.fetch_add(1, AtomicOrdering::Relaxed);
        }
    }

    fn increment(map: &DashMap<RouteKey, AtomicU64, FxBuildHasher>, key: &str) {
        if let Some(counter) = map.get(key) {
            counter.fetch_add(1, AtomicOrdering::Relaxed);
            return;
        }
        map.entry(key.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub fn snapshot(&self) -> RequestMetricsSnapshot {
        let mut durations: Vec<u64> = {
            let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
            buffer.iter().map(|r| r.duration_ms).collect()
        };

        let buffered_requests = durations.len();
        let average_response_time_ms = if durations.is_empty() {
            0.0
        } else {
            durations.iter().sum::<u64>() as f64 / durations.len() as f64
        };

        let p95_response_time_ms = if durations.is_empty() {
            0
        } else {
            durations.sort_unstable();
            let rank = ((durations.len() as f64) * 0.95).ceil() as usize;
            durations[rank.saturating_sub(1).min(durations.len() - 1)]
        };

        let total_requests = self.total_requests.load(AtomicOrdering::Relaxed);
        let total_errors = self.total_errors.load(AtomicOrdering::Relaxed);

        let mut routes: Vec<RouteMetrics> = self
            .requests
            .iter()
            .map(|entry| {
                let requests = entry.value().load(AtomicOrdering::Relaxed);
                let errors = self
                    .errors
                    .get(entry.key())
                    .map(|e| e.load(AtomicOrdering::Relaxed))
                    .unwrap_or(0);
                RouteMetrics {
                    route: entry.key().clone(),
                    requests,
                    errors,
                    error_rate: ratio(errors, requests),
                }
            })
            .collect();
        routes.sort_by(|a, b| b.requests.cmp(&a.requests).then_with(|| a.route.cmp(&b.route)));

        RequestMetricsSnapshot {
            total_requests,
            total_errors,
            error_rate: ratio(total_errors, total_requests),
            average_response_time_ms,
            p95_response_time_ms,
            buffered_requests,
            routes,
            system: self.resources.snapshot(),
        }
    }

    /// Trim the buffer to capacity and drop records older than `max_age`.
    pub fn sweep(&self, max_age: Duration) -> usize {
        let cutoff = self
            .clock
            .now_ms()
            .saturating_sub(max_age.as_millis() as u64);

        let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        let before = buffer.len();

        while buffer.len() > self.capacity {
            buffer.pop_front();
        }
        buffer.retain(|record| record.timestamp >= cutoff);

        let removed = before - buffer.len();
        if removed > 0 {
            debug!(removed, remaining = buffer.len(), "Swept request metrics buffer");
        }
        removed
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(AtomicOrdering::Relaxed)
    }

    pub fn buffered(&self) -> usize {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
