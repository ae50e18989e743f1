use crate::ports::Clock;
use crate::services::{
    QueryPerformanceMonitor, QueryStatsSnapshot, RequestMetricsCollector, RequestMetricsSnapshot,
    ResponseCache, ResponseCacheStats,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct SystemMetrics {
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    #[serde(flatten)]
    pub requests: RequestMetricsSnapshot,
    pub database: QueryStatsSnapshot,
    pub cache: ResponseCacheStats,
}

pub struct GetSystemMetricsUseCase {
    request_metrics: Arc<RequestMetricsCollector>,
    query_monitor: Arc<QueryPerformanceMonitor>,
    response_cache: Arc<ResponseCache>,
    clock: Arc<dyn Clock>,
}

impl GetSystemMetricsUseCase {
    pub fn new(
        request_metrics: Arc<RequestMetricsCollector>,
        query_monitor: Arc<QueryPerformanceMonitor>,
        response_cache: Arc<ResponseCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            request_metrics,
            query_monitor,
            response_cache,
            clock,
        }
    }

    pub fn execute(&self) -> SystemMetrics {
        SystemMetrics {
            timestamp: self.clock.now_ms(),
            requests: self.request_metrics.snapshot(),
            database: self.query_monitor.stats(),
            cache: self.response_cache.stats(),
        }
    }
}
