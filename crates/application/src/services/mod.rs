pub mod health;
pub mod metrics_exporter;
pub mod query_advisor;
pub mod query_monitor;
pub mod rate_limiter;
pub mod request_metrics;
pub mod response_cache;

pub use health::{
    DatabaseCheck, DiskCheck, ExternalStoreCheck, HealthAggregator, HealthCheck, HealthReport,
    MemoryCheck,
};
pub use metrics_exporter::PrometheusExporter;
pub use query_advisor::QuerySuggestion;
pub use query_monitor::{
    QueryMonitorSettings, QueryPerformanceMonitor, QueryPerformanceReport, QueryStatsSnapshot,
    QueryTimeShare,
};
pub use rate_limiter::{
    RateLimitDecision, RateLimitPolicy, SlidingWindowLimiter, SlowDownPolicy, SlowDownTicket,
};
pub use request_metrics::{RequestMetricsCollector, RequestMetricsSnapshot, RouteMetrics};
pub use response_cache::{
    response_cache_key, CachedResponse, ResponseCache, ResponseCacheSettings, ResponseCacheStats,
};
