use crate::ports::{Clock, DatabasePort, ExternalStorePort, ResourceProbe};
use crate::services::{
    DatabaseCheck, DiskCheck, ExternalStoreCheck, HealthAggregator, MemoryCheck,
    PrometheusExporter, QueryPerformanceMonitor, RateLimitPolicy, RequestMetricsCollector,
    ResponseCache,
};
use ferrous_watch_domain::Config;
use std::sync::Arc;
use std::time::Duration;

/// Every observability component, built once at startup and shared by
/// reference with the request pipeline, the inspection endpoints and the
/// background jobs.
#[derive(Clone)]
pub struct ObservabilityContext {
    pub clock: Arc<dyn Clock>,
    /// The database the health check pings.
    pub database: Arc<dyn DatabasePort>,
    pub response_cache: Arc<ResponseCache>,
    pub rate_limits: Arc<RateLimitPolicy>,
    pub request_metrics: Arc<RequestMetricsCollector>,
    pub query_monitor: Arc<QueryPerformanceMonitor>,
    pub health: Arc<HealthAggregator>,
    pub exporter: Arc<PrometheusExporter>,
}

impl ObservabilityContext {
    pub fn new(
        config: &Config,
        clock: Arc<dyn Clock>,
        resources: Arc<dyn ResourceProbe>,
        database: Arc<dyn DatabasePort>,
        external_store: Option<Arc<dyn ExternalStorePort>>,
    ) -> Self {
        Self::with_database(config, clock, resources, external_store, move |_| database)
    }

    /// Like [`ObservabilityContext::new`], but the database adapter is built
    /// from the context's query monitor so its calls are timed.
    pub fn with_database<F>(
        config: &Config,
        clock: Arc<dyn Clock>,
        resources: Arc<dyn ResourceProbe>,
        external_store: Option<Arc<dyn ExternalStorePort>>,
        database: F,
    ) -> Self
    where
        F: FnOnce(Arc<QueryPerformanceMonitor>) -> Arc<dyn DatabasePort>,
    {
        let query_monitor = Arc::new(QueryPerformanceMonitor::new(
            (&config.monitoring).into(),
            clock.clone(),
        ));
        let database = database(query_monitor.clone());

        let health = HealthAggregator::new(Duration::from_millis(config.health.timeout))
            .with_check(Arc::new(DatabaseCheck::new(
                database.clone(),
                config.health.database_warn_ms,
            )))
            .with_check(Arc::new(ExternalStoreCheck::new(
                external_store,
                config.health.external_store_warn_ms,
            )))
            .with_check(Arc::new(MemoryCheck::new(
                resources.clone(),
                config.health.memory_warn_ratio,
                config.health.memory_fail_ratio,
            )))
            .with_check(Arc::new(DiskCheck));

        Self {
            response_cache: Arc::new(ResponseCache::new((&config.cache).into(), clock.clone())),
            rate_limits: Arc::new(RateLimitPolicy::from_config(
                &config.rate_limit,
                clock.clone(),
            )),
            request_metrics: Arc::new(RequestMetricsCollector::new(
                config.monitoring.request_buffer_capacity,
                clock.clone(),
                resources,
            )),
            query_monitor,
            health: Arc::new(health),
            exporter: Arc::new(PrometheusExporter::default()),
            database,
            clock,
        }
    }
}
