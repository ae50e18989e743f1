use ferrous_watch_application::ports::DatabasePort;
use ferrous_watch_application::use_cases::{
    CheckHealthUseCase, ExportMetricsUseCase, GetSystemMetricsUseCase, OptimizeDatabaseUseCase,
};
use ferrous_watch_application::ObservabilityContext;
use ferrous_watch_domain::Config;
use std::sync::Arc;
use std::time::Duration;

/// Request pipeline knobs taken from configuration.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub request_timeout: Duration,
    pub cache_enabled: bool,
    pub default_cache_ttl: Duration,
    pub trust_proxy: bool,
    pub slow_request_threshold: Duration,
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            request_timeout: Duration::from_millis(config.server.request_timeout_ms),
            cache_enabled: config.cache.enabled,
            default_cache_ttl: Duration::from_secs(config.cache.default_ttl_secs),
            trust_proxy: config.server.trust_proxy,
            slow_request_threshold: Duration::from_millis(config.server.slow_request_threshold_ms),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub observability: ObservabilityContext,
    pub check_health: Arc<CheckHealthUseCase>,
    pub get_system_metrics: Arc<GetSystemMetricsUseCase>,
    pub export_metrics: Arc<ExportMetricsUseCase>,
    pub optimize_database: Arc<OptimizeDatabaseUseCase>,
    pub pipeline: Arc<PipelineSettings>,
}

impl AppState {
    pub fn new(
        observability: ObservabilityContext,
        database: Arc<dyn DatabasePort>,
        config: &Config,
    ) -> Self {
        let ctx = &observability;
        Self {
            check_health: Arc::new(CheckHealthUseCase::new(ctx.health.clone())),
            get_system_metrics: Arc::new(GetSystemMetricsUseCase::new(
                ctx.request_metrics.clone(),
                ctx.query_monitor.clone(),
                ctx.response_cache.clone(),
                ctx.clock.clone(),
            )),
            export_metrics: Arc::new(ExportMetricsUseCase::new(
                ctx.exporter.clone(),
                ctx.request_metrics.clone(),
                ctx.query_monitor.clone(),
                ctx.response_cache.clone(),
            )),
            optimize_database: Arc::new(OptimizeDatabaseUseCase::new(
                database,
                ctx.query_monitor.clone(),
                &config.monitoring,
            )),
            pipeline: Arc::new(PipelineSettings::from(config)),
            observability,
        }
    }
}
