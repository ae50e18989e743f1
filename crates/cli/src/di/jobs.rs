use ferrous_watch_application::ObservabilityContext;
use ferrous_watch_domain::Config;
use ferrous_watch_jobs::{
    CacheMaintenanceJob, HealthMonitorJob, JobRunner, MetricsSweepJob, PerformanceReportJob,
    QueryMetricsRetentionJob,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub fn build_job_runner(
    config: &Config,
    context: &ObservabilityContext,
    shutdown: CancellationToken,
) -> JobRunner {
    let monitoring = &config.monitoring;

    JobRunner::new()
        .with_cache_maintenance(
            CacheMaintenanceJob::new(context.response_cache.clone(), context.rate_limits.clone())
                .with_intervals(
                    config.cache.cleanup_interval_secs,
                    config.rate_limit.sweep_interval_secs,
                ),
        )
        .with_metrics_sweep(
            MetricsSweepJob::new(
                context.request_metrics.clone(),
                Duration::from_secs(monitoring.request_retention_secs),
            )
            .with_interval(monitoring.sweep_interval_secs),
        )
        .with_performance_report(
            PerformanceReportJob::new(
                context.query_monitor.clone(),
                Duration::from_secs(monitoring.report_window_secs),
            )
            .with_interval(monitoring.report_interval_secs),
        )
        .with_query_metrics_retention(
            QueryMetricsRetentionJob::new(
                context.query_monitor.clone(),
                Duration::from_secs(monitoring.query_retention_secs),
            )
            .with_interval(monitoring.query_prune_interval_secs),
        )
        .with_health_monitor(
            HealthMonitorJob::new(context.health.clone()).with_interval(config.health.interval),
        )
        .with_shutdown_token(shutdown)
}
