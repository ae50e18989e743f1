use ferrous_watch_jobs::{
    CacheMaintenanceJob, HealthMonitorJob, JobRunner, MetricsSweepJob, PerformanceReportJob,
    QueryMetricsRetentionJob,
};
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::{make_context, ManualClock, MockDatabase};

#[tokio::test]
async fn test_job_runner_empty_starts_cleanly() {
    JobRunner::new().start().await;
}

#[tokio::test]
async fn test_job_runner_with_all_jobs() {
    let database = Arc::new(MockDatabase::new());
    let ctx = make_context(Arc::new(ManualClock::new(0)), database.clone());
    let token = CancellationToken::new();

    JobRunner::new()
        .with_cache_maintenance(CacheMaintenanceJob::new(
            ctx.response_cache.clone(),
            ctx.rate_limits.clone(),
        ))
        .with_metrics_sweep(MetricsSweepJob::new(
            ctx.request_metrics.clone(),
            Duration::from_secs(3600),
        ))
        .with_performance_report(PerformanceReportJob::new(
            ctx.query_monitor.clone(),
            Duration::from_secs(600),
        ))
        .with_query_metrics_retention(QueryMetricsRetentionJob::new(
            ctx.query_monitor.clone(),
            Duration::from_secs(3600),
        ))
        .with_health_monitor(HealthMonitorJob::new(ctx.health.clone()))
        .with_shutdown_token(token.clone())
        .start()
        .await;

    sleep(Duration::from_millis(50)).await;
    assert_eq!(database.ping_count(), 1);

    token.cancel();
    sleep(Duration::from_millis(10)).await;
}
