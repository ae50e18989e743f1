use crate::{
    CacheMaintenanceJob, HealthMonitorJob, MetricsSweepJob, PerformanceReportJob,
    QueryMetricsRetentionJob,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub trait SpawnableJob: Send + Sync + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()>;
}

macro_rules! impl_spawnable_job {
    ($t:ty) => {
        impl SpawnableJob for $t {
            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
                tokio::spawn(async move { self.start().await })
            }
        }
    };
}

impl_spawnable_job!(CacheMaintenanceJob);
impl_spawnable_job!(MetricsSweepJob);
impl_spawnable_job!(PerformanceReportJob);
impl_spawnable_job!(QueryMetricsRetentionJob);
impl_spawnable_job!(HealthMonitorJob);

fn spawn_job<J: SpawnableJob>(job: Option<J>, shutdown: &Option<CancellationToken>) {
    if let Some(job) = job {
        let job = match shutdown {
            Some(token) => job.with_cancellation(token.clone()),
            None => job,
        };
        Arc::new(job).start_job();
    }
}

pub struct JobRunner {
    cache_maintenance: Option<CacheMaintenanceJob>,
    metrics_sweep: Option<MetricsSweepJob>,
    performance_report: Option<PerformanceReportJob>,
    query_metrics_retention: Option<QueryMetricsRetentionJob>,
    health_monitor: Option<HealthMonitorJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            cache_maintenance: None,
            metrics_sweep: None,
            performance_report: None,
            query_metrics_retention: None,
            health_monitor: None,
            shutdown: None,
        }
    }

    pub fn with_cache_maintenance(mut self, job: CacheMaintenanceJob) -> Self {
        self.cache_maintenance = Some(job);
        self
    }

    pub fn with_metrics_sweep(mut self, job: MetricsSweepJob) -> Self {
        self.metrics_sweep = Some(job);
        self
    }

    pub fn with_performance_report(mut self, job: PerformanceReportJob) -> Self {
        self.performance_report = Some(job);
        self
    }

    pub fn with_query_metrics_retention(mut self, job: QueryMetricsRetentionJob) -> Self {
        self.query_metrics_retention = Some(job);
        self
    }

    pub fn with_health_monitor(mut self, job: HealthMonitorJob) -> Self {
        self.health_monitor = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self) {
        info!("Starting background job runner");

        spawn_job(self.cache_maintenance, &self.shutdown);
        spawn_job(self.metrics_sweep, &self.shutdown);
        spawn_job(self.performance_report, &self.shutdown);
        spawn_job(self.query_metrics_retention, &self.shutdown);
        spawn_job(self.health_monitor, &self.shutdown);

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
