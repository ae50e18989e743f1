use ferrous_watch_application::services::QueryPerformanceMonitor;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct QueryMetricsRetentionJob {
    monitor: Arc<QueryPerformanceMonitor>,
    retention: Duration,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl QueryMetricsRetentionJob {
    pub fn new(monitor: Arc<QueryPerformanceMonitor>, retention: Duration) -> Self {
        Self {
            monitor,
            retention,
            interval_secs: 3600,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            retention_secs = self.retention.as_secs(),
            "Starting query metrics retention job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("QueryMetricsRetentionJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let removed = self.monitor.prune_older_than(self.retention);
                        if removed > 0 {
                            info!(removed, "Query metrics retention cleanup completed");
                        }
                    }
                }
            }
        });
    }
}
