use ferrous_watch_application::services::RequestMetricsCollector;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub struct MetricsSweepJob {
    metrics: Arc<RequestMetricsCollector>,
    retention: Duration,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl MetricsSweepJob {
    pub fn new(metrics: Arc<RequestMetricsCollector>, retention: Duration) -> Self {
        Self {
            metrics,
            retention,
            interval_secs: 300,
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
            interval_secs = self.interval_secs,
            retention_secs = self.retention.as_secs(),
            "Starting request metrics sweep job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("MetricsSweepJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let removed = self.metrics.sweep(self.retention);
                        debug!(removed, buffered = self.metrics.buffered(), "Request metrics sweep completed");
                    }
                }
            }
        });
    }
}
