use ferrous_watch_application::services::QueryPerformanceMonitor;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Logs a structured summary of recent query performance.
pub struct PerformanceReportJob {
    monitor: Arc<QueryPerformanceMonitor>,
    window: Duration,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl PerformanceReportJob {
    pub fn new(monitor: Arc<QueryPerformanceMonitor>, window: Duration) -> Self {
        Self {
            monitor,
            window,
            interval_secs: 600,
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
            window_secs = self.window.as_secs(),
            "Starting query performance report job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            // The first tick completes immediately; there is nothing to report yet.
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("PerformanceReportJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let report = self.monitor.performance_report(self.window);
                        if report.total_queries == 0 {
                            continue;
                        }
                        let top: Vec<String> = report
                            .top_by_total_time
                            .iter()
                            .map(|t| format!("{}={}ms/{}", t.model_action, t.total_duration_ms, t.count))
                            .collect();
                        info!(
                            window_secs = report.window_secs,
                            total_queries = report.total_queries,
                            average_duration_ms = report.average_duration_ms,
                            max_duration_ms = report.max_duration_ms,
                            slow_queries = report.slow_queries,
                            slow_query_percentage = report.slow_query_percentage,
                            top_queries = ?top,
                            "Query performance report"
                        );
                    }
                }
            }
        });
    }
}
