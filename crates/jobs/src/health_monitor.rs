use ferrous_watch_application::services::HealthAggregator;
use ferrous_watch_domain::{CheckStatus, OverallStatus};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Re-evaluates health on a timer and logs status transitions.
pub struct HealthMonitorJob {
    aggregator: Arc<HealthAggregator>,
    interval_secs: u64,
    last_status: Mutex<Option<OverallStatus>>,
    shutdown: CancellationToken,
}

impl HealthMonitorJob {
    pub fn new(aggregator: Arc<HealthAggregator>) -> Self {
        Self {
            aggregator,
            interval_secs: 60,
            last_status: Mutex::new(None),
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

    pub fn last_status(&self) -> Option<OverallStatus> {
        *self.last_status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting health monitor job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("HealthMonitorJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let report = self.aggregator.check().await;
                        let previous = self
                            .last_status
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .replace(report.status);

                        let failing: Vec<&str> = report
                            .checks
                            .iter()
                            .filter(|c| c.status != CheckStatus::Pass)
                            .map(|c| c.name.as_str())
                            .collect();

                        match previous {
                            Some(prev) if prev == report.status => {
                                debug!(status = %report.status, "Health unchanged");
                            }
                            _ if report.status == OverallStatus::Healthy => {
                                info!(status = %report.status, previous = ?previous, "Health status changed");
                            }
                            _ => {
                                warn!(
                                    status = %report.status,
                                    previous = ?previous,
                                    checks = ?failing,
                                    "Health status changed"
                                );
                            }
                        }
                    }
                }
            }
        });
    }
}
