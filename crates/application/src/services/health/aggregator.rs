use super::checks::HealthCheck;
use chrono::{DateTime, Utc};
use ferrous_watch_domain::{HealthCheckResult, OverallStatus};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: OverallStatus,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub version: String,
    pub response_time_ms: u64,
    pub checks: Vec<HealthCheckResult>,
}

/// Runs every registered check concurrently, each under its own timeout, and
/// folds the outcomes into one status. Every call is a fresh evaluation.
pub struct HealthAggregator {
    checks: Vec<Arc<dyn HealthCheck>>,
    check_timeout: Duration,
    started_at: Instant,
    version: String,
}

impl HealthAggregator {
    pub fn new(check_timeout: Duration) -> Self {
        Self {
            checks: Vec::new(),
            check_timeout,
            started_at: Instant::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn with_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.checks.push(check);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub async fn check(&self) -> HealthReport {
        let start = Instant::now();
        let timeout = self.check_timeout;

        let checks = join_all(self.checks.iter().map(|check| async move {
            match tokio::time::timeout(timeout, check.run()).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(check = check.name(), timeout_ms = timeout.as_millis() as u64, "Health check timed out");
                    HealthCheckResult::fail(
                        check.name(),
                        format!("Check timed out after {}ms", timeout.as_millis()),
                    )
                    .with_response_time(timeout.as_millis() as u64)
                }
            }
        }))
        .await;

        let status = OverallStatus::aggregate(checks.iter());
        debug!(status = %status, checks = checks.len(), "Health evaluated");

        HealthReport {
            status,
            timestamp: Utc::now(),
            uptime_seconds: self.started_at.elapsed().as_secs(),
            version: self.version.clone(),
            response_time_ms: start.elapsed().as_millis() as u64,
            checks,
        }
    }

    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }
}
