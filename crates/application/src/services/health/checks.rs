use crate::ports::{DatabasePort, ExternalStorePort, ResourceProbe};
use async_trait::async_trait;
use ferrous_watch_domain::{CheckStatus, HealthCheckResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

/// A named probe folded into the overall health status.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self) -> HealthCheckResult;
}

/// `pass` strictly below `warn_after_ms`, `warn` otherwise.
pub fn classify_latency(elapsed_ms: u64, warn_after_ms: u64) -> CheckStatus {
    if elapsed_ms < warn_after_ms {
        CheckStatus::Pass
    } else {
        CheckStatus::Warn
    }
}

pub fn classify_memory_ratio(ratio: f64, warn_ratio: f64, fail_ratio: f64) -> CheckStatus {
    if ratio < warn_ratio {
        CheckStatus::Pass
    } else if ratio < fail_ratio {
        CheckStatus::Warn
    } else {
        CheckStatus::Fail
    }
}

pub struct DatabaseCheck {
    database: Arc<dyn DatabasePort>,
    warn_after_ms: u64,
}

impl DatabaseCheck {
    pub fn new(database: Arc<dyn DatabasePort>, warn_after_ms: u64) -> Self {
        Self {
            database,
            warn_after_ms,
        }
    }
}

#[async_trait]
impl HealthCheck for DatabaseCheck {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn run(&self) -> HealthCheckResult {
        let start = Instant::now();
        match self.database.ping().await {
            Ok(()) => {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                let status = classify_latency(elapsed_ms, self.warn_after_ms);
                let message = match status {
                    CheckStatus::Pass => "Database connection healthy".to_string(),
                    _ => format!("Database responding slowly ({}ms)", elapsed_ms),
                };
                HealthCheckResult::new(self.name(), status, message).with_response_time(elapsed_ms)
            }
            Err(e) => {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                warn!(error = %e, "Database health check failed");
                HealthCheckResult::fail(self.name(), e.to_string()).with_response_time(elapsed_ms)
            }
        }
    }
}

/// Pings the external key-value store; passes with "not configured" when there is none.
pub struct ExternalStoreCheck {
    store: Option<Arc<dyn ExternalStorePort>>,
    warn_after_ms: u64,
}

impl ExternalStoreCheck {
    pub fn new(store: Option<Arc<dyn ExternalStorePort>>, warn_after_ms: u64) -> Self {
        Self {
            store,
            warn_after_ms,
        }
    }
}

#[async_trait]
impl HealthCheck for ExternalStoreCheck {
    fn name(&self) -> &'static str {
        "external_store"
    }

    async fn run(&self) -> HealthCheckResult {
        let Some(store) = &self.store else {
            return HealthCheckResult::pass(self.name(), "not configured");
        };

        let start = Instant::now();
        match store.ping().await {
            Ok(()) => {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                let status = classify_latency(elapsed_ms, self.warn_after_ms);
                let message = match status {
                    CheckStatus::Pass => "External store responding".to_string(),
                    _ => format!("External store responding slowly ({}ms)", elapsed_ms),
                };
                HealthCheckResult::new(self.name(), status, message).with_response_time(elapsed_ms)
            }
            Err(e) => {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                warn!(error = %e, "External store health check failed");
                HealthCheckResult::fail(self.name(), e.to_string()).with_response_time(elapsed_ms)
            }
        }
    }
}

pub struct MemoryCheck {
    resources: Arc<dyn ResourceProbe>,
    warn_ratio: f64,
    fail_ratio: f64,
}

impl MemoryCheck {
    pub fn new(resources: Arc<dyn ResourceProbe>, warn_ratio: f64, fail_ratio: f64) -> Self {
        Self {
            resources,
            warn_ratio,
            fail_ratio,
        }
    }
}

#[async_trait]
impl HealthCheck for MemoryCheck {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn run(&self) -> HealthCheckResult {
        let snapshot = self.resources.snapshot();
        let ratio = snapshot.memory_ratio();
        let status = classify_memory_ratio(ratio, self.warn_ratio, self.fail_ratio);

        HealthCheckResult::new(
            self.name(),
            status,
            format!(
                "Memory usage {:.1}% ({} of {} bytes)",
                ratio * 100.0,
                snapshot.memory_used_bytes,
                snapshot.total_memory_bytes
            ),
        )
    }
}

/// Placeholder: disk usage is not measured yet and always passes.
pub struct DiskCheck;

#[async_trait]
impl HealthCheck for DiskCheck {
    fn name(&self) -> &'static str {
        "disk"
    }

    async fn run(&self) -> HealthCheckResult {
        HealthCheckResult::pass(self.name(), "Disk check not implemented")
    }
}
