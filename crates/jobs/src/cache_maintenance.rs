use ferrous_watch_application::services::{RateLimitPolicy, ResponseCache};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Purges expired response-cache entries and idle rate-limit keys.
pub struct CacheMaintenanceJob {
    cache: Arc<ResponseCache>,
    rate_limits: Arc<RateLimitPolicy>,
    cleanup_interval_secs: u64,
    sweep_interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheMaintenanceJob {
    pub fn new(cache: Arc<ResponseCache>, rate_limits: Arc<RateLimitPolicy>) -> Self {
        Self {
            cache,
            rate_limits,
            cleanup_interval_secs: DEFAULT_CLEANUP_INTERVAL_SECS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_intervals(mut self, cleanup_secs: u64, sweep_secs: u64) -> Self {
        self.cleanup_interval_secs = cleanup_secs;
        self.sweep_interval_secs = sweep_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            cleanup_interval_secs = self.cleanup_interval_secs,
            sweep_interval_secs = self.sweep_interval_secs,
            "Starting cache maintenance background jobs"
        );

        let cleanup_job = Arc::clone(&self);
        let cleanup_shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(cleanup_job.cleanup_interval_secs));
            loop {
                tokio::select! {
                    _ = cleanup_shutdown.cancelled() => {
                        info!("CacheMaintenanceJob (cleanup): shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let removed = cleanup_job.cache.purge_expired();
                        if removed > 0 {
                            info!(
                                removed,
                                cache_size = cleanup_job.cache.len(),
                                "Expired response cache entries purged"
                            );
                        }
                    }
                }
            }
        });

        let sweep_job = Arc::clone(&self);
        let sweep_shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(sweep_job.sweep_interval_secs));
            loop {
                tokio::select! {
                    _ = sweep_shutdown.cancelled() => {
                        info!("CacheMaintenanceJob (rate limit sweep): shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let removed = sweep_job.rate_limits.sweep();
                        debug!(removed, "Rate limit sweep completed");
                    }
                }
            }
        });
    }
}
