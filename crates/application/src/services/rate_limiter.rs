use crate::ports::Clock;
use dashmap::DashMap;
use ferrous_watch_domain::config::RateLimitConfig;
use rustc_hash::FxBuildHasher;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Per-key request timestamps inside a sliding window.
struct HitLog {
    hits: DashMap<String, VecDeque<u64>, FxBuildHasher>,
    window_ms: u64,
}

impl HitLog {
    fn new(window_ms: u64) -> Self {
        Self {
            hits: DashMap::with_hasher(FxBuildHasher),
            window_ms,
        }
    }

    fn prune(log: &mut VecDeque<u64>, now_ms: u64, window_ms: u64) {
        while let Some(&oldest) = log.front() {
            if now_ms.saturating_sub(oldest) >= window_ms {
                log.pop_front();
            } else {
                break;
            }
        }
    }

    fn remove_hit(&self, key: &str, timestamp: u64) {
        if let Some(mut log) = self.hits.get_mut(key) {
            if let Some(pos) = log.iter().rposition(|&t| t == timestamp) {
                log.remove(pos);
            }
        }
    }

    /// Drop keys whose every hit has left the window.
    fn sweep(&self, now_ms: u64) -> usize {
        let before = self.hits.len();
        let window_ms = self.window_ms;
        self.hits.retain(|_, log| {
            Self::prune(log, now_ms, window_ms);
            !log.is_empty()
        });
        before.saturating_sub(self.hits.len())
    }
}

/// Outcome of a limiter check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Hits currently inside the window, including this one when allowed.
    pub count: u32,
    /// Time until the oldest hit in the window expires.
    pub reset_after_ms: u64,
}

impl RateLimitDecision {
    /// Whole seconds a rejected client should wait, never less than one.
    pub fn retry_after_secs(&self) -> u64 {
        self.reset_after_ms.div_ceil(1000).max(1)
    }
}

/// Sliding-window log limiter: at most `limit` accepted hits per key in any
/// window-length span. Rejected requests are not recorded.
pub struct SlidingWindowLimiter {
    log: HitLog,
    limit: u32,
    clock: Arc<dyn Clock>,
}

impl SlidingWindowLimiter {
    pub fn new(limit: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            log: HitLog::new(window.as_millis() as u64),
            limit,
            clock,
        }
    }

    pub fn check(&self, key: &str) -> RateLimitDecision {
        let now_ms = self.clock.now_ms();
        let window_ms = self.log.window_ms;

        let mut log = self.log.hits.entry(key.to_string()).or_default();
        HitLog::prune(&mut log, now_ms, window_ms);

        let allowed = (log.len() as u32) < self.limit;
        if allowed {
            log.push_back(now_ms);
        }

        let count = log.len() as u32;
        let reset_after_ms = log
            .front()
            .map(|&oldest| (oldest + window_ms).saturating_sub(now_ms))
            .unwrap_or(window_ms);

        RateLimitDecision {
            allowed,
            limit: self.limit,
            remaining: self.limit.saturating_sub(count),
            count,
            reset_after_ms,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn tracked_keys(&self) -> usize {
        self.log.hits.len()
    }

    pub fn sweep(&self) -> usize {
        self.log.sweep(self.clock.now_ms())
    }
}

/// A request admitted by the slow-down policy. Hand it back through
/// [`SlowDownPolicy::release_failed`] when the response turns out to be a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlowDownTicket {
    pub key: String,
    pub timestamp: u64,
    pub delay: Duration,
}

/// Adds a linearly growing delay once a key exceeds `delay_after` requests in
/// the window, capped at `max_delay`.
pub struct SlowDownPolicy {
    log: HitLog,
    delay_after: u32,
    delay_step: Duration,
    max_delay: Duration,
    clock: Arc<dyn Clock>,
}

impl SlowDownPolicy {
    pub fn new(
        window: Duration,
        delay_after: u32,
        delay_step: Duration,
        max_delay: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            log: HitLog::new(window.as_millis() as u64),
            delay_after,
            delay_step,
            max_delay,
            clock,
        }
    }

    pub fn acquire(&self, key: &str) -> SlowDownTicket {
        let now_ms = self.clock.now_ms();
        let window_ms = self.log.window_ms;

        let count = {
            let mut log = self.log.hits.entry(key.to_string()).or_default();
            HitLog::prune(&mut log, now_ms, window_ms);
            log.push_back(now_ms);
            log.len() as u32
        };

        SlowDownTicket {
            key: key.to_string(),
            timestamp: now_ms,
            delay: self.delay_for(count),
        }
    }

    /// Forget a hit whose response failed so it does not count towards the delay.
    pub fn release_failed(&self, ticket: &SlowDownTicket) {
        self.log.remove_hit(&ticket.key, ticket.timestamp);
    }

    pub fn delay_for(&self, count: u32) -> Duration {
        if count <= self.delay_after {
            return Duration::ZERO;
        }
        let over = count - self.delay_after;
        self.delay_step.saturating_mul(over).min(self.max_delay)
    }

    pub fn sweep(&self) -> usize {
        self.log.sweep(self.clock.now_ms())
    }
}

/// The standard, strict and slow-down policies sharing one clock.
pub struct RateLimitPolicy {
    pub standard: SlidingWindowLimiter,
    pub strict: SlidingWindowLimiter,
    pub slow_down: SlowDownPolicy,
    health_path_prefix: String,
}

impl RateLimitPolicy {
    pub fn from_config(config: &RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        let window = Duration::from_millis(config.window_ms);
        Self {
            standard: SlidingWindowLimiter::new(config.max_requests, window, clock.clone()),
            strict: SlidingWindowLimiter::new(config.strict_max_requests(), window, clock.clone()),
            slow_down: SlowDownPolicy::new(
                Duration::from_millis(config.slow_down_window_ms),
                config.slow_down_delay_after,
                Duration::from_millis(config.slow_down_delay_ms),
                Duration::from_millis(config.slow_down_max_delay_ms()),
                clock,
            ),
            health_path_prefix: config.health_path_prefix.clone(),
        }
    }

    /// Paths the standard limiter never counts.
    pub fn is_exempt(&self, path: &str) -> bool {
        !self.health_path_prefix.is_empty() && path.starts_with(&self.health_path_prefix)
    }

    pub fn sweep(&self) -> usize {
        let removed = self.standard.sweep() + self.strict.sweep() + self.slow_down.sweep();
        if removed > 0 {
            debug!(removed, "Swept idle rate limit keys");
        }
        removed
    }
}
