use serde::{Deserialize, Serialize};

/// The strict limiter allows `max_requests / STRICT_LIMIT_DIVISOR` per window.
pub const STRICT_LIMIT_DIVISOR: u32 = 5;

/// Slow-down delays never exceed `delay_ms * SLOW_DOWN_MAX_DELAY_MULTIPLIER`.
pub const SLOW_DOWN_MAX_DELAY_MULTIPLIER: u64 = 10;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Paths under this prefix bypass the standard limiter.
    #[serde(default = "default_health_path_prefix")]
    pub health_path_prefix: String,

    #[serde(default = "default_window_ms")]
    pub slow_down_window_ms: u64,

    #[serde(default = "default_slow_down_delay_after")]
    pub slow_down_delay_after: u32,

    #[serde(default = "default_slow_down_delay_ms")]
    pub slow_down_delay_ms: u64,

    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl RateLimitConfig {
    pub fn strict_max_requests(&self) -> u32 {
        (self.max_requests / STRICT_LIMIT_DIVISOR).max(1)
    }

    pub fn slow_down_max_delay_ms(&self) -> u64 {
        self.slow_down_delay_ms
            .saturating_mul(SLOW_DOWN_MAX_DELAY_MULTIPLIER)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            max_requests: default_max_requests(),
            health_path_prefix: default_health_path_prefix(),
            slow_down_window_ms: default_window_ms(),
            slow_down_delay_after: default_slow_down_delay_after(),
            slow_down_delay_ms: default_slow_down_delay_ms(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_window_ms() -> u64 {
    15 * 60 * 1000
}

fn default_max_requests() -> u32 {
    100
}

fn default_health_path_prefix() -> String {
    "/health".to_string()
}

fn default_slow_down_delay_after() -> u32 {
    50
}

fn default_slow_down_delay_ms() -> u64 {
    500
}

fn default_sweep_interval_secs() -> u64 {
    60
}
