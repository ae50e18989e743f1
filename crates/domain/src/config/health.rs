use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthConfig {
    /// Seconds between background health evaluations.
    #[serde(default = "default_interval")]
    pub interval: u64,

    /// Per-check timeout in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_database_warn_ms")]
    pub database_warn_ms: u64,

    #[serde(default = "default_external_store_warn_ms")]
    pub external_store_warn_ms: u64,

    #[serde(default = "default_memory_warn_ratio")]
    pub memory_warn_ratio: f64,

    #[serde(default = "default_memory_fail_ratio")]
    pub memory_fail_ratio: f64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            timeout: default_timeout(),
            database_warn_ms: default_database_warn_ms(),
            external_store_warn_ms: default_external_store_warn_ms(),
            memory_warn_ratio: default_memory_warn_ratio(),
            memory_fail_ratio: default_memory_fail_ratio(),
        }
    }
}

fn default_interval() -> u64 {
    60
}

fn default_timeout() -> u64 {
    5000
}

fn default_database_warn_ms() -> u64 {
    1000
}

fn default_external_store_warn_ms() -> u64 {
    100
}

fn default_memory_warn_ratio() -> f64 {
    0.8
}

fn default_memory_fail_ratio() -> f64 {
    0.9
}
