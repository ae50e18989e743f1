use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: u64,

    /// Entry count at which a batch eviction runs before the next insert.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Fraction of entries (oldest first) dropped by one batch eviction.
    #[serde(default = "default_eviction_fraction")]
    pub eviction_fraction: f64,

    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
            eviction_fraction: default_eviction_fraction(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_ttl_secs() -> u64 {
    300
}

fn default_max_entries() -> usize {
    1000
}

fn default_eviction_fraction() -> f64 {
    0.1
}

fn default_cleanup_interval_secs() -> u64 {
    60
}
