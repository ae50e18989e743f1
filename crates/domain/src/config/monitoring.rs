use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitoringConfig {
    #[serde(default = "default_slow_query_threshold_ms")]
    pub slow_query_threshold_ms: u64,

    #[serde(default = "default_very_slow_query_threshold_ms")]
    pub very_slow_query_threshold_ms: u64,

    #[serde(default = "default_buffer_capacity")]
    pub request_buffer_capacity: usize,

    #[serde(default = "default_buffer_capacity")]
    pub query_buffer_capacity: usize,

    /// Request records older than this are dropped by the periodic sweep.
    #[serde(default = "default_retention_secs")]
    pub request_retention_secs: u64,

    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    #[serde(default = "default_report_interval_secs")]
    pub report_interval_secs: u64,

    /// How far back the performance report looks.
    #[serde(default = "default_report_interval_secs")]
    pub report_window_secs: u64,

    #[serde(default = "default_retention_secs")]
    pub query_retention_secs: u64,

    #[serde(default = "default_query_prune_interval_secs")]
    pub query_prune_interval_secs: u64,

    /// Tables above this row count are candidates for index suggestions.
    #[serde(default = "default_large_table_rows")]
    pub large_table_rows: u64,

    /// Index storage above this fraction of data storage flags a table for review.
    #[serde(default = "default_index_overhead_ratio")]
    pub index_overhead_ratio: f64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            slow_query_threshold_ms: default_slow_query_threshold_ms(),
            very_slow_query_threshold_ms: default_very_slow_query_threshold_ms(),
            request_buffer_capacity: default_buffer_capacity(),
            query_buffer_capacity: default_buffer_capacity(),
            request_retention_secs: default_retention_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            report_interval_secs: default_report_interval_secs(),
            report_window_secs: default_report_interval_secs(),
            query_retention_secs: default_retention_secs(),
            query_prune_interval_secs: default_query_prune_interval_secs(),
            large_table_rows: default_large_table_rows(),
            index_overhead_ratio: default_index_overhead_ratio(),
        }
    }
}

fn default_slow_query_threshold_ms() -> u64 {
    1000
}

fn default_very_slow_query_threshold_ms() -> u64 {
    5000
}

fn default_buffer_capacity() -> usize {
    1000
}

fn default_retention_secs() -> u64 {
    3600
}

fn default_sweep_interval_secs() -> u64 {
    300
}

fn default_report_interval_secs() -> u64 {
    600
}

fn default_query_prune_interval_secs() -> u64 {
    3600
}

fn default_large_table_rows() -> u64 {
    10_000
}

fn default_index_overhead_ratio() -> f64 {
    0.3
}
