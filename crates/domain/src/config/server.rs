use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Requests still running after this many milliseconds are answered with 408.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Requests taking longer than this are logged as slow.
    #[serde(default = "default_slow_request_threshold_ms")]
    pub slow_request_threshold_ms: u64,

    /// Use the first `X-Forwarded-For` hop as the client address.
    #[serde(default)]
    pub trust_proxy: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            request_timeout_ms: default_request_timeout_ms(),
            slow_request_threshold_ms: default_slow_request_threshold_ms(),
            trust_proxy: false,
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_slow_request_threshold_ms() -> u64 {
    1_000
}
