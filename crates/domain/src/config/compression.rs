use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompressionConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Bodies smaller than this many bytes are sent uncompressed.
    #[serde(default = "default_threshold")]
    pub threshold: u16,

    #[serde(default = "default_level")]
    pub level: u8,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: default_threshold(),
            level: default_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_threshold() -> u16 {
    1024
}

fn default_level() -> u8 {
    6
}
