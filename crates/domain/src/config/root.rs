use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::compression::CompressionConfig;
use super::database::DatabaseConfig;
use super::env::EnvOverrides;
use super::errors::ConfigError;
use super::external_store::ExternalStoreConfig;
use super::health::HealthConfig;
use super::logging::LoggingConfig;
use super::monitoring::MonitoringConfig;
use super::rate_limit::RateLimitConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "ferrous-watch.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-watch/config.toml";

/// Main configuration structure for Ferrous Watch
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// HTTP listener and request timeout
    #[serde(default)]
    pub server: ServerConfig,

    /// Response cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Rate limiting and slow-down policy
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Request and query metrics collection
    #[serde(default)]
    pub monitoring: MonitoringConfig,

    /// Health check thresholds and timeouts
    #[serde(default)]
    pub health: HealthConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub external_store: ExternalStoreConfig,

    #[serde(default)]
    pub compression: CompressionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order for the base file:
    /// 1. Explicitly provided path
    /// 2. ferrous-watch.toml in current directory
    /// 3. /etc/ferrous-watch/config.toml
    /// 4. Default configuration
    ///
    /// Environment overrides are applied on top, then command-line overrides.
    pub fn load(
        path: Option<&str>,
        env_overrides: EnvOverrides,
        cli_overrides: CliOverrides,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        env_overrides.apply(&mut config);
        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.request_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "server.request_timeout_ms cannot be 0".to_string(),
            ));
        }

        if self.cache.max_entries == 0 {
            return Err(ConfigError::Validation(
                "cache.max_entries cannot be 0".to_string(),
            ));
        }

        if !(self.cache.eviction_fraction > 0.0 && self.cache.eviction_fraction <= 1.0) {
            return Err(ConfigError::Validation(format!(
                "cache.eviction_fraction must be in (0, 1], got {}",
                self.cache.eviction_fraction
            )));
        }

        if self.rate_limit.window_ms == 0 || self.rate_limit.slow_down_window_ms == 0 {
            return Err(ConfigError::Validation(
                "rate limit windows cannot be 0".to_string(),
            ));
        }

        if self.rate_limit.max_requests == 0 {
            return Err(ConfigError::Validation(
                "rate_limit.max_requests cannot be 0".to_string(),
            ));
        }

        if self.monitoring.request_buffer_capacity == 0 || self.monitoring.query_buffer_capacity == 0
        {
            return Err(ConfigError::Validation(
                "metrics buffer capacities cannot be 0".to_string(),
            ));
        }

        let intervals = [
            ("cache.cleanup_interval_secs", self.cache.cleanup_interval_secs),
            ("rate_limit.sweep_interval_secs", self.rate_limit.sweep_interval_secs),
            ("monitoring.sweep_interval_secs", self.monitoring.sweep_interval_secs),
            ("monitoring.report_interval_secs", self.monitoring.report_interval_secs),
            (
                "monitoring.query_prune_interval_secs",
                self.monitoring.query_prune_interval_secs,
            ),
            ("health.interval", self.health.interval),
        ];
        if let Some((name, _)) = intervals.iter().find(|(_, secs)| *secs == 0) {
            return Err(ConfigError::Validation(format!("{} cannot be 0", name)));
        }

        if self.health.memory_warn_ratio >= self.health.memory_fail_ratio {
            return Err(ConfigError::Validation(format!(
                "health.memory_warn_ratio ({}) must be below health.memory_fail_ratio ({})",
                self.health.memory_warn_ratio, self.health.memory_fail_ratio
            )));
        }

        if self.compression.level > 9 {
            return Err(ConfigError::Validation(format!(
                "compression.level must be between 0 and 9, got {}",
                self.compression.level
            )));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}
