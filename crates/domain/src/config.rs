pub mod cache;
pub mod compression;
pub mod database;
pub mod env;
pub mod errors;
pub mod external_store;
pub mod health;
pub mod logging;
pub mod monitoring;
pub mod rate_limit;
pub mod root;
pub mod server;

pub use cache::CacheConfig;
pub use compression::CompressionConfig;
pub use database::DatabaseConfig;
pub use env::EnvOverrides;
pub use errors::ConfigError;
pub use external_store::ExternalStoreConfig;
pub use health::HealthConfig;
pub use logging::LoggingConfig;
pub use monitoring::MonitoringConfig;
pub use rate_limit::{RateLimitConfig, SLOW_DOWN_MAX_DELAY_MULTIPLIER, STRICT_LIMIT_DIVISOR};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
