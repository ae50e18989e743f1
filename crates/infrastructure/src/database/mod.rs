mod sqlite_probe;

pub use sqlite_probe::SqliteDatabaseProbe;

use ferrous_watch_domain::config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let timeout = Duration::from_millis(config.timeout_ms);
    let options = SqliteConnectOptions::from_str(&config.url())?
        .create_if_missing(true)
        .busy_timeout(timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(timeout)
        .connect_with(options)
        .await?;

    info!(path = %config.path, max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}
