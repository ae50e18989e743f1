use ferrous_watch_domain::Config;
use ferrous_watch_infrastructure::database::create_pool;
use sqlx::SqlitePool;
use tracing::{error, info};

pub async fn init_database(config: &Config) -> anyhow::Result<SqlitePool> {
    info!(path = %config.database.path, "Initializing database");

    let pool = create_pool(&config.database).await.map_err(|e| {
        error!(error = %e, "Failed to initialize database pool");
        anyhow::anyhow!(e)
    })?;

    info!(
        max_connections = config.database.max_connections,
        timeout_ms = config.database.timeout_ms,
        "Database initialized successfully"
    );

    Ok(pool)
}
