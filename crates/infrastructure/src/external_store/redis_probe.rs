use async_trait::async_trait;
use ferrous_watch_application::ports::ExternalStorePort;
use ferrous_watch_domain::DomainError;
use redis::aio::MultiplexedConnection;
use redis::Client;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Pings the Redis instance the service uses as its shared key-value store.
pub struct RedisStoreProbe {
    client: Client,
    connection: Mutex<Option<MultiplexedConnection>>,
}

impl RedisStoreProbe {
    /// Parses the URL; no connection is opened until the first ping.
    pub fn new(url: &str) -> Result<Self, DomainError> {
        let client = Client::open(url)
            .map_err(|e| DomainError::ExternalStoreError(format!("invalid redis url: {}", e)))?;
        info!("Redis store probe configured");
        Ok(Self {
            client,
            connection: Mutex::new(None),
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection, DomainError> {
        let mut guard = self.connection.lock().await;
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| DomainError::ExternalStoreError(format!("connect failed: {}", e)))?;
        debug!("Redis connection established");
        *guard = Some(conn.clone());
        Ok(conn)
    }
}

#[async_trait]
impl ExternalStorePort for RedisStoreProbe {
    async fn ping(&self) -> Result<(), DomainError> {
        let mut conn = self.connection().await?;

        match redis::cmd("PING").query_async::<String>(&mut conn).await {
            Ok(pong) if pong == "PONG" => Ok(()),
            Ok(other) => Err(DomainError::ExternalStoreError(format!(
                "unexpected PING reply: {}",
                other
            ))),
            Err(e) => {
                *self.connection.lock().await = None;
                Err(DomainError::ExternalStoreError(format!("PING failed: {}", e)))
            }
        }
    }
}
