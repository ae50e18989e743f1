use async_trait::async_trait;
use ferrous_watch_domain::DomainError;

/// Port for the external key-value store the service depends on.
#[async_trait]
pub trait ExternalStorePort: Send + Sync {
    async fn ping(&self) -> Result<(), DomainError>;
}
