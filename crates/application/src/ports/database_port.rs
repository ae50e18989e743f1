use async_trait::async_trait;
use ferrous_watch_domain::DomainError;
use serde::Serialize;

/// Size figures for one base table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableStatistics {
    pub name: String,
    pub row_count: u64,
    pub data_bytes: u64,
    pub index_bytes: u64,
}

impl TableStatistics {
    /// Index storage as a fraction of data storage; `None` when data size is unknown.
    pub fn index_ratio(&self) -> Option<f64> {
        if self.data_bytes == 0 {
            None
        } else {
            Some(self.index_bytes as f64 / self.data_bytes as f64)
        }
    }
}

/// Port for the primary database connection used by health checks and table analysis.
#[async_trait]
pub trait DatabasePort: Send + Sync {
    /// Issue a trivial round-trip query.
    async fn ping(&self) -> Result<(), DomainError>;

    /// List every base table with its row count and storage sizes.
    async fn table_statistics(&self) -> Result<Vec<TableStatistics>, DomainError>;
}
