use async_trait::async_trait;
use ferrous_watch_application::ports::{DatabasePort, TableStatistics};
use ferrous_watch_application::services::QueryPerformanceMonitor;
use ferrous_watch_domain::{DomainError, QueryAction, QueryCall};
use sqlx::SqlitePool;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Round-trip and table statistics against the service's SQLite database.
pub struct SqliteDatabaseProbe {
    pool: SqlitePool,
    monitor: Option<Arc<QueryPerformanceMonitor>>,
}

impl SqliteDatabaseProbe {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            monitor: None,
        }
    }

    /// Time every query this probe issues through `monitor`.
    pub fn with_query_monitor(mut self, monitor: Arc<QueryPerformanceMonitor>) -> Self {
        self.monitor = Some(monitor);
        self
    }

    async fn observed<T, F>(&self, call: QueryCall, query: F) -> Result<T, sqlx::Error>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match &self.monitor {
            Some(monitor) => monitor.observe(&call, query).await,
            None => query.await,
        }
    }

    async fn table_sizes(&self) -> Option<Vec<(String, String, i64)>> {
        // dbstat is only present when SQLite is built with SQLITE_ENABLE_DBSTAT_VTAB.
        let sizes = self
            .observed(
                QueryCall::new("dbstat", QueryAction::Aggregate),
                sqlx::query_as::<_, (String, String, i64)>(
                    "SELECT m.tbl_name, m.type, COALESCE(SUM(s.pgsize), 0)
                     FROM dbstat s JOIN sqlite_master m ON m.name = s.name
                     GROUP BY m.tbl_name, m.type",
                )
                .fetch_all(&self.pool),
            )
            .await;

        match sizes {
            Ok(rows) => Some(rows),
            Err(e) => {
                debug!(error = %e, "dbstat unavailable, table sizes reported as zero");
                None
            }
        }
    }
}

#[async_trait]
impl DatabasePort for SqliteDatabaseProbe {
    async fn ping(&self) -> Result<(), DomainError> {
        self.observed(
            QueryCall::new("sqlite", QueryAction::Raw),
            sqlx::query("SELECT 1").execute(&self.pool),
        )
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn table_statistics(&self) -> Result<Vec<TableStatistics>, DomainError> {
        let names: Vec<(String,)> = self
            .observed(
                QueryCall::new("sqlite_master", QueryAction::FindMany),
                sqlx::query_as(
                    "SELECT name FROM sqlite_master
                     WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
                     ORDER BY name",
                )
                .fetch_all(&self.pool),
            )
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        let sizes = self.table_sizes().await.unwrap_or_default();
        let mut tables = Vec::with_capacity(names.len());

        for (name,) in names {
            let quoted = format!("\"{}\"", name.replace('"', "\"\""));
            let sql = format!("SELECT COUNT(*) FROM {}", quoted);
            let (row_count,): (i64,) = self
                .observed(
                    QueryCall::new(name.clone(), QueryAction::Count),
                    sqlx::query_as(&sql).fetch_one(&self.pool),
                )
                .await
                .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

            let size_of = |kind: &str| -> u64 {
                sizes
                    .iter()
                    .filter(|(table, t, _)| table == &name && t == kind)
                    .map(|(_, _, bytes)| (*bytes).max(0) as u64)
                    .sum()
            };

            tables.push(TableStatistics {
                data_bytes: size_of("table"),
                index_bytes: size_of("index"),
                row_count: row_count.max(0) as u64,
                name,
            });
        }

        Ok(tables)
    }
}
