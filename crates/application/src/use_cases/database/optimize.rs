use crate::ports::{DatabasePort, TableStatistics};
use crate::services::QueryPerformanceMonitor;
use ferrous_watch_domain::config::MonitoringConfig;
use ferrous_watch_domain::DomainError;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseOptimizationReport {
    pub tables: Vec<TableStatistics>,
    pub suggestions: Vec<String>,
}

/// Table-level analysis combining row counts and storage sizes with the
/// slow-query set.
pub struct OptimizeDatabaseUseCase {
    database: Arc<dyn DatabasePort>,
    query_monitor: Arc<QueryPerformanceMonitor>,
    large_table_rows: u64,
    index_overhead_ratio: f64,
}

impl OptimizeDatabaseUseCase {
    pub fn new(
        database: Arc<dyn DatabasePort>,
        query_monitor: Arc<QueryPerformanceMonitor>,
        config: &MonitoringConfig,
    ) -> Self {
        Self {
            database,
            query_monitor,
            large_table_rows: config.large_table_rows,
            index_overhead_ratio: config.index_overhead_ratio,
        }
    }

    pub async fn execute(&self) -> Result<DatabaseOptimizationReport, DomainError> {
        let tables = self.database.table_statistics().await?;
        let slow_keys = self.query_monitor.slow_query_keys();
        let mut suggestions = Vec::new();

        for table in &tables {
            if table.row_count > self.large_table_rows
                && slow_keys.iter().any(|key| references_table(key, &table.name))
            {
                suggestions.push(format!(
                    "Table {} has {} rows and slow queries; consider adding indexes on frequently filtered columns",
                    table.name, table.row_count
                ));
            }

            if let Some(ratio) = table.index_ratio() {
                if ratio > self.index_overhead_ratio {
                    suggestions.push(format!(
                        "Table {} index storage is {:.0}% of data storage; review unused indexes",
                        table.name,
                        ratio * 100.0
                    ));
                }
            }
        }

        info!(
            tables = tables.len(),
            suggestions = suggestions.len(),
            "Database optimization analysis complete"
        );

        Ok(DatabaseOptimizationReport {
            tables,
            suggestions,
        })
    }
}

/// Whether a `Model.action` key refers to `table`, allowing for a plural table name.
fn references_table(key: &str, table: &str) -> bool {
    let key = key.to_ascii_lowercase();
    let table = table.to_ascii_lowercase();
    if key.contains(&table) {
        return true;
    }
    let model = key.split_once('.').map(|(m, _)| m).unwrap_or(&key);
    table == format!("{}s", model)
}
