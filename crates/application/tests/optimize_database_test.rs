use ferrous_watch_application::ports::TableStatistics;
use ferrous_watch_application::services::{QueryMonitorSettings, QueryPerformanceMonitor};
use ferrous_watch_application::use_cases::OptimizeDatabaseUseCase;
use ferrous_watch_domain::config::MonitoringConfig;
use ferrous_watch_domain::{QueryAction, QueryCall};
use std::sync::Arc;

mod helpers;
use helpers::{ManualClock, MockDatabase};

fn table(name: &str, rows: u64, data: u64, index: u64) -> TableStatistics {
    TableStatistics {
        name: name.to_string(),
        row_count: rows,
        data_bytes: data,
        index_bytes: index,
    }
}

fn monitor() -> Arc<QueryPerformanceMonitor> {
    Arc::new(QueryPerformanceMonitor::new(
        QueryMonitorSettings {
            slow_threshold_ms: 1_000,
            very_slow_threshold_ms: 5_000,
            capacity: 100,
        },
        Arc::new(ManualClock::new(0)),
    ))
}

#[tokio::test]
async fn test_large_table_with_slow_query_gets_index_suggestion() {
    let database = Arc::new(MockDatabase::with_tables(vec![
        table("agents", 20_000, 1_000, 100),
        table("datasets", 50_000, 1_000, 100),
        table("projects", 500, 1_000, 100),
    ]));
    let monitor = monitor();
    monitor.record(&QueryCall::new("Agent", QueryAction::FindMany), 1_500, false);
    monitor.record(&QueryCall::new("Project", QueryAction::FindMany), 1_500, false);

    let use_case = OptimizeDatabaseUseCase::new(database, monitor, &MonitoringConfig::default());
    let report = use_case.execute().await.unwrap();

    assert_eq!(report.tables.len(), 3);
    assert_eq!(report.suggestions.len(), 1);
    assert!(report.suggestions[0].contains("agents"));
}

#[tokio::test]
async fn test_heavy_indexes_are_flagged() {
    let database = Arc::new(MockDatabase::with_tables(vec![
        table("events", 10, 1_000, 400),
        table("users", 10, 1_000, 300),
        table("empty", 0, 0, 4_096),
    ]));

    let use_case = OptimizeDatabaseUseCase::new(database, monitor(), &MonitoringConfig::default());
    let report = use_case.execute().await.unwrap();

    assert_eq!(report.suggestions.len(), 1);
    assert!(report.suggestions[0].contains("events"));
}

#[tokio::test]
async fn test_database_error_is_propagated() {
    let database = Arc::new(MockDatabase::new());
    database.set_should_fail(true).await;

    let use_case = OptimizeDatabaseUseCase::new(database, monitor(), &MonitoringConfig::default());

    assert!(use_case.execute().await.is_err());
}
