use async_trait::async_trait;
use ferrous_watch_application::ports::ExternalStorePort;
use ferrous_watch_application::services::{
    DatabaseCheck, DiskCheck, ExternalStoreCheck, HealthAggregator, HealthCheck, MemoryCheck,
};
use ferrous_watch_domain::{CheckStatus, HealthCheckResult, OverallStatus};
use std::sync::Arc;
use std::time::Duration;

mod helpers;
use helpers::{FixedResources, MockDatabase, MockExternalStore};

struct StaticCheck {
    name: &'static str,
    status: CheckStatus,
}

#[async_trait]
impl HealthCheck for StaticCheck {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(&self) -> HealthCheckResult {
        HealthCheckResult::new(self.name, self.status, "static")
    }
}

struct HangingCheck;

#[async_trait]
impl HealthCheck for HangingCheck {
    fn name(&self) -> &'static str {
        "hanging"
    }

    async fn run(&self) -> HealthCheckResult {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        HealthCheckResult::pass("hanging", "never")
    }
}

fn full_battery(
    database: Arc<MockDatabase>,
    store: Option<Arc<MockExternalStore>>,
    resources: Arc<FixedResources>,
) -> HealthAggregator {
    HealthAggregator::new(Duration::from_millis(500))
        .with_check(Arc::new(DatabaseCheck::new(database, 1_000)))
        .with_check(Arc::new(ExternalStoreCheck::new(
            store.map(|s| s as Arc<dyn ExternalStorePort>),
            100,
        )))
        .with_check(Arc::new(MemoryCheck::new(resources, 0.8, 0.9)))
        .with_check(Arc::new(DiskCheck))
}

#[tokio::test]
async fn test_every_outcome_combination_across_the_check_set() {
    let statuses = [CheckStatus::Pass, CheckStatus::Warn, CheckStatus::Fail];
    let names = ["database", "external_store", "memory", "disk"];

    for combination in 0..statuses.len().pow(names.len() as u32) {
        let mut rest = combination;
        let assigned: Vec<CheckStatus> = names
            .iter()
            .map(|_| {
                let status = statuses[rest % statuses.len()];
                rest /= statuses.len();
                status
            })
            .collect();

        let aggregator = names.iter().zip(&assigned).fold(
            HealthAggregator::new(Duration::from_secs(1)),
            |aggregator, (name, status)| {
                aggregator.with_check(Arc::new(StaticCheck {
                    name: *name,
                    status: *status,
                }))
            },
        );

        let report = aggregator.check().await;

        let expected = if assigned.contains(&CheckStatus::Fail) {
            OverallStatus::Unhealthy
        } else if assigned.contains(&CheckStatus::Warn) {
            OverallStatus::Degraded
        } else {
            OverallStatus::Healthy
        };
        assert_eq!(report.status, expected, "{:?}", assigned);

        let reported: Vec<CheckStatus> = report.checks.iter().map(|c| c.status).collect();
        assert_eq!(reported, assigned);
    }
}

#[tokio::test]
async fn test_healthy_battery() {
    let aggregator = full_battery(
        Arc::new(MockDatabase::new()),
        Some(Arc::new(MockExternalStore::new())),
        Arc::new(FixedResources::healthy()),
    );

    let report = aggregator.check().await;

    assert_eq!(report.status, OverallStatus::Healthy);
    let names: Vec<&str> = report.checks.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["database", "external_store", "memory", "disk"]);
}

#[tokio::test]
async fn test_database_error_is_unhealthy() {
    let database = Arc::new(MockDatabase::new());
    database.set_should_fail(true).await;
    let aggregator = full_battery(database, None, Arc::new(FixedResources::healthy()));

    let report = aggregator.check().await;

    assert_eq!(report.status, OverallStatus::Unhealthy);
    assert_eq!(report.checks[0].status, CheckStatus::Fail);
    assert!(report.checks[0].message.contains("connection refused"));
}

#[tokio::test]
async fn test_slow_external_store_degrades() {
    let store = Arc::new(MockExternalStore::new());
    store.set_latency(Duration::from_millis(150)).await;
    let aggregator = full_battery(
        Arc::new(MockDatabase::new()),
        Some(store),
        Arc::new(FixedResources::healthy()),
    );

    let report = aggregator.check().await;

    assert_eq!(report.status, OverallStatus::Degraded);
    assert_eq!(report.checks[1].status, CheckStatus::Warn);
}

#[tokio::test]
async fn test_missing_external_store_passes() {
    let aggregator = full_battery(
        Arc::new(MockDatabase::new()),
        None,
        Arc::new(FixedResources::healthy()),
    );

    let report = aggregator.check().await;

    assert_eq!(report.checks[1].status, CheckStatus::Pass);
    assert_eq!(report.checks[1].message, "not configured");
}

#[tokio::test]
async fn test_memory_pressure_bands() {
    let resources = Arc::new(FixedResources::new(85, 100));
    let aggregator = full_battery(Arc::new(MockDatabase::new()), None, resources.clone());
    assert_eq!(aggregator.check().await.status, OverallStatus::Degraded);

    resources.set_memory(95, 100);
    assert_eq!(aggregator.check().await.status, OverallStatus::Unhealthy);
}

#[tokio::test]
async fn test_check_timeout_counts_as_failure() {
    let aggregator = HealthAggregator::new(Duration::from_millis(50))
        .with_check(Arc::new(HangingCheck))
        .with_check(Arc::new(DiskCheck));

    let report = aggregator.check().await;

    assert_eq!(report.status, OverallStatus::Unhealthy);
    assert_eq!(report.checks[0].status, CheckStatus::Fail);
    assert!(report.checks[0].message.contains("timed out"));
    assert_eq!(report.checks[1].status, CheckStatus::Pass);
}

#[tokio::test]
async fn test_report_serializes_timestamp_and_status() {
    let aggregator = HealthAggregator::new(Duration::from_secs(1)).with_check(Arc::new(DiskCheck));

    let json = serde_json::to_value(aggregator.check().await).unwrap();

    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
    assert_eq!(json["checks"][0]["name"], "disk");
    assert_eq!(json["checks"][0]["status"], "pass");
}
