use ferrous_watch_application::ports::DatabasePort;
use ferrous_watch_application::ObservabilityContext;
use ferrous_watch_domain::{Config, OverallStatus};
use std::sync::Arc;

mod helpers;
use helpers::{FixedResources, ManualClock, MockDatabase};

#[tokio::test]
async fn test_context_wires_components_from_config() {
    let mut config = Config::default();
    config.rate_limit.max_requests = 50;
    config.cache.max_entries = 10;

    let context = ObservabilityContext::new(
        &config,
        Arc::new(ManualClock::new(0)),
        Arc::new(FixedResources::healthy()),
        Arc::new(MockDatabase::new()),
        None,
    );

    assert_eq!(context.rate_limits.standard.limit(), 50);
    assert_eq!(context.rate_limits.strict.limit(), 10);
    assert_eq!(context.response_cache.stats().max_entries, 10);
    assert_eq!(
        context.health.check_names(),
        vec!["database", "external_store", "memory", "disk"]
    );
    assert_eq!(context.health.check().await.status, OverallStatus::Healthy);
}

#[tokio::test]
async fn test_database_factory_receives_the_context_monitor() {
    let database = Arc::new(MockDatabase::new());
    let mut handed_monitor = None;

    let context = ObservabilityContext::with_database(
        &Config::default(),
        Arc::new(ManualClock::new(0)),
        Arc::new(FixedResources::healthy()),
        None,
        |monitor| -> Arc<dyn DatabasePort> {
            handed_monitor = Some(monitor);
            database.clone()
        },
    );

    let handed_monitor = handed_monitor.unwrap();
    assert!(Arc::ptr_eq(&handed_monitor, &context.query_monitor));

    context.health.check().await;
    assert_eq!(database.ping_count(), 1);
}
