use async_trait::async_trait;
use ferrous_watch_application::ports::{
    Clock, DatabasePort, ProcessResources, ResourceProbe, TableStatistics,
};
use ferrous_watch_application::ObservabilityContext;
use ferrous_watch_domain::{Config, DomainError};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(start_ms),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now_ms
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

pub struct MockDatabase {
    ping_count: Arc<AtomicU64>,
    should_fail: Arc<AtomicBool>,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self {
            ping_count: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn ping_count(&self) -> u64 {
        self.ping_count.load(Ordering::Relaxed)
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl DatabasePort for MockDatabase {
    async fn ping(&self) -> Result<(), DomainError> {
        self.ping_count.fetch_add(1, Ordering::Relaxed);
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::DatabaseError("database is locked".to_string()));
        }
        Ok(())
    }

    async fn table_statistics(&self) -> Result<Vec<TableStatistics>, DomainError> {
        Ok(Vec::new())
    }
}

pub struct FixedResources;

impl ResourceProbe for FixedResources {
    fn snapshot(&self) -> ProcessResources {
        ProcessResources {
            memory_used_bytes: 64,
            total_memory_bytes: 1_024,
            uptime_seconds: 10,
            ..Default::default()
        }
    }
}

pub fn make_context(clock: Arc<ManualClock>, database: Arc<MockDatabase>) -> ObservabilityContext {
    ObservabilityContext::new(
        &Config::default(),
        clock,
        Arc::new(FixedResources),
        database,
        None,
    )
}
