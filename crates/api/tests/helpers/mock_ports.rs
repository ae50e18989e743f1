use async_trait::async_trait;
use ferrous_watch_application::ports::{
    Clock, DatabasePort, ProcessResources, ResourceProbe, TableStatistics,
};
use ferrous_watch_domain::DomainError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
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
    tables: Mutex<Vec<TableStatistics>>,
    should_fail: AtomicBool,
    statistics_calls: AtomicU64,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(false),
            statistics_calls: AtomicU64::new(0),
        }
    }

    pub fn set_tables(&self, tables: Vec<TableStatistics>) {
        *self.tables.lock().unwrap() = tables;
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn statistics_calls(&self) -> u64 {
        self.statistics_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatabasePort for MockDatabase {
    async fn ping(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("unable to open database file".to_string()));
        }
        Ok(())
    }

    async fn table_statistics(&self) -> Result<Vec<TableStatistics>, DomainError> {
        self.statistics_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("unable to open database file".to_string()));
        }
        Ok(self.tables.lock().unwrap().clone())
    }
}

pub struct FixedResources;

impl ResourceProbe for FixedResources {
    fn snapshot(&self) -> ProcessResources {
        ProcessResources {
            memory_used_bytes: 256 * 1024 * 1024,
            total_memory_bytes: 8 * 1024 * 1024 * 1024,
            cpu_usage_percent: 3.5,
            cpu_count: 8,
            load_average: [0.5, 0.4, 0.3],
            uptime_seconds: 3_600,
        }
    }
}
