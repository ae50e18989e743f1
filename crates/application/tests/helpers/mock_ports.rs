use async_trait::async_trait;
use ferrous_watch_application::ports::{
    Clock, DatabasePort, ExternalStorePort, ProcessResources, ResourceProbe, TableStatistics,
};
use ferrous_watch_domain::DomainError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Clock that only moves when told to.
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

    pub fn set(&self, ms: u64) {
        self.now_ms.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

pub struct MockDatabase {
    tables: Arc<RwLock<Vec<TableStatistics>>>,
    latency: Arc<RwLock<Duration>>,
    should_fail: Arc<RwLock<bool>>,
    ping_count: Arc<AtomicU64>,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Vec::new())),
            latency: Arc::new(RwLock::new(Duration::ZERO)),
            should_fail: Arc::new(RwLock::new(false)),
            ping_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_tables(tables: Vec<TableStatistics>) -> Self {
        let db = Self::new();
        *db.tables.try_write().unwrap() = tables;
        db
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    pub async fn set_latency(&self, latency: Duration) {
        *self.latency.write().await = latency;
    }

    pub fn ping_count(&self) -> u64 {
        self.ping_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DatabasePort for MockDatabase {
    async fn ping(&self) -> Result<(), DomainError> {
        self.ping_count.fetch_add(1, Ordering::Relaxed);
        let latency = *self.latency.read().await;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if *self.should_fail.read().await {
            return Err(DomainError::DatabaseError("connection refused".to_string()));
        }
        Ok(())
    }

    async fn table_statistics(&self) -> Result<Vec<TableStatistics>, DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::DatabaseError("connection refused".to_string()));
        }
        Ok(self.tables.read().await.clone())
    }
}

pub struct MockExternalStore {
    latency: Arc<RwLock<Duration>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockExternalStore {
    pub fn new() -> Self {
        Self {
            latency: Arc::new(RwLock::new(Duration::ZERO)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    pub async fn set_latency(&self, latency: Duration) {
        *self.latency.write().await = latency;
    }
}

#[async_trait]
impl ExternalStorePort for MockExternalStore {
    async fn ping(&self) -> Result<(), DomainError> {
        let latency = *self.latency.read().await;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if *self.should_fail.read().await {
            return Err(DomainError::ExternalStoreError("PING refused".to_string()));
        }
        Ok(())
    }
}

pub struct FixedResources {
    snapshot: std::sync::Mutex<ProcessResources>,
}

impl FixedResources {
    pub fn new(memory_used_bytes: u64, total_memory_bytes: u64) -> Self {
        Self {
            snapshot: std::sync::Mutex::new(ProcessResources {
                memory_used_bytes,
                total_memory_bytes,
                cpu_usage_percent: 1.5,
                cpu_count: 4,
                load_average: [0.1, 0.2, 0.3],
                uptime_seconds: 120,
            }),
        }
    }

    pub fn healthy() -> Self {
        Self::new(100, 1_000)
    }

    pub fn set_memory(&self, used: u64, total: u64) {
        let mut snapshot = self.snapshot.lock().unwrap();
        snapshot.memory_used_bytes = used;
        snapshot.total_memory_bytes = total;
    }
}

impl ResourceProbe for FixedResources {
    fn snapshot(&self) -> ProcessResources {
        self.snapshot.lock().unwrap().clone()
    }
}
