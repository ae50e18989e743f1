mod aggregator;
mod checks;

pub use aggregator::{HealthAggregator, HealthReport};
pub use checks::{
    classify_latency, classify_memory_ratio, DatabaseCheck, DiskCheck, ExternalStoreCheck,
    HealthCheck, MemoryCheck,
};
