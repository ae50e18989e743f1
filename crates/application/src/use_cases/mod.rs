pub mod database;
pub mod health;
pub mod metrics;

pub use database::{DatabaseOptimizationReport, OptimizeDatabaseUseCase};
pub use health::CheckHealthUseCase;
pub use metrics::{ExportMetricsUseCase, GetSystemMetricsUseCase, SystemMetrics};
