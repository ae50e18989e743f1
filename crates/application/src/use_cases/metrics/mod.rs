mod export_metrics;
mod get_system_metrics;

pub use export_metrics::ExportMetricsUseCase;
pub use get_system_metrics::{GetSystemMetricsUseCase, SystemMetrics};
