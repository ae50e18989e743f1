pub mod cache_maintenance;
pub mod health_monitor;
pub mod metrics_sweep;
pub mod performance_report;
pub mod query_metrics_retention;
pub mod runner;

pub use cache_maintenance::CacheMaintenanceJob;
pub use health_monitor::HealthMonitorJob;
pub use metrics_sweep::MetricsSweepJob;
pub use performance_report::PerformanceReportJob;
pub use query_metrics_retention::QueryMetricsRetentionJob;
pub use runner::JobRunner;
