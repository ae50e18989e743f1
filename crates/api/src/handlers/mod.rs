pub mod database;
pub mod health;
pub mod metrics;

pub use database::get_database_analysis;
pub use health::health_check;
pub use metrics::{get_prometheus_metrics, get_system_metrics};
