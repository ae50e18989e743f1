//! Ferrous Watch Domain Layer
pub mod config;
pub mod errors;
pub mod health;
pub mod query_metric;
pub mod request_metric;

pub use config::{CliOverrides, Config, EnvOverrides};
pub use errors::DomainError;
pub use health::{CheckStatus, HealthCheckResult, OverallStatus};
pub use query_metric::{QueryAction, QueryCall, QueryMetricRecord, QueryShape};
pub use request_metric::{RequestMetricRecord, RouteKey};
