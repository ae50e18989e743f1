use ferrous_watch_application::services::HealthReport;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct HealthResponse {
    #[serde(flatten)]
    pub report: HealthReport,
    pub hostname: String,
}
