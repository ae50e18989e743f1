use crate::{dto::HealthResponse, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_health_check")]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let report = state.check_health.execute().await;

    debug!(
        status = report.status.as_str(),
        checks = report.checks.len(),
        response_time_ms = report.response_time_ms,
        "Health check evaluated"
    );

    let status = if report.status.is_operational() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let hostname = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string());

    (status, Json(HealthResponse { report, hostname }))
}
