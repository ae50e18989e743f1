use crate::state::AppState;
use axum::{extract::State, http::header, response::IntoResponse, Json};
use ferrous_watch_application::use_cases::SystemMetrics;
use tracing::{debug, instrument};

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

#[instrument(skip(state), name = "api_get_prometheus_metrics")]
pub async fn get_prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.export_metrics.execute();
    debug!(bytes = body.len(), "Prometheus metrics rendered");

    ([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body)
}

#[instrument(skip(state), name = "api_get_system_metrics")]
pub async fn get_system_metrics(State(state): State<AppState>) -> Json<SystemMetrics> {
    let metrics = state.get_system_metrics.execute();

    debug!(
        total_requests = metrics.requests.total_requests,
        total_queries = metrics.database.total_queries,
        cache_entries = metrics.cache.entries,
        "System metrics snapshot taken"
    );

    Json(metrics)
}
