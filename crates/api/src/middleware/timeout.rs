use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

/// Answers 408 when the inner service does not finish within the configured
/// timeout. The inner future is dropped, so exactly one response is sent.
pub async fn request_timeout(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let limit = state.pipeline.request_timeout;
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(
                method = %method,
                path = %path,
                timeout_ms = limit.as_millis() as u64,
                "Request timed out"
            );
            (
                StatusCode::REQUEST_TIMEOUT,
                Json(json!({
                    "error": "Request timeout",
                    "message": format!("Request exceeded {}ms", limit.as_millis()),
                })),
            )
                .into_response()
        }
    }
}
