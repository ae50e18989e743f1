use super::client_ip::client_key;
use crate::dto::RateLimitRejection;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use ferrous_watch_application::services::RateLimitDecision;
use tracing::{debug, warn};

const RATE_LIMIT_MESSAGE: &str = "Too many requests, please try again later.";

/// Standard limiter, skipped for health-check paths.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let limits = &state.observability.rate_limits;
    if limits.is_exempt(request.uri().path()) {
        return next.run(request).await;
    }

    let key = client_key(&request, state.pipeline.trust_proxy);
    let decision = limits.standard.check(&key);

    if !decision.allowed {
        warn!(
            client = %key,
            path = %request.uri().path(),
            limit = decision.limit,
            "Rate limit exceeded"
        );
        return rejection(&decision);
    }

    let mut response = next.run(request).await;
    write_limit_headers(response.headers_mut(), &decision);
    response
}

/// Tighter limiter for sensitive endpoints. Violations go to the security audit feed.
pub async fn strict_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request, state.pipeline.trust_proxy);
    let decision = state.observability.rate_limits.strict.check(&key);

    if !decision.allowed {
        warn!(
            target: "security_audit",
            event = "strict_rate_limit_exceeded",
            client = %key,
            method = %request.method(),
            path = %request.uri().path(),
            limit = decision.limit,
            "Strict rate limit exceeded"
        );
        return rejection(&decision);
    }

    let mut response = next.run(request).await;
    write_limit_headers(response.headers_mut(), &decision);
    response
}

/// Delays requests past the slow-down threshold. Failed responses are
/// handed back so they do not count against the client.
pub async fn slow_down(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let limits = &state.observability.rate_limits;
    if limits.is_exempt(request.uri().path()) {
        return next.run(request).await;
    }

    let key = client_key(&request, state.pipeline.trust_proxy);
    let ticket = limits.slow_down.acquire(&key);

    if !ticket.delay.is_zero() {
        debug!(client = %key, delay_ms = ticket.delay.as_millis() as u64, "Slowing down request");
        tokio::time::sleep(ticket.delay).await;
    }

    let response = next.run(request).await;
    if response.status().is_client_error() || response.status().is_server_error() {
        limits.slow_down.release_failed(&ticket);
    }
    response
}

fn rejection(decision: &RateLimitDecision) -> Response {
    let retry_after = decision.retry_after_secs();
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(RateLimitRejection {
            error: RATE_LIMIT_MESSAGE.to_string(),
            retry_after,
        }),
    )
        .into_response();

    let headers = response.headers_mut();
    write_limit_headers(headers, decision);
    headers.insert("retry-after", HeaderValue::from(retry_after));
    response
}

fn write_limit_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    headers.insert("ratelimit-limit", HeaderValue::from(decision.limit));
    headers.insert("ratelimit-remaining", HeaderValue::from(decision.remaining));
    headers.insert(
        "ratelimit-reset",
        HeaderValue::from(decision.reset_after_ms.div_ceil(1000)),
    );
}
