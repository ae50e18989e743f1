use crate::handlers;
use crate::middleware::{
    cache_responses, rate_limit, request_context, request_timeout, slow_down, strict_rate_limit,
    track_request_metrics, CacheScope,
};
use crate::state::AppState;
use axum::{middleware::from_fn_with_state, routing::get, Router};
use std::time::Duration;

const DATABASE_ANALYSIS_CACHE_TTL: Duration = Duration::from_secs(60);

pub fn create_api_routes(state: AppState) -> Router {
    let inspection = Router::new()
        .route("/system/metrics", get(handlers::get_system_metrics))
        .route(
            "/system/database",
            get(handlers::get_database_analysis).route_layer(from_fn_with_state(
                CacheScope::new(state.clone(), Some(DATABASE_ANALYSIS_CACHE_TTL)),
                cache_responses,
            )),
        )
        .route_layer(from_fn_with_state(state.clone(), strict_rate_limit));

    let router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::get_prometheus_metrics))
        .merge(inspection)
        .with_state(state.clone());

    with_pipeline(router, state)
}

/// Wraps `router` in the request pipeline. Outermost first: request context,
/// request metrics, standard rate limit, slow-down, timeout.
pub fn with_pipeline(router: Router, state: AppState) -> Router {
    router
        .layer(from_fn_with_state(state.clone(), request_timeout))
        .layer(from_fn_with_state(state.clone(), slow_down))
        .layer(from_fn_with_state(state.clone(), rate_limit))
        .layer(from_fn_with_state(state.clone(), track_request_metrics))
        .layer(from_fn_with_state(state, request_context))
}
