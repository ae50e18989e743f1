use crate::state::AppState;
use axum::{
    body::{Body, HttpBody},
    extract::{Query, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use ferrous_watch_application::services::{response_cache_key, CachedResponse};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

const CACHE_HEADER: &str = "x-cache";
const MAX_CACHEABLE_BODY_BYTES: u64 = 1024 * 1024;

/// Caller and tenant, set by the authentication layer. Missing means an
/// anonymous caller in the default workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestIdentity {
    pub user_id: Option<String>,
    pub workspace_id: Option<String>,
}

/// State for one cached route group: the app plus the TTL its entries get.
#[derive(Clone)]
pub struct CacheScope {
    state: AppState,
    ttl: Duration,
}

impl CacheScope {
    /// `ttl` of `None` uses the configured default.
    pub fn new(state: AppState, ttl: Option<Duration>) -> Self {
        let ttl = ttl.unwrap_or(state.pipeline.default_cache_ttl);
        Self { state, ttl }
    }
}

/// Serves successful GET responses from the response cache and stores new ones.
pub async fn cache_responses(
    State(scope): State<CacheScope>,
    request: Request,
    next: Next,
) -> Response {
    if !scope.state.pipeline.cache_enabled || request.method() != Method::GET {
        return next.run(request).await;
    }

    let query = match Query::<Vec<(String, String)>>::try_from_uri(request.uri()) {
        Ok(Query(query)) => query,
        Err(e) => {
            debug!(error = %e, "Query string not cacheable");
            return next.run(request).await;
        }
    };
    let identity = request
        .extensions()
        .get::<RequestIdentity>()
        .cloned()
        .unwrap_or_default();
    let key = response_cache_key(
        request.method().as_str(),
        request.uri().path(),
        identity.user_id.as_deref(),
        identity.workspace_id.as_deref(),
        &query,
    );

    let cache = &scope.state.observability.response_cache;
    if let Some(cached) = cache.get(&key) {
        debug!(key = %key, "Response cache hit");
        return cached_response(cached);
    }

    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return with_cache_header(response, "MISS");
    }

    let fits = response
        .body()
        .size_hint()
        .upper()
        .is_some_and(|upper| upper <= MAX_CACHEABLE_BODY_BYTES);
    if !fits {
        return with_cache_header(response, "MISS");
    }

    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_CACHEABLE_BODY_BYTES as usize).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to buffer response for caching");
            let failure = (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "Failed to read response body" })),
            )
                .into_response();
            return with_cache_header(failure, "MISS");
        }
    };

    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    cache.put(
        key,
        CachedResponse {
            content_type,
            body: bytes.clone(),
        },
        scope.ttl,
    );

    with_cache_header(Response::from_parts(parts, Body::from(bytes)), "MISS")
}

fn cached_response(cached: CachedResponse) -> Response {
    let mut response = Response::new(Body::from(cached.body));
    if let Some(content_type) = cached
        .content_type
        .as_deref()
        .and_then(|v| HeaderValue::from_str(v).ok())
    {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    with_cache_header(response, "HIT")
}

fn with_cache_header(mut response: Response, outcome: &'static str) -> Response {
    response
        .headers_mut()
        .insert(CACHE_HEADER, HeaderValue::from_static(outcome));
    response
}
