use super::mock_ports::{FixedResources, ManualClock, MockDatabase};
use axum::{
    body::{Body, Bytes},
    http::{Request, Response},
    Router,
};
use ferrous_watch_api::AppState;
use ferrous_watch_application::ObservabilityContext;
use ferrous_watch_domain::Config;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub state: AppState,
    pub database: Arc<MockDatabase>,
    pub clock: Arc<ManualClock>,
}

/// Defaults with slow-down pushed out of reach so bursts stay fast.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.rate_limit.slow_down_delay_after = 10_000;
    config
}

pub fn build_app(config: Config) -> TestApp {
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let database = Arc::new(MockDatabase::new());
    let observability = ObservabilityContext::new(
        &config,
        clock.clone(),
        Arc::new(FixedResources),
        database.clone(),
        None,
    );
    let state = AppState::new(observability, database.clone(), &config);

    TestApp {
        state,
        database,
        clock,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn header<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}
