mod helpers;

use axum::http::StatusCode;
use ferrous_watch_api::create_api_routes;
use helpers::{body_json, build_app, get, send, test_config};

#[tokio::test]
async fn test_health_reports_every_check_when_healthy() {
    let app = build_app(test_config());
    let router = create_api_routes(app.state.clone());

    let response = send(&router, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
    assert!(body["hostname"].is_string());
    assert!(body["uptime_seconds"].is_u64());

    let names: Vec<&str> = body["checks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"database"));
    assert!(names.contains(&"external_store"));
    assert!(names.contains(&"memory"));
    assert!(names.contains(&"disk"));
}

#[tokio::test]
async fn test_health_is_503_when_database_fails() {
    let app = build_app(test_config());
    let router = create_api_routes(app.state.clone());
    app.database.set_should_fail(true);

    let response = send(&router, get("/health")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["status"], "unhealthy");
    let database = body["checks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "database")
        .unwrap();
    assert_eq!(database["status"], "fail");
}

#[tokio::test]
async fn test_unconfigured_external_store_passes() {
    let app = build_app(test_config());
    let router = create_api_routes(app.state.clone());

    let body = body_json(send(&router, get("/health")).await).await;
    let store = body["checks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "external_store")
        .unwrap();

    assert_eq!(store["status"], "pass");
    assert_eq!(store["message"], "not configured");
}

#[tokio::test]
async fn test_health_is_evaluated_fresh_on_every_call() {
    let app = build_app(test_config());
    let router = create_api_routes(app.state.clone());

    app.database.set_should_fail(true);
    assert_eq!(
        send(&router, get("/health")).await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );

    app.database.set_should_fail(false);
    assert_eq!(send(&router, get("/health")).await.status(), StatusCode::OK);
}
