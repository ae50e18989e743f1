mod helpers;

use axum::http::StatusCode;
use ferrous_watch_api::create_api_routes;
use ferrous_watch_application::ports::TableStatistics;
use helpers::{body_bytes, body_json, build_app, get, header, send, test_config};

#[tokio::test]
async fn test_prometheus_endpoint_is_plain_text_with_request_total() {
    let app = build_app(test_config());
    let router = create_api_routes(app.state.clone());

    for _ in 0..3 {
        send(&router, get("/health")).await;
    }

    let response = send(&router, get("/metrics")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(header(&response, "content-type")
        .unwrap()
        .starts_with("text/plain"));

    let body = String::from_utf8(body_bytes(response).await.to_vec()).unwrap();
    assert!(body.contains("# TYPE http_requests_total counter"));
    assert!(body.lines().any(|line| line == "http_requests_total 3"));
    assert!(body.lines().any(|line| line == "response_cache_entries 0"));
}

#[tokio::test]
async fn test_system_metrics_snapshot_includes_resources() {
    let app = build_app(test_config());
    let router = create_api_routes(app.state.clone());

    send(&router, get("/health")).await;

    let response = send(&router, get("/system/metrics")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total_requests"], 1);
    assert!(body["timestamp"].is_u64());
    assert_eq!(body["system"]["cpu_count"], 8);
    assert_eq!(body["system"]["uptime_seconds"], 3_600);
    assert!(body["database"]["total_queries"].is_u64());
    assert!(body["cache"]["hit_rate"].is_f64());
    assert!(body["routes"].is_array());
}

#[tokio::test]
async fn test_database_analysis_lists_tables_and_is_cached() {
    let app = build_app(test_config());
    app.database.set_tables(vec![TableStatistics {
        name: "agents".to_string(),
        row_count: 42,
        data_bytes: 8_192,
        index_bytes: 1_024,
    }]);
    let router = create_api_routes(app.state.clone());

    let first = send(&router, get("/system/database")).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(header(&first, "x-cache"), Some("MISS"));

    let body = body_json(first).await;
    assert_eq!(body["tables"][0]["name"], "agents");
    assert_eq!(body["tables"][0]["row_count"], 42);
    assert!(body["suggestions"].as_array().unwrap().is_empty());

    let second = send(&router, get("/system/database")).await;
    assert_eq!(header(&second, "x-cache"), Some("HIT"));
    assert_eq!(app.database.statistics_calls(), 1);
}

#[tokio::test]
async fn test_database_analysis_failure_is_503() {
    let app = build_app(test_config());
    app.database.set_should_fail(true);
    let router = create_api_routes(app.state.clone());

    let response = send(&router, get("/system/database")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("unable to open database file"));
}

#[tokio::test]
async fn test_external_store_error_maps_to_503_with_message() {
    use axum::response::IntoResponse;
    use ferrous_watch_api::errors::ApiError;
    use ferrous_watch_domain::DomainError;

    let response =
        ApiError(DomainError::ExternalStoreError("connection refused".to_string())).into_response();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["error"], "External store error: connection refused");
}
