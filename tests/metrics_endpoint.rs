use axum::body::Body;
use axum::http::{Request, StatusCode};
use pastebook::{create_router, AppConfig, MetricsKind};

mod common;

// NOTE: Metrics use a global Prometheus registry, installed once per test
// binary. Keep Prometheus-backed tests in this file only.

#[tokio::test]
async fn prometheus_metrics_count_pastes_and_bookmarks() {
    // ---
    let mut config = AppConfig::in_memory();
    config.metrics = MetricsKind::Prometheus;
    let app = create_router(&config).await.expect("router with prometheus");

    common::send(&app, Request::post("/").body(Body::from("hello")).unwrap()).await;
    let token = common::register(&app, "alice@example.com", "pw1").await;
    common::send(&app, common::authed("PUT", "/bookmarks/notes", &token, "v1")).await;

    let (status, body) = common::send(&app, Request::get("/metrics").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("pastes_created_total"), "metrics body: {body}");
    assert!(body.contains("bookmark_versions_total"), "metrics body: {body}");
    assert!(body.contains("http_request_duration_seconds"), "metrics body: {body}");
}
