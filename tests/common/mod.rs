// Test helpers are intentionally partially used
#![allow(dead_code)]

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use pastebook::{create_router, AppConfig};
use reqwest::Client;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;
use tower::ServiceExt;

// ============================================================================
// In-process router
// ============================================================================

/// Router over fresh in-memory stores and no-op metrics.
pub async fn test_router() -> Router {
    // ---
    create_router(&AppConfig::in_memory())
        .await
        .expect("Should be able to create router")
}

/// Sends one request through the router and collects the raw response body.
pub async fn send_raw(app: &Router, request: Request<Body>) -> (StatusCode, Bytes) {
    // ---
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    (status, body)
}

/// Like [`send_raw`] but decodes the body as text.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    // ---
    let (status, body) = send_raw(app, request).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

pub fn credentials(email: &str, password: &str) -> String {
    // ---
    serde_json::json!({ "email": email, "password": password }).to_string()
}

pub fn post_json(uri: &str, json: String) -> Request<Body> {
    // ---
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(json))
        .unwrap()
}

/// Builds a request carrying the session token in the `Auth` header.
pub fn authed(method: &str, uri: &str, token: &str, body: impl Into<Body>) -> Request<Body> {
    // ---
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Auth", token)
        .body(body.into())
        .unwrap()
}

/// Registers an account and returns its session token.
pub async fn register(app: &Router, email: &str, password: &str) -> String {
    // ---
    let (status, body) = send(app, post_json("/accounts", credentials(email, password))).await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    body.trim().to_string()
}

/// Last path segment of a paste URL returned by the service.
pub fn paste_id(url: &str) -> String {
    // ---
    url.trim()
        .rsplit('/')
        .next()
        .expect("paste url has a path")
        .to_string()
}

// ============================================================================
// Real listener
// ============================================================================

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
}

impl TestServer {
    // ---
    pub async fn new() -> Self {
        // --
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let mut config = AppConfig::in_memory();
        config.server.bind_addr = addr.to_string();
        config.server.public_url = format!("http://{addr}");

        let app = create_router(&config)
            .await
            .expect("Should be able to create router");

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }
}
