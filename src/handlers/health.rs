use crate::app_state::AppState;
use crate::domain::{PasteId, StoreError};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

/// Looked up in `mode=full`. The `.` is outside the URL-safe base64
/// alphabet, so no generated paste id can collide with it.
const HEALTH_CHECK_PASTE_ID: &str = "health.check";

#[derive(serde::Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

#[derive(Deserialize)]
pub struct HealthQuery {
    mode: Option<String>,
}

/// Responds with the health status of the server.
///
/// - By default (no query parameters), performs a light check to confirm the web server
///   is running.
///
/// - If `mode=full` is passed, also performs a lookup against the content store to
///   verify the backing medium answers.
///
/// # Responses
/// - `200 OK` with `{ "status": "ok" }` if server (and storage, in full mode) are healthy.
/// - `500 INTERNAL SERVER ERROR` with `{ "status": "error" }` if the storage lookup fails.
pub async fn health_check(
    State(state): State<AppState>,
    Query(params): Query<HealthQuery>,
) -> (StatusCode, Json<HealthResponse>) {
    // ---
    if params.mode.as_deref() != Some("full") {
        return (StatusCode::OK, Json(HealthResponse { status: "ok" }));
    }

    match state.service().get_paste(&PasteId::from(HEALTH_CHECK_PASTE_ID)).await {
        Ok(_) | Err(StoreError::NotFound(_)) => (StatusCode::OK, Json(HealthResponse { status: "ok" })),
        Err(e) => {
            tracing::error!("Health check lookup failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse { status: "error" }),
            )
        }
    }
}
