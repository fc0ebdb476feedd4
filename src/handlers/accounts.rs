//! Registration and login.
//!
//! Both endpoints accept `{"email": ..., "password": ...}` and answer with a
//! fresh session token on its own line.

use super::error::ApiError;
use crate::app_state::AppState;
use crate::domain::StoreError;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Credentials {
    // ---
    pub email: String,
    pub password: String,
}

fn parse(payload: Result<Json<Credentials>, JsonRejection>) -> Result<Credentials, ApiError> {
    // ---
    payload
        .map(|Json(credentials)| credentials)
        .map_err(|rejection| StoreError::Validation(rejection.body_text()).into())
}

/// POST /accounts
///
/// Creates an account and returns the token of its first session.
///
/// - `201 Created` with the token on success
/// - `400 Bad Request` for an unparsable payload, malformed email or empty password
/// - `409 Conflict` if the email is already registered
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<(StatusCode, String), ApiError> {
    // ---
    let credentials = parse(payload)?;

    let session = state
        .service()
        .register(&credentials.email, &credentials.password)
        .await?;

    Ok((StatusCode::CREATED, format!("{}\n", session.token)))
}

/// POST /token
///
/// Verifies credentials and returns a new session token. Tokens from earlier
/// logins stay valid.
///
/// - `200 OK` with the token on success
/// - `401 Unauthorized` for an unknown email or wrong password alike
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<String, ApiError> {
    // ---
    let credentials = parse(payload)?;

    let session = state
        .service()
        .login(&credentials.email, &credentials.password)
        .await
        .inspect_err(|_| tracing::warn!("Rejected login attempt"))?;

    Ok(format!("{}\n", session.token))
}
