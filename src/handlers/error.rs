use crate::domain::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Failure of a handler, rendered as a plain-text response.
///
/// Storage failures are logged here and answered with a generic 500 so that
/// backend details never reach the client.
#[derive(Debug)]
pub enum ApiError {
    // ---
    MissingAuth,
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl ApiError {
    // ---
    fn status_and_message(&self) -> (StatusCode, String) {
        // ---
        match self {
            ApiError::MissingAuth => (StatusCode::UNAUTHORIZED, "missing Auth header".to_string()),
            ApiError::Store(e) => match e {
                StoreError::Validation(_) => (StatusCode::BAD_REQUEST, e.to_string()),
                StoreError::DuplicateEmail => {
                    (StatusCode::CONFLICT, "error: email already in use".to_string())
                }
                StoreError::InvalidCredentials => (StatusCode::UNAUTHORIZED, e.to_string()),
                StoreError::InvalidSession => (StatusCode::UNAUTHORIZED, "no account found".to_string()),
                StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "not found".to_string()),
                StoreError::Storage(detail) => {
                    tracing::error!("Storage failure: {}", detail);
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, format!("{message}\n")).into_response()
    }
}
