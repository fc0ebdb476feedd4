use super::error::ApiError;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Header carrying the session token, echoed back by clients after login.
pub const AUTH_HEADER: &str = "Auth";

/// Session token taken from the `Auth` header.
///
/// Only presence is checked here; validity is decided by the session store.
#[derive(Debug)]
pub struct AuthToken(pub String);

impl<S> FromRequestParts<S> for AuthToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // ---
        parts
            .headers
            .get(AUTH_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|token| !token.is_empty())
            .map(|token| AuthToken(token.to_string()))
            .ok_or(ApiError::MissingAuth)
    }
}
