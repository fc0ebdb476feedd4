use super::error::ApiError;
use crate::app_state::AppState;
use crate::domain::PasteId;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

/// POST /
///
/// Stores the raw request body as an anonymous paste and answers with its
/// public URL. No session is needed and no owner is recorded.
#[tracing::instrument(skip(state, body), fields(len = body.len()))]
pub async fn create_paste(State(state): State<AppState>, body: Bytes) -> Result<String, ApiError> {
    // ---
    let id = state.service().create_paste(body.to_vec()).await?;
    state.metrics().record_paste_created();

    Ok(format!("{}\n", state.paste_url(&id)))
}

/// GET /{paste}
///
/// Returns the paste content verbatim as `text/plain`, or `404 Not Found`.
#[tracing::instrument(skip(state))]
pub async fn get_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // ---
    let paste = state.service().get_paste(&PasteId::from(id)).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        paste.content,
    ))
}
