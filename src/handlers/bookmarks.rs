//! Bookmark endpoints. All of them need a session token in the `Auth` header.

use super::auth::AuthToken;
use super::error::ApiError;
use super::human_time::human_time;
use crate::app_state::AppState;
use crate::domain::{BookmarkEntry, BookmarkSummary, PasteId};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// GET /bookmarks
///
/// One line per bookmark: the name padded to a common column, the current
/// paste id, a tab, and the age of that version.
#[tracing::instrument(skip_all)]
pub async fn list_bookmarks(
    State(state): State<AppState>,
    AuthToken(token): AuthToken,
) -> Result<String, ApiError> {
    // ---
    let bookmarks = state.service().list_bookmarks(&token).await?;
    Ok(format_listing(&bookmarks, Utc::now()))
}

/// GET /bookmarks/{name}
///
/// The content of the current version, or `404 Not Found` if the name has
/// never been saved (or was deleted).
#[tracing::instrument(skip(state, token))]
pub async fn get_bookmark(
    State(state): State<AppState>,
    AuthToken(token): AuthToken,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    // ---
    let response = match state.service().fetch_current(&token, &name).await? {
        Some(paste) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            paste.content,
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "not found\n").into_response(),
    };

    Ok(response)
}

/// PUT /bookmarks/{name}
///
/// Stores the body as a new paste and makes it the current version of
/// `name`. Earlier versions remain in the history. Answers with the new
/// paste's public URL.
#[tracing::instrument(skip(state, token, body), fields(len = body.len()))]
pub async fn save_bookmark(
    State(state): State<AppState>,
    AuthToken(token): AuthToken,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<String, ApiError> {
    // ---
    let paste_id = state
        .service()
        .save_bookmark(&token, &name, body.to_vec())
        .await?;

    state.metrics().record_paste_created();
    state.metrics().record_bookmark_saved();

    Ok(format!("{}\n", state.paste_url(&paste_id)))
}

/// PUT /bookmarks/{name}/{paste}
///
/// Makes an existing paste the current version of `name`. `404 Not Found`
/// if the paste does not exist.
#[tracing::instrument(skip(state, token))]
pub async fn bind_bookmark(
    State(state): State<AppState>,
    AuthToken(token): AuthToken,
    Path((name, paste)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    // ---
    state
        .service()
        .bind_bookmark(&token, &name, &PasteId::from(paste))
        .await?;
    state.metrics().record_bookmark_saved();

    Ok(StatusCode::OK)
}

/// DELETE /bookmarks/{name}
///
/// Removes every version. Deleting an unknown name still answers `200 OK`.
#[tracing::instrument(skip(state, token))]
pub async fn delete_bookmark(
    State(state): State<AppState>,
    AuthToken(token): AuthToken,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    // ---
    state.service().delete_bookmark(&token, &name).await?;
    Ok(StatusCode::OK)
}

/// GET /bookmarks/{name}/history
///
/// Every version of `name`, oldest first, as `paste-id<TAB>age` lines.
#[tracing::instrument(skip(state, token))]
pub async fn bookmark_history(
    State(state): State<AppState>,
    AuthToken(token): AuthToken,
    Path(name): Path<String>,
) -> Result<String, ApiError> {
    // ---
    let history = state.service().fetch_history(&token, &name).await?;
    Ok(format_history(&history, Utc::now()))
}

fn format_listing(bookmarks: &[BookmarkSummary], now: DateTime<Utc>) -> String {
    // ---
    let width = bookmarks.iter().map(|b| b.name.chars().count()).max().unwrap_or(0) + 2;

    let mut out = String::new();
    for bookmark in bookmarks {
        let _ = writeln!(
            out,
            "{:<width$}{}\t{}",
            bookmark.name,
            bookmark.paste_id,
            human_time(bookmark.created_at, now),
        );
    }
    out
}

fn format_history(history: &[BookmarkEntry], now: DateTime<Utc>) -> String {
    // ---
    let mut out = String::new();
    for entry in history {
        let _ = writeln!(out, "{}\t{}", entry.paste_id, human_time(entry.created_at, now));
    }
    out
}
