// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod accounts;
mod auth;
mod bookmarks;
mod error;
mod health;
mod human_time;
mod metrics;
mod pastes;
mod root;

// Core handlers
pub use health::health_check;
pub use metrics::{metrics_handler, track_http_requests};
pub use root::root_handler;

// Account and session handlers
pub use accounts::{login, register};

// Paste handlers
pub use pastes::{create_paste, get_paste};

// Bookmark handlers
pub use bookmarks::{
    bind_bookmark, bookmark_history, delete_bookmark, get_bookmark, list_bookmarks, save_bookmark,
};
