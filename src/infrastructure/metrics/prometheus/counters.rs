use metrics::{counter, histogram};
use std::time::Instant;

/// Increment a counter for created pastes.
pub fn increment_paste_created() {
    counter!("pastes_created_total").increment(1);
}

/// Increment a counter for saved bookmark versions.
pub fn increment_bookmark_saved() {
    counter!("bookmark_versions_total").increment(1);
}

/// Track HTTP request latency using a histogram labelled by method and status.
pub fn track_http_request(start: Instant, method: &str, status: u16) {
    let elapsed = start.elapsed();
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(elapsed);
}
