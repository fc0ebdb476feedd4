use chrono::{DateTime, Utc};

/// Coarse relative age of `then` as seen at `now`.
///
/// Two days or more reads "N days ago", one to two days "yesterday",
/// anything younger "N hours ago". Timestamps in the future count as zero.
pub fn human_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    // ---
    let hours = (now - then).num_hours().max(0);

    if hours >= 48 {
        format!("{} days ago", hours / 24)
    } else if hours >= 24 {
        "yesterday".to_string()
    } else {
        format!("{hours} hours ago")
    }
}
