//! Qualitative age labels.

use std::time::SystemTime;

use compact_str::{CompactString, ToCompactString};

/// Label for how long ago `created` was, relative to `now`, in whole
/// days: 0 is Today, 1 Yesterday, up to a week in days, up to a month
/// in weeks, older in months.
pub fn relative_age_label(now: SystemTime, created: SystemTime) -> CompactString {
    let days = now
        .duration_since(created)
        .unwrap_or_default()
        .as_secs()
        / 86_400;
    match days {
        0 => CompactString::const_new("Today"),
        1 => CompactString::const_new("Yesterday"),
        2..=7 => format!("{days} days ago").to_compact_string(),
        8..=30 => format!("{} weeks ago", days / 7).to_compact_string(),
        _ => format!("{} months ago", days / 30).to_compact_string(),
    }
}
