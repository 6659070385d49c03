// SPDX-License-Identifier: MPL-2.0

//! Relative timestamp formatting for feed rows and comments.

use chrono::{DateTime, Utc};

/// Format an RFC 3339 timestamp relative to the current time.
///
/// Under a minute reads "Just now", then minute/hour/day buckets up to a
/// week, then the calendar date. Unparseable input renders as empty rather
/// than propagating an error into a label.
pub fn relative_time(timestamp: &str) -> String {
    relative_to(timestamp, Utc::now())
}

fn relative_to(timestamp: &str, now: DateTime<Utc>) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) else {
        return String::new();
    };

    let then = parsed.with_timezone(&Utc);
    let elapsed = now.signed_duration_since(then);

    if elapsed.num_minutes() < 1 {
        "Just now".to_string()
    } else if elapsed.num_minutes() < 60 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_hours() < 24 {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed.num_days() < 7 {
        format!("{}d ago", elapsed.num_days())
    } else {
        then.format("%b %-d, %Y").to_string()
    }
}
