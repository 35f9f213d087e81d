//! Timestamp format shared by every lifecycle event.

use chrono::{NaiveDateTime, Utc};

/// Event timestamps are ISO-8601 UTC at second precision with a trailing
/// `Z`: `2026-03-01T12:00:00Z`. No offset, no fractional seconds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse an event timestamp. `None` for anything off-format.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok()
}

/// The current instant as an event timestamp. Sub-second precision is
/// truncated, not rounded.
pub fn now_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}
