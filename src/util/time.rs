//! Timestamp formatting helpers for QuakeView.
//!
//! The feed reports event times as integer epoch milliseconds; these helpers
//! give consistent display across the map tooltips, table and detail window.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Convert feed epoch milliseconds into a UTC timestamp.
///
/// Returns `None` for values outside chrono's representable range.
pub fn epoch_ms_to_utc(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

/// Format a UTC timestamp for display in the event table.
///
/// Shows local time in `YYYY-MM-DD HH:MM:SS` format.
pub fn format_table_timestamp(ts: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = ts.with_timezone(&Local);
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format a UTC timestamp for the detail window, including the UTC offset,
/// e.g. `2024-01-15 10:23:45 +01:00`.
pub fn format_detail_timestamp(ts: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = ts.with_timezone(&Local);
    local.format("%Y-%m-%d %H:%M:%S %:z").to_string()
}

/// Format the age of an event relative to `now`, e.g. `12m ago`, `3h ago`.
pub fn format_age(ts: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let secs = (*now - *ts).num_seconds().max(0);
    match secs {
        0..=59 => format!("{secs}s ago"),
        60..=3_599 => format!("{}m ago", secs / 60),
        3_600..=86_399 => format!("{}h ago", secs / 3_600),
        _ => format!("{}d ago", secs / 86_400),
    }
}

/// Format a `std::time::Duration` into a human-readable string.
///
/// Used in the status bar to show fetch elapsed time.
/// Examples: `5.0ms`, `1.2s`, `1.5m`.
pub fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.01 {
        format!("{:.1}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = secs / 60.0;
        format!("{mins:.1}m")
    }
}
