use chrono::{DateTime, Duration, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// "12m 05s"; negative spans read as zero.
#[must_use]
pub fn format_elapsed(value: Duration) -> String {
    let secs = value.num_seconds().max(0);
    format!("{}m {:02}s", secs / 60, secs % 60)
}
