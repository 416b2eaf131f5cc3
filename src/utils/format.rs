//! Format - Formatting Utilities

use chrono::{DateTime, Local};
use std::time::Duration;

/// Format just the time portion
pub fn format_time(dt: &DateTime<Local>) -> String {
    dt.format("%H:%M:%S").to_string()
}

/// Format a capture time, with a dashed placeholder before the first tick
pub fn format_timestamp(dt: Option<&DateTime<Local>>) -> String {
    match dt {
        Some(dt) => format_time(dt),
        None => "--:--:--".to_string(),
    }
}

/// Format a measurement with one decimal and its unit
pub fn format_value(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        format!("{value:.1}")
    } else {
        format!("{value:.1} {unit}")
    }
}

/// Format an update period for panel headers ("2s", "1.5s", "250ms")
pub fn format_period(period: Duration) -> String {
    let ms = period.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else if ms % 1000 == 0 {
        format!("{}s", ms / 1000)
    } else {
        format!("{:.1}s", period.as_secs_f64())
    }
}

/// Truncate a string to max chars with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}
