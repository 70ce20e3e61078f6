//! Shared utilities for commands

use chrono::{DateTime, Local};
use std::time::{SystemTime, UNIX_EPOCH};

/// Format a timestamp in local time, `-` when unknown
pub fn format_time(time: SystemTime) -> String {
    if time <= UNIX_EPOCH {
        return "-".to_string();
    }
    let dt: DateTime<Local> = time.into();
    dt.format("%Y-%m-%d %H:%M").to_string()
}
