//! Utility functions and helpers

use chrono::{DateTime, Utc};
use std::path::Path;

use crate::locale::{Locale, Text};

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> std::path::PathBuf {
    let path = path.as_ref();
    if !path.exists() {
        let _ = std::fs::create_dir_all(path);
    }
    path.to_path_buf()
}

/// Keep the first `max_chars` characters, appending `...` when cut
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &s[..end]),
        None => s.to_string(),
    }
}

/// Format a timestamp relative to `now`, the way message bubbles show it
pub fn format_relative(at: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    let diff = now.signed_duration_since(at);
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if minutes < 1 {
        locale.text(Text::JustNow).to_string()
    } else if minutes < 60 {
        locale.minutes_ago(minutes)
    } else if hours < 24 {
        locale.hours_ago(hours)
    } else if days < 7 {
        locale.days_ago(days)
    } else {
        at.format("%d/%m/%Y").to_string()
    }
}
