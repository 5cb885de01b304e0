//! Human-readable figures for run summaries

use std::time::Duration;

/// Size in kilobytes with two decimals, e.g. `12.40 KB`
pub fn format_kilobytes(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

/// Elapsed time truncated to whole milliseconds, e.g. `1s 250ms`
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    humantime::format_duration(Duration::from_millis(millis)).to_string()
}
