// crates/vidshelf-core/src/helpers/time.rs
//
// Shared time-formatting utilities for the list rows and the player controls.

/// Format a millisecond position as `m:ss`.
///
/// Whole seconds only (integer division), minutes are not padded and keep
/// counting past 59.
///
/// ```
/// use vidshelf_core::helpers::time::format_time;
/// assert_eq!(format_time(0),         "0:00");
/// assert_eq!(format_time(65_999),    "1:05");
/// assert_eq!(format_time(3_725_000), "62:05");
/// ```
pub fn format_time(millis: u64) -> String {
    let total_secs = millis / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Format a record's duration (seconds) the same way as a playhead position.
pub fn format_duration_secs(secs: f64) -> String {
    let millis = if secs.is_finite() && secs > 0.0 { (secs * 1000.0) as u64 } else { 0 };
    format_time(millis)
}
