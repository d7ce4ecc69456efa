/// Timestamp rendering for chapter lists

/// Format a position in seconds as a YouTube chapter timestamp.
///
/// Fractional seconds are truncated. Renders `H:MM:SS` once the position
/// reaches an hour, otherwise `M:SS` (leading unit unpadded in both forms).
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
