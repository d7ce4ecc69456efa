/// YouTube URL and video id handling

use regex::Regex;

/// Pattern matching the 11-character video id in watch, share, and embed URLs.
const VIDEO_ID_PATTERN: &str = r"(?:v=|/)([0-9A-Za-z_-]{11})";

/// Extract the video id from a YouTube URL.
///
/// Accepts `watch?v=` URLs, `youtu.be` share links, embed URLs, and bare
/// paths ending in an id. Returns `None` when no id-shaped segment is found.
pub fn extract_video_id(url: &str) -> Option<String> {
    let re = Regex::new(VIDEO_ID_PATTERN).ok()?;
    re.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Canonical watch URL for a video id.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}
