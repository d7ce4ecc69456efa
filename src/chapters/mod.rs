/// Chapter generation and cache browsing
///
/// Turns a video's transcript into a timestamped chapter block and exposes
/// the previously generated chapters stored in the title cache.

pub mod generator;
pub mod library;

// Re-export main types
pub use generator::{ChapterGenerator, GenerateError, GeneratedChapters};
pub use library::{group_cached_videos, CachedVideo};

use serde::{Deserialize, Serialize};

/// A single display-ready chapter line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chapter {
    /// Formatted start position, e.g. `1:02:03` or `4:05`
    pub timestamp: String,
    /// Generated chapter title
    pub title: String,
}

/// Render the copy-pasteable chapter block for a video.
///
/// `Video Link: {url}`, a blank line, then one `{timestamp} - {title}` line
/// per chapter. With no chapters only the link header remains.
pub fn format_chapters_block(video_url: &str, chapters: &[Chapter]) -> String {
    let mut block = format!("Video Link: {}\n\n", video_url);
    for chapter in chapters {
        block.push_str(&format!("{} - {}\n", chapter.timestamp, chapter.title));
    }
    block
}
