/// Word-bounded transcript segmentation

use serde::{Deserialize, Serialize};

use crate::transcript::CaptionEntry;

/// Default word-count threshold before a chunk closes.
pub const DEFAULT_MAX_WORDS_PER_CHUNK: usize = 1500;

/// A contiguous run of caption text anchored at its first entry's start time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Stable identity: `{video_id}_{floor(start_time)}`
    pub id: String,
    /// Start time of the first caption entry in the chunk, in seconds
    pub start_time: f64,
    /// Caption texts joined by single spaces
    pub text: String,
}

/// Splits an ordered caption stream into chunks once a running word count
/// reaches the configured threshold.
#[derive(Debug, Clone)]
pub struct ChunkSegmenter {
    max_words_per_chunk: usize,
}

impl ChunkSegmenter {
    /// Create a segmenter closing chunks at `max_words_per_chunk` words.
    pub fn new(max_words_per_chunk: usize) -> Self {
        Self {
            max_words_per_chunk,
        }
    }

    /// Segment caption entries into chunks, preserving order.
    ///
    /// A chunk closes as soon as the running word count reaches the
    /// threshold; whatever remains after the last entry flushes as a final
    /// under-threshold chunk. Empty input yields no chunks.
    pub fn segment(&self, video_id: &str, entries: &[CaptionEntry]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut buffer: Vec<&str> = Vec::new();
        let mut buffer_start: Option<f64> = None;
        let mut word_count = 0usize;

        for entry in entries {
            if buffer_start.is_none() {
                buffer_start = Some(entry.start);
            }
            buffer.push(entry.text.as_str());
            word_count += entry.text.split_whitespace().count();

            if word_count >= self.max_words_per_chunk {
                chunks.push(close_chunk(video_id, buffer_start.unwrap_or(0.0), &buffer));
                buffer.clear();
                buffer_start = None;
                word_count = 0;
            }
        }

        if !buffer.is_empty() {
            chunks.push(close_chunk(video_id, buffer_start.unwrap_or(0.0), &buffer));
        }

        chunks
    }
}

impl Default for ChunkSegmenter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WORDS_PER_CHUNK)
    }
}

fn close_chunk(video_id: &str, start_time: f64, texts: &[&str]) -> Chunk {
    Chunk {
        id: chunk_id(video_id, start_time),
        start_time,
        text: texts.join(" ").trim().to_string(),
    }
}

/// Build the cache identity for a chunk: video id plus truncated start seconds.
pub fn chunk_id(video_id: &str, start_time: f64) -> String {
    format!("{}_{}", video_id, start_time as u64)
}

/// Split a chunk id back into its video id and start seconds.
///
/// Splits on the last underscore, since video ids may themselves contain
/// underscores. Returns `None` for ids that do not fit the shape.
pub fn split_chunk_id(chunk_id: &str) -> Option<(&str, u64)> {
    let (video_id, seconds) = chunk_id.rsplit_once('_')?;
    if video_id.is_empty() {
        return None;
    }
    let seconds = seconds.parse().ok()?;
    Some((video_id, seconds))
}
