//! yt-chapters
//!
//! Turns a YouTube video into a ready-to-paste chapter list: fetches the
//! caption transcript, splits it into word-bounded chunks, titles each chunk
//! with an LLM (memoized in a JSON cache), and renders a timestamped block.

pub mod cache;
pub mod chapters;
pub mod config;
pub mod llm;
pub mod segmenter;
pub mod timestamp;
pub mod transcript;
pub mod youtube;

// Re-export main types for easy access
pub use crate::cache::TitleCache;
pub use crate::chapters::{
    format_chapters_block, group_cached_videos, CachedVideo, Chapter, ChapterGenerator,
    GenerateError, GeneratedChapters,
};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::llm::titler::ChunkTitler;
pub use crate::llm::{ChatMessage, LLMConfig, LLMProvider, LLMResponse, LLM};
pub use crate::segmenter::{Chunk, ChunkSegmenter};
pub use crate::timestamp::format_timestamp;
pub use crate::transcript::{
    CaptionEntry, TranscriptError, TranscriptSource, TranscriptTrack, YouTubeTranscriptFetcher,
};
pub use crate::youtube::{extract_video_id, watch_url};
