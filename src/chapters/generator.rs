use anyhow::Result;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

use super::{format_chapters_block, Chapter};
use crate::cache::TitleCache;
use crate::config::Config;
use crate::llm::titler::ChunkTitler;
use crate::llm::{create_llm, LLM};
use crate::segmenter::ChunkSegmenter;
use crate::timestamp::format_timestamp;
use crate::transcript::{
    select_language_code, TranscriptError, TranscriptSource, YouTubeTranscriptFetcher,
};
use crate::youtube::extract_video_id;

/// Why chapter generation aborted.
///
/// Titling failures never appear here; they degrade to fallback titles.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid YouTube URL.")]
    InvalidUrl { url: String },

    #[error(transparent)]
    Transcript(#[from] TranscriptError),
}

/// The generated chapter list for one video.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedChapters {
    pub video_id: String,
    pub video_url: String,
    pub chapters: Vec<Chapter>,
}

impl GeneratedChapters {
    /// Render the copy-pasteable block for this video.
    pub fn to_block(&self) -> String {
        format_chapters_block(&self.video_url, &self.chapters)
    }
}

/// End-to-end chapter pipeline: URL to titled, timestamped chapters.
pub struct ChapterGenerator {
    segmenter: ChunkSegmenter,
    preferred_languages: Vec<String>,
    cache_file: PathBuf,
    transcripts: Box<dyn TranscriptSource>,
    titler: ChunkTitler,
}

impl ChapterGenerator {
    /// Wire up the production pipeline from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let transcripts = Box::new(YouTubeTranscriptFetcher::new()?);
        let llm = create_llm(&config.llm)?;
        Ok(Self::with_sources(config, transcripts, llm))
    }

    /// Wire up the pipeline over caller-supplied transcript and LLM backends.
    pub fn with_sources(
        config: &Config,
        transcripts: Box<dyn TranscriptSource>,
        llm: Box<dyn LLM>,
    ) -> Self {
        Self {
            segmenter: ChunkSegmenter::new(config.chunking.max_words_per_chunk),
            preferred_languages: config.transcript.preferred_languages.clone(),
            cache_file: config.storage.cache_file.clone(),
            transcripts,
            titler: ChunkTitler::new(llm),
        }
    }

    /// Generate the chapter list for a video URL.
    ///
    /// Fails fast on an unrecognizable URL or when the transcript cannot be
    /// retrieved. Chunks are titled sequentially in chronological order, so
    /// cache writes land in the same order.
    pub async fn generate(&self, video_url: &str) -> Result<GeneratedChapters, GenerateError> {
        let video_id =
            extract_video_id(video_url).ok_or_else(|| GenerateError::InvalidUrl {
                url: video_url.to_string(),
            })?;

        info!("🎬 Generating chapters for video {}", video_id);

        let tracks = self.transcripts.list_available(&video_id).await?;
        let language_code = select_language_code(&tracks, &self.preferred_languages)
            .ok_or_else(|| TranscriptError::NoTranscriptFound {
                video_id: video_id.clone(),
            })?;

        info!("🌐 Using caption track '{}'", language_code);

        let entries = self
            .transcripts
            .fetch(&video_id, &[language_code])
            .await?;

        info!("📝 Fetched {} caption entries", entries.len());

        let chunks = self.segmenter.segment(&video_id, &entries);
        let mut cache = TitleCache::load(&self.cache_file).await;

        let mut chapters = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let title = self.titler.title_chunk(chunk, &mut cache).await;
            chapters.push(Chapter {
                timestamp: format_timestamp(chunk.start_time),
                title,
            });
        }

        info!("✅ Generated {} chapters for {}", chapters.len(), video_id);

        Ok(GeneratedChapters {
            video_id,
            video_url: video_url.to_string(),
            chapters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ChatMessage, LLMProvider, LLMResponse};
    use crate::transcript::{CaptionEntry, TranscriptTrack};
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct NoTracks;

    #[async_trait]
    impl TranscriptSource for NoTracks {
        async fn list_available(
            &self,
            _video_id: &str,
        ) -> Result<Vec<TranscriptTrack>, TranscriptError> {
            Ok(Vec::new())
        }

        async fn fetch(
            &self,
            _video_id: &str,
            _language_codes: &[String],
        ) -> Result<Vec<CaptionEntry>, TranscriptError> {
            Ok(Vec::new())
        }
    }

    struct SilentLLM;

    #[async_trait]
    impl LLM for SilentLLM {
        async fn chat(&self, _messages: Vec<ChatMessage>) -> Result<LLMResponse> {
            Ok(LLMResponse {
                content: "Title".to_string(),
                tokens_used: None,
            })
        }

        fn provider_type(&self) -> LLMProvider {
            LLMProvider::OpenAI
        }
    }

    fn generator_with(source: Box<dyn TranscriptSource>, dir: &TempDir) -> ChapterGenerator {
        let mut config = Config::default();
        config.storage.cache_file = dir.path().join("cache.json");
        ChapterGenerator::with_sources(&config, source, Box::new(SilentLLM))
    }

    #[tokio::test]
    async fn test_invalid_url_fails_with_exact_message() {
        let dir = TempDir::new().unwrap();
        let generator = generator_with(Box::new(NoTracks), &dir);

        let err = generator.generate("nonsense").await.unwrap_err();
        assert!(matches!(err, GenerateError::InvalidUrl { .. }));
        assert_eq!(err.to_string(), "Invalid YouTube URL.");
    }

    #[tokio::test]
    async fn test_no_tracks_surfaces_no_transcript_found() {
        let dir = TempDir::new().unwrap();
        let generator = generator_with(Box::new(NoTracks), &dir);

        let err = generator
            .generate("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "No transcripts found. Upload captions in YouTube Studio."
        );
    }
}
