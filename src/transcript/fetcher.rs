/// Caption retrieval backed by YouTube's transcript endpoint
use async_trait::async_trait;
use tracing::debug;
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};

use super::{CaptionEntry, TranscriptError, TranscriptSource, TranscriptTrack};

/// Production transcript source talking to YouTube.
pub struct YouTubeTranscriptFetcher {
    api: YouTubeTranscriptApi,
}

impl YouTubeTranscriptFetcher {
    /// Create a fetcher with a default HTTP client, no cookies, no proxy.
    pub fn new() -> Result<Self, TranscriptError> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            TranscriptError::Unexpected {
                message: e.to_string(),
            }
        })?;
        Ok(Self { api })
    }
}

#[async_trait]
impl TranscriptSource for YouTubeTranscriptFetcher {
    async fn list_available(
        &self,
        video_id: &str,
    ) -> Result<Vec<TranscriptTrack>, TranscriptError> {
        let transcript_list = self
            .api
            .list_transcripts(video_id)
            .await
            .map_err(|e| classify_retrieval_error(video_id, e))?;

        let tracks: Vec<TranscriptTrack> = transcript_list
            .transcripts()
            .map(|transcript| TranscriptTrack {
                language: transcript.language.clone(),
                language_code: transcript.language_code.clone(),
                is_generated: transcript.is_generated,
            })
            .collect();

        debug!("{} caption tracks available for {}", tracks.len(), video_id);
        Ok(tracks)
    }

    async fn fetch(
        &self,
        video_id: &str,
        language_codes: &[String],
    ) -> Result<Vec<CaptionEntry>, TranscriptError> {
        let codes: Vec<&str> = language_codes.iter().map(String::as_str).collect();
        let fetched = self
            .api
            .fetch_transcript(video_id, &codes, false)
            .await
            .map_err(|e| classify_retrieval_error(video_id, e))?;

        Ok(fetched
            .snippets
            .into_iter()
            .map(|snippet| CaptionEntry {
                text: snippet.text,
                start: snippet.start,
                duration: snippet.duration,
            })
            .collect())
    }
}

/// Map the transcript endpoint's failure reasons onto the crate's taxonomy.
fn classify_retrieval_error(video_id: &str, err: CouldNotRetrieveTranscript) -> TranscriptError {
    match &err.reason {
        Some(CouldNotRetrieveTranscriptReason::TranscriptsDisabled) => {
            TranscriptError::TranscriptsDisabled {
                video_id: video_id.to_string(),
            }
        }
        Some(CouldNotRetrieveTranscriptReason::NoTranscriptFound { .. }) => {
            TranscriptError::NoTranscriptFound {
                video_id: video_id.to_string(),
            }
        }
        Some(CouldNotRetrieveTranscriptReason::VideoUnavailable) => {
            TranscriptError::VideoUnavailable {
                video_id: video_id.to_string(),
            }
        }
        _ => TranscriptError::Unexpected {
            message: err.to_string(),
        },
    }
}
