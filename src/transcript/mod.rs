/// Transcript acquisition: caption types, availability, and the source seam

pub mod fetcher;

pub use fetcher::YouTubeTranscriptFetcher;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Language codes tried in order when picking a caption track.
pub const DEFAULT_PREFERRED_LANGUAGES: [&str; 5] = ["en", "en-US", "en-GB", "hi", "hi-IN"];

/// A single time-coded caption line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptionEntry {
    /// Caption text as published
    pub text: String,
    /// Start position in seconds
    pub start: f64,
    /// Display duration in seconds
    pub duration: f64,
}

/// A caption track available for a video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptTrack {
    /// Human-readable language name
    pub language: String,
    /// BCP-47-ish code as YouTube reports it
    pub language_code: String,
    /// Whether the track was auto-generated
    pub is_generated: bool,
}

/// Why a transcript could not be retrieved.
///
/// Display strings are the user-facing messages shown by the CLI.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Transcripts are disabled. Enable captions in YouTube Studio.")]
    TranscriptsDisabled { video_id: String },

    #[error("No transcripts found. Upload captions in YouTube Studio.")]
    NoTranscriptFound { video_id: String },

    #[error("This video is unavailable. Check the video ID or URL.")]
    VideoUnavailable { video_id: String },

    #[error("Unexpected error: {message}")]
    Unexpected { message: String },
}

/// Source of caption data for a video.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// List the caption tracks available for a video.
    async fn list_available(&self, video_id: &str)
        -> Result<Vec<TranscriptTrack>, TranscriptError>;

    /// Fetch the caption entries for a video in the first matching language.
    async fn fetch(
        &self,
        video_id: &str,
        language_codes: &[String],
    ) -> Result<Vec<CaptionEntry>, TranscriptError>;
}

/// Pick the caption language to fetch.
///
/// Returns the first preferred code that has a track, falling back to the
/// first available track when none match. `None` only when no tracks exist.
pub fn select_language_code(tracks: &[TranscriptTrack], preferred: &[String]) -> Option<String> {
    preferred
        .iter()
        .find(|code| tracks.iter().any(|track| &track.language_code == *code))
        .cloned()
        .or_else(|| tracks.first().map(|track| track.language_code.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(code: &str) -> TranscriptTrack {
        TranscriptTrack {
            language: code.to_string(),
            language_code: code.to_string(),
            is_generated: false,
        }
    }

    #[test]
    fn test_picks_first_preferred_code_present() {
        let tracks = vec![track("de"), track("en-GB"), track("en")];
        let preferred = vec!["en".to_string(), "en-GB".to_string()];

        assert_eq!(
            select_language_code(&tracks, &preferred),
            Some("en".to_string())
        );
    }

    #[test]
    fn test_preference_order_wins_over_track_order() {
        let tracks = vec![track("hi"), track("en-US")];
        let preferred = vec!["en-US".to_string(), "hi".to_string()];

        assert_eq!(
            select_language_code(&tracks, &preferred),
            Some("en-US".to_string())
        );
    }

    #[test]
    fn test_falls_back_to_first_available_track() {
        let tracks = vec![track("ja"), track("ko")];
        let preferred = vec!["en".to_string()];

        assert_eq!(
            select_language_code(&tracks, &preferred),
            Some("ja".to_string())
        );
    }

    #[test]
    fn test_no_tracks_means_no_selection() {
        let preferred = vec!["en".to_string()];
        assert_eq!(select_language_code(&[], &preferred), None);
    }

    #[test]
    fn test_empty_preference_list_takes_first_track() {
        let tracks = vec![track("fr")];
        assert_eq!(select_language_code(&tracks, &[]), Some("fr".to_string()));
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        let disabled = TranscriptError::TranscriptsDisabled {
            video_id: "dQw4w9WgXcQ".to_string(),
        };
        assert_eq!(
            disabled.to_string(),
            "Transcripts are disabled. Enable captions in YouTube Studio."
        );

        let missing = TranscriptError::NoTranscriptFound {
            video_id: "dQw4w9WgXcQ".to_string(),
        };
        assert_eq!(
            missing.to_string(),
            "No transcripts found. Upload captions in YouTube Studio."
        );

        let unavailable = TranscriptError::VideoUnavailable {
            video_id: "dQw4w9WgXcQ".to_string(),
        };
        assert_eq!(
            unavailable.to_string(),
            "This video is unavailable. Check the video ID or URL."
        );

        let unexpected = TranscriptError::Unexpected {
            message: "socket closed".to_string(),
        };
        assert_eq!(unexpected.to_string(), "Unexpected error: socket closed");
    }
}
