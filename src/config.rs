use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::llm::{LLMConfig, LLMProvider};
use crate::segmenter::DEFAULT_MAX_WORDS_PER_CHUNK;
use crate::transcript::DEFAULT_PREFERRED_LANGUAGES;

/// Configuration for the chapter generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Caption track selection settings
    pub transcript: TranscriptConfig,

    /// Transcript chunking settings
    pub chunking: ChunkingConfig,

    /// LLM titling settings
    pub llm: LLMConfig,

    /// Cache and artifact locations
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Language codes tried in order when picking a caption track
    pub preferred_languages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Words accumulated before a chunk closes
    pub max_words_per_chunk: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Title cache file
    pub cache_file: PathBuf,

    /// Directory receiving chapter block files
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        // Try to load from various locations
        let config_paths = [
            "yt-chapters.toml",
            "config/yt-chapters.toml",
            "~/.config/yt-chapters/config.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        Err(anyhow!("No configuration file found"))
    }

    /// Overlay environment variables onto this configuration.
    ///
    /// `OPENAI_API_KEY` is the credential channel; the `YT_CHAPTERS_*`
    /// variables mirror the main config file knobs.
    pub fn merge_env(&mut self) {
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            self.llm.api_key = Some(api_key);
        }

        if let Ok(model) = std::env::var("YT_CHAPTERS_MODEL") {
            self.llm.model = model;
        }

        if let Ok(cache_file) = std::env::var("YT_CHAPTERS_CACHE_FILE") {
            self.storage.cache_file = PathBuf::from(cache_file);
        }

        if let Ok(max_words) = std::env::var("YT_CHAPTERS_MAX_WORDS") {
            self.chunking.max_words_per_chunk =
                max_words.parse().unwrap_or(DEFAULT_MAX_WORDS_PER_CHUNK);
        }

        if let Ok(languages) = std::env::var("YT_CHAPTERS_LANGUAGES") {
            self.transcript.preferred_languages = languages
                .split(',')
                .map(|code| code.trim().to_string())
                .filter(|code| !code.is_empty())
                .collect();
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.chunking.max_words_per_chunk == 0 {
            return Err(anyhow!("max_words_per_chunk must be greater than 0"));
        }

        match self.llm.provider {
            LLMProvider::OpenAI => {
                if self.llm.api_key.is_none() {
                    return Err(anyhow!(
                        "OPENAI_API_KEY not found. Add it to your environment or config file."
                    ));
                }
            }
            LLMProvider::LMStudio => {
                if self.llm.endpoint.is_none() {
                    return Err(anyhow!(
                        "LMStudio endpoint required. Set [llm] endpoint in the config file."
                    ));
                }
            }
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "yt-chapters configuration:\n\
            - Preferred Languages: {}\n\
            - Max Words Per Chunk: {}\n\
            - LLM Provider: {:?} ({})\n\
            - Cache File: {}\n\
            - Output Directory: {}",
            self.transcript.preferred_languages.join(", "),
            self.chunking.max_words_per_chunk,
            self.llm.provider,
            self.llm.model,
            self.storage.cache_file.display(),
            self.storage.output_dir.display()
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transcript: TranscriptConfig {
                preferred_languages: DEFAULT_PREFERRED_LANGUAGES
                    .iter()
                    .map(|code| code.to_string())
                    .collect(),
            },
            chunking: ChunkingConfig {
                max_words_per_chunk: DEFAULT_MAX_WORDS_PER_CHUNK,
            },
            llm: LLMConfig::default(),
            storage: StorageConfig {
                cache_file: PathBuf::from("cache.json"),
                output_dir: PathBuf::from("."),
            },
        }
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_preferred_languages(mut self, languages: Vec<String>) -> Self {
        self.config.transcript.preferred_languages = languages;
        self
    }

    pub fn with_max_words_per_chunk(mut self, max_words: usize) -> Self {
        self.config.chunking.max_words_per_chunk = max_words;
        self
    }

    pub fn with_provider(mut self, provider: LLMProvider) -> Self {
        self.config.llm.provider = provider;
        self
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.config.llm.api_key = Some(api_key);
        self
    }

    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.config.llm.endpoint = Some(endpoint);
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.config.llm.model = model;
        self
    }

    pub fn with_cache_file(mut self, cache_file: PathBuf) -> Self {
        self.config.storage.cache_file = cache_file;
        self
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.config.storage.output_dir = output_dir;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.chunking.max_words_per_chunk, 1500);
        assert_eq!(
            config.transcript.preferred_languages,
            vec!["en", "en-US", "en-GB", "hi", "hi-IN"]
        );
        assert_eq!(config.storage.cache_file, PathBuf::from("cache.json"));
        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .with_max_words_per_chunk(800)
            .with_api_key("sk-test".to_string())
            .with_cache_file(PathBuf::from("titles.json"))
            .build();

        assert_eq!(config.chunking.max_words_per_chunk, 800);
        assert_eq!(config.llm.api_key, Some("sk-test".to_string()));
        assert_eq!(config.storage.cache_file, PathBuf::from("titles.json"));
    }

    #[test]
    fn test_validation_requires_openai_key() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY not found"));
    }

    #[test]
    fn test_validation_passes_with_key() {
        let config = ConfigBuilder::new()
            .with_api_key("sk-test".to_string())
            .build();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_chunk_size() {
        let config = ConfigBuilder::new()
            .with_api_key("sk-test".to_string())
            .with_max_words_per_chunk(0)
            .build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lmstudio_needs_endpoint_but_no_key() {
        let without_endpoint = ConfigBuilder::new()
            .with_provider(LLMProvider::LMStudio)
            .build();
        assert!(without_endpoint.validate().is_err());

        let with_endpoint = ConfigBuilder::new()
            .with_provider(LLMProvider::LMStudio)
            .with_endpoint("http://localhost:1234/v1/chat/completions".to_string())
            .build();
        assert!(with_endpoint.validate().is_ok());
    }

    #[test]
    fn test_config_summary() {
        let config = ConfigBuilder::new()
            .with_model("gpt-4o".to_string())
            .with_output_dir(PathBuf::from("out"))
            .build();

        let summary = config.summary();
        assert!(summary.contains("OpenAI (gpt-4o)"));
        assert!(summary.contains("Max Words Per Chunk: 1500"));
        assert!(summary.contains("Output Directory: out"));
    }

    #[test]
    fn test_config_parses_from_toml() {
        let config_str = r#"
[transcript]
preferred_languages = ["en", "de"]

[chunking]
max_words_per_chunk = 800

[llm]
provider = "OpenAI"
model = "gpt-4o-mini"
max_tokens = 30
temperature = 0.2
timeout_seconds = 60

[storage]
cache_file = "titles.json"
output_dir = "out"
"#;

        let config: Config = toml::from_str(config_str).unwrap();
        assert_eq!(config.transcript.preferred_languages, vec!["en", "de"]);
        assert_eq!(config.chunking.max_words_per_chunk, 800);
        assert_eq!(config.llm.api_key, None);
        assert_eq!(config.storage.output_dir, PathBuf::from("out"));
    }
}
