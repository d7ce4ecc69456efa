use super::{ChatMessage, LLM};
use crate::cache::TitleCache;
use crate::segmenter::Chunk;
use anyhow::Result;
use tracing::{debug, warn};

/// Title substituted when the language model call fails.
pub const FALLBACK_TITLE: &str = "Chapter Title Error";

const SYSTEM_PROMPT: &str = "You create short, catchy YouTube chapter titles.";

/// Produces one chapter title per chunk, memoizing through the title cache.
pub struct ChunkTitler {
    llm: Box<dyn LLM>,
}

impl ChunkTitler {
    /// Create a titler over an LLM provider.
    pub fn new(llm: Box<dyn LLM>) -> Self {
        Self { llm }
    }

    /// Return the title for a chunk.
    ///
    /// A cache hit skips the LLM entirely. On a miss the LLM is asked once;
    /// any failure yields the fallback title. Either way the new title is
    /// written through to the cache before returning. A cache write failure
    /// is logged and absorbed so the title still reaches the output.
    pub async fn title_chunk(&self, chunk: &Chunk, cache: &mut TitleCache) -> String {
        if let Some(title) = cache.get(&chunk.id) {
            debug!("📚 Cache hit for chunk {}", chunk.id);
            return title.to_string();
        }

        let title = match self.request_title(&chunk.text).await {
            Ok(title) => title,
            Err(e) => {
                warn!("⚠️ Title generation failed for chunk {}: {}", chunk.id, e);
                FALLBACK_TITLE.to_string()
            }
        };

        if let Err(e) = cache.insert(chunk.id.clone(), title.clone()).await {
            warn!("Failed to persist title cache: {}", e);
        }

        title
    }

    /// Ask the LLM for a single short title.
    async fn request_title(&self, chunk_text: &str) -> Result<String> {
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: format!(
                    "Summarize this transcript chunk into a short chapter title (max 8 words):\n\n{}",
                    chunk_text
                ),
            },
        ];

        let response = self.llm.chat(messages).await?;

        debug!("Title generated (tokens: {:?})", response.tokens_used);

        Ok(response.content.trim().to_string())
    }
}
