/// Disk-backed memo cache mapping chunk ids to generated titles
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Title cache persisted as a single pretty-printed JSON object.
///
/// Loaded fresh per run. A missing file starts empty; an unparseable file
/// starts empty with a warning, never an error. Every insert rewrites the
/// whole file so titles survive a crash mid-run.
#[derive(Debug, Clone)]
pub struct TitleCache {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl TitleCache {
    /// Load the cache from disk, or start empty.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => {
                    debug!("📚 Loaded {} cached titles from {}", entries.len(), path.display());
                    entries
                }
                Err(e) => {
                    warn!(
                        "Failed to parse cache file {}: {} (starting empty)",
                        path.display(),
                        e
                    );
                    BTreeMap::new()
                }
            },
            Err(_) => {
                debug!("No cache file at {}, starting empty", path.display());
                BTreeMap::new()
            }
        };

        Self { path, entries }
    }

    /// Look up a cached title by chunk id.
    pub fn get(&self, chunk_id: &str) -> Option<&str> {
        self.entries.get(chunk_id).map(String::as_str)
    }

    /// Store a title and write the cache through to disk immediately.
    pub async fn insert(&mut self, chunk_id: String, title: String) -> Result<()> {
        self.entries.insert(chunk_id, title);
        self.save().await
    }

    /// Rewrite the whole cache file.
    pub async fn save(&self) -> Result<()> {
        let json_content = serde_json::to_string_pretty(&self.entries)?;
        tokio::fs::write(&self.path, json_content).await?;
        debug!("💾 Saved {} titles to {}", self.entries.len(), self.path.display());
        Ok(())
    }

    /// Iterate over `(chunk_id, title)` pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, title)| (id.as_str(), title.as_str()))
    }

    /// Number of cached titles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
