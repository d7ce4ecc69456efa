use std::collections::BTreeMap;
use tracing::warn;

use super::Chapter;
use crate::cache::TitleCache;
use crate::segmenter::split_chunk_id;
use crate::timestamp::format_timestamp;
use crate::youtube::watch_url;

/// A video reconstructed from cached chapter titles.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedVideo {
    pub video_id: String,
    pub video_url: String,
    pub chapters: Vec<Chapter>,
}

/// Rebuild per-video chapter lists from everything in the title cache.
///
/// Entries are grouped by video id, ordered by chunk start seconds, and
/// given rebuilt watch URLs. Keys that do not parse as chunk ids are
/// skipped with a warning. Videos come back sorted by id.
pub fn group_cached_videos(cache: &TitleCache) -> Vec<CachedVideo> {
    let mut grouped: BTreeMap<String, Vec<(u64, String)>> = BTreeMap::new();

    for (chunk_id, title) in cache.entries() {
        match split_chunk_id(chunk_id) {
            Some((video_id, start_seconds)) => {
                grouped
                    .entry(video_id.to_string())
                    .or_default()
                    .push((start_seconds, title.to_string()));
            }
            None => {
                warn!("Skipping malformed cache key: {}", chunk_id);
            }
        }
    }

    grouped
        .into_iter()
        .map(|(video_id, mut titled_starts)| {
            titled_starts.sort_by_key(|(start_seconds, _)| *start_seconds);

            let chapters = titled_starts
                .into_iter()
                .map(|(start_seconds, title)| Chapter {
                    timestamp: format_timestamp(start_seconds as f64),
                    title,
                })
                .collect();

            CachedVideo {
                video_url: watch_url(&video_id),
                video_id,
                chapters,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn cache_with(entries: &[(&str, &str)]) -> (TempDir, TitleCache) {
        let dir = TempDir::new().unwrap();
        let mut cache = TitleCache::load(dir.path().join("cache.json")).await;
        for (id, title) in entries {
            cache
                .insert(id.to_string(), title.to_string())
                .await
                .unwrap();
        }
        (dir, cache)
    }

    #[test]
    fn test_groups_by_video_and_sorts_by_start() {
        let (_dir, cache) = tokio_test::block_on(cache_with(&[
            ("dQw4w9WgXcQ_90", "Later"),
            ("dQw4w9WgXcQ_0", "Intro"),
            ("abc12345678_5", "Other Video"),
        ]));

        let videos = group_cached_videos(&cache);

        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].video_id, "abc12345678");
        assert_eq!(
            videos[0].video_url,
            "https://www.youtube.com/watch?v=abc12345678"
        );
        assert_eq!(videos[1].video_id, "dQw4w9WgXcQ");
        assert_eq!(videos[1].chapters[0].timestamp, "0:00");
        assert_eq!(videos[1].chapters[0].title, "Intro");
        assert_eq!(videos[1].chapters[1].timestamp, "1:30");
        assert_eq!(videos[1].chapters[1].title, "Later");
    }

    #[test]
    fn test_video_ids_with_underscores_survive() {
        let (_dir, cache) = tokio_test::block_on(cache_with(&[("a_b-c_d-e_1_3600", "Hour Mark")]));

        let videos = group_cached_videos(&cache);

        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].video_id, "a_b-c_d-e_1");
        assert_eq!(videos[0].chapters[0].timestamp, "1:00:00");
    }

    #[test]
    fn test_malformed_keys_are_skipped() {
        let (_dir, cache) = tokio_test::block_on(cache_with(&[
            ("dQw4w9WgXcQ_0", "Kept"),
            ("garbage", "Dropped"),
            ("video_sixty", "Dropped Too"),
        ]));

        let videos = group_cached_videos(&cache);

        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].chapters.len(), 1);
        assert_eq!(videos[0].chapters[0].title, "Kept");
    }

    #[test]
    fn test_empty_cache_yields_no_videos() {
        let (_dir, cache) = tokio_test::block_on(cache_with(&[]));
        assert!(group_cached_videos(&cache).is_empty());
    }
}
