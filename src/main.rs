use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use yt_chapters::cache::TitleCache;
use yt_chapters::chapters::{format_chapters_block, group_cached_videos, ChapterGenerator};
use yt_chapters::config::Config;

#[derive(Parser)]
#[command(name = "yt-chapters")]
#[command(version)]
#[command(about = "AI-powered chapter lists for YouTube videos")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Title cache file (overrides config)
    #[arg(long)]
    cache_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a chapter block for a video URL
    Generate {
        /// YouTube watch, share, or embed URL
        url: String,

        /// Words accumulated before a chapter chunk closes
        #[arg(long)]
        max_words: Option<usize>,

        /// Skip writing youtube_chapters.txt
        #[arg(long)]
        no_save: bool,
    },
    /// Show chapter lists already in the title cache
    Cached {
        /// Write one {video_id}_chapters.txt file per cached video
        #[arg(long)]
        export: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt().with_env_filter("debug").init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("yt_chapters=info,warn")
            .init();
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("No config file loaded, using defaults: {}", e);
        Config::default()
    });
    config.merge_env();

    if let Some(cache_file) = cli.cache_file {
        config.storage.cache_file = cache_file;
    }

    match cli.command {
        Commands::Generate {
            url,
            max_words,
            no_save,
        } => {
            if let Some(max_words) = max_words {
                config.chunking.max_words_per_chunk = max_words;
            }
            config.validate()?;
            debug!("{}", config.summary());

            let generator = ChapterGenerator::new(&config)?;
            match generator.generate(&url).await {
                Ok(generated) => {
                    let block = generated.to_block();
                    println!("{}", block);

                    if !no_save {
                        let path = config.storage.output_dir.join("youtube_chapters.txt");
                        tokio::fs::write(&path, &block).await?;
                        info!("💾 Saved chapter block to {}", path.display());
                    }
                }
                Err(e) => {
                    error!("❌ Chapter generation failed: {}", e);
                    return Err(e.into());
                }
            }
        }

        Commands::Cached { export } => {
            config.validate()?;
            debug!("{}", config.summary());

            let cache = TitleCache::load(&config.storage.cache_file).await;
            let videos = group_cached_videos(&cache);

            if videos.is_empty() {
                info!("📭 No cached videos in {}", cache.path().display());
                return Ok(());
            }

            info!("📚 Found {} cached videos", videos.len());

            for video in &videos {
                let block = format_chapters_block(&video.video_url, &video.chapters);
                println!("{}", block);

                if export {
                    let path = config
                        .storage
                        .output_dir
                        .join(format!("{}_chapters.txt", video.video_id));
                    tokio::fs::write(&path, &block).await?;
                    info!("💾 Saved {}", path.display());
                }
            }
        }
    }

    Ok(())
}
