//! Watch session: the title -> playlist pipeline
//!
//! Resolves the title, then for each episode fetches the video reference,
//! downloads it into the workspace, rewrites the proxy placeholder and
//! appends the file to the playlist. Stops at the first failure; the
//! workspace is dropped (and removed) with it.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::api::GazesClient;
use crate::models::{AnimeSummary, EpisodeRange};
use crate::stream::{rewrite_placeholder, Downloader, Workspace};

/// One downloaded episode in the workspace
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeFile {
    pub episode: u32,
    pub language: String,
    pub path: PathBuf,
}

/// Result of a successful preparation, ready for playback
#[derive(Debug)]
pub struct PreparedWatch {
    pub anime: AnimeSummary,
    pub workspace: Workspace,
    pub episodes: Vec<EpisodeFile>,
}

/// Everything a `watch` run needs besides the player
pub struct WatchSession {
    catalog: GazesClient,
    downloader: Downloader,
    language: String,
    proxy_url: String,
    root: PathBuf,
}

impl WatchSession {
    pub fn new(
        catalog: GazesClient,
        language: impl Into<String>,
        proxy_url: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            downloader: Downloader::new(),
            language: language.into(),
            proxy_url: proxy_url.into(),
            root: std::env::temp_dir(),
        }
    }

    /// Create workspaces under `root` instead of the system temp dir
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Run the lookup and download pipeline for `title` over `range`
    pub async fn prepare(&self, title: &str, range: EpisodeRange) -> Result<PreparedWatch> {
        let anime = self.catalog.find(title).await?;
        info!(id = anime.id, title = %anime.title, "resolved title");

        let slug = anime.slug();
        let workspace = Workspace::create_in(&self.root, &slug)?;

        let mut episodes = Vec::new();
        for episode in range.iter() {
            let source = self
                .catalog
                .episode_video(anime.id, episode, &self.language)
                .await?;

            let path = workspace.episode_path(episode);
            let size = self
                .downloader
                .download(&source.video_uri, &path)
                .await
                .with_context(|| format!("Episode {}", episode))?;
            rewrite_placeholder(&path, &self.proxy_url)
                .await
                .with_context(|| format!("Episode {}", episode))?;
            workspace.append_to_playlist(&path)?;

            info!(episode, language = %source.language, size, "episode ready");
            episodes.push(EpisodeFile {
                episode,
                language: source.language,
                path,
            });
        }

        Ok(PreparedWatch {
            anime,
            workspace,
            episodes,
        })
    }
}
