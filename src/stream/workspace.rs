//! Temporary workspace for downloaded episodes
//!
//! Each `watch` run gets its own directory `<root>/<slug>_<hex>` holding the
//! per-episode playlists and the `playlist.m3u8` handed to the player.
//! The directory is removed when the workspace is dropped unless kept.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Name of the playlist file handed to the player
pub const PLAYLIST_FILE: &str = "playlist.m3u8";

/// Errors from workspace file operations
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Failed to create workspace {path}: {source}")]
    Create { path: PathBuf, source: io::Error },
    #[error("Failed to write playlist {path}: {source}")]
    Playlist { path: PathBuf, source: io::Error },
}

/// Scratch directory for one run
#[derive(Debug)]
pub struct Workspace {
    dir: PathBuf,
    playlist: PathBuf,
    slug: String,
    keep: bool,
}

impl Workspace {
    /// Create a workspace under the system temp directory
    pub fn create(slug: &str) -> Result<Self, WorkspaceError> {
        Self::create_in(std::env::temp_dir(), slug)
    }

    /// Create a workspace under `root` with an empty playlist inside
    pub fn create_in(root: impl AsRef<Path>, slug: &str) -> Result<Self, WorkspaceError> {
        let suffix = Uuid::new_v4().simple().to_string();
        let dir = root.as_ref().join(format!("{}_{}", slug, suffix));

        let create_err = |source| WorkspaceError::Create {
            path: dir.clone(),
            source,
        };
        fs::create_dir(&dir).map_err(create_err)?;
        // Playlist entries are absolute, so the directory must be too
        let dir = match fs::canonicalize(&dir) {
            Ok(abs) => abs,
            Err(source) => {
                let _ = fs::remove_dir(&dir);
                return Err(create_err(source));
            }
        };
        debug!(dir = %dir.display(), "workspace created");

        let playlist = dir.join(PLAYLIST_FILE);
        // Built before the playlist exists: an early return must still drop it
        let workspace = Self {
            dir,
            playlist,
            slug: slug.to_string(),
            keep: false,
        };
        fs::File::create(&workspace.playlist).map_err(|source| WorkspaceError::Playlist {
            path: workspace.playlist.clone(),
            source,
        })?;

        Ok(workspace)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn playlist(&self) -> &Path {
        &self.playlist
    }

    /// Local file for an episode: `<dir>/<slug>_<episode>.m3u8`
    pub fn episode_path(&self, episode: u32) -> PathBuf {
        self.dir.join(format!("{}_{}.m3u8", self.slug, episode))
    }

    /// Append one entry (one line) to the playlist
    pub fn append_to_playlist(&self, entry: &Path) -> Result<(), WorkspaceError> {
        let playlist_err = |source| WorkspaceError::Playlist {
            path: self.playlist.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.playlist)
            .map_err(playlist_err)?;
        writeln!(file, "{}", entry.display()).map_err(playlist_err)?;
        Ok(())
    }

    /// Leave the directory on disk when the workspace is dropped
    pub fn keep(&mut self) {
        self.keep = true;
    }

    pub fn is_kept(&self) -> bool {
        self.keep
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        if let Err(e) = fs::remove_dir_all(&self.dir) {
            warn!(dir = %self.dir.display(), "failed to remove workspace: {}", e);
        }
    }
}
