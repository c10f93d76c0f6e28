//! Local streaming pipeline
//!
//! - Workspace: temporary directory and playlist bookkeeping
//! - Download: fetch episode playlists and rewrite the proxy placeholder
//! - Player: VLC/mpv handoff

pub mod download;
pub mod player;
pub mod workspace;

pub use download::{rewrite_placeholder, DownloadError, Downloader};
pub use player::{LocalPlayer, PlayerError, PlayerType};
pub use workspace::{Workspace, WorkspaceError};
