//! Local Player - VLC/mpv playback support
//!
//! Hands the assembled playlist to VLC or mpv and waits for it to close.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::process::Command;
use tracing::info;

/// Supported local players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerType {
    /// VLC media player (default)
    #[default]
    Vlc,
    /// mpv media player
    Mpv,
}

impl PlayerType {
    /// Get the command name for this player
    pub fn command(&self) -> &'static str {
        match self {
            PlayerType::Vlc => {
                // On macOS, VLC is an app bundle - check for it
                #[cfg(target_os = "macos")]
                if std::path::Path::new("/Applications/VLC.app").exists() {
                    return "/Applications/VLC.app/Contents/MacOS/VLC";
                }
                "vlc"
            }
            PlayerType::Mpv => "mpv",
        }
    }

    /// Get a display name for this player
    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerType::Vlc => "VLC",
            PlayerType::Mpv => "mpv",
        }
    }

    /// Arguments that make this player start on a playlist file
    pub fn playlist_args(&self, playlist: &Path) -> Vec<String> {
        match self {
            PlayerType::Vlc => vec![
                "--playlist-autostart".to_string(),
                playlist.display().to_string(),
            ],
            PlayerType::Mpv => vec![format!("--playlist={}", playlist.display())],
        }
    }
}

impl std::fmt::Display for PlayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Errors from local player operations
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Player '{0}' not found. Install it first.")]
    NotFound(String),
    #[error("Failed to start player: {0}")]
    StartFailed(#[from] std::io::Error),
    #[error("Player exited with {0}")]
    Exited(ExitStatus),
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),
}

/// Local player for downloaded episodes
pub struct LocalPlayer {
    player_type: PlayerType,
    command: String,
}

impl LocalPlayer {
    /// Create a new local player with the specified type
    pub fn new(player_type: PlayerType) -> Self {
        Self {
            player_type,
            command: player_type.command().to_string(),
        }
    }

    /// Use a specific binary while keeping `player_type`'s argument style
    pub fn with_command(player_type: PlayerType, command: impl Into<String>) -> Self {
        Self {
            player_type,
            command: command.into(),
        }
    }

    /// Get the player type
    pub fn player_type(&self) -> PlayerType {
        self.player_type
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Check if the player is available on the system
    pub async fn is_available(&self) -> bool {
        // If it's a full path (macOS app bundle), check if it exists
        if self.command.starts_with('/') {
            return Path::new(&self.command).exists();
        }

        Command::new("which")
            .arg(&self.command)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Play a playlist file and wait for the player to close.
    ///
    /// The player shares this process's stdout and stderr.
    pub async fn play_playlist(&self, playlist: &Path) -> Result<(), PlayerError> {
        if !playlist.exists() {
            return Err(PlayerError::PlaylistNotFound(
                playlist.display().to_string(),
            ));
        }

        let args = self.player_type.playlist_args(playlist);
        info!(player = %self.command, ?args, "launching player");

        let status = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PlayerError::NotFound(self.command.clone())
                } else {
                    PlayerError::StartFailed(e)
                }
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(PlayerError::Exited(status))
        }
    }
}
