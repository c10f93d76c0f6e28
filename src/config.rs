//! Configuration management for animewatch
//!
//! Config is stored at ~/.config/animewatch/config.toml. Every value can be
//! overridden by an environment variable or a command line flag.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::gazes::DEFAULT_API_URL;
use crate::models::DEFAULT_LANGUAGE;
use crate::stream::download::DEFAULT_PROXY_URL;
use crate::stream::PlayerType;

/// Environment override for the catalog base URL
pub const ENV_API_URL: &str = "ANIMEWATCH_API_URL";

/// Environment override for the proxy substituted into playlists
pub const ENV_PROXY_URL: &str = "ANIMEWATCH_PROXY_URL";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog API base URL
    pub api_url: Option<String>,
    /// Proxy URL substituted for `{PROXY_URL}`
    pub proxy_url: Option<String>,
    /// Preferred episode language (vostfr, vf, ...)
    pub language: Option<String>,
    /// Player used for playback
    pub player: Option<PlayerType>,
    /// Binary to launch instead of the player's usual command
    pub player_command: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/animewatch/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("animewatch").join("config.toml"))
    }

    /// Load config from `path`, or the default location when `None`.
    ///
    /// A missing file yields the default config; an unreadable or malformed
    /// one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::path) {
            Some(p) => p,
            None => return Ok(Self::default()),
        };

        match std::fs::read_to_string(&path) {
            Ok(s) => Self::parse(&s)
                .with_context(|| format!("Invalid config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("Failed to read config file {}", path.display()))),
        }
    }

    /// Parse config from TOML text
    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Catalog URL: flag > `ANIMEWATCH_API_URL` > file > default
    pub fn api_url(&self, flag: Option<&str>) -> String {
        resolve(
            flag,
            std::env::var(ENV_API_URL).ok().as_deref(),
            self.api_url.as_deref(),
            DEFAULT_API_URL,
        )
    }

    /// Proxy URL: flag > `ANIMEWATCH_PROXY_URL` > file > default
    pub fn proxy_url(&self, flag: Option<&str>) -> String {
        resolve(
            flag,
            std::env::var(ENV_PROXY_URL).ok().as_deref(),
            self.proxy_url.as_deref(),
            DEFAULT_PROXY_URL,
        )
    }

    /// Episode language: flag > file > `vostfr`
    pub fn language(&self, flag: Option<&str>) -> String {
        resolve(flag, None, self.language.as_deref(), DEFAULT_LANGUAGE)
    }

    /// Player: flag > file > VLC
    pub fn player(&self, flag: Option<PlayerType>) -> PlayerType {
        flag.or(self.player).unwrap_or_default()
    }
}

/// First non-empty value in precedence order
fn resolve(flag: Option<&str>, env: Option<&str>, file: Option<&str>, default: &str) -> String {
    [flag, env, file]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}
