//! Gazes catalog API client
//!
//! Resolves anime titles and per-episode video references.
//! Endpoints live under `/anime/animes` on the catalog host.

use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{AnimeSummary, VideoSource, FALLBACK_LANGUAGE};

/// Default catalog host
pub const DEFAULT_API_URL: &str = "https://api.gazes.fr";

/// Catalog API error types
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("No anime data found for '{0}'")]
    NoMatch(String),

    #[error("No valid video URI found for episode {episode} (language '{language}')")]
    NoVideo { episode: u32, language: String },

    #[error("Resource not found (404)")]
    NotFound,

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// Gazes catalog client
pub struct GazesClient {
    base_url: String,
    client: reqwest::Client,
}

impl GazesClient {
    /// Create a client against the public catalog
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Create a client with a custom base URL (config override, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "catalog request");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map_err(|e| CatalogError::InvalidResponse(format!("JSON parse error: {}", e)))
            }
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound),
            status => Err(CatalogError::Status(status.as_u16())),
        }
    }

    /// Search the catalog by free-text title
    pub async fn search(&self, title: &str) -> Result<Vec<AnimeSummary>, CatalogError> {
        let endpoint = format!("/anime/animes?title={}", urlencoding::encode(title));
        let response: SearchResponse = self.get(&endpoint).await?;
        Ok(response.into_results())
    }

    /// Resolve a title to the best (first) catalog match
    pub async fn find(&self, title: &str) -> Result<AnimeSummary, CatalogError> {
        self.search(title)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::NoMatch(title.to_string()))
    }

    /// Get the video reference for one episode.
    ///
    /// Falls back to `vostfr` when `language` has no entry.
    pub async fn episode_video(
        &self,
        anime_id: u64,
        episode: u32,
        language: &str,
    ) -> Result<VideoSource, CatalogError> {
        let endpoint = format!("/anime/animes/{}/{}", anime_id, episode);
        let response: EpisodeResponse = self.get(&endpoint).await?;

        let source = response.select(language).ok_or_else(|| CatalogError::NoVideo {
            episode,
            language: language.to_string(),
        })?;

        if source.is_fallback(language) {
            warn!(
                episode,
                requested = language,
                "language unavailable, using {}",
                source.language
            );
        }
        Ok(source)
    }
}

impl Default for GazesClient {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<AnimeRaw>,
}

impl SearchResponse {
    fn into_results(self) -> Vec<AnimeSummary> {
        self.data
            .into_iter()
            .map(|a| AnimeSummary {
                id: a.id,
                title: a.title,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct AnimeRaw {
    id: u64,
    title: String,
}

#[derive(Debug, Deserialize)]
struct EpisodeResponse {
    #[serde(default)]
    data: HashMap<String, VideoRaw>,
}

impl EpisodeResponse {
    fn select(mut self, language: &str) -> Option<VideoSource> {
        let (language, raw) = match self.data.remove(language) {
            Some(raw) => (language, raw),
            None => (FALLBACK_LANGUAGE, self.data.remove(FALLBACK_LANGUAGE)?),
        };
        Some(VideoSource {
            language: language.to_string(),
            video_uri: raw.video_uri,
        })
    }
}

#[derive(Debug, Deserialize)]
struct VideoRaw {
    #[serde(rename = "videoUri")]
    video_uri: String,
}
