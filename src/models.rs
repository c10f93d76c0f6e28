//! Data structures shared across animewatch
//!
//! - **Catalog**: anime lookup results and per-episode video sources
//! - **Episodes**: the inclusive episode range a `watch` run covers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language requested when none is configured
pub const DEFAULT_LANGUAGE: &str = "vostfr";

/// Language used when the requested one has no video for an episode
pub const FALLBACK_LANGUAGE: &str = "vostfr";

// =============================================================================
// Catalog Models
// =============================================================================

/// An anime as returned by the catalog title lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeSummary {
    pub id: u64,
    pub title: String,
}

impl AnimeSummary {
    /// File-name friendly form of the title.
    ///
    /// Spaces become `-`; path separators are replaced too so the slug is
    /// always a single path component.
    pub fn slug(&self) -> String {
        self.title
            .chars()
            .map(|c| match c {
                ' ' | '/' | '\\' => '-',
                other => other,
            })
            .collect()
    }
}

impl fmt::Display for AnimeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.title, self.id)
    }
}

/// Streaming reference for one episode in one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSource {
    /// Language key the video was actually found under
    pub language: String,
    pub video_uri: String,
}

impl VideoSource {
    /// Whether this source was picked from a language other than `requested`
    pub fn is_fallback(&self, requested: &str) -> bool {
        self.language != requested
    }
}

// =============================================================================
// Episode Range
// =============================================================================

/// Inclusive range of episode numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRange {
    pub start: u32,
    pub end: u32,
}

impl EpisodeRange {
    /// Build a range; an `end` before `start` collapses to the single
    /// episode `start`.
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }
}

impl fmt::Display for EpisodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "episode {}", self.start)
        } else {
            write!(f, "episodes {}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // AnimeSummary Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_slug_replaces_spaces() {
        let anime = AnimeSummary {
            id: 42,
            title: "Shingeki no Kyojin".to_string(),
        };
        assert_eq!(anime.slug(), "Shingeki-no-Kyojin");
    }

    #[test]
    fn test_slug_strips_path_separators() {
        let anime = AnimeSummary {
            id: 7,
            title: "Fate/Zero".to_string(),
        };
        assert_eq!(anime.slug(), "Fate-Zero");
    }

    #[test]
    fn test_anime_display() {
        let anime = AnimeSummary {
            id: 12,
            title: "One Piece".to_string(),
        };
        assert_eq!(anime.to_string(), "One Piece (#12)");
    }

    // -------------------------------------------------------------------------
    // EpisodeRange Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_range_end_before_start_collapses() {
        let range = EpisodeRange::new(5, 2);
        assert_eq!(range.start, 5);
        assert_eq!(range.end, 5);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn test_range_iterates_inclusive() {
        let range = EpisodeRange::new(3, 6);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_range_display() {
        assert_eq!(EpisodeRange::new(1, 1).to_string(), "episode 1");
        assert_eq!(EpisodeRange::new(1, 12).to_string(), "episodes 1-12");
    }

    #[test]
    fn test_video_source_fallback_flag() {
        let source = VideoSource {
            language: "vostfr".to_string(),
            video_uri: "https://cdn.example/ep1.m3u8".to_string(),
        };
        assert!(source.is_fallback("vf"));
        assert!(!source.is_fallback("vostfr"));
    }
}
