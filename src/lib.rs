//! animewatch - watch anime from the Gazes catalog
//!
//! Looks a title up in the catalog, downloads the HLS playlist of each
//! requested episode, points it at the streaming proxy and plays the lot
//! in VLC or mpv.
//!
//! # Modules
//!
//! - `models` - Catalog results, video sources, episode ranges
//! - `api` - Gazes catalog client
//! - `stream` - Workspace, download/rewrite and player handoff
//! - `session` - The title -> playlist pipeline
//! - `cli` / `commands` - Argument parsing and command handlers
//! - `config` - Config file and overrides

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod session;
pub mod stream;

// Re-export commonly used types
pub use models::{AnimeSummary, EpisodeRange, VideoSource};

pub use api::{CatalogError, GazesClient};
pub use session::{PreparedWatch, WatchSession};
