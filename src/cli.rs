//! CLI - Command Line Interface for animewatch
//!
//! # Examples
//!
//! ```bash
//! # Watch the first episode (vostfr) in VLC
//! animewatch watch "one piece"
//!
//! # Episodes 3 to 6 in French dub, with mpv
//! animewatch watch "one piece" --start 3 --end 6 -l vf -p mpv
//!
//! # List catalog matches
//! animewatch search "naruto" --json
//! ```

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::stream::PlayerType;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Title or episode not found
    NotFound = 4,
    /// Episode has no video in any usable language
    NoVideo = 5,
    /// Player missing or failed
    PlayerFailed = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// animewatch - watch anime episodes from the Gazes catalog
#[derive(Parser, Debug)]
#[command(
    name = "animewatch",
    version,
    about = "Watch anime episodes from the Gazes catalog in VLC or mpv",
    after_help = "EXAMPLES:\n\
                  animewatch watch \"one piece\"                 Play episode 1\n\
                  animewatch watch \"one piece\" --start 3 --end 6 -l vf\n\
                  animewatch search naruto --json              List matches"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Catalog API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Proxy URL substituted into downloaded playlists
    #[arg(long, global = true)]
    pub proxy_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }

    /// Default log filter for the verbosity flags
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download episodes of a title and play them
    #[command(visible_alias = "w")]
    Watch(WatchCmd),

    /// Search the catalog by title
    #[command(visible_alias = "s")]
    Search(SearchCmd),
}

// =============================================================================
// Watch Command
// =============================================================================

/// Download a range of episodes and hand them to a player
#[derive(Args, Debug)]
pub struct WatchCmd {
    /// Anime title to look up
    #[arg(required = true)]
    pub title: String,

    /// First episode number
    #[arg(long, default_value = "1")]
    pub start: u32,

    /// Last episode number (values before --start play only --start)
    #[arg(long, default_value = "1")]
    pub end: u32,

    /// Episode language (falls back to vostfr)
    #[arg(long, short = 'l')]
    pub lang: Option<String>,

    /// Player to use (vlc or mpv)
    #[arg(long, short = 'p', value_enum)]
    pub player: Option<PlayerChoice>,

    /// Keep the temporary directory after playback
    #[arg(long)]
    pub keep: bool,

    /// Prepare the playlist without starting a player (implies --keep)
    #[arg(long)]
    pub no_play: bool,
}

/// Local player selection
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerChoice {
    /// VLC media player (default)
    #[default]
    Vlc,
    /// mpv media player
    Mpv,
}

impl From<PlayerChoice> for PlayerType {
    fn from(choice: PlayerChoice) -> Self {
        match choice {
            PlayerChoice::Vlc => PlayerType::Vlc,
            PlayerChoice::Mpv => PlayerType::Mpv,
        }
    }
}

// =============================================================================
// Search Command
// =============================================================================

/// Search the catalog by title
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Title to search for
    #[arg(required = true)]
    pub title: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Summary of a completed `watch` run
#[derive(Debug, Serialize, Deserialize)]
pub struct WatchResponse {
    pub status: String,
    pub anime_id: u64,
    pub title: String,
    pub episodes: Vec<u32>,
    pub player: String,
    /// Present when the workspace was kept on disk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist: Option<String>,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        tracing::debug!(code = i32::from(code), "command failed: {}", msg);
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["animewatch"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_watch_defaults() {
        let cli = Cli::parse_from(["animewatch", "watch", "one piece"]);
        match cli.command {
            Some(Command::Watch(cmd)) => {
                assert_eq!(cmd.title, "one piece");
                assert_eq!(cmd.start, 1);
                assert_eq!(cmd.end, 1);
                assert!(cmd.lang.is_none());
                assert!(cmd.player.is_none());
                assert!(!cmd.keep);
            }
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_log_level() {
        assert_eq!(Cli::parse_from(["animewatch"]).log_level(), "warn");
        assert_eq!(Cli::parse_from(["animewatch", "-v"]).log_level(), "info");
        assert_eq!(Cli::parse_from(["animewatch", "-vvv"]).log_level(), "debug");
    }

    #[test]
    fn test_player_choice_conversion() {
        assert_eq!(PlayerType::from(PlayerChoice::Vlc), PlayerType::Vlc);
        assert_eq!(PlayerType::from(PlayerChoice::Mpv), PlayerType::Mpv);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(i32::from(ExitCode::NotFound), 4);
        assert_eq!(i32::from(ExitCode::NoVideo), 5);
        assert_eq!(i32::from(ExitCode::PlayerFailed), 6);
    }

    #[test]
    fn test_json_error_envelope() {
        let output = JsonOutput::<()>::error_msg("boom", ExitCode::NotFound);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["error"], "boom");
        assert_eq!(json["exit_code"], 4);
        assert!(json.get("data").is_none());
    }
}
