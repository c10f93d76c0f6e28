//! CLI Command Handlers
//!
//! Each handler takes CLI args and Output, returns ExitCode.

use anyhow::Result;
use std::path::PathBuf;

use crate::api::{CatalogError, GazesClient};
use crate::cli::{Cli, ExitCode, Output, SearchCmd, WatchCmd, WatchResponse};
use crate::config::Config;
use crate::models::{AnimeSummary, EpisodeRange};
use crate::session::{EpisodeFile, PreparedWatch, WatchSession};
use crate::stream::{DownloadError, LocalPlayer, PlayerError, PlayerType, WorkspaceError};

/// Settings shared by all commands, resolved from flags, env and config
pub struct Context {
    pub config: Config,
    pub api_url: String,
    pub proxy_url: String,
    /// Directory that receives the per-run workspaces
    pub workspace_root: PathBuf,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let api_url = config.api_url(cli.api_url.as_deref());
        let proxy_url = config.proxy_url(cli.proxy_url.as_deref());
        Ok(Self {
            config,
            api_url,
            proxy_url,
            workspace_root: std::env::temp_dir(),
        })
    }

    fn catalog(&self) -> GazesClient {
        GazesClient::with_base_url(&self.api_url)
    }

    fn player(&self, player_type: PlayerType) -> LocalPlayer {
        match &self.config.player_command {
            Some(command) => LocalPlayer::with_command(player_type, command),
            None => LocalPlayer::new(player_type),
        }
    }
}

// =============================================================================
// Error Classification
// =============================================================================

/// Map a pipeline error to its exit code
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<CatalogError>() {
            return match e {
                CatalogError::NoMatch(_) | CatalogError::NotFound => ExitCode::NotFound,
                CatalogError::NoVideo { .. } => ExitCode::NoVideo,
                CatalogError::Status(_)
                | CatalogError::InvalidResponse(_)
                | CatalogError::RequestFailed(_) => ExitCode::NetworkError,
            };
        }
        if let Some(e) = cause.downcast_ref::<DownloadError>() {
            return match e {
                DownloadError::Request(_) | DownloadError::Status(_) => ExitCode::NetworkError,
                DownloadError::Io { .. } => ExitCode::Error,
            };
        }
        if cause.downcast_ref::<WorkspaceError>().is_some() {
            return ExitCode::Error;
        }
        if cause.downcast_ref::<PlayerError>().is_some() {
            return ExitCode::PlayerFailed;
        }
    }
    ExitCode::Error
}

// =============================================================================
// Watch Command
// =============================================================================

/// One line per episode whose video came from another language than `requested`
pub fn fallback_notices(episodes: &[EpisodeFile], requested: &str) -> Vec<String> {
    episodes
        .iter()
        .filter(|file| file.language != requested)
        .map(|file| {
            format!(
                "Episode {}: '{}' unavailable, using {}",
                file.episode, requested, file.language
            )
        })
        .collect()
}

/// Summary printed after a run; `playlist` is only set for a kept workspace
pub fn watch_response(prepared: &PreparedWatch, player: PlayerType, status: &str) -> WatchResponse {
    WatchResponse {
        status: status.to_string(),
        anime_id: prepared.anime.id,
        title: prepared.anime.title.clone(),
        episodes: prepared.episodes.iter().map(|f| f.episode).collect(),
        player: player.display_name().to_string(),
        playlist: prepared
            .workspace
            .is_kept()
            .then(|| prepared.workspace.playlist().display().to_string()),
    }
}

pub async fn watch_cmd(cmd: WatchCmd, ctx: &Context, output: &Output) -> ExitCode {
    let range = EpisodeRange::new(cmd.start, cmd.end);
    let language = ctx.config.language(cmd.lang.as_deref());
    let player_type = ctx.config.player(cmd.player.map(Into::into));
    let player = ctx.player(player_type);

    if !cmd.no_play && !player.is_available().await {
        return output.error(
            PlayerError::NotFound(player.command().to_string()).to_string(),
            ExitCode::PlayerFailed,
        );
    }

    output.info(format!("Looking up: {}", cmd.title));

    let session =
        WatchSession::new(ctx.catalog(), language, &ctx.proxy_url).with_root(&ctx.workspace_root);
    let mut prepared = match session.prepare(&cmd.title, range).await {
        Ok(p) => p,
        Err(e) => return output.error(format!("{:#}", e), exit_code_for(&e)),
    };

    for notice in fallback_notices(&prepared.episodes, session.language()) {
        output.info(notice);
    }

    if cmd.keep || cmd.no_play {
        prepared.workspace.keep();
    }

    if !cmd.no_play {
        output.info(format!(
            "Playing {} ({}) in {}...",
            prepared.anime.title,
            range,
            player_type.display_name()
        ));
        if let Err(e) = player.play_playlist(prepared.workspace.playlist()).await {
            return output.error(e.to_string(), ExitCode::PlayerFailed);
        }
    }

    let status = if cmd.no_play { "prepared" } else { "played" };
    let response = watch_response(&prepared, player_type, status);

    if let Err(e) = output.print(&response) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Search Command
// =============================================================================

/// Catalog matches for `title`, at most `limit` of them.
///
/// No match at all is `CatalogError::NoMatch`.
pub async fn search_titles(
    catalog: &GazesClient,
    title: &str,
    limit: usize,
) -> Result<Vec<AnimeSummary>, CatalogError> {
    let mut results = catalog.search(title).await?;
    if results.is_empty() {
        return Err(CatalogError::NoMatch(title.to_string()));
    }
    results.truncate(limit);
    Ok(results)
}

pub async fn search_cmd(cmd: SearchCmd, ctx: &Context, output: &Output) -> ExitCode {
    output.info(format!("Searching for: {}", cmd.title));

    match search_titles(&ctx.catalog(), &cmd.title, cmd.limit).await {
        Ok(results) => {
            if let Err(e) = output.print(&results) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => {
            let err = anyhow::Error::new(e);
            output.error(format!("Search failed: {}", err), exit_code_for(&err))
        }
    }
}
