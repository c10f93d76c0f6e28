//! animewatch - watch anime from the Gazes catalog
//!
//! # Usage
//!
//! ```bash
//! animewatch watch "one piece" --start 1 --end 3 -l vostfr
//! animewatch search "one piece"
//! ```

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use animewatch::cli::{Cli, Command, ExitCode, Output};
use animewatch::commands::{self, Context};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    run_cli(cli).await.into()
}

/// Install the stderr log subscriber; `RUST_LOG` wins over `-v`
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("animewatch={}", cli.log_level())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);

    let ctx = match Context::from_cli(&cli) {
        Ok(ctx) => ctx,
        Err(e) => return output.error(format!("{:#}", e), ExitCode::Error),
    };

    match cli.command {
        Some(Command::Watch(cmd)) => {
            if cmd.title.trim().is_empty() {
                return output.error("Title is required", ExitCode::InvalidArgs);
            }
            commands::watch_cmd(cmd, &ctx, &output).await
        }

        Some(Command::Search(cmd)) => commands::search_cmd(cmd, &ctx, &output).await,

        None => {
            let _ = Cli::command().print_help();
            ExitCode::InvalidArgs
        }
    }
}
