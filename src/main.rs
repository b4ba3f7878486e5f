//! Turnplay - terminal front end.
//!
//! Plays tic-tac-toe and rock-paper-scissors on stdin/stdout.

#![warn(missing_docs)]

mod cli;
mod terminal;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use turnplay::{GameConfig, Mode, RngRandomness, SessionId};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout is reserved for the game and the peer transport.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = GameConfig::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config = config.with_seed(Some(seed));
    }

    match cli.command {
        Command::Tictactoe {
            online,
            join,
            user_id,
        } => {
            if let Some(user_id) = user_id {
                config = config.with_user_id(Some(user_id));
            }
            run_tictactoe(&config, online, join).await
        }
        Command::Rps { online, delay_ms } => {
            if let Some(delay_ms) = delay_ms {
                config = config.with_opponent_delay_ms(delay_ms);
            }
            let mode = if online { Mode::Online } else { Mode::Local };
            terminal::run_rps(&config, mode).await
        }
        Command::NewId => {
            let mut rng = RngRandomness::from_seed_option(*config.seed());
            println!("{}", SessionId::generate(&mut rng));
            Ok(())
        }
    }
}

/// Validates the join id before any transport action, then runs the game.
#[instrument(skip(config))]
async fn run_tictactoe(config: &GameConfig, online: bool, join: Option<String>) -> Result<()> {
    if !online {
        return terminal::run_local_tictactoe(config).await;
    }

    let mut rng = RngRandomness::from_seed_option(*config.seed());
    let session_id = match join {
        Some(raw) => SessionId::parse(&raw).map_err(|e| anyhow::anyhow!(e.message))?,
        None => {
            let id = SessionId::generate(&mut rng);
            info!(session_id = %id, "Created new game id");
            id
        }
    };
    terminal::run_online_tictactoe(config, session_id, rng).await
}
