//! Command-line interface for turnplay.

use clap::{Parser, Subcommand};

/// Turnplay - tic-tac-toe and rock-paper-scissors in the terminal
#[derive(Parser, Debug)]
#[command(name = "turnplay")]
#[command(about = "Turn-based games with optional peer sync", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Seed for reproducible games (overrides config)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play tic-tac-toe
    Tictactoe {
        /// Play against a peer: moves go to stdout and peer messages are read from stdin as JSON lines
        #[arg(long)]
        online: bool,

        /// Six-digit id of the game to join (online only). A new id is generated when omitted.
        #[arg(long)]
        join: Option<String>,

        /// External identity sent on join (overrides config and environment)
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Play rock-paper-scissors
    Rps {
        /// Play against a simulated online opponent instead of hotseat
        #[arg(long)]
        online: bool,

        /// Opponent delay in milliseconds (overrides config)
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Print a fresh six-digit game id
    NewId,
}
