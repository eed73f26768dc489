//! Command-line interface for strictly_audited.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_audited::{DEFAULT_DEPTH_LIMIT, Player};

/// Strictly Audited - tic-tac-toe with a minimax opponent and an audit trail
#[derive(Parser, Debug)]
#[command(name = "strictly_audited")]
#[command(about = "Audited tic-tac-toe engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively on stdin
    ///
    /// Commands: 0-8 to move, `new`, `reset`, `toggle`, `audit`, `quit`.
    Play {
        /// Start with the automated opponent enabled
        #[arg(long)]
        automated: bool,

        /// Path to an engine config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Apply moves in order and print the audit trail as JSON
    Replay {
        /// Start with the automated opponent enabled
        #[arg(long)]
        automated: bool,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        /// Square indices (0-8), in play order
        #[arg(required = true)]
        moves: Vec<usize>,
    },

    /// Print the minimax choice for a board
    BestMove {
        /// Nine cells, row-major: X, O, or `.` for empty (e.g. "XX..O....")
        #[arg(short, long)]
        board: String,

        /// Mark to choose a move for
        #[arg(short, long, default_value_t = Player::O)]
        mark: Player,

        /// Search depth in plies
        #[arg(short, long, default_value_t = DEFAULT_DEPTH_LIMIT)]
        depth: usize,
    },
}
