//! Strictly Audited - terminal front end
//!
//! Plays, replays and analyses tic-tac-toe games against the audited engine.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use strictly_audited::{
    AuditTrail, Board, EngineConfig, GameEngine, MatchState, OpponentMode, Outcome, Player,
    best_move,
};
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { automated, config } => run_play(automated, config),
        Command::Replay {
            automated,
            pretty,
            moves,
        } => run_replay(automated, pretty, moves),
        Command::BestMove { board, mark, depth } => run_best_move(&board, mark, depth),
    }
}

/// Builds the engine config from an optional file and the `--automated` flag.
fn load_config(automated: bool, path: Option<PathBuf>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    Ok(if automated {
        config.with_opponent_mode(OpponentMode::Automated)
    } else {
        config
    })
}

/// Interactive game loop on stdin.
#[instrument(skip(config))]
fn run_play(automated: bool, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(automated, config)?;
    let mut engine = GameEngine::with_config(config, AuditTrail::new());
    info!("Starting interactive session");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print_state(engine.state());

    loop {
        write!(stdout, "> ").context("Failed to write prompt")?;
        stdout.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read command")?;
        if read == 0 {
            break;
        }

        let command = line.trim();
        debug!(command, "Received command");
        match command {
            "" => continue,
            "quit" | "q" | "exit" => break,
            "new" => engine.new_game(),
            "reset" => engine.reset_scores(),
            "toggle" => engine.toggle_opponent_mode(),
            "audit" => {
                println!("{}", engine.audit().to_json(true));
                continue;
            }
            other => match other.parse::<usize>() {
                Ok(index) => engine.make_move(index),
                Err(_) => {
                    println!("Unknown command: {}", other);
                    continue;
                }
            },
        }
        print_state(engine.state());
    }

    info!(entries = engine.audit().len(), "Session ended");
    Ok(())
}

/// Applies moves in order and prints the resulting audit trail.
#[instrument]
fn run_replay(automated: bool, pretty: bool, moves: Vec<usize>) -> Result<()> {
    let config = load_config(automated, None)?;
    let mut engine = GameEngine::with_config(config, AuditTrail::new());
    for index in moves {
        engine.make_move(index);
    }
    info!(entries = engine.audit().len(), "Replay finished");
    println!("{}", engine.into_audit().to_json(pretty));
    Ok(())
}

/// Prints the minimax choice for a board given on the command line.
#[instrument]
fn run_best_move(board: &str, mark: Player, depth: usize) -> Result<()> {
    let board: Board = board
        .parse()
        .with_context(|| format!("Invalid board: {}", board))?;
    match best_move(board.squares(), mark, depth) {
        Some(index) => println!("{}", index),
        None => println!("none"),
    }
    Ok(())
}

fn print_state(state: &MatchState) {
    println!("{}", state.board().display());
    match state.outcome() {
        Some(Outcome::Winner(player)) => println!("Player {} wins!", player),
        Some(Outcome::Draw) => println!("Draw."),
        None => println!("Player {} to move", state.current_turn()),
    }
    let scores = state.scores();
    println!(
        "X: {}  O: {}  Draws: {}  ({} opponent)",
        scores.x_wins(),
        scores.o_wins(),
        scores.draws(),
        state.opponent_mode()
    );
}
