//! Engine configuration.

use crate::state::OpponentMode;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_tictactoe::{DEFAULT_DEPTH_LIMIT, Player};
use tracing::{debug, info, instrument};

/// Settings for a [`GameEngine`](crate::GameEngine) session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Opponent mode at session start.
    opponent_mode: OpponentMode,

    /// Mark played by the automated side.
    ai_mark: Player,

    /// Plies the minimax search looks ahead.
    depth_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            opponent_mode: OpponentMode::Human,
            ai_mark: Player::O,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration from explicit values.
    #[instrument]
    pub fn new(opponent_mode: OpponentMode, ai_mark: Player, depth_limit: usize) -> Self {
        Self {
            opponent_mode,
            ai_mark,
            depth_limit,
        }
    }

    /// Returns a copy with a different starting opponent mode.
    pub fn with_opponent_mode(mut self, opponent_mode: OpponentMode) -> Self {
        self.opponent_mode = opponent_mode;
        self
    }

    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading engine config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            opponent_mode = %config.opponent_mode,
            ai_mark = %config.ai_mark,
            depth_limit = config.depth_limit,
            "Engine config loaded"
        );
        Ok(config)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
