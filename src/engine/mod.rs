//! Game engine: owns the match, applies commands, drives the automated
//! opponent and records every transition in the audit trail.
//!
//! All operations are synchronous. An automated reply is computed and
//! applied inside the call that handed it the turn, after the triggering
//! move has been logged.

mod error;
mod invariants;

pub use error::EngineError;

use crate::audit::{ActionKind, Actor, AuditEntry, AuditTrail, PendingEntry};
use crate::config::EngineConfig;
use crate::state::{MatchState, OpponentMode};
use serde_json::json;
use strictly_tictactoe::{Outcome, Square, best_move, is_full, winning_line};
use tracing::{debug, error, info, instrument};

/// Tic-tac-toe session with scores, an optional minimax opponent and an
/// audit trail.
#[derive(Debug, Clone)]
pub struct GameEngine {
    state: MatchState,
    audit: AuditTrail,
    config: EngineConfig,
}

impl GameEngine {
    /// Creates an engine with default settings, logging into `audit`.
    #[instrument(skip(audit))]
    pub fn new(audit: AuditTrail) -> Self {
        Self::with_config(EngineConfig::default(), audit)
    }

    /// Creates an engine with explicit settings, logging into `audit`.
    ///
    /// An automated side that moves first opens the game here, so the
    /// first move a caller can make is always its own.
    #[instrument(skip(audit))]
    pub fn with_config(config: EngineConfig, audit: AuditTrail) -> Self {
        info!(
            opponent_mode = %config.opponent_mode(),
            ai_mark = %config.ai_mark(),
            "Creating game engine"
        );
        let mut engine = Self {
            state: MatchState::new(*config.opponent_mode()),
            audit,
            config,
        };
        engine.ai_turn();
        engine
    }

    /// Current match state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Audit trail, oldest entry first.
    pub fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    /// Audit entries, oldest first.
    pub fn entries(&self) -> &[AuditEntry] {
        self.audit.entries()
    }

    /// Session settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Ends the session, handing back its audit trail.
    pub fn into_audit(self) -> AuditTrail {
        self.audit
    }

    /// Clears the board for a new game. Scores are kept.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        let before = AuditTrail::snapshot(&self.state);
        self.state.clear_board();
        info!("New game started");
        self.audit.log(
            PendingEntry::new(Actor::System, ActionKind::NewGame)
                .with_before_state(before)
                .with_after_state(&self.state),
        );
        self.ai_turn();
    }

    /// Zeroes the scoreboard. The board is untouched.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        let before = AuditTrail::snapshot(&self.state);
        self.state.reset_scores();
        info!("Scores reset");
        self.audit.log(
            PendingEntry::new(Actor::System, ActionKind::ResetScores)
                .with_before_state(before)
                .with_after_state(&self.state),
        );
    }

    /// Switches between a human and an automated second player.
    ///
    /// Switching to automated on the automated side's turn makes it move
    /// immediately.
    #[instrument(skip(self))]
    pub fn toggle_opponent_mode(&mut self) {
        let before = AuditTrail::snapshot(&self.state);
        let mode = self.state.opponent_mode().toggle();
        self.state.set_opponent_mode(mode);
        info!(opponent_mode = %mode, "Opponent mode toggled");
        self.audit.log(
            PendingEntry::new(Actor::System, ActionKind::ToggleOpponent)
                .with_payload(json!({ "opponentMode": mode }))
                .with_before_state(before)
                .with_after_state(&self.state),
        );
        self.ai_turn();
    }

    /// Places the current player's mark at `index` (0-8).
    ///
    /// Ignored without a trace when the match is over, `index` is out of
    /// range, or the square is taken. Failures are logged as
    /// `System`/`ERROR` entries and never reach the caller.
    #[instrument(skip(self), fields(turn = %self.state.current_turn()))]
    pub fn make_move(&mut self, index: usize) {
        if let Err(e) = self.try_make_move(index) {
            error!(index, error = %e, "Move failed");
            self.audit.log_error(&e);
        }
    }

    fn try_make_move(&mut self, index: usize) -> Result<(), EngineError> {
        if self.state.is_over() {
            debug!(index, "Ignoring move after game over");
            return Ok(());
        }
        if !self.state.board().is_empty(index) {
            debug!(index, "Ignoring move on occupied or out-of-range square");
            return Ok(());
        }

        let before_board = *self.state.board();
        let before = AuditTrail::snapshot(&self.state);
        let mover = self.state.current_turn();

        self.state.board_mut().set(index, Square::Occupied(mover))?;
        if let Some((winner, line)) = winning_line(self.state.board()) {
            self.state.finish(Outcome::Winner(winner), Some(line));
            info!(index, winner = %winner, ?line, "Game won");
        } else if is_full(self.state.board()) {
            self.state.finish(Outcome::Draw, None);
            info!(index, "Game drawn");
        } else {
            self.state.set_current_turn(mover.opponent());
            debug!(index, mover = %mover, "Move accepted");
        }
        invariants::check_move(&before_board, self.state.board(), index, mover)?;

        // Attribute the move to the mark now on the square, not to the turn.
        let mark = self
            .state
            .board()
            .get(index)
            .and_then(Square::player)
            .ok_or_else(|| {
                EngineError::InvariantViolation(format!("square {} is empty", index))
            })?;
        self.audit.log(
            PendingEntry::new(Actor::Player(mark), ActionKind::Move)
                .with_payload(json!({ "index": index, "mark": mark }))
                .with_before_state(before)
                .with_after_state(&self.state),
        );

        self.ai_turn();
        Ok(())
    }

    /// Lets the automated side move if it is its turn in an open match.
    fn ai_turn(&mut self) {
        let ai = *self.config.ai_mark();
        if self.state.opponent_mode() != OpponentMode::Automated
            || self.state.is_over()
            || self.state.current_turn() != ai
        {
            return;
        }

        match best_move(self.state.board().squares(), ai, *self.config.depth_limit()) {
            Some(index) => {
                info!(index, ai = %ai, "Automated opponent moving");
                self.make_move(index);
            }
            None => debug!(ai = %ai, "Automated opponent found no move"),
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(AuditTrail::new())
    }
}
