//! Strictly Audited - tic-tac-toe with an audit trail
//!
//! A single-session tic-tac-toe engine that records every state
//! transition, with an optional minimax opponent.
//!
//! # Architecture
//!
//! - **Snapshot**: cycle-safe deep clone of live, shared data into plain values
//! - **Audit**: append-only trail of timestamped, snapshot-bearing entries
//! - **Engine**: board, turns, outcomes, scores and the automated opponent
//! - **Rules and search**: pure board logic in `strictly_tictactoe`
//!
//! # Example
//!
//! ```
//! use strictly_audited::{AuditTrail, GameEngine, Player};
//!
//! let mut engine = GameEngine::new(AuditTrail::new());
//! for index in [0, 3, 1, 4, 2] {
//!     engine.make_move(index);
//! }
//! assert_eq!(engine.state().winner(), Some(Player::X));
//! assert_eq!(engine.state().winning_line(), Some([0, 1, 2]));
//! assert_eq!(engine.entries().len(), 5);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod audit;
mod config;
mod engine;
mod snapshot;
mod state;

// Crate-level exports - Snapshot
pub use snapshot::{
    CIRCULAR, Live, MAX_DEPTH, RawView, Shared, SnapshotError, TOO_DEEP, safe_clone, stringify,
    stringify_pretty, unserializable,
};

// Crate-level exports - Audit trail
pub use audit::{ActionKind, Actor, AuditEntry, AuditError, AuditTrail, PendingEntry};

// Crate-level exports - Engine
pub use engine::{EngineError, GameEngine};

// Crate-level exports - Match state and configuration
pub use config::{ConfigError, EngineConfig};
pub use state::{MatchState, OpponentMode, Scores};

// Crate-level exports - Board logic
pub use strictly_tictactoe::{
    Board, BoardError, DEFAULT_DEPTH_LIMIT, Mark, Minimax, Outcome, Player, Square, best_move,
};
