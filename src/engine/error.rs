//! Engine error types.

use derive_more::{Display, Error};
use strictly_tictactoe::BoardError;

/// Failure inside a game operation.
///
/// Public engine operations never return this; it is recorded in the
/// audit trail as a `System`/`ERROR` entry instead.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// The board rejected a write.
    #[display("Board error: {}", _0)]
    Board(BoardError),

    /// A move left the match in an impossible state.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}

impl From<BoardError> for EngineError {
    fn from(err: BoardError) -> Self {
        Self::Board(err)
    }
}
