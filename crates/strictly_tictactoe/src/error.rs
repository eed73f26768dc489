//! Board error types.

use derive_more::{Display, Error};

/// Error raised when building or mutating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Position is outside 0-8.
    #[display("Position {} out of bounds (must be 0-8)", _0)]
    OutOfBounds(#[error(not(source))] usize),

    /// Cell sequence does not have exactly nine cells.
    #[display("Board must have exactly 9 cells, got {}", len)]
    Malformed {
        /// Number of cells supplied.
        len: usize,
    },

    /// Unrecognized cell symbol while parsing.
    #[display("Invalid cell symbol {:?}", _0)]
    InvalidSymbol(#[error(not(source))] char),
}
