//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating a board. Rules are separated from board
//! storage so the engine and the minimax search share one definition
//! of a terminal position.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WIN_LINES, check_winner, winning_line};

use crate::{Board, Outcome};

/// Classifies the board: a winner, a draw, or `None` while still open.
pub fn evaluate(board: &Board) -> Option<Outcome> {
    if let Some(player) = check_winner(board) {
        Some(Outcome::Winner(player))
    } else if is_full(board) {
        Some(Outcome::Draw)
    } else {
        None
    }
}
