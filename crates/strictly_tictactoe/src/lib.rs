//! Pure tic-tac-toe game logic.
//!
//! # Architecture
//!
//! - **Types**: players, squares, the 3x3 board and game outcomes
//! - **Rules**: win lines, win and draw detection
//! - **Minimax**: a depth-limited adversarial search for the automated opponent
//!
//! Nothing here performs I/O or keeps history; the engine that owns a match
//! lives in `strictly_audited`.
//!
//! # Example
//!
//! ```
//! use strictly_tictactoe::{Board, Player, best_move, DEFAULT_DEPTH_LIMIT};
//!
//! let board: Board = "XX. .O. ...".parse().unwrap();
//! let choice = best_move(board.squares(), Player::O, DEFAULT_DEPTH_LIMIT);
//! assert_eq!(choice, Some(2));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod minimax;
pub mod rules;
mod types;

pub use error::BoardError;
pub use minimax::{DEFAULT_DEPTH_LIMIT, Minimax, best_move};
pub use rules::{WIN_LINES, check_winner, evaluate, is_draw, is_full, winning_line};
pub use types::{BOARD_SIZE, Board, Outcome, Player, Square};

/// Alias used where the player is referred to by the symbol it places.
pub type Mark = Player;
