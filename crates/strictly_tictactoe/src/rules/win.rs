//! Win detection logic for tic-tac-toe.

use crate::{Board, Player, Square};

/// The eight lines that win the game: rows, columns, diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first completed line (in `WIN_LINES` order) and its owner.
pub fn winning_line(board: &Board) -> Option<(Player, [usize; 3])> {
    let squares = board.squares();
    WIN_LINES.iter().find_map(|&[a, b, c]| match squares[a] {
        Square::Occupied(player) if squares[b] == squares[a] && squares[c] == squares[a] => {
            Some((player, [a, b, c]))
        }
        _ => None,
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if the player has three in a row,
/// `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Player> {
    winning_line(board).map(|(player, _)| player)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(player: Player, positions: &[usize]) -> Board {
        let mut board = Board::new();
        for &pos in positions {
            board.set(pos, Square::Occupied(player)).unwrap();
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_with(Player::X, &[0, 1, 2]);
        assert_eq!(winning_line(&board), Some((Player::X, [0, 1, 2])));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_with(Player::O, &[2, 4, 6]);
        assert_eq!(winning_line(&board), Some((Player::O, [2, 4, 6])));
    }

    #[test]
    fn test_every_line_detected() {
        for line in WIN_LINES {
            let board = board_with(Player::O, &line);
            assert_eq!(winning_line(&board), Some((Player::O, line)));
        }
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(Player::X, &[0, 1]);
        assert_eq!(check_winner(&board), None);
    }
}
