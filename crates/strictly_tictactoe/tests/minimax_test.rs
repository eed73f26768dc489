//! Exhaustive game-tree checks for the minimax opponent.

use std::collections::HashSet;
use strictly_tictactoe::{Board, DEFAULT_DEPTH_LIMIT, Outcome, Player, Square, best_move, evaluate};
use strum::IntoEnumIterator;

/// Collects every position reachable from the empty board with X moving first.
fn reachable_positions() -> Vec<(Board, Player)> {
    fn walk(
        board: Board,
        to_move: Player,
        seen: &mut HashSet<Board>,
        out: &mut Vec<(Board, Player)>,
    ) {
        if !seen.insert(board) {
            return;
        }
        out.push((board, to_move));
        if evaluate(&board).is_some() {
            return;
        }
        for pos in board.empty_positions().collect::<Vec<_>>() {
            let mut next = board;
            next.set(pos, Square::Occupied(to_move)).unwrap();
            walk(next, to_move.opponent(), seen, out);
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    walk(Board::new(), Player::X, &mut seen, &mut out);
    out
}

/// Plays every opponent line against the AI; true when no line ends in an AI loss.
fn ai_never_loses(board: Board, to_move: Player, ai: Player) -> bool {
    match evaluate(&board) {
        Some(Outcome::Winner(winner)) => return winner == ai,
        Some(Outcome::Draw) => return true,
        None => {}
    }

    if to_move == ai {
        let pos = best_move(board.squares(), ai, DEFAULT_DEPTH_LIMIT)
            .expect("open board must yield a move");
        let mut next = board;
        next.set(pos, Square::Occupied(ai)).unwrap();
        ai_never_loses(next, to_move.opponent(), ai)
    } else {
        board.empty_positions().collect::<Vec<_>>().into_iter().all(|pos| {
            let mut next = board;
            next.set(pos, Square::Occupied(to_move)).unwrap();
            ai_never_loses(next, to_move.opponent(), ai)
        })
    }
}

#[test]
fn test_reachable_position_count() {
    // Known count of legal tic-tac-toe positions, terminal ones included.
    assert_eq!(reachable_positions().len(), 5478);
}

#[test]
fn test_best_move_is_always_an_empty_square() {
    for (board, to_move) in reachable_positions() {
        if evaluate(&board).is_some() {
            continue;
        }
        let pos = best_move(board.squares(), to_move, DEFAULT_DEPTH_LIMIT)
            .unwrap_or_else(|| panic!("no move for open board:\n{}", board.display()));
        assert!(board.is_empty(pos), "occupied choice {} on\n{}", pos, board.display());
    }
}

#[test]
fn test_ai_never_loses_as_either_mark() {
    for ai in Player::iter() {
        assert!(ai_never_loses(Board::new(), Player::X, ai), "AI as {} lost a line", ai);
    }
}

#[test]
fn test_empty_board_returns_valid_index() {
    let idx = best_move(Board::new().squares(), Player::O, DEFAULT_DEPTH_LIMIT);
    assert!(matches!(idx, Some(i) if i < 9));
}

#[test]
fn test_immediate_win_is_taken_everywhere() {
    // Whenever the side to move has a one-move win, the AI plays a winning square.
    for (board, to_move) in reachable_positions() {
        if evaluate(&board).is_some() {
            continue;
        }
        let winning: Vec<usize> = board
            .empty_positions()
            .filter(|&pos| {
                let mut next = board;
                next.set(pos, Square::Occupied(to_move)).unwrap();
                evaluate(&next) == Some(Outcome::Winner(to_move))
            })
            .collect();
        if let Some(&first) = winning.first() {
            let choice = best_move(board.squares(), to_move, DEFAULT_DEPTH_LIMIT);
            assert_eq!(choice, Some(first), "missed win on\n{}", board.display());
        }
    }
}
