//! Postconditions checked after every accepted move.

use super::error::EngineError;
use strictly_tictactoe::{Board, Player, Square};
use tracing::warn;

/// Every square occupied before the move is unchanged, and exactly the
/// target square went from empty to `mover`.
pub(crate) fn monotonic(before: &Board, after: &Board, index: usize, mover: Player) -> bool {
    before
        .squares()
        .iter()
        .zip(after.squares())
        .enumerate()
        .all(|(pos, (was, now))| {
            if pos == index {
                *was == Square::Empty && *now == Square::Occupied(mover)
            } else {
                was == now
            }
        })
}

/// X moves first, so X has as many marks as O or exactly one more.
pub(crate) fn balanced(board: &Board) -> bool {
    let x = board.count(Player::X);
    let o = board.count(Player::O);
    x == o || x == o + 1
}

/// Checks all move postconditions, reporting every violation at once.
pub(crate) fn check_move(
    before: &Board,
    after: &Board,
    index: usize,
    mover: Player,
) -> Result<(), EngineError> {
    let mut violations = Vec::new();
    if !monotonic(before, after, index, mover) {
        violations.push("board changed outside the target square");
    }
    if !balanced(after) {
        violations.push("mark counts out of balance");
    }

    if violations.is_empty() {
        Ok(())
    } else {
        warn!(index, ?violations, "Move postcondition failed");
        Err(EngineError::InvariantViolation(violations.join("; ")))
    }
}
