//! Depth-limited minimax opponent.
//!
//! Scores are taken from the AI's perspective: a win scores `10 - depth`,
//! a loss `depth - 10`, and a draw or an unresolved cutoff `0`, where
//! `depth` counts plies played from the root. Faster wins and slower
//! losses are preferred.

use crate::rules::evaluate;
use crate::{Board, Outcome, Player, Square};
use tracing::{debug, instrument, warn};

/// Depth limit that makes the search exhaustive on a 3x3 board.
pub const DEFAULT_DEPTH_LIMIT: usize = 9;

const WIN_SCORE: i32 = 10;

/// Picks the best move for `ai` on the given cells.
///
/// Returns `None` when the cells do not form a 9-square board or when
/// no empty square remains. Ties go to the lowest index.
#[instrument(skip(cells), fields(cells = cells.len()))]
pub fn best_move(cells: &[Square], ai: Player, depth_limit: usize) -> Option<usize> {
    match Board::try_from(cells) {
        Ok(board) => Minimax::new(ai, depth_limit).best_move(&board),
        Err(e) => {
            warn!(error = %e, "Refusing to search malformed board");
            None
        }
    }
}

/// Minimax searcher bound to one side and a ply limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Minimax {
    ai: Player,
    opponent: Player,
    depth_limit: usize,
}

impl Minimax {
    /// Creates a searcher playing `ai`.
    pub fn new(ai: Player, depth_limit: usize) -> Self {
        Self {
            ai,
            opponent: ai.opponent(),
            depth_limit,
        }
    }

    /// Returns the side this searcher plays.
    pub fn ai(&self) -> Player {
        self.ai
    }

    /// Returns the ply limit.
    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    /// Selects the empty square with the strictly greatest minimax value,
    /// scanning in ascending index order.
    pub fn best_move(&self, board: &Board) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        for pos in board.empty_positions() {
            let score = self.search(&board.with_mark(pos, self.ai), false, 1);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
        }
        debug!(ai = %self.ai, choice = ?best, "Minimax search complete");
        best.map(|(pos, _)| pos)
    }

    /// Minimax value of every empty square, in index order.
    pub fn scores(&self, board: &Board) -> Vec<(usize, i32)> {
        board
            .empty_positions()
            .map(|pos| (pos, self.search(&board.with_mark(pos, self.ai), false, 1)))
            .collect()
    }

    fn search(&self, board: &Board, maximizing: bool, depth: usize) -> i32 {
        let outcome = evaluate(board);
        if outcome.is_some() || depth >= self.depth_limit {
            return self.score(outcome, depth);
        }

        let mover = if maximizing { self.ai } else { self.opponent };
        let values = board
            .empty_positions()
            .map(|pos| self.search(&board.with_mark(pos, mover), !maximizing, depth + 1));

        if maximizing {
            values.max().unwrap_or(0)
        } else {
            values.min().unwrap_or(0)
        }
    }

    fn score(&self, outcome: Option<Outcome>, depth: usize) -> i32 {
        let depth = depth as i32;
        match outcome {
            Some(Outcome::Winner(player)) if player == self.ai => WIN_SCORE - depth,
            Some(Outcome::Winner(_)) => depth - WIN_SCORE,
            Some(Outcome::Draw) | None => 0,
        }
    }
}
