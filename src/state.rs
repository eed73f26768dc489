//! Match state owned by the game engine.

use crate::snapshot::Live;
use serde::{Deserialize, Serialize};
use strictly_tictactoe::{Board, Outcome, Player};
use tracing::instrument;

/// Who supplies the second player's moves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OpponentMode {
    /// Both sides are played by people.
    #[default]
    Human,
    /// The automated side is played by the minimax search.
    Automated,
}

impl OpponentMode {
    /// Toggles between `Human` and `Automated`.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::Human => Self::Automated,
            Self::Automated => Self::Human,
        }
    }
}

/// Session scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    /// Games won by X.
    #[serde(rename = "X")]
    x_wins: u32,
    /// Games won by O.
    #[serde(rename = "O")]
    o_wins: u32,
    /// Drawn games.
    draws: u32,
}

impl Scores {
    /// Games won by X.
    pub fn x_wins(&self) -> u32 {
        self.x_wins
    }

    /// Games won by O.
    pub fn o_wins(&self) -> u32 {
        self.o_wins
    }

    /// Drawn games.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Wins recorded for `player`.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    /// Number of completed games counted.
    pub fn total(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }

    /// Counts one finished game.
    pub(crate) fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(Player::X) => self.x_wins += 1,
            Outcome::Winner(Player::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }
}

/// Everything a display needs to render a match.
///
/// Read-only outside the engine; snapshots of it are what the audit
/// trail stores before and after each transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    /// The board.
    board: Board,
    /// Mark placed by the next accepted move.
    current_turn: Player,
    /// Whether the match reached a win or a draw.
    is_over: bool,
    /// Terminal outcome, if any.
    outcome: Option<Outcome>,
    /// Line that produced a win.
    winning_line: Option<[usize; 3]>,
    /// Whether the second player is automated.
    opponent_mode: OpponentMode,
    /// Scoreboard.
    scores: Scores,
}

impl MatchState {
    /// Fresh match: empty board, X to move, zero scores.
    pub fn new(opponent_mode: OpponentMode) -> Self {
        Self {
            board: Board::new(),
            current_turn: Player::X,
            is_over: false,
            outcome: None,
            winning_line: None,
            opponent_mode,
            scores: Scores::default(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark placed by the next accepted move.
    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    /// Whether the match has ended.
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Terminal outcome, if any.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Line that produced a win.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.winning_line
    }

    /// Current opponent mode.
    pub fn opponent_mode(&self) -> OpponentMode {
        self.opponent_mode
    }

    /// Scoreboard.
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Clears the board and outcome, keeping scores and mode.
    pub(crate) fn clear_board(&mut self) {
        self.board = Board::new();
        self.current_turn = Player::X;
        self.is_over = false;
        self.outcome = None;
        self.winning_line = None;
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(crate) fn set_current_turn(&mut self, player: Player) {
        self.current_turn = player;
    }

    /// Moves the match into its terminal state and counts the result.
    pub(crate) fn finish(&mut self, outcome: Outcome, winning_line: Option<[usize; 3]>) {
        self.is_over = true;
        self.outcome = Some(outcome);
        self.winning_line = winning_line;
        self.scores.record(outcome);
    }

    pub(crate) fn set_opponent_mode(&mut self, mode: OpponentMode) {
        self.opponent_mode = mode;
    }

    pub(crate) fn reset_scores(&mut self) {
        self.scores = Scores::default();
    }

    /// Winner of the match, if it ended in a win.
    pub fn winner(&self) -> Option<Player> {
        self.outcome.and_then(|outcome| outcome.winner())
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(OpponentMode::default())
    }
}

impl From<&MatchState> for Live {
    fn from(state: &MatchState) -> Self {
        Live::capture(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strictly_tictactoe::Square;

    #[test]
    fn test_snapshot_shape() {
        let mut state = MatchState::new(OpponentMode::Automated);
        state
            .board_mut()
            .set(4, Square::Occupied(Player::X))
            .unwrap();
        state.set_current_turn(Player::O);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            json!({
                "board": [null, null, null, null, "X", null, null, null, null],
                "currentTurn": "O",
                "isOver": false,
                "outcome": null,
                "winningLine": null,
                "opponentMode": "automated",
                "scores": {"X": 0, "O": 0, "draws": 0},
            })
        );
    }

    #[test]
    fn test_finish_records_score() {
        let mut state = MatchState::default();
        state.finish(Outcome::Winner(Player::O), Some([2, 4, 6]));
        assert!(state.is_over());
        assert_eq!(state.winner(), Some(Player::O));
        assert_eq!(state.scores().wins(Player::O), 1);
        assert_eq!(state.scores().total(), 1);
    }

    #[test]
    fn test_clear_board_keeps_scores() {
        let mut state = MatchState::default();
        state.finish(Outcome::Draw, None);
        state.clear_board();
        assert!(!state.is_over());
        assert_eq!(state.outcome(), None);
        assert_eq!(state.scores().draws(), 1);
    }

    #[test]
    fn test_mode_toggle_and_parse() {
        assert_eq!(OpponentMode::Human.toggle(), OpponentMode::Automated);
        assert_eq!("automated".parse::<OpponentMode>().unwrap(), OpponentMode::Automated);
        assert_eq!(OpponentMode::Human.to_string(), "human");
    }
}
