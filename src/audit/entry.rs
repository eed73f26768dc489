//! Audit entry types.

use super::error::AuditError;
use crate::snapshot::Live;
use derive_getters::Getters;
use derive_new::new;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strictly_tictactoe::Player;

/// Kind of action an entry records.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    /// A mark was placed.
    Move,
    /// The board was cleared for a new game.
    NewGame,
    /// The scoreboard was zeroed.
    ResetScores,
    /// The opponent mode was flipped.
    ToggleOpponent,
    /// Something went wrong; the payload carries the message.
    Error,
}

/// Who performed an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Actor {
    /// One of the two players.
    #[display("Player {}", _0)]
    Player(Player),
    /// The engine itself.
    #[display("System")]
    System,
}

impl From<Actor> for String {
    fn from(actor: Actor) -> Self {
        actor.to_string()
    }
}

/// An entry as submitted to [`AuditTrail::log`](super::AuditTrail::log).
///
/// Nothing is validated until logging; a pending entry without an actor
/// or action is turned into a `System`/`ERROR` record there.
#[derive(Debug, Clone, Default, Setters)]
#[setters(prefix = "with_", strip_option, into)]
pub struct PendingEntry {
    /// Sets the label of whoever performed the action.
    actor: Option<String>,
    /// Sets the kind of action.
    action: Option<ActionKind>,
    /// Attaches action details, copied at log time.
    payload: Option<Live>,
    /// Attaches the state captured before the action.
    before_state: Option<Live>,
    /// Attaches the state captured after the action.
    after_state: Option<Live>,
}

impl PendingEntry {
    /// Starts an entry for `actor` performing `action`.
    pub fn new(actor: impl Into<String>, action: ActionKind) -> Self {
        Self {
            actor: Some(actor.into()),
            action: Some(action),
            ..Self::default()
        }
    }

    /// Splits the entry into its validated label and kind, plus the
    /// still-live attachments.
    pub(super) fn validate(self) -> Result<Validated, AuditError> {
        let actor = self
            .actor
            .filter(|label| !label.trim().is_empty())
            .ok_or(AuditError::MissingActor)?;
        let action = self.action.ok_or(AuditError::MissingAction)?;
        Ok(Validated::new(
            actor,
            action,
            self.payload,
            self.before_state,
            self.after_state,
        ))
    }
}

#[derive(new)]
pub(super) struct Validated {
    pub(super) actor: String,
    pub(super) action: ActionKind,
    pub(super) payload: Option<Live>,
    pub(super) before_state: Option<Live>,
    pub(super) after_state: Option<Live>,
}

/// One immutable record in the trail.
///
/// Payload and state snapshots are plain values: they hold no references
/// to the data they were captured from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    actor: String,
    action: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    before_state: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    after_state: Option<Value>,
    timestamp: String,
}

impl AuditEntry {
    pub(super) fn new(
        actor: String,
        action: ActionKind,
        payload: Option<Value>,
        before_state: Option<Value>,
        after_state: Option<Value>,
        timestamp: String,
    ) -> Self {
        Self {
            actor,
            action,
            payload,
            before_state,
            after_state,
            timestamp,
        }
    }
}
