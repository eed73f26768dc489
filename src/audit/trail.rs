//! In-memory, append-only audit trail.

use super::entry::{ActionKind, Actor, AuditEntry, PendingEntry};
use crate::snapshot::{Live, safe_clone, stringify, stringify_pretty};
use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};
use std::fmt::Display;
use tracing::{debug, instrument, warn};

/// Ordered record of every logged action.
///
/// Insertion order is chronological order. Entries are never edited or
/// removed, and logging never fails: a rejected entry is replaced by a
/// `System`/`ERROR` record describing the rejection.
#[derive(Debug, Clone, Default)]
pub struct AuditTrail {
    entries: Vec<AuditEntry>,
}

impl AuditTrail {
    /// Creates an empty trail.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry stamped with the current UTC time.
    ///
    /// Payload and state attachments are deep-cloned into plain values
    /// first, so the trail never aliases live data.
    #[instrument(skip_all)]
    pub fn log(&mut self, pending: PendingEntry) {
        match pending.validate() {
            Ok(valid) => {
                let payload = valid.payload.as_ref().map(safe_clone);
                let before = valid.before_state.as_ref().map(safe_clone);
                let after = valid.after_state.as_ref().map(safe_clone);
                debug!(actor = %valid.actor, action = %valid.action, "Appending audit entry");
                self.append(valid.actor, valid.action, payload, before, after);
            }
            Err(e) => {
                warn!(error = %e, "Rejected audit entry");
                self.append(
                    Actor::System.into(),
                    ActionKind::Error,
                    Some(json!({ "message": "Invalid audit entry", "reason": e.to_string() })),
                    None,
                    None,
                );
            }
        }
    }

    /// Records a `System`/`ERROR` entry carrying `message`.
    #[instrument(skip_all, fields(message = %message))]
    pub fn log_error(&mut self, message: impl Display) {
        self.log(
            PendingEntry::new(Actor::System, ActionKind::Error)
                .with_payload(json!({ "message": message.to_string() })),
        );
    }

    /// Plain copy of `state`, for before/after captures.
    pub fn snapshot(state: impl Into<Live>) -> Value {
        safe_clone(&state.into())
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Iterates over entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter()
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&AuditEntry> {
        self.entries.last()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been logged yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exports the trail as JSON text.
    #[instrument(skip(self), fields(entries = self.entries.len()))]
    pub fn to_json(&self, pretty: bool) -> String {
        let live = Live::capture(&self.entries);
        if pretty {
            stringify_pretty(&live)
        } else {
            stringify(&live)
        }
    }

    fn append(
        &mut self,
        actor: String,
        action: ActionKind,
        payload: Option<Value>,
        before: Option<Value>,
        after: Option<Value>,
    ) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let entry = AuditEntry::new(actor, action, payload, before, after, timestamp);
        self.entries.push(entry);
    }
}

impl<'a> IntoIterator for &'a AuditTrail {
    type Item = &'a AuditEntry;
    type IntoIter = std::slice::Iter<'a, AuditEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use strictly_tictactoe::Player;

    #[test]
    fn test_log_appends_valid_entry() {
        let mut trail = AuditTrail::new();
        trail.log(
            PendingEntry::new(Actor::System, ActionKind::NewGame)
                .with_payload(json!({ "reason": "start" })),
        );
        assert_eq!(trail.len(), 1);
        let entry = &trail.entries()[0];
        assert_eq!(entry.actor(), "System");
        assert_eq!(*entry.action(), ActionKind::NewGame);
        assert_eq!(entry.payload(), &Some(json!({ "reason": "start" })));
        assert_eq!(entry.before_state(), &None);
    }

    #[test]
    fn test_missing_action_becomes_error_entry() {
        let mut trail = AuditTrail::new();
        trail.log(PendingEntry::default().with_actor("Player X"));
        assert_eq!(trail.len(), 1);
        let entry = trail.last().unwrap();
        assert_eq!(entry.actor(), "System");
        assert_eq!(*entry.action(), ActionKind::Error);
        assert_eq!(
            entry.payload().as_ref().and_then(|p| p.get("message")),
            Some(&json!("Invalid audit entry"))
        );
    }

    #[test]
    fn test_missing_actor_becomes_error_entry() {
        let mut trail = AuditTrail::new();
        trail.log(PendingEntry::default().with_action(ActionKind::Move));
        assert_eq!(trail.len(), 1);
        assert_eq!(*trail.entries()[0].action(), ActionKind::Error);
    }

    #[test]
    fn test_timestamp_is_iso8601_utc() {
        let mut trail = AuditTrail::new();
        trail.log_error("boom");
        let stamp = trail.entries()[0].timestamp();
        assert!(stamp.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut trail = AuditTrail::new();
        trail.log(PendingEntry::new(Actor::System, ActionKind::NewGame));
        trail.log(PendingEntry::new(Actor::System, ActionKind::ResetScores));
        trail.log(PendingEntry::new(Actor::Player(Player::X), ActionKind::Move));
        let kinds: Vec<_> = trail.iter().map(|e| *e.action()).collect();
        assert_eq!(
            kinds,
            vec![
                ActionKind::NewGame,
                ActionKind::ResetScores,
                ActionKind::Move,
            ]
        );
        let stamps: Vec<_> = trail.iter().map(|e| e.timestamp().clone()).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_snapshot_detaches_from_live_data() {
        let live = Live::object([("count", Live::from(1))]);
        let mut trail = AuditTrail::new();
        trail.log(PendingEntry::new(Actor::System, ActionKind::NewGame).with_payload(&live));
        live.insert("count", Live::from(2));
        assert_eq!(trail.entries()[0].payload(), &Some(json!({ "count": 1 })));
        assert_eq!(AuditTrail::snapshot(&live), json!({ "count": 2 }));
    }

    #[test]
    fn test_to_json_round_trips() {
        let mut trail = AuditTrail::new();
        trail.log_error("boom");
        let parsed: Vec<AuditEntry> = serde_json::from_str(&trail.to_json(false)).unwrap();
        assert_eq!(parsed, trail.entries());
    }
}
