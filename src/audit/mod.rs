//! Append-only audit trail of labeled, timestamped state transitions.

mod entry;
mod error;
mod trail;

pub use entry::{ActionKind, Actor, AuditEntry, PendingEntry};
pub use error::AuditError;
pub use trail::AuditTrail;
