//! Audit validation errors.

use derive_more::{Display, Error};

/// Reason a pending entry was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum AuditError {
    /// Actor label is absent or blank.
    #[display("entry has no actor label")]
    MissingActor,

    /// Action kind is absent.
    #[display("entry has no action kind")]
    MissingAction,
}
