//! Snapshot error types.

use derive_more::{Display, Error};

/// Reason a single value could not be cloned into plain data.
///
/// Never escapes the snapshot layer: each failure is replaced by a
/// `"[Unserializable:<kind>]"` sentinel at the failing field.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SnapshotError {
    /// Shared node is mutably borrowed at capture time.
    #[display("{} is mutably borrowed", kind)]
    Borrowed {
        /// Kind of the borrowed node.
        kind: &'static str,
    },

    /// Value has no plain representation.
    #[display("{} has no plain representation", type_name)]
    Opaque {
        /// Type name of the value.
        type_name: &'static str,
    },

    /// Proxy failed to resolve to raw data.
    #[display("view failed to resolve: {}", message)]
    View {
        /// Failure reported by the view.
        message: String,
    },
}

impl SnapshotError {
    /// Creates a view resolution error.
    pub fn view(message: impl Into<String>) -> Self {
        Self::View {
            message: message.into(),
        }
    }
}
