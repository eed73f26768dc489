//! Snapshot layer: turns live, shared, possibly cyclic data into plain
//! values that are safe to compare, store and print.

mod clone;
mod error;
mod live;

pub use clone::{
    CIRCULAR, MAX_DEPTH, TOO_DEEP, safe_clone, stringify, stringify_pretty, unserializable,
};
pub use error::SnapshotError;
pub use live::{Live, RawView, Shared};
