//! Total deep copy of live graphs into plain JSON values.

use super::error::SnapshotError;
use super::live::Live;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashSet;
use tracing::{instrument, warn};

/// Placeholder written where a reference points back into its own path.
pub const CIRCULAR: &str = "[Circular]";

/// Placeholder written for a node nested deeper than [`MAX_DEPTH`].
pub const TOO_DEEP: &str = "[MaxDepth]";

/// Deepest chain of containers and wrappers copied before [`TOO_DEEP`]
/// is substituted.
pub const MAX_DEPTH: usize = 100;

/// Placeholder for a value of type `kind` that could not be cloned.
pub fn unserializable(kind: &str) -> String {
    format!("[Unserializable:{}]", kind)
}

/// Deep-clones `value` into plain data. Never fails.
///
/// Cells are unwrapped and views resolved before inspection. A node met
/// again on the current recursion path becomes [`CIRCULAR`]; a node shared
/// by siblings is cloned in each place. A field that cannot be cloned
/// becomes an [`unserializable`] sentinel while its siblings are kept.
/// Nodes nested past [`MAX_DEPTH`] become [`TOO_DEEP`].
#[instrument(skip_all, fields(kind = value.kind()))]
pub fn safe_clone(value: &Live) -> Value {
    let mut path = HashSet::new();
    clone_field(value, &mut path)
}

/// Serializes `value` as compact JSON text. Never fails.
#[instrument(skip_all, fields(kind = value.kind()))]
pub fn stringify(value: &Live) -> String {
    render(value, false)
}

/// Serializes `value` as indented JSON text. Never fails.
#[instrument(skip_all, fields(kind = value.kind()))]
pub fn stringify_pretty(value: &Live) -> String {
    render(value, true)
}

fn render(value: &Live, pretty: bool) -> String {
    let plain = safe_clone(value);
    let text = if pretty {
        serde_json::to_string_pretty(&plain)
    } else {
        serde_json::to_string(&plain)
    };
    text.unwrap_or_else(|e| {
        warn!(error = %e, "Plain value failed to serialize, using direct pass");
        stringify_direct(value, pretty)
    })
}

fn clone_field(value: &Live, path: &mut HashSet<usize>) -> Value {
    clone_value(value, path).unwrap_or_else(|e| {
        warn!(kind = value.kind(), error = %e, "Replacing field that failed to clone");
        Value::String(unserializable(value.kind()))
    })
}

fn clone_value(value: &Live, path: &mut HashSet<usize>) -> Result<Value, SnapshotError> {
    let Some(id) = value.identity() else {
        return clone_leaf(value);
    };
    if path.contains(&id) {
        return Ok(Value::String(CIRCULAR.to_string()));
    }
    if path.len() >= MAX_DEPTH {
        warn!(depth = path.len(), "Truncating nested value");
        return Ok(Value::String(TOO_DEEP.to_string()));
    }
    path.insert(id);
    let result = clone_node(value, path);
    path.remove(&id);
    result
}

fn clone_leaf(value: &Live) -> Result<Value, SnapshotError> {
    match value {
        Live::Null => Ok(Value::Null),
        Live::Bool(b) => Ok(Value::Bool(*b)),
        Live::Number(n) => Ok(Value::Number(n.clone())),
        Live::String(s) => Ok(Value::String(s.clone())),
        Live::Opaque(type_name) => Err(SnapshotError::Opaque {
            type_name: *type_name,
        }),
        other => Err(SnapshotError::Opaque {
            type_name: other.kind(),
        }),
    }
}

fn clone_node(value: &Live, path: &mut HashSet<usize>) -> Result<Value, SnapshotError> {
    match value {
        Live::Cell(inner) => {
            let inner = inner
                .try_borrow()
                .map_err(|_| SnapshotError::Borrowed { kind: "cell" })?;
            clone_value(&inner, path)
        }
        Live::View(view) => {
            let raw = view.raw()?;
            clone_value(&raw, path)
        }
        Live::Array(items) => {
            let items = items
                .try_borrow()
                .map_err(|_| SnapshotError::Borrowed { kind: "array" })?;
            Ok(Value::Array(items.iter().map(|item| clone_field(item, path)).collect()))
        }
        Live::Object(entries) => {
            let entries = entries
                .try_borrow()
                .map_err(|_| SnapshotError::Borrowed { kind: "object" })?;
            let mut out = Map::new();
            for (key, item) in entries.iter() {
                out.insert(key.clone(), clone_field(item, path));
            }
            Ok(Value::Object(out))
        }
        leaf => clone_leaf(leaf),
    }
}

/// Serializes the live graph directly, without the plain-value pass.
///
/// Tracks every node it has written; a node seen before is written as
/// [`CIRCULAR`] and a node past [`MAX_DEPTH`] as [`TOO_DEEP`]. Failures
/// are written inline as sentinels.
pub(crate) fn stringify_direct(value: &Live, pretty: bool) -> String {
    let seen = RefCell::new(HashSet::new());
    let guarded = Guarded {
        value,
        seen: &seen,
        depth: 0,
    };
    let text = if pretty {
        serde_json::to_string_pretty(&guarded)
    } else {
        serde_json::to_string(&guarded)
    };
    text.unwrap_or_else(|_| format!("\"{}\"", unserializable(value.kind())))
}

struct Guarded<'a> {
    value: &'a Live,
    seen: &'a RefCell<HashSet<usize>>,
    depth: usize,
}

impl Guarded<'_> {
    fn child<'b>(&'b self, value: &'b Live) -> Guarded<'b> {
        Guarded {
            value,
            seen: self.seen,
            depth: self.depth + 1,
        }
    }

    fn sentinel<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&unserializable(self.value.kind()))
    }
}

impl Serialize for Guarded<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(id) = self.value.identity() {
            if self.depth >= MAX_DEPTH {
                return serializer.serialize_str(TOO_DEEP);
            }
            let first_visit = self
                .seen
                .try_borrow_mut()
                .map_err(|_| S::Error::custom("visited set busy"))?
                .insert(id);
            if !first_visit {
                return serializer.serialize_str(CIRCULAR);
            }
        }

        match self.value {
            Live::Null => serializer.serialize_unit(),
            Live::Bool(b) => serializer.serialize_bool(*b),
            Live::Number(n) => n.serialize(serializer),
            Live::String(s) => serializer.serialize_str(s),
            Live::Opaque(_) => self.sentinel(serializer),
            Live::Cell(inner) => match inner.try_borrow() {
                Ok(inner) => self.child(&inner).serialize(serializer),
                Err(_) => self.sentinel(serializer),
            },
            Live::View(view) => match view.raw() {
                Ok(raw) => self.child(&raw).serialize(serializer),
                Err(_) => self.sentinel(serializer),
            },
            Live::Array(items) => match items.try_borrow() {
                Ok(items) => {
                    let mut seq = serializer.serialize_seq(Some(items.len()))?;
                    for item in items.iter() {
                        seq.serialize_element(&self.child(item))?;
                    }
                    seq.end()
                }
                Err(_) => self.sentinel(serializer),
            },
            Live::Object(entries) => match entries.try_borrow() {
                Ok(entries) => {
                    let mut map = serializer.serialize_map(Some(entries.len()))?;
                    for (key, item) in entries.iter() {
                        map.serialize_entry(key, &self.child(item))?;
                    }
                    map.end()
                }
                Err(_) => self.sentinel(serializer),
            },
        }
    }
}
