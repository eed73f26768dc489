//! Live value graph: shared, mutable, possibly cyclic data.
//!
//! `Live` is the input side of the snapshot layer. Containers are shared
//! (`Rc<RefCell<_>>`) so the same node can appear in several places, or
//! inside itself. A [`Live::Cell`] is a single-value indirection that is
//! unwrapped before inspection, and a [`Live::View`] is a proxy that
//! resolves to its raw data on demand.

use super::error::SnapshotError;
use serde::Serialize;
use serde_json::{Number, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Shared, interior-mutable node.
pub type Shared<T> = Rc<RefCell<T>>;

/// A proxy over raw data.
///
/// Resolving may fail, in which case the snapshot layer substitutes a
/// typed sentinel for the view.
pub trait RawView {
    /// Resolves the proxy to its underlying data.
    fn raw(&self) -> Result<Live, SnapshotError>;

    /// Type name recorded in sentinels when resolution fails.
    fn kind(&self) -> &'static str {
        "view"
    }
}

/// A value that may hold live references.
#[derive(Clone, Default)]
pub enum Live {
    /// Absent value.
    #[default]
    Null,
    /// Boolean leaf.
    Bool(bool),
    /// Numeric leaf.
    Number(Number),
    /// String leaf.
    String(String),
    /// Ordered sequence.
    Array(Shared<Vec<Live>>),
    /// Keyed mapping.
    Object(Shared<BTreeMap<String, Live>>),
    /// Single-value indirection.
    Cell(Shared<Live>),
    /// Proxy resolved to raw data when captured.
    View(Rc<dyn RawView>),
    /// Value with no plain representation, named by its type.
    Opaque(&'static str),
}

impl Live {
    /// Builds a shared array.
    pub fn array(items: impl IntoIterator<Item = Live>) -> Self {
        Live::Array(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// Builds a shared object.
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Live)>) -> Self {
        Live::Object(Rc::new(RefCell::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        )))
    }

    /// Wraps a value in a single-value cell.
    pub fn cell(value: impl Into<Live>) -> Self {
        Live::Cell(Rc::new(RefCell::new(value.into())))
    }

    /// Wraps a proxy.
    pub fn view(view: impl RawView + 'static) -> Self {
        Live::View(Rc::new(view))
    }

    /// Captures any serializable value as a fresh, acyclic graph.
    ///
    /// A value that fails to serialize becomes [`Live::Opaque`] named by
    /// its Rust type.
    pub fn capture<T: Serialize + ?Sized>(value: &T) -> Self {
        serde_json::to_value(value)
            .map(Live::from)
            .unwrap_or_else(|_| Live::Opaque(std::any::type_name::<T>()))
    }

    /// Inserts `value` under `key` when `self` is an object.
    ///
    /// Returns false for non-objects or while the object is borrowed.
    pub fn insert(&self, key: impl Into<String>, value: Live) -> bool {
        match self {
            Live::Object(entries) => entries
                .try_borrow_mut()
                .map(|mut entries| {
                    entries.insert(key.into(), value);
                })
                .is_ok(),
            _ => false,
        }
    }

    /// Appends `value` when `self` is an array.
    pub fn push(&self, value: Live) -> bool {
        match self {
            Live::Array(items) => items
                .try_borrow_mut()
                .map(|mut items| items.push(value))
                .is_ok(),
            _ => false,
        }
    }

    /// Replaces the content of a cell.
    pub fn replace(&self, value: Live) -> bool {
        match self {
            Live::Cell(inner) => inner
                .try_borrow_mut()
                .map(|mut inner| *inner = value)
                .is_ok(),
            _ => false,
        }
    }

    /// Type name used in failure sentinels.
    pub fn kind(&self) -> &'static str {
        match self {
            Live::Null => "null",
            Live::Bool(_) => "boolean",
            Live::Number(_) => "number",
            Live::String(_) => "string",
            Live::Array(_) => "array",
            Live::Object(_) => "object",
            Live::Cell(_) => "cell",
            Live::View(view) => view.kind(),
            Live::Opaque(type_name) => *type_name,
        }
    }

    /// Address of the shared node, for containers and wrappers.
    pub(crate) fn identity(&self) -> Option<usize> {
        match self {
            Live::Array(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Live::Object(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Live::Cell(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Live::View(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            _ => None,
        }
    }
}

// Shallow on purpose: a derived Debug would recurse forever on cycles.
impl fmt::Debug for Live {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Live::Null => write!(f, "Null"),
            Live::Bool(b) => write!(f, "Bool({})", b),
            Live::Number(n) => write!(f, "Number({})", n),
            Live::String(s) => write!(f, "String({:?})", s),
            Live::Opaque(type_name) => write!(f, "Opaque({})", type_name),
            other => write!(
                f,
                "{}@{:#x}",
                other.kind(),
                other.identity().unwrap_or_default()
            ),
        }
    }
}

impl From<Value> for Live {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Live::Null,
            Value::Bool(b) => Live::Bool(b),
            Value::Number(n) => Live::Number(n),
            Value::String(s) => Live::String(s),
            Value::Array(items) => Live::array(items.into_iter().map(Live::from)),
            Value::Object(map) => Live::object(map.into_iter().map(|(k, v)| (k, Live::from(v)))),
        }
    }
}

impl From<&Live> for Live {
    fn from(value: &Live) -> Self {
        value.clone()
    }
}

impl From<bool> for Live {
    fn from(value: bool) -> Self {
        Live::Bool(value)
    }
}

impl From<i32> for Live {
    fn from(value: i32) -> Self {
        Live::Number(value.into())
    }
}

impl From<usize> for Live {
    fn from(value: usize) -> Self {
        Live::Number((value as u64).into())
    }
}

impl From<i64> for Live {
    fn from(value: i64) -> Self {
        Live::Number(value.into())
    }
}

impl From<u64> for Live {
    fn from(value: u64) -> Self {
        Live::Number(value.into())
    }
}

/// Non-finite floats have no JSON form and become `Null`.
impl From<f64> for Live {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Live::Null, Live::Number)
    }
}

impl From<&str> for Live {
    fn from(value: &str) -> Self {
        Live::String(value.to_string())
    }
}

impl From<String> for Live {
    fn from(value: String) -> Self {
        Live::String(value)
    }
}

impl<T: Into<Live>> From<Option<T>> for Live {
    fn from(value: Option<T>) -> Self {
        value.map_or(Live::Null, Into::into)
    }
}
