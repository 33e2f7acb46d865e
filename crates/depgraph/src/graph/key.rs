//! Node identifiers.
//!
//! Any `Eq + Hash + Clone` value can name a node as long as it implements
//! [`NodeKey`]. Statically typed keys are always valid; the dynamic [`Name`]
//! type can carry mutable composites, which are rejected at the graph's API
//! boundary with [`GraphError::InvalidKey`](crate::GraphError::InvalidKey).

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A value usable as a node identifier.
pub trait NodeKey: Eq + Hash + Clone + fmt::Debug {
    /// Whether this value may be stored as a key.
    ///
    /// Checked before any mutation; returning `false` makes the operation
    /// fail with `InvalidKey`.
    fn is_valid_key(&self) -> bool {
        true
    }
}

macro_rules! impl_node_key {
    ($($ty:ty),* $(,)?) => {
        $(impl NodeKey for $ty {})*
    };
}

impl_node_key!(
    String, &str, bool, char, (), u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize,
);

impl<K: NodeKey> NodeKey for Option<K> {
    fn is_valid_key(&self) -> bool {
        self.as_ref().map_or(true, NodeKey::is_valid_key)
    }
}

impl<A: NodeKey, B: NodeKey> NodeKey for (A, B) {
    fn is_valid_key(&self) -> bool {
        self.0.is_valid_key() && self.1.is_valid_key()
    }
}

impl<A: NodeKey, B: NodeKey, C: NodeKey> NodeKey for (A, B, C) {
    fn is_valid_key(&self) -> bool {
        self.0.is_valid_key() && self.1.is_valid_key() && self.2.is_valid_key()
    }
}

/// Dynamically typed identifier for nodes whose names come from configuration
/// or other untyped sources.
///
/// `List` and `Map` are mutable composites and never valid keys; a `Tuple` or
/// `Set` is valid only if all of its members are.
///
/// Floats compare by bit pattern, so a `NaN` name is equal to itself.
#[derive(Debug, Clone)]
pub enum Name {
    /// The null name
    Null,
    /// Boolean name
    Bool(bool),
    /// Integer name
    Int(i64),
    /// Floating point name
    Float(f64),
    /// String name
    Str(String),
    /// Immutable sequence of names
    Tuple(Vec<Name>),
    /// Immutable set of names
    Set(BTreeSet<Name>),
    /// Mutable sequence (not a valid key)
    List(Vec<Name>),
    /// Mutable mapping (not a valid key)
    Map(Vec<(Name, Name)>),
}

impl Name {
    /// Build a tuple name from its members.
    pub fn tuple(items: impl IntoIterator<Item = Name>) -> Self {
        Name::Tuple(items.into_iter().collect())
    }

    /// Build a frozen set name from its members.
    pub fn set(items: impl IntoIterator<Item = Name>) -> Self {
        Name::Set(items.into_iter().collect())
    }

    fn rank(&self) -> u8 {
        match self {
            Name::Null => 0,
            Name::Bool(_) => 1,
            Name::Int(_) => 2,
            Name::Float(_) => 3,
            Name::Str(_) => 4,
            Name::Tuple(_) => 5,
            Name::Set(_) => 6,
            Name::List(_) => 7,
            Name::Map(_) => 8,
        }
    }
}

impl NodeKey for Name {
    fn is_valid_key(&self) -> bool {
        match self {
            Name::List(_) | Name::Map(_) => false,
            Name::Tuple(items) => items.iter().all(NodeKey::is_valid_key),
            Name::Set(items) => items.iter().all(NodeKey::is_valid_key),
            _ => true,
        }
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Name::Null, Name::Null) => Ordering::Equal,
            (Name::Bool(a), Name::Bool(b)) => a.cmp(b),
            (Name::Int(a), Name::Int(b)) => a.cmp(b),
            (Name::Float(a), Name::Float(b)) => a.total_cmp(b),
            (Name::Str(a), Name::Str(b)) => a.cmp(b),
            (Name::Tuple(a), Name::Tuple(b)) => a.cmp(b),
            (Name::Set(a), Name::Set(b)) => a.cmp(b),
            (Name::List(a), Name::List(b)) => a.cmp(b),
            (Name::Map(a), Name::Map(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Name::Null => {}
            Name::Bool(b) => b.hash(state),
            Name::Int(i) => i.hash(state),
            Name::Float(f) => f.to_bits().hash(state),
            Name::Str(s) => s.hash(state),
            Name::Tuple(items) | Name::List(items) => items.hash(state),
            Name::Set(items) => items.hash(state),
            Name::Map(entries) => entries.hash(state),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<'a>(
            f: &mut fmt::Formatter<'_>,
            items: impl Iterator<Item = &'a Name>,
        ) -> fmt::Result {
            for (i, item) in items.enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        match self {
            Name::Null => write!(f, "null"),
            Name::Bool(b) => write!(f, "{b}"),
            Name::Int(i) => write!(f, "{i}"),
            Name::Float(x) => write!(f, "{x}"),
            Name::Str(s) => write!(f, "{s}"),
            Name::Tuple(items) => {
                write!(f, "(")?;
                join(f, items.iter())?;
                write!(f, ")")
            }
            Name::Set(items) => {
                write!(f, "{{")?;
                join(f, items.iter())?;
                write!(f, "}}")
            }
            Name::List(items) => {
                write!(f, "[")?;
                join(f, items.iter())?;
                write!(f, "]")
            }
            Name::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::Str(value.to_string())
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::Str(value)
    }
}

impl From<i64> for Name {
    fn from(value: i64) -> Self {
        Name::Int(value)
    }
}

impl From<i32> for Name {
    fn from(value: i32) -> Self {
        Name::Int(value as i64)
    }
}

impl From<f64> for Name {
    fn from(value: f64) -> Self {
        Name::Float(value)
    }
}

impl From<bool> for Name {
    fn from(value: bool) -> Self {
        Name::Bool(value)
    }
}

impl From<()> for Name {
    fn from(_: ()) -> Self {
        Name::Null
    }
}

impl From<serde_json::Value> for Name {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Name::Null,
            Value::Bool(b) => Name::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Name::Int(i),
                None => Name::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Name::Str(s),
            Value::Array(items) => Name::List(items.into_iter().map(Name::from).collect()),
            Value::Object(entries) => Name::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Name::Str(k), Name::from(v)))
                    .collect(),
            ),
        }
    }
}
