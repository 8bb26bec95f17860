//! Dynamic values record fields range over

use std::{
    cmp::Ordering,
    fmt,
    hash::{DefaultHasher, Hash, Hasher},
    mem,
    sync::Arc,
};

use indexmap::IndexMap;
use num::{BigInt, BigRational};

use crate::{cell::Shared, error::StructError, num::Number, structs::Struct, symbols::Symbol};

/// Insertion-ordered, string-keyed mapping: the payload of [`Value::Map`]
/// and the result of [`Struct::to_map`].
pub type ValueMap = IndexMap<Symbol, Value>;

/// A dynamically typed value.
///
/// Cloning is shallow: `List`, `Map` and `Struct` clone the [`Shared`]
/// handle, so clones alias one storage. [`Value::deep_clone`] breaks the
/// aliasing. `String` and `Bytes` are immutable and shared freely.
#[derive(Clone, Default)]
pub enum Value {
    /// Also the absence marker: fields left unbound by construction hold
    /// `Null`.
    #[default]
    Null,
    Boolean(bool),
    Number(Number),
    Character(char),
    String(Arc<str>),
    Bytes(Arc<[u8]>),
    List(Shared<Vec<Value>>),
    Map(Shared<ValueMap>),
    Struct(Shared<Struct>),
}

impl Value {
    pub fn list(items: Vec<Value>) -> Self {
        Self::List(Shared::new(items))
    }

    pub fn map(entries: ValueMap) -> Self {
        Self::Map(Shared::new(entries))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_list(&self) -> Option<&Shared<Vec<Value>>> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Shared<ValueMap>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&Shared<Struct>> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "bool",
            Self::Number(_) => "number",
            Self::Character(_) => "character",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Struct(_) => "struct",
        }
    }

    /// A structurally equal copy sharing no mutable storage with the
    /// original.
    pub fn deep_clone(&self) -> Self {
        match self {
            Self::List(l) => Self::List(Shared::new(
                l.read().iter().map(Value::deep_clone).collect(),
            )),
            Self::Map(m) => Self::Map(Shared::new(
                m.read()
                    .iter()
                    .map(|(name, value)| (*name, value.deep_clone()))
                    .collect(),
            )),
            Self::Struct(s) => Self::Struct(Shared::new(s.read().deep_clone())),
            other => other.clone(),
        }
    }

    /// Feed this value to a hasher. Mutable containers are not hashable;
    /// reaching one fails rather than producing a hash that mutation would
    /// invalidate.
    pub fn try_hash<H: Hasher>(&self, state: &mut H) -> Result<(), StructError> {
        mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Boolean(b) => b.hash(state),
            Self::Number(n) => n.hash(state),
            Self::Character(c) => c.hash(state),
            Self::String(s) => s.hash(state),
            Self::Bytes(b) => b.hash(state),
            Self::List(_) | Self::Map(_) => {
                return Err(StructError::unhashable(self.type_name()));
            }
            Self::Struct(s) => s.read().try_hash(state)?,
        }
        Ok(())
    }

    pub fn try_hash_value(&self) -> Result<u64, StructError> {
        let mut hasher = DefaultHasher::new();
        self.try_hash(&mut hasher)?;
        Ok(hasher.finish())
    }

    /// Like [`PartialOrd::partial_cmp`], but incomparability is an error
    /// instead of `None`.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, StructError> {
        self.partial_cmp(other)
            .ok_or_else(|| StructError::not_comparable(self.type_name(), other.type_name()))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Character(a), Self::Character(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::List(a), Self::List(b)) => Shared::ptr_eq(a, b) || *a.read() == *b.read(),
            (Self::Map(a), Self::Map(b)) => Shared::ptr_eq(a, b) || *a.read() == *b.read(),
            (Self::Struct(a), Self::Struct(b)) => Shared::ptr_eq(a, b) || *a.read() == *b.read(),
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Boolean(a), Self::Boolean(b)) => a.partial_cmp(b),
            (Self::Number(a), Self::Number(b)) => Some(a.cmp(b)),
            (Self::Character(a), Self::Character(b)) => a.partial_cmp(b),
            (Self::String(a), Self::String(b)) => a.partial_cmp(b),
            (Self::Bytes(a), Self::Bytes(b)) => a.partial_cmp(b),
            (Self::List(a), Self::List(b)) => {
                if Shared::ptr_eq(a, b) {
                    return Some(Ordering::Equal);
                }
                a.read().partial_cmp(&*b.read())
            }
            // Maps compare for equality only, like sets of entries.
            (Self::Map(a), Self::Map(b)) => {
                let equal = Shared::ptr_eq(a, b) || *a.read() == *b.read();
                equal.then_some(Ordering::Equal)
            }
            (Self::Struct(a), Self::Struct(b)) => {
                if Shared::ptr_eq(a, b) {
                    return Some(Ordering::Equal);
                }
                a.read().partial_cmp(&*b.read())
            }
            _ => None,
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, chars: impl Iterator<Item = char>) -> fmt::Result {
    write!(f, "'")?;
    for c in chars {
        match c {
            '\\' => write!(f, "\\\\")?,
            '\'' => write!(f, "\\'")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            '\r' => write!(f, "\\r")?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "'")
}

/// The repr form: what field values look like inside
/// `TypeName(field=value, ...)`. Stable for equal inputs.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "None"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Character(c) => write_quoted(f, std::iter::once(*c)),
            Self::String(s) => write_quoted(f, s.chars()),
            Self::Bytes(bytes) => {
                write!(f, "b\"")?;
                for &b in bytes.iter() {
                    match b {
                        b'"' => write!(f, "\\\"")?,
                        b'\\' => write!(f, "\\\\")?,
                        0x20..=0x7e => write!(f, "{}", b as char)?,
                        _ => write!(f, "\\x{b:02x}")?,
                    }
                }
                write!(f, "\"")
            }
            Self::List(l) => {
                write!(f, "[")?;
                for (i, item) in l.read().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(m) => {
                write!(f, "{{")?;
                for (i, (name, value)) in m.read().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                write!(f, "}}")
            }
            Self::Struct(s) => write!(f, "{}", s.read()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::Character(c)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Number(Number::FixedInteger(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Number(Number::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Number(Number::from(i))
    }
}

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        Self::Number(Number::from(i))
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Self::Number(Number::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Number(Number::from(f))
    }
}

impl From<BigInt> for Value {
    fn from(b: BigInt) -> Self {
        Self::Number(Number::BigInteger(b))
    }
}

impl From<BigRational> for Value {
    fn from(r: BigRational) -> Self {
        Self::Number(Number::Rational(r))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::String(s)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Self::Bytes(Arc::from(b))
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(Arc::from(b))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::list(items)
    }
}

impl From<ValueMap> for Value {
    fn from(entries: ValueMap) -> Self {
        Self::map(entries)
    }
}

impl From<Struct> for Value {
    fn from(s: Struct) -> Self {
        Self::Struct(Shared::new(s))
    }
}

impl<'a> TryFrom<&'a Value> for bool {
    type Error = StructError;

    fn try_from(v: &'a Value) -> Result<bool, Self::Error> {
        match v {
            Value::Boolean(b) => Ok(*b),
            x => Err(StructError::type_mismatch("bool", x.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a Number {
    type Error = StructError;

    fn try_from(v: &'a Value) -> Result<&'a Number, Self::Error> {
        match v {
            Value::Number(n) => Ok(n),
            x => Err(StructError::type_mismatch("number", x.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Value> for i64 {
    type Error = StructError;

    fn try_from(v: &'a Value) -> Result<i64, Self::Error> {
        match v {
            Value::Number(n) => n
                .to_i64()
                .ok_or_else(|| StructError::type_mismatch("integer", "number")),
            x => Err(StructError::type_mismatch("integer", x.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Value> for f64 {
    type Error = StructError;

    fn try_from(v: &'a Value) -> Result<f64, Self::Error> {
        match v {
            Value::Number(n) => Ok(n.to_f64()),
            x => Err(StructError::type_mismatch("number", x.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Value> for char {
    type Error = StructError;

    fn try_from(v: &'a Value) -> Result<char, Self::Error> {
        match v {
            Value::Character(c) => Ok(*c),
            x => Err(StructError::type_mismatch("character", x.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = StructError;

    fn try_from(v: &'a Value) -> Result<&'a str, Self::Error> {
        match v {
            Value::String(s) => Ok(s),
            x => Err(StructError::type_mismatch("string", x.type_name())),
        }
    }
}
