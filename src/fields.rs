//! Per-type field declarations
//!
//! A `FieldSpec` names a record type's fields, fixes their order and holds
//! their optional defaults. Internally the spec is always an ordered
//! sequence plus an explicit `ordered` policy flag: declarations whose
//! source order carries no meaning are canonicalized alphabetically so that
//! iteration, comparison and display stay deterministic, while positional
//! construction stays illegal for them.

use indexmap::IndexMap;

use crate::{error::StructError, symbols::Symbol, value::Value};

#[derive(Debug, Clone)]
pub struct FieldSpec {
    fields: IndexMap<Symbol, Option<Value>>,
    ordered: bool,
}

impl FieldSpec {
    /// An ordered field list with no defaults.
    pub fn names<I, S>(names: I) -> Result<Self, StructError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = IndexMap::new();
        for name in names {
            let name = name.as_ref();
            if fields.insert(Symbol::intern(name), None).is_some() {
                return Err(StructError::duplicate_field(name));
            }
        }
        Ok(Self {
            fields,
            ordered: true,
        })
    }

    /// An ordered field list where every field carries a default; the
    /// insertion order is the declaration order.
    pub fn with_defaults<I, S>(pairs: I) -> Result<Self, StructError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        let mut fields = IndexMap::new();
        for (name, default) in pairs {
            let name = name.as_ref();
            if fields.insert(Symbol::intern(name), Some(default)).is_some() {
                return Err(StructError::duplicate_field(name));
            }
        }
        Ok(Self {
            fields,
            ordered: true,
        })
    }

    /// Defaulted fields whose declaration order carries no meaning. The
    /// fields are stored alphabetically; positional construction is
    /// rejected for types declared this way.
    pub fn unordered<I, S>(pairs: I) -> Result<Self, StructError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        let mut spec = Self::with_defaults(pairs)?;
        spec.fields.sort_keys();
        spec.ordered = false;
        Ok(spec)
    }

    /// Whether the declaration order is meaningful, i.e. whether positional
    /// construction is permitted.
    pub fn ordered(&self) -> bool {
        self.ordered
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    // Field lists are small; a linear probe avoids interning every lookup
    // miss into the global symbol table.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.keys().position(|k| *k == name)
    }

    pub fn get_index(&self, index: usize) -> Option<(Symbol, Option<&Value>)> {
        self.fields
            .get_index(index)
            .map(|(name, default)| (*name, default.as_ref()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, Option<&Value>)> {
        self.fields
            .iter()
            .map(|(name, default)| (*name, default.as_ref()))
    }
}
