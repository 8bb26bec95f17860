//! Record types and their instances
//!
//! A [`StructType`] is declared once and handed around as an `Arc`; type
//! identity is pointer identity, so two independently declared types never
//! compare equal even when their names and fields coincide. Instances carry
//! exactly one [`Value`] per declared field, in declaration order, and that
//! field-value tuple is the basis for comparison, hashing, display and
//! serialization.

use std::{
    cmp::Ordering,
    fmt,
    hash::{DefaultHasher, Hasher},
    sync::Arc,
};

use crate::{
    error::StructError,
    fields::FieldSpec,
    symbols::Symbol,
    value::{Value, ValueMap},
};

/// Type declaration for a record: a name plus its [`FieldSpec`].
#[derive(Debug)]
pub struct StructType {
    name: String,
    spec: FieldSpec,
}

impl StructType {
    pub fn new(name: impl Into<String>, spec: FieldSpec) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            spec,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// Construct an instance.
    ///
    /// Positional arguments pair with fields in declaration order with
    /// truncating-zip semantics: excess positional arguments are silently
    /// dropped. Keyword arguments bind by name, after the positionals, so a
    /// keyword wins when both name a field. Fields left unbound take their
    /// declared default (deep-cloned, so instances never share a default's
    /// mutable storage) or [`Value::Null`].
    pub fn construct(
        self: &Arc<Self>,
        positional: &[Value],
        keyword: &[(&str, Value)],
    ) -> Result<Struct, StructError> {
        if !positional.is_empty() && !self.spec.ordered() {
            return Err(StructError::positional_on_unordered(&self.name));
        }

        let mut bound: Vec<Option<Value>> = vec![None; self.spec.len()];
        for (slot, arg) in bound.iter_mut().zip(positional) {
            *slot = Some(arg.clone());
        }
        for (name, value) in keyword {
            let index = self
                .spec
                .index_of(name)
                .ok_or_else(|| StructError::unknown_field(&self.name, name))?;
            bound[index] = Some(value.clone());
        }

        let values = bound
            .into_iter()
            .zip(self.spec.iter())
            .map(|(slot, (_, default))| match slot {
                Some(value) => value,
                None => default.map(Value::deep_clone).unwrap_or(Value::Null),
            })
            .collect();

        Ok(Struct {
            ty: self.clone(),
            values,
        })
    }

    /// Rebuild an instance from an exported field-value tuple. Fields the
    /// tuple does not cover keep their default (or `Null`).
    pub fn from_state(self: &Arc<Self>, state: impl IntoIterator<Item = Value>) -> Struct {
        let values = self
            .spec
            .iter()
            .map(|(_, default)| default.map(Value::deep_clone).unwrap_or(Value::Null))
            .collect();
        let mut instance = Struct {
            ty: self.clone(),
            values,
        };
        instance.restore(state);
        instance
    }
}

/// A record instance. Cloning is shallow, like every [`Value`] clone:
/// mutable field values stay aliased between the clones.
#[derive(Clone)]
pub struct Struct {
    ty: Arc<StructType>,
    values: Vec<Value>,
}

impl Struct {
    pub fn ty(&self) -> &Arc<StructType> {
        &self.ty
    }

    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    pub fn is_instance_of(&self, ty: &Arc<StructType>) -> bool {
        Arc::ptr_eq(&self.ty, ty)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.ty.spec().index_of(name).map(|i| &self.values[i])
    }

    /// Rebind one field. Unknown names are an error, never a new field.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), StructError> {
        let index = self
            .ty
            .spec()
            .index_of(name)
            .ok_or_else(|| StructError::unknown_field(self.ty.name(), name))?;
        self.values[index] = value;
        Ok(())
    }

    /// The field-value tuple in declaration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Restartable iteration over `(name, value)` pairs in declaration
    /// order.
    pub fn iter(&self) -> Fields<'_> {
        Fields {
            instance: self,
            index: 0,
        }
    }

    /// A fresh mapping from field name to field value, declaration order.
    /// With `copy`, every value is deep-cloned so the mapping and the
    /// record share no mutable storage; without it, mutable values alias
    /// the record's.
    pub fn to_map(&self, copy: bool) -> ValueMap {
        self.iter()
            .map(|(name, value)| {
                let value = if copy { value.deep_clone() } else { value.clone() };
                (name, value)
            })
            .collect()
    }

    /// Export the field-value tuple. The export is shallow: mutable
    /// containers alias the live record.
    pub fn export(&self) -> Vec<Value> {
        self.values.clone()
    }

    /// Rebind fields from an exported tuple in declaration order,
    /// truncating zip: a short tuple leaves trailing fields untouched and
    /// extra entries are dropped.
    pub fn restore(&mut self, state: impl IntoIterator<Item = Value>) {
        for (slot, value) in self.values.iter_mut().zip(state) {
            *slot = value;
        }
    }

    pub fn deep_clone(&self) -> Self {
        Self {
            ty: self.ty.clone(),
            values: self.values.iter().map(Value::deep_clone).collect(),
        }
    }

    /// Hash the field-value tuple in declaration order. Fails if any field
    /// holds an unhashable value; mutating a record after using its hash as
    /// a table key is the caller's responsibility to avoid.
    pub fn try_hash<H: Hasher>(&self, state: &mut H) -> Result<(), StructError> {
        state.write_usize(self.values.len());
        for value in &self.values {
            value.try_hash(state)?;
        }
        Ok(())
    }

    pub fn try_hash_value(&self) -> Result<u64, StructError> {
        let mut hasher = DefaultHasher::new();
        self.try_hash(&mut hasher)?;
        Ok(hasher.finish())
    }

    /// Like [`PartialOrd::partial_cmp`], but incomparability — a different
    /// concrete type, or incomparable field values — is an error.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, StructError> {
        self.partial_cmp(other)
            .ok_or_else(|| StructError::not_comparable(self.ty.name(), other.ty.name()))
    }
}

impl PartialEq for Struct {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ty, &other.ty) && self.values == other.values
    }
}

impl PartialOrd for Struct {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !Arc::ptr_eq(&self.ty, &other.ty) {
            return None;
        }
        self.values.partial_cmp(&other.values)
    }
}

impl fmt::Display for Struct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.ty.name())?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Struct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

pub struct Fields<'a> {
    instance: &'a Struct,
    index: usize,
}

impl<'a> Iterator for Fields<'a> {
    type Item = (Symbol, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        let (name, _) = self.instance.ty.spec().get_index(self.index)?;
        let value = &self.instance.values[self.index];
        self.index += 1;
        Some((name, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.instance.values.len() - self.index;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for Fields<'_> {}

impl<'a> IntoIterator for &'a Struct {
    type Item = (Symbol, &'a Value);
    type IntoIter = Fields<'a>;

    fn into_iter(self) -> Fields<'a> {
        self.iter()
    }
}

/// Declare a [`StructType`].
///
/// ```
/// use structbase::{struct_type, Value};
///
/// let point = struct_type!(Point { x, y });
/// let config = struct_type!(Config { retries: 3, verbose: false });
/// let legacy = struct_type!(unordered Flags { a: 0, b: 1 });
///
/// assert!(point.construct(&[Value::from(1)], &[]).is_ok());
/// assert!(legacy.construct(&[Value::from(1)], &[]).is_err());
/// # let _ = config;
/// ```
///
/// Panics at declaration time if a field name repeats.
#[macro_export]
macro_rules! struct_type {
    (unordered $name:ident { $($field:ident : $default:expr),+ $(,)? }) => {
        $crate::structs::StructType::new(
            stringify!($name),
            $crate::fields::FieldSpec::unordered([
                $((stringify!($field), $crate::value::Value::from($default))),+
            ])
            .unwrap_or_else(|e| panic!("{e}")),
        )
    };
    ($name:ident { $($field:ident : $default:expr),+ $(,)? }) => {
        $crate::structs::StructType::new(
            stringify!($name),
            $crate::fields::FieldSpec::with_defaults([
                $((stringify!($field), $crate::value::Value::from($default))),+
            ])
            .unwrap_or_else(|e| panic!("{e}")),
        )
    };
    ($name:ident { $($field:ident),+ $(,)? }) => {
        $crate::structs::StructType::new(
            stringify!($name),
            $crate::fields::FieldSpec::names([$(stringify!($field)),+])
                .unwrap_or_else(|e| panic!("{e}")),
        )
    };
}
