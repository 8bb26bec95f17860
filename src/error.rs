//! Errors surfaced by declaration, construction, comparison and hashing

use thiserror::Error;

/// Every failure in this crate is immediate and local to the failing call.
/// Nothing is retried and nothing poisons the record it was called on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructError {
    #[error("type `{ty}` declares no field order; positional arguments are not accepted")]
    PositionalOnUnordered { ty: String },

    #[error("type `{ty}` has no field named `{field}`")]
    UnknownField { ty: String, field: String },

    #[error("field `{field}` is declared more than once")]
    DuplicateField { field: String },

    #[error("cannot compare {lhs} with {rhs}")]
    NotComparable { lhs: String, rhs: String },

    #[error("value of type {0} is not hashable")]
    Unhashable(&'static str),

    #[error("expected value of type {expected}, provided {provided}")]
    TypeMismatch {
        expected: &'static str,
        provided: &'static str,
    },
}

impl StructError {
    pub fn positional_on_unordered(ty: &str) -> Self {
        Self::PositionalOnUnordered { ty: ty.to_string() }
    }

    pub fn unknown_field(ty: &str, field: &str) -> Self {
        Self::UnknownField {
            ty: ty.to_string(),
            field: field.to_string(),
        }
    }

    pub fn duplicate_field(field: &str) -> Self {
        Self::DuplicateField {
            field: field.to_string(),
        }
    }

    pub fn not_comparable(lhs: &str, rhs: &str) -> Self {
        Self::NotComparable {
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
        }
    }

    pub fn unhashable(type_name: &'static str) -> Self {
        Self::Unhashable(type_name)
    }

    pub fn type_mismatch(expected: &'static str, provided: &'static str) -> Self {
        Self::TypeMismatch { expected, provided }
    }
}
