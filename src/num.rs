//! Numeric tower for dynamic values
//!
//! The tower exists so that records can compare, hash and display numeric
//! fields; arithmetic is not part of this crate. Equality, ordering and
//! hashing are value-based across variants: `1`, `1/1` and `1.0` are equal
//! and hash identically. Every finite number reduces to an exact rational
//! canonical key; NaN and the infinities fall back to IEEE total order,
//! which makes `Number` fully `Ord` and `Hash` (NaN equals NaN and sorts
//! above positive infinity).

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use num::{BigInt, BigRational, ToPrimitive};
use ordered_float::OrderedFloat;

#[derive(Clone, derive_more::From)]
pub enum Number {
    FixedInteger(i64),
    BigInteger(BigInt),
    Rational(BigRational),
    Real(OrderedFloat<f64>),
}

enum Canonical {
    Exact(BigRational),
    Inexact(OrderedFloat<f64>),
}

impl Number {
    fn canonical(&self) -> Canonical {
        match self {
            Self::FixedInteger(i) => Canonical::Exact(BigRational::from_integer(BigInt::from(*i))),
            Self::BigInteger(b) => Canonical::Exact(BigRational::from_integer(b.clone())),
            Self::Rational(r) => Canonical::Exact(r.clone()),
            Self::Real(f) => match BigRational::from_float(f.0) {
                Some(exact) => Canonical::Exact(exact),
                // NaN and the infinities have no exact form.
                None => Canonical::Inexact(*f),
            },
        }
    }

    /// Lossy conversion, used when handing numbers to formats that only
    /// understand doubles.
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::FixedInteger(i) => *i as f64,
            Self::BigInteger(b) => b.to_f64().unwrap_or(f64::NAN),
            Self::Rational(r) => r.to_f64().unwrap_or(f64::NAN),
            Self::Real(f) => f.0,
        }
    }

    /// Exact integer value, if this number is one. Reals never qualify,
    /// integral or not.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Self::FixedInteger(i) => Some(*i),
            Self::BigInteger(b) => b.to_i64(),
            Self::Rational(r) if r.is_integer() => r.to_integer().to_i64(),
            _ => None,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.canonical(), other.canonical()) {
            (Canonical::Exact(a), Canonical::Exact(b)) => a.cmp(&b),
            // Only -inf sorts below an exact value; +inf and NaN dominate.
            (Canonical::Exact(_), Canonical::Inexact(f)) => {
                if f.0 == f64::NEG_INFINITY {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (Canonical::Inexact(f), Canonical::Exact(_)) => {
                if f.0 == f64::NEG_INFINITY {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (Canonical::Inexact(a), Canonical::Inexact(b)) => a.cmp(&b),
        }
    }
}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.canonical() {
            Canonical::Exact(r) => {
                0u8.hash(state);
                r.hash(state);
            }
            Canonical::Inexact(f) => {
                1u8.hash(state);
                f.hash(state);
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FixedInteger(i) => write!(f, "{i}"),
            Self::BigInteger(b) => write!(f, "{b}"),
            Self::Rational(r) => write!(f, "{}/{}", r.numer(), r.denom()),
            // {:?} keeps the decimal point on integral floats, so `1.0`
            // stays visibly distinct from `1`.
            Self::Real(x) => write!(f, "{:?}", x.0),
        }
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Self::Real(OrderedFloat(f))
    }
}

impl From<i32> for Number {
    fn from(i: i32) -> Self {
        Self::FixedInteger(i64::from(i))
    }
}

impl From<u32> for Number {
    fn from(i: u32) -> Self {
        Self::FixedInteger(i64::from(i))
    }
}

impl From<u64> for Number {
    fn from(i: u64) -> Self {
        match i64::try_from(i) {
            Ok(i) => Self::FixedInteger(i),
            Err(_) => Self::BigInteger(BigInt::from(i)),
        }
    }
}

impl From<usize> for Number {
    fn from(i: usize) -> Self {
        Self::from(i as u64)
    }
}
