//! Runtime-declared record types.
//!
//! Declare a [`StructType`] once — a name plus an ordered field list with
//! optional defaults — and every instance gets positional/keyword
//! construction, field-wise comparison, a fallible hash, a readable repr,
//! mapping conversion and serialization round-tripping for free.
//!
//! ```
//! use structbase::{struct_type, Value};
//!
//! let point = struct_type!(Point { x, y });
//! let p = point.construct(&[Value::from(1), Value::from("a")], &[]).unwrap();
//!
//! assert_eq!(p.to_string(), "Point(x=1, y='a')");
//! assert!(p < point.construct(&[Value::from(2), Value::from(5)], &[]).unwrap());
//! ```

pub mod cell;
pub mod error;
pub mod fields;
pub mod json;
pub mod num;
pub mod structs;
pub mod symbols;
pub mod value;

pub use cell::Shared;
pub use error::StructError;
pub use fields::FieldSpec;
pub use num::Number;
pub use structs::{Fields, Struct, StructType};
pub use symbols::Symbol;
pub use value::{Value, ValueMap};
