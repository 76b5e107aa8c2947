// crates/l5x-rs/src/value.rs

//! Runtime values crossing the dynamically typed boundary of the crate.
//!
//! Typed code talks to bindings with concrete Rust types. `Value` is used
//! where the kind of a value is only known at run time: key coercion and
//! [`Attribute::set_value`](crate::Attribute::set_value).

use crate::error::L5xError;
use alloc::string::{String, ToString};
use core::fmt;

/// A scalar application value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    /// Short name of the value's kind, used in `TypeMismatch` errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Boolean(_) => "boolean",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

macro_rules! integer_value {
    ($($typ:ty),*) => {
        $(
            impl From<$typ> for Value {
                fn from(i: $typ) -> Self {
                    Value::Integer(i64::from(i))
                }
            }

            impl TryFrom<Value> for $typ {
                type Error = L5xError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    match value {
                        Value::Integer(i) => <$typ>::try_from(i).map_err(|_| L5xError::Conversion {
                            value: i.to_string(),
                            reason: concat!("out of range for ", stringify!($typ)),
                        }),
                        other => Err(L5xError::TypeMismatch {
                            expected: "integer",
                            found: other.kind(),
                        }),
                    }
                }
            }
        )*
    };
}

integer_value!(i8, i16, i32, i64, u8, u16, u32);

impl TryFrom<Value> for String {
    type Error = L5xError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(L5xError::TypeMismatch {
                expected: "text",
                found: other.kind(),
            }),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = L5xError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(L5xError::TypeMismatch {
                expected: "boolean",
                found: other.kind(),
            }),
        }
    }
}
