// crates/l5x-rs/src/key.rs

//! Key coercion for keyed element collections.
//!
//! Keys come from attribute strings during indexing and from caller-supplied
//! [`Value`]s during lookup and append. Both paths go through
//! [`CollectionKey::coerce`], so `ports.lookup(1)` and `ports.lookup("1")`
//! find the same member of a collection keyed by integers.

use crate::error::L5xError;
use crate::value::Value;
use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

/// A type usable as the key of an [`ElementDict`](crate::ElementDict).
///
/// `Display` must produce the attribute form of the key; it is written to the
/// key attribute of appended members.
pub trait CollectionKey: Ord + Clone + fmt::Debug + fmt::Display {
    /// Converts a runtime value into a key.
    fn coerce(value: Value) -> Result<Self, L5xError>;
}

impl CollectionKey for String {
    fn coerce(value: Value) -> Result<Self, L5xError> {
        match value {
            Value::Text(s) => Ok(s),
            Value::Integer(i) => Ok(i.to_string()),
            other => Err(L5xError::TypeMismatch {
                expected: "text",
                found: other.kind(),
            }),
        }
    }
}

macro_rules! integer_key {
    ($($typ:ty),*) => {
        $(
            impl CollectionKey for $typ {
                fn coerce(value: Value) -> Result<Self, L5xError> {
                    match value {
                        Value::Integer(_) => <$typ>::try_from(value),
                        Value::Text(s) => s.trim().parse::<$typ>().map_err(|_| L5xError::Conversion {
                            value: s,
                            reason: "not a valid integer key",
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

integer_key!(i64, u32, u16, u8);

/// Coerces a text value into an enumeration through its `FromStr` impl.
///
/// Enumerated key types implement [`CollectionKey::coerce`] by delegating
/// here.
pub fn coerce_keyword<E: FromStr>(value: Value) -> Result<E, L5xError> {
    match value {
        Value::Text(s) => s.parse().map_err(|_| L5xError::Conversion {
            value: s,
            reason: "not a recognised keyword",
        }),
        other => Err(L5xError::TypeMismatch {
            expected: "text",
            found: other.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum PortKind {
        Icp,
        Ethernet,
    }

    impl FromStr for PortKind {
        type Err = ();

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "ICP" => Ok(PortKind::Icp),
                "Ethernet" => Ok(PortKind::Ethernet),
                _ => Err(()),
            }
        }
    }

    impl fmt::Display for PortKind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                PortKind::Icp => "ICP",
                PortKind::Ethernet => "Ethernet",
            })
        }
    }

    impl CollectionKey for PortKind {
        fn coerce(value: Value) -> Result<Self, L5xError> {
            coerce_keyword(value)
        }
    }

    #[test]
    fn test_integer_keys_accept_text_and_integers() {
        assert_eq!(u32::coerce(Value::from("1")).unwrap(), 1);
        assert_eq!(u32::coerce(Value::from(" 2 ")).unwrap(), 2);
        assert_eq!(u32::coerce(Value::from(3i64)).unwrap(), 3);
        assert!(matches!(
            u32::coerce(Value::from("one")),
            Err(L5xError::Conversion { .. })
        ));
        assert!(matches!(
            u8::coerce(Value::from(300i64)),
            Err(L5xError::Conversion { .. })
        ));
        assert!(matches!(
            i64::coerce(Value::from(true)),
            Err(L5xError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_string_keys() {
        assert_eq!(String::coerce(Value::from("Local")).unwrap(), "Local");
        assert_eq!(String::coerce(Value::from(7i64)).unwrap(), "7");
        assert!(String::coerce(Value::from(false)).is_err());
    }

    #[test]
    fn test_keyword_keys() {
        assert_eq!(PortKind::coerce(Value::from("ICP")).unwrap(), PortKind::Icp);
        assert_eq!(
            PortKind::coerce(Value::from("Ethernet")).unwrap(),
            PortKind::Ethernet
        );
        assert!(matches!(
            PortKind::coerce(Value::from("Serial")),
            Err(L5xError::Conversion { .. })
        ));
        assert!(matches!(
            PortKind::coerce(Value::from(1i64)),
            Err(L5xError::TypeMismatch { .. })
        ));
    }
}
