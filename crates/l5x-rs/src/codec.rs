// crates/l5x-rs/src/codec.rs

//! String <-> value converters plugged into attribute bindings.
//!
//! Every L5X attribute is a string on the wire. A [`Codec`] decides how that
//! string maps to an application value and back. Bindings receive their codec
//! at declaration time, so customizing a field means handing it a different
//! codec rather than subclassing anything.

use crate::error::L5xError;
use crate::value::Value;
use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;
use core::marker::PhantomData;
use core::num::IntErrorKind;
use core::str::FromStr;

/// A bidirectional converter between an attribute string and a typed value.
///
/// Implementations must be lossless: for every value accepted by `encode`,
/// decoding the produced string and encoding it again yields the same string.
pub trait Codec {
    /// The application-side type.
    type Target;

    /// Converts the attribute's string form into the application value.
    fn decode(&self, raw: &str) -> Result<Self::Target, L5xError>;

    /// Converts an application value into its canonical string form.
    fn encode(&self, value: &Self::Target) -> Result<String, L5xError>;

    /// Encodes a dynamically typed value, failing with `TypeMismatch` when its
    /// kind does not match `Target`.
    fn encode_value(&self, value: Value) -> Result<String, L5xError>
    where
        Self::Target: TryFrom<Value, Error = L5xError>,
    {
        let typed = <Self::Target as TryFrom<Value>>::try_from(value)?;
        self.encode(&typed)
    }
}

// --- Text ---

/// Identity codec: the attribute string is the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Text;

impl Codec for Text {
    type Target = String;

    fn decode(&self, raw: &str) -> Result<String, L5xError> {
        Ok(raw.to_string())
    }

    fn encode(&self, value: &String) -> Result<String, L5xError> {
        Ok(value.clone())
    }
}

// --- Parsed ---

/// Codec for any type with a `FromStr`/`Display` pair whose `Display` output is
/// its canonical attribute form (integers, `bool`, enumerations).
pub struct Parsed<T>(PhantomData<fn() -> T>);

impl<T> Parsed<T> {
    pub const fn new() -> Self {
        Parsed(PhantomData)
    }
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Parsed<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Parsed<T> {}

impl<T> fmt::Debug for Parsed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parsed<{}>", core::any::type_name::<T>())
    }
}

impl<T> Codec for Parsed<T>
where
    T: FromStr + fmt::Display,
{
    type Target = T;

    fn decode(&self, raw: &str) -> Result<T, L5xError> {
        raw.parse().map_err(|_| L5xError::Conversion {
            value: raw.to_string(),
            reason: "not a valid value for this attribute",
        })
    }

    fn encode(&self, value: &T) -> Result<String, L5xError> {
        Ok(value.to_string())
    }
}

// --- FnCodec ---

/// A codec assembled from a pair of plain functions.
pub struct FnCodec<T> {
    decode: fn(&str) -> Result<T, L5xError>,
    encode: fn(&T) -> Result<String, L5xError>,
}

impl<T> FnCodec<T> {
    pub const fn new(
        decode: fn(&str) -> Result<T, L5xError>,
        encode: fn(&T) -> Result<String, L5xError>,
    ) -> Self {
        Self { decode, encode }
    }
}

impl<T> Clone for FnCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FnCodec<T> {}

impl<T> fmt::Debug for FnCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCodec").finish_non_exhaustive()
    }
}

impl<T> Codec for FnCodec<T> {
    type Target = T;

    fn decode(&self, raw: &str) -> Result<T, L5xError> {
        (self.decode)(raw)
    }

    fn encode(&self, value: &T) -> Result<String, L5xError> {
        (self.encode)(value)
    }
}

// --- Safety network number ---

/// Number of hex digits carried by a safety network number.
const SNN_DIGITS: usize = 12;

/// Codec for module `SafetyNetwork` attributes.
///
/// The wire form is `16#0000_XXXX_XXXX_XXXX`: a radix marker, one reserved
/// 16-bit group that is always zero, and the 48-bit number in three groups of
/// four uppercase hex digits. The application value is the bare 12-digit hex
/// string, e.g. `ABCD12345678`.
///
/// Older documentation describes this field as 24-bit. The encoder accepts
/// anything that fits in 12 hex digits, so values up to `2^48 - 1` pass.
///
/// Only hex digits and `_` separators are accepted. Surrounding whitespace
/// and a `0x` prefix are conversion errors rather than being stripped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SafetyNetworkNumber;

impl Codec for SafetyNetworkNumber {
    type Target = String;

    /// Drops the radix/reserved group and joins the remaining groups.
    fn decode(&self, raw: &str) -> Result<String, L5xError> {
        Ok(raw.split('_').skip(1).collect())
    }

    /// Accepts the hex digits with or without `_` separators. An empty string
    /// encodes as zero.
    fn encode(&self, value: &String) -> Result<String, L5xError> {
        let digits: String = value.chars().filter(|c| *c != '_').collect();
        let number = if digits.is_empty() {
            0
        } else {
            u64::from_str_radix(&digits, 16).map_err(|e| L5xError::Conversion {
                value: value.clone(),
                reason: match e.kind() {
                    IntErrorKind::PosOverflow => "value exceeds 12 hex digits",
                    _ => "not a valid hex string",
                },
            })?
        };

        let padded = format!("{:012X}", number);
        if padded.len() != SNN_DIGITS {
            return Err(L5xError::Conversion {
                value: value.clone(),
                reason: "value exceeds 12 hex digits",
            });
        }

        Ok(format!(
            "16#0000_{}_{}_{}",
            &padded[0..4],
            &padded[4..8],
            &padded[8..12]
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Upstream {
        Yes,
        No,
    }

    fn decode_upstream(raw: &str) -> Result<Upstream, L5xError> {
        match raw {
            "true" => Ok(Upstream::Yes),
            "false" => Ok(Upstream::No),
            other => Err(L5xError::Conversion {
                value: other.to_string(),
                reason: "expected true or false",
            }),
        }
    }

    fn encode_upstream(value: &Upstream) -> Result<String, L5xError> {
        Ok(match value {
            Upstream::Yes => "true".to_string(),
            Upstream::No => "false".to_string(),
        })
    }

    #[test]
    fn test_snn_decode() {
        let snn = SafetyNetworkNumber;
        assert_eq!(snn.decode("16#0000_ABCD_1234_5678").unwrap(), "ABCD12345678");
        assert_eq!(snn.decode("").unwrap(), "");
    }

    #[test]
    fn test_snn_encode() {
        let snn = SafetyNetworkNumber;
        assert_eq!(
            snn.encode(&"ABCD12345678".to_string()).unwrap(),
            "16#0000_ABCD_1234_5678"
        );
        assert_eq!(
            snn.encode(&"abcd_1234_5678".to_string()).unwrap(),
            "16#0000_ABCD_1234_5678"
        );
        assert_eq!(
            snn.encode(&"1".to_string()).unwrap(),
            "16#0000_0000_0000_0001"
        );
    }

    #[test]
    fn test_snn_empty_encodes_as_zero() {
        assert_eq!(
            SafetyNetworkNumber.encode(&String::new()).unwrap(),
            "16#0000_0000_0000_0000"
        );
    }

    #[test]
    fn test_snn_rejects_invalid_hex() {
        let result = SafetyNetworkNumber.encode(&"GGGG".to_string());
        assert!(matches!(
            result,
            Err(L5xError::Conversion {
                reason: "not a valid hex string",
                ..
            })
        ));
    }

    #[test]
    fn test_snn_rejects_whitespace_and_radix_prefix() {
        for input in [" 1A", "1A ", "0x1A", "16#1A"] {
            let result = SafetyNetworkNumber.encode(&input.to_string());
            assert!(
                matches!(
                    result,
                    Err(L5xError::Conversion {
                        reason: "not a valid hex string",
                        ..
                    })
                ),
                "{:?} should be rejected, got {:?}",
                input,
                result
            );
        }
    }

    #[test]
    fn test_snn_rejects_values_wider_than_48_bits() {
        for too_wide in ["FFFFFFFFFFFFF", "1000000000000", "FFFFFFFFFFFFFFFFFFFF"] {
            let result = SafetyNetworkNumber.encode(&too_wide.to_string());
            assert!(
                matches!(
                    result,
                    Err(L5xError::Conversion {
                        reason: "value exceeds 12 hex digits",
                        ..
                    })
                ),
                "{} should be rejected, got {:?}",
                too_wide,
                result
            );
        }
        // Leading zeros do not count against the width.
        assert_eq!(
            SafetyNetworkNumber
                .encode(&"0000FFFFFFFFFFFF".to_string())
                .unwrap(),
            "16#0000_FFFF_FFFF_FFFF"
        );
    }

    #[test]
    fn test_snn_rejects_non_text_values() {
        let result = SafetyNetworkNumber.encode_value(Value::Integer(123));
        assert!(matches!(
            result,
            Err(L5xError::TypeMismatch {
                expected: "text",
                found: "integer"
            })
        ));
    }

    #[test]
    fn test_snn_canonical_form_is_idempotent() {
        let snn = SafetyNetworkNumber;
        let first = snn.encode(&"0_1_A".to_string()).unwrap();
        let decoded = snn.decode(&first).unwrap();
        assert_eq!(decoded, "00000000001A");
        assert_eq!(snn.encode(&decoded).unwrap(), first);
    }

    #[test]
    fn test_parsed_codec() {
        let codec = Parsed::<u32>::new();
        assert_eq!(codec.decode("42").unwrap(), 42);
        assert_eq!(codec.encode(&42).unwrap(), "42");
        assert!(matches!(
            codec.decode("forty-two"),
            Err(L5xError::Conversion { .. })
        ));

        let flag = Parsed::<bool>::new();
        assert!(flag.decode("true").unwrap());
        assert_eq!(flag.encode(&false).unwrap(), "false");
        assert!(matches!(
            flag.encode_value(Value::from("true")),
            Err(L5xError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_fn_codec_uses_injected_functions() {
        let codec = FnCodec::new(decode_upstream, encode_upstream);
        assert_eq!(codec.decode("true").unwrap(), Upstream::Yes);
        assert_eq!(codec.encode(&Upstream::No).unwrap(), "false");
        assert!(codec.decode("maybe").is_err());
    }

    #[test]
    fn test_text_is_identity() {
        assert_eq!(Text.decode("16#0000").unwrap(), "16#0000");
        assert_eq!(Text.encode(&"Local".to_string()).unwrap(), "Local");
        assert_eq!(
            Text.encode_value(Value::from("Local")).unwrap(),
            "Local"
        );
    }
}
