// crates/l5x-rs/src/error.rs

use alloc::fmt;
use alloc::string::String;
use core::str::Utf8Error;
use quick_xml::Error as XmlError;

/// Errors that can occur while reading, binding or mutating an L5X document.
#[derive(Debug)]
pub enum L5xError {
    /// An error from the underlying `quick-xml` reader.
    XmlParsing(XmlError),

    /// Element names, attribute values or text were not valid UTF-8.
    Utf8(Utf8Error),

    /// The document tree is structurally unusable (e.g. two root elements).
    MalformedDocument(&'static str),

    /// A bound attribute is absent from the element it was read from.
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    /// A write was attempted through a read-only binding.
    ReadOnlyAttribute { attribute: &'static str },

    /// A string could not be translated to or from its application value.
    Conversion { value: String, reason: &'static str },

    /// A value of the wrong kind was handed to a codec or key coercion.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// An expected direct child element is absent.
    MissingChild { parent: String, tag: String },

    /// Two members of one keyed collection coerce to the same key.
    DuplicateKey { key: String },

    /// A keyed collection lookup found no member.
    KeyNotFound { key: String },
}

impl From<XmlError> for L5xError {
    fn from(e: XmlError) -> Self {
        L5xError::XmlParsing(e)
    }
}

impl From<Utf8Error> for L5xError {
    fn from(e: Utf8Error) -> Self {
        L5xError::Utf8(e)
    }
}

impl fmt::Display for L5xError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            L5xError::XmlParsing(e) => write!(f, "XML parsing error: {}", e),
            L5xError::Utf8(e) => write!(f, "Invalid UTF-8 in document: {}", e),
            L5xError::MalformedDocument(msg) => write!(f, "Malformed document: {}", msg),
            L5xError::MissingAttribute { element, attribute } => {
                write!(f, "Element <{}> has no attribute '{}'", element, attribute)
            }
            L5xError::ReadOnlyAttribute { attribute } => {
                write!(f, "Attribute '{}' is read-only", attribute)
            }
            L5xError::Conversion { value, reason } => {
                write!(f, "Cannot convert '{}': {}", value, reason)
            }
            L5xError::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {} but got {}", expected, found)
            }
            L5xError::MissingChild { parent, tag } => {
                write!(f, "Element <{}> has no child <{}>", parent, tag)
            }
            L5xError::DuplicateKey { key } => write!(f, "Duplicate key: {}", key),
            L5xError::KeyNotFound { key } => write!(f, "Key not found: {}", key),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for L5xError {}

#[cfg(test)]
mod tests {
    use super::L5xError;
    use alloc::string::ToString;

    #[test]
    fn test_from_xml_error() {
        let xml_err = quick_xml::Error::Syntax(quick_xml::errors::SyntaxError::UnclosedTag);
        let err: L5xError = xml_err.into();
        assert!(matches!(err, L5xError::XmlParsing(_)));
    }

    #[test]
    fn test_from_utf8_error() {
        let bytes = [0xFFu8, 0xFE];
        let utf8_err = core::str::from_utf8(&bytes).unwrap_err();
        let err: L5xError = utf8_err.into();
        assert!(matches!(err, L5xError::Utf8(_)));
    }

    #[test]
    fn test_display_names_the_offending_key() {
        let err = L5xError::DuplicateKey {
            key: "1".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate key: 1");

        let err = L5xError::MissingChild {
            parent: "Module".to_string(),
            tag: "Ports".to_string(),
        };
        assert_eq!(err.to_string(), "Element <Module> has no child <Ports>");
    }
}
