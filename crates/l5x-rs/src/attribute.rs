// crates/l5x-rs/src/attribute.rs

//! Typed bindings between accessor fields and element attributes.
//!
//! An [`Attribute`] is declared once per field, usually as an associated
//! constant of the accessor type:
//!
//! ```
//! use l5x_rs::{Attribute, Element, Parsed, Text};
//!
//! struct Port {
//!     element: Element,
//! }
//!
//! impl Port {
//!     const ID: Attribute<Parsed<u32>> = Attribute::read_only("Id", Parsed::new());
//!     const ADDRESS: Attribute<Text> = Attribute::new("Address", Text);
//! }
//!
//! let port = Port { element: Element::with_attributes("Port", [("Id", "2"), ("Address", "")]) };
//! assert_eq!(Port::ID.get(&port.element).unwrap(), 2);
//! Port::ADDRESS.set(&port.element, &"10.0.0.5".to_string()).unwrap();
//! assert_eq!(port.element.attribute("Address").as_deref(), Some("10.0.0.5"));
//! ```
//!
//! The binding itself holds no element; it is applied to whichever accessor
//! is passed to `get`/`set`.

use crate::access::ElementAccess;
use crate::codec::Codec;
use crate::error::L5xError;
use crate::value::Value;
use alloc::string::String;
use log::trace;

/// Binds an attribute name to a codec.
#[derive(Debug, Clone, Copy)]
pub struct Attribute<C> {
    name: &'static str,
    read_only: bool,
    codec: C,
}

impl<C> Attribute<C> {
    /// A writable binding.
    pub const fn new(name: &'static str, codec: C) -> Self {
        Self {
            name,
            read_only: false,
            codec,
        }
    }

    /// A binding that rejects every write.
    pub const fn read_only(name: &'static str, codec: C) -> Self {
        Self {
            name,
            read_only: true,
            codec,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Whether the owner's element carries this attribute at all.
    pub fn exists<A: ElementAccess + ?Sized>(&self, owner: &A) -> bool {
        owner.element().has_attribute(self.name)
    }
}

impl<C: Codec> Attribute<C> {
    /// Reads and decodes the attribute.
    ///
    /// # Errors
    /// `MissingAttribute` if the element lacks the attribute, or whatever the
    /// codec reports for a malformed value.
    pub fn get<A: ElementAccess + ?Sized>(&self, owner: &A) -> Result<C::Target, L5xError> {
        let element = owner.element();
        let raw = element
            .attribute(self.name)
            .ok_or_else(|| L5xError::MissingAttribute {
                element: element.tag(),
                attribute: self.name,
            })?;
        self.codec.decode(&raw)
    }

    /// Like [`get`](Self::get), but an absent attribute yields `None`.
    pub fn get_opt<A: ElementAccess + ?Sized>(
        &self,
        owner: &A,
    ) -> Result<Option<C::Target>, L5xError> {
        owner
            .element()
            .attribute(self.name)
            .map(|raw| self.codec.decode(&raw))
            .transpose()
    }

    /// Encodes `value` and writes it to the attribute.
    ///
    /// The value is fully encoded before the element is touched, so a failed
    /// conversion leaves the previous value in place.
    pub fn set<A: ElementAccess + ?Sized>(
        &self,
        owner: &A,
        value: &C::Target,
    ) -> Result<(), L5xError> {
        self.check_writable()?;
        let encoded = self.codec.encode(value)?;
        self.write(owner, encoded);
        Ok(())
    }

    /// Sets the attribute from a dynamically typed value.
    ///
    /// # Errors
    /// `TypeMismatch` when the value's kind does not fit the codec, plus any
    /// error `set` can return.
    pub fn set_value<A: ElementAccess + ?Sized>(
        &self,
        owner: &A,
        value: impl Into<Value>,
    ) -> Result<(), L5xError>
    where
        C::Target: TryFrom<Value, Error = L5xError>,
    {
        self.check_writable()?;
        let encoded = self.codec.encode_value(value.into())?;
        self.write(owner, encoded);
        Ok(())
    }

    fn check_writable(&self) -> Result<(), L5xError> {
        if self.read_only {
            return Err(L5xError::ReadOnlyAttribute {
                attribute: self.name,
            });
        }
        Ok(())
    }

    fn write<A: ElementAccess + ?Sized>(&self, owner: &A, encoded: String) {
        let element = owner.element();
        trace!("<{}> {}=\"{}\"", element.tag(), self.name, encoded);
        element.set_attribute(self.name, encoded);
    }
}
