// crates/l5x-rs/src/module.rs

//! Accessors for I/O modules and their communication ports.

use crate::access::{ElementAccess, FromElement};
use crate::attribute::Attribute;
use crate::codec::{Parsed, SafetyNetworkNumber, Text};
use crate::collection::ElementDict;
use crate::dom::Element;
use crate::error::L5xError;
use alloc::string::{String, ToString};

/// A `<Port>` of a module, keyed by its numeric `Id`.
#[derive(Debug, Clone)]
pub struct Port {
    element: Element,
}

impl Port {
    pub const ID: Attribute<Parsed<u32>> = Attribute::read_only("Id", Parsed::new());
    pub const ADDRESS: Attribute<Text> = Attribute::new("Address", Text);
    pub const TYPE: Attribute<Text> = Attribute::read_only("Type", Text);
    pub const UPSTREAM: Attribute<Parsed<bool>> = Attribute::new("Upstream", Parsed::new());

    pub fn id(&self) -> Result<u32, L5xError> {
        Self::ID.get(self)
    }

    /// Network or backplane address; empty for ports without one.
    pub fn address(&self) -> Result<String, L5xError> {
        Self::ADDRESS.get(self)
    }

    pub fn set_address(&self, address: &str) -> Result<(), L5xError> {
        Self::ADDRESS.set(self, &address.to_string())
    }

    /// Port type, e.g. `ICP` for the backplane or `Ethernet`.
    pub fn port_type(&self) -> Result<String, L5xError> {
        Self::TYPE.get(self)
    }

    pub fn upstream(&self) -> Result<bool, L5xError> {
        Self::UPSTREAM.get(self)
    }
}

impl ElementAccess for Port {
    fn element(&self) -> &Element {
        &self.element
    }
}

impl FromElement for Port {
    const TAG: &'static str = "Port";

    fn from_element(element: Element) -> Result<Self, L5xError> {
        Ok(Port { element })
    }
}

/// A `<Module>` entry of the controller's module tree.
#[derive(Debug)]
pub struct Module {
    element: Element,
    ports: ElementDict<u32, Port>,
}

impl Module {
    /// Key of the controller's module collection, hence read-only.
    pub const NAME: Attribute<Text> = Attribute::read_only("Name", Text);
    pub const CATALOG_NUMBER: Attribute<Text> = Attribute::new("CatalogNumber", Text);
    pub const INHIBITED: Attribute<Parsed<bool>> = Attribute::new("Inhibited", Parsed::new());
    pub const SAFETY_NETWORK: Attribute<SafetyNetworkNumber> =
        Attribute::new("SafetyNetwork", SafetyNetworkNumber);

    pub fn name(&self) -> Result<String, L5xError> {
        Self::NAME.get(self)
    }

    pub fn catalog_number(&self) -> Result<String, L5xError> {
        Self::CATALOG_NUMBER.get(self)
    }

    pub fn inhibited(&self) -> Result<bool, L5xError> {
        Self::INHIBITED.get(self)
    }

    pub fn set_inhibited(&self, inhibited: bool) -> Result<(), L5xError> {
        Self::INHIBITED.set(self, &inhibited)
    }

    /// Safety network number as 12 hex digits, e.g. `4A510302D4E6`.
    pub fn snn(&self) -> Result<String, L5xError> {
        Self::SAFETY_NETWORK.get(self)
    }

    /// Sets the safety network number. `_` separators are accepted; the value
    /// must fit in 12 hex digits.
    pub fn set_snn(&self, snn: &str) -> Result<(), L5xError> {
        Self::SAFETY_NETWORK.set(self, &snn.to_string())
    }

    /// Ports keyed by `Id`, in document order.
    pub fn ports(&self) -> &ElementDict<u32, Port> {
        &self.ports
    }

    pub fn ports_mut(&mut self) -> &mut ElementDict<u32, Port> {
        &mut self.ports
    }
}

impl ElementAccess for Module {
    fn element(&self) -> &Element {
        &self.element
    }
}

impl FromElement for Module {
    const TAG: &'static str = "Module";

    /// Every module carries a `<Ports>` child; its absence is an error.
    fn from_element(element: Element) -> Result<Self, L5xError> {
        let ports = ElementDict::new(element.get_child("Ports")?, "Id")?;
        Ok(Module { element, ports })
    }
}
