// crates/l5x-rs/src/access.rs

//! Accessor objects anchored on a single live element.

use crate::dom::Element;
use crate::error::L5xError;

/// A typed view over one element of the document.
///
/// Implementors store an [`Element`] handle, never a copy, so several
/// accessors wrapping the same element observe each other's writes.
pub trait ElementAccess {
    /// The wrapped element.
    fn element(&self) -> &Element;

    /// Returns the first direct child with the given tag.
    ///
    /// # Errors
    /// Returns `MissingChild` when no such child exists.
    fn get_child(&self, tag: &str) -> Result<Element, L5xError> {
        let element = self.element();
        element.first_child(tag).ok_or_else(|| L5xError::MissingChild {
            parent: element.tag(),
            tag: tag.into(),
        })
    }
}

/// A raw element is its own accessor.
impl ElementAccess for Element {
    fn element(&self) -> &Element {
        self
    }
}

/// Accessors that can be built from a raw element, which is what keyed
/// collections need to wrap their members.
pub trait FromElement: ElementAccess + Sized {
    /// Tag of the elements this accessor wraps. New collection members are
    /// created with this tag.
    const TAG: &'static str;

    /// Wraps `element`. Accessors with mandatory structure (for instance a
    /// child collection) fail here when that structure is missing.
    fn from_element(element: Element) -> Result<Self, L5xError>;
}
