// crates/l5x-rs/src/collection.rs

//! Sibling elements exposed as an ordered, keyed dictionary of accessors.

use crate::access::{ElementAccess, FromElement};
use crate::dom::Element;
use crate::error::L5xError;
use crate::key::CollectionKey;
use crate::value::Value;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use log::{debug, trace};

/// The direct children of a container element, wrapped as `A` and indexed by
/// the coerced value of their key attribute.
///
/// Iteration follows document order; the key index only serves lookups.
/// Members are accessors over live elements, so attribute writes made through
/// them go straight into the document.
#[derive(Debug)]
pub struct ElementDict<K, A> {
    container: Element,
    key_attribute: &'static str,
    entries: Vec<(K, A)>,
    index: BTreeMap<K, usize>,
}

impl<K, A> ElementDict<K, A>
where
    K: CollectionKey,
    A: FromElement,
{
    /// Wraps every direct child of `container` and indexes it by
    /// `key_attribute`.
    ///
    /// Keys are coerced straight from the raw attribute string, and appended
    /// members get the key's `Display` form. The member's own binding for the
    /// key is not consulted, so this only suits keys whose attribute codec is
    /// the identity or a plain `FromStr`/`Display` pair (names, numeric ids,
    /// keywords). The key binding on the member type should be read-only so
    /// that a rename cannot collide with a sibling.
    ///
    /// # Errors
    /// * `DuplicateKey` if two children coerce to the same key.
    /// * `MissingAttribute` if a child lacks the key attribute.
    /// * Any error from the key coercion or from `A::from_element`.
    pub fn new(container: Element, key_attribute: &'static str) -> Result<Self, L5xError> {
        let mut dict = Self {
            container,
            key_attribute,
            entries: Vec::new(),
            index: BTreeMap::new(),
        };
        dict.reload()?;
        Ok(dict)
    }

    /// Rebuilds the index from the container's current children.
    ///
    /// Needed only when the container was edited without going through this
    /// collection. On error the previous index is kept.
    pub fn reload(&mut self) -> Result<(), L5xError> {
        let mut entries = Vec::new();
        let mut index = BTreeMap::new();

        for child in self.container.children() {
            let member = A::from_element(child)?;
            let key = self.read_key(&member)?;
            if index.contains_key(&key) {
                return Err(L5xError::DuplicateKey {
                    key: key.to_string(),
                });
            }
            trace!("Indexed <{}> {}={}", A::TAG, self.key_attribute, key);
            index.insert(key.clone(), entries.len());
            entries.push((key, member));
        }

        debug!(
            "Indexed {} member(s) of <{}> by '{}'",
            entries.len(),
            self.container.tag(),
            self.key_attribute
        );
        self.entries = entries;
        self.index = index;
        Ok(())
    }

    /// Coerces `key` and returns the matching member.
    ///
    /// # Errors
    /// `KeyNotFound` when no member has that key, or the coercion error when
    /// `key` cannot be turned into `K` at all.
    pub fn lookup(&self, key: impl Into<Value>) -> Result<&A, L5xError> {
        let key = K::coerce(key.into())?;
        self.get(&key).ok_or_else(|| L5xError::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// Creates a new `A::TAG` element with `attributes`, sets its key
    /// attribute, appends it as the container's last child and registers it.
    ///
    /// # Errors
    /// `DuplicateKey` if `key` is already indexed or already carried by a
    /// child of the container, which can happen when another collection over
    /// the same container appended it. The document is not touched when any
    /// error is returned.
    pub fn append<I, N, V>(&mut self, key: impl Into<Value>, attributes: I) -> Result<&A, L5xError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        self.append_with(key, attributes, |_| Ok(()))
    }

    /// Like [`append`](Self::append), but `populate` may add mandatory
    /// structure (child elements, text) to the new element before it is
    /// wrapped. The element is attached only after `populate` and
    /// `A::from_element` have both succeeded.
    pub fn append_with<I, N, V, F>(
        &mut self,
        key: impl Into<Value>,
        attributes: I,
        populate: F,
    ) -> Result<&A, L5xError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
        F: FnOnce(&Element) -> Result<(), L5xError>,
    {
        let key = K::coerce(key.into())?;
        if self.index.contains_key(&key) || self.container_has_key(&key) {
            return Err(L5xError::DuplicateKey {
                key: key.to_string(),
            });
        }

        let element = Element::with_attributes(A::TAG, attributes);
        element.set_attribute(self.key_attribute, key.to_string());
        populate(&element)?;
        let member = A::from_element(element.clone())?;

        self.container.append_child(element)?;
        let position = self.entries.len();
        self.index.insert(key.clone(), position);
        debug!(
            "Appended <{}> {}={} to <{}>",
            A::TAG,
            self.key_attribute,
            key,
            self.container.tag()
        );
        self.entries.push((key, member));
        Ok(&self.entries[position].1)
    }

    /// Checks the live children rather than the index, which may be stale.
    fn container_has_key(&self, key: &K) -> bool {
        self.container.children().iter().any(|child| {
            child
                .attribute(self.key_attribute)
                .and_then(|raw| K::coerce(Value::Text(raw)).ok())
                .is_some_and(|existing| existing == *key)
        })
    }

    fn read_key(&self, member: &A) -> Result<K, L5xError> {
        let element = member.element();
        let raw = element
            .attribute(self.key_attribute)
            .ok_or_else(|| L5xError::MissingAttribute {
                element: element.tag(),
                attribute: self.key_attribute,
            })?;
        K::coerce(Value::Text(raw))
    }
}

impl<K: CollectionKey, A> ElementDict<K, A> {
    /// Typed lookup without coercion.
    pub fn get(&self, key: &K) -> Option<&A> {
        self.index
            .get(key)
            .and_then(|&position| self.entries.get(position))
            .map(|(_, member)| member)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }
}

impl<K, A> ElementDict<K, A> {
    /// Keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Members in document order.
    pub fn iter(&self) -> impl Iterator<Item = &A> {
        self.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    pub fn key_attribute(&self) -> &'static str {
        self.key_attribute
    }
}

impl<'a, K, A> IntoIterator for &'a ElementDict<K, A> {
    type Item = &'a A;
    type IntoIter = core::iter::Map<core::slice::Iter<'a, (K, A)>, fn(&'a (K, A)) -> &'a A>;

    fn into_iter(self) -> Self::IntoIter {
        let member: fn(&'a (K, A)) -> &'a A = |(_, member)| member;
        self.entries.iter().map(member)
    }
}
