// src/lib.rs

#![cfg_attr(not(feature = "std"), no_std)]
#![doc = "Typed accessors over L5X (Logix controller project) documents."]
#![doc = ""]
#![doc = "This `no_std + alloc` library keeps an L5X document as a live, shared element"]
#![doc = "tree and layers typed views on top of it:"]
#![doc = "- `Attribute`: binds a field to an XML attribute through a `Codec`."]
#![doc = "- `ElementAccess` / `FromElement`: accessors anchored on one element."]
#![doc = "- `ElementDict`: sibling elements as an ordered, key-coerced dictionary."]
#![doc = "- `Project`, `Controller`, `Module`, `Port`: accessors for the L5X schema."]

extern crate alloc;

// --- Crate Modules ---

mod access;
mod attribute;
mod codec;
mod collection;
mod config;
mod dom;
mod error;
mod key;
mod module;
mod project;
mod value;

// --- Public API Re-exports ---

pub use access::{ElementAccess, FromElement};
pub use attribute::Attribute;
pub use codec::{Codec, FnCodec, Parsed, SafetyNetworkNumber, Text};
pub use collection::ElementDict;
pub use config::{ParseOptions, WriteOptions};
pub use dom::{Document, Element};
pub use error::L5xError;
pub use key::{CollectionKey, coerce_keyword};
pub use module::{Module, Port};
pub use project::{Controller, Project};
pub use value::Value;
