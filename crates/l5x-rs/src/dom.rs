// crates/l5x-rs/src/dom.rs

//! The live document tree every accessor operates on.
//!
//! An [`Element`] is a handle: cloning it hands out a second reference to the
//! same node, never a copy. Any number of accessors and collections may hold
//! handles to one node, and a mutation made through one of them is visible
//! through all the others.
//!
//! The tree is read with the `quick-xml` event reader and written back with
//! its event writer. Only elements, attributes and text (plain or CDATA) are
//! kept; comments, processing instructions and the declaration are dropped.

use crate::config::{ParseOptions, WriteOptions};
use crate::error::L5xError;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::str::FromStr;
use log::{debug, trace};
use quick_xml::Error as XmlError;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

#[derive(Debug, Clone, PartialEq, Eq)]
struct TextContent {
    value: String,
    cdata: bool,
}

#[derive(Debug)]
struct Node {
    tag: String,
    /// Kept in document order so a save keeps the attribute order.
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: Option<TextContent>,
}

/// Shared handle to one node of the document tree.
#[derive(Clone)]
pub struct Element(Rc<RefCell<Node>>);

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("Element")
            .field("tag", &node.tag)
            .field("attributes", &node.attributes)
            .field("children", &node.children.len())
            .finish()
    }
}

impl Element {
    /// Creates a detached element with no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Element(Rc::new(RefCell::new(Node {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        })))
    }

    /// Creates a detached element with the given initial attributes.
    pub fn with_attributes<I, N, V>(tag: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let element = Element::new(tag);
        for (name, value) in attributes {
            element.set_attribute(name, value);
        }
        element
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    /// Returns the current string value of the named attribute.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0
            .borrow()
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.0.borrow().attributes.iter().any(|(n, _)| n == name)
    }

    /// Writes an attribute, replacing the value in place if it already exists.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        let mut node = self.0.borrow_mut();
        match node.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => node.attributes.push((name, value)),
        }
    }

    /// Removes an attribute, returning its last value.
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        let mut node = self.0.borrow_mut();
        let position = node.attributes.iter().position(|(n, _)| n == name)?;
        Some(node.attributes.remove(position).1)
    }

    /// Snapshot of all attributes in document order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.0.borrow().attributes.clone()
    }

    /// Handles to the direct children, in document order.
    pub fn children(&self) -> Vec<Element> {
        self.0.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// First direct child with the given tag.
    pub fn first_child(&self, tag: &str) -> Option<Element> {
        self.0
            .borrow()
            .children
            .iter()
            .find(|c| c.0.borrow().tag == tag)
            .cloned()
    }

    /// Appends `child` as the last child of this element.
    ///
    /// # Errors
    /// Returns `MalformedDocument` if `child` is this element or one of its
    /// ancestors, since the tree would no longer be a tree.
    pub fn append_child(&self, child: Element) -> Result<(), L5xError> {
        if child.contains(self) {
            return Err(L5xError::MalformedDocument(
                "cannot append an element into its own subtree",
            ));
        }
        self.0.borrow_mut().children.push(child);
        Ok(())
    }

    /// Creates a new element and appends it as the last child.
    pub fn create_child<I, N, V>(&self, tag: impl Into<String>, attributes: I) -> Element
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let child = Element::with_attributes(tag, attributes);
        self.0.borrow_mut().children.push(child.clone());
        child
    }

    /// All descendants (excluding `self`) with the given tag, in document order.
    pub fn descendants_by_tag(&self, tag: &str) -> Vec<Element> {
        let mut found = Vec::new();
        let mut pending: Vec<Element> = self.children().into_iter().rev().collect();
        while let Some(element) = pending.pop() {
            if element.0.borrow().tag == tag {
                found.push(element.clone());
            }
            pending.extend(element.children().into_iter().rev());
        }
        found
    }

    pub fn text(&self) -> Option<String> {
        self.0.borrow().text.as_ref().map(|t| t.value.clone())
    }

    /// Whether the element's text is stored as a CDATA section.
    pub fn is_cdata(&self) -> bool {
        self.0.borrow().text.as_ref().is_some_and(|t| t.cdata)
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.0.borrow_mut().text = Some(TextContent {
            value: text.into(),
            cdata: false,
        });
    }

    pub fn set_cdata(&self, text: impl Into<String>) {
        self.0.borrow_mut().text = Some(TextContent {
            value: text.into(),
            cdata: true,
        });
    }

    pub fn clear_text(&self) {
        self.0.borrow_mut().text = None;
    }

    /// True when both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// True when `other` is this node or lies somewhere beneath it.
    fn contains(&self, other: &Element) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.0.borrow().children.iter().any(|c| c.contains(other))
    }
}

// --- Document ---

/// A parsed document owning its root element.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Wraps an already built tree.
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Parses an XML string with the default [`ParseOptions`].
    pub fn parse(xml: &str) -> Result<Self, L5xError> {
        Self::parse_with(xml, &ParseOptions::default())
    }

    /// Parses an XML string into a live tree.
    ///
    /// # Errors
    /// Returns `XmlParsing` for syntax errors reported by `quick-xml`, `Utf8`
    /// for undecodable names or values, and `MalformedDocument` when the
    /// document has no root, several roots, or ends with open elements.
    pub fn parse_with(xml: &str, options: &ParseOptions) -> Result<Self, L5xError> {
        let mut reader = Reader::from_str(xml);
        let mut root: Option<Element> = None;
        let mut open: Vec<OpenElement> = Vec::new();
        let mut element_count = 0usize;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let element = element_from_start(&start)?;
                    attach(&mut root, &open, &element)?;
                    element_count += 1;
                    open.push(OpenElement::new(element));
                }
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    attach(&mut root, &open, &element)?;
                    element_count += 1;
                }
                Event::End(_) => {
                    let closed = open
                        .pop()
                        .ok_or(L5xError::MalformedDocument("end tag without a start tag"))?;
                    closed.close(options);
                }
                Event::Text(text) => {
                    let raw = core::str::from_utf8(&text)?;
                    let value = unescape(raw).map_err(XmlError::from)?;
                    match open.last_mut() {
                        Some(current) => current.text.push_str(&value),
                        None if value.trim().is_empty() => {}
                        None => {
                            return Err(L5xError::MalformedDocument(
                                "text outside the root element",
                            ));
                        }
                    }
                }
                Event::GeneralRef(reference) => {
                    let name = core::str::from_utf8(&reference)?;
                    let entity = format!("&{};", name);
                    let value = unescape(&entity).map_err(XmlError::from)?;
                    if let Some(current) = open.last_mut() {
                        current.text.push_str(&value);
                    }
                }
                Event::CData(cdata) => {
                    let value = core::str::from_utf8(&cdata)?;
                    if let Some(current) = open.last_mut() {
                        current.push_cdata(value);
                    }
                }
                Event::Eof => break,
                other => trace!("Skipping unsupported XML event: {:?}", other),
            }
        }

        if !open.is_empty() {
            return Err(L5xError::MalformedDocument("unexpected end of document"));
        }
        let root = root.ok_or(L5xError::MalformedDocument("document has no root element"))?;
        debug!(
            "Parsed document with root <{}> ({} elements)",
            root.0.borrow().tag,
            element_count
        );
        Ok(Self { root })
    }

    /// Serializes the tree with the default [`WriteOptions`].
    pub fn to_xml_string(&self) -> Result<String, L5xError> {
        self.write_with(&WriteOptions::default())
    }

    /// Serializes the tree. Attribute values are written verbatim apart from
    /// XML escaping, so every value produced by a binding survives a save.
    pub fn write_with(&self, options: &WriteOptions) -> Result<String, L5xError> {
        let buffer = Vec::with_capacity(1024);
        let mut writer = match options.indent {
            Some((ch, width)) => Writer::new_with_indent(buffer, ch, width),
            None => Writer::new(buffer),
        };
        if options.declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
                .map_err(XmlError::from)?;
        }
        write_element(&mut writer, &self.root)?;
        String::from_utf8(writer.into_inner()).map_err(|e| L5xError::Utf8(e.utf8_error()))
    }
}

impl FromStr for Document {
    type Err = L5xError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Document::parse(s)
    }
}

// --- Reader helpers ---

/// An element whose end tag has not been read yet, with its pending text.
struct OpenElement {
    element: Element,
    text: String,
    /// Byte range of `text` covered by CDATA sections, which trimming must
    /// not touch.
    cdata: Option<(usize, usize)>,
}

impl OpenElement {
    fn new(element: Element) -> Self {
        Self {
            element,
            text: String::new(),
            cdata: None,
        }
    }

    fn push_cdata(&mut self, value: &str) {
        let start = self.cdata.map_or(self.text.len(), |(start, _)| start);
        self.text.push_str(value);
        self.cdata = Some((start, self.text.len()));
    }

    /// Text arrives in pieces split at entity references, so trimming only
    /// happens here, once the whole content is known.
    fn close(self, options: &ParseOptions) {
        let mut value = self.text;
        if options.trim_text {
            let (keep_from, keep_to) = self.cdata.unwrap_or((value.len(), 0));
            let end = value.trim_end().len().max(keep_to);
            value.truncate(end);
            let start = (value.len() - value.trim_start().len()).min(keep_from);
            value.replace_range(..start, "");
        }
        if !value.is_empty() {
            self.element.0.borrow_mut().text = Some(TextContent {
                value,
                cdata: self.cdata.is_some(),
            });
        }
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, L5xError> {
    let name = start.name();
    let element = Element::new(core::str::from_utf8(name.as_ref())?);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(XmlError::from)?;
        let key = core::str::from_utf8(attribute.key.as_ref())?;
        let raw = core::str::from_utf8(&attribute.value)?;
        let value = unescape(raw).map_err(XmlError::from)?;
        element.set_attribute(key, value.into_owned());
    }
    Ok(element)
}

fn attach(
    root: &mut Option<Element>,
    open: &[OpenElement],
    element: &Element,
) -> Result<(), L5xError> {
    match open.last() {
        Some(parent) => {
            parent.element.0.borrow_mut().children.push(element.clone());
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element.clone());
            Ok(())
        }
        None => Err(L5xError::MalformedDocument("multiple root elements")),
    }
}

// --- Writer helpers ---

fn write_event<'a>(writer: &mut Writer<Vec<u8>>, event: Event<'a>) -> Result<(), L5xError> {
    writer.write_event(event).map_err(XmlError::from)?;
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), L5xError> {
    let node = element.0.borrow();
    let mut start = BytesStart::new(node.tag.as_str());
    for (name, value) in &node.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }
    if node.children.is_empty() && node.text.is_none() {
        return write_event(writer, Event::Empty(start));
    }
    write_event(writer, Event::Start(start))?;

    if let Some(text) = &node.text {
        if text.cdata {
            // A literal "]]>" has to be split across two sections.
            let mut rest = text.value.as_str();
            while let Some(position) = rest.find("]]>") {
                write_event(writer, Event::CData(BytesCData::new(&rest[..position + 2])))?;
                rest = &rest[position + 2..];
            }
            write_event(writer, Event::CData(BytesCData::new(rest)))?;
        } else {
            write_event(writer, Event::Text(BytesText::new(&text.value)))?;
        }
    }

    for child in &node.children {
        write_element(writer, child)?;
    }
    write_event(writer, Event::End(BytesEnd::new(node.tag.as_str())))
}
