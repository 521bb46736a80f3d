//! Owned, order-preserving XML element tree.
//!
//! Built from `quick-xml` events for parts that have to be edited in place
//! and written back. Element names and attribute values are kept in their
//! raw (escaped) form, and every non-element construct (text, entity
//! references, comments, declarations, processing instructions, CDATA) is
//! kept as the exact source slice, so untouched markup round-trips.
use crate::common::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// A node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// Child element
    Element(XmlElement),
    /// Character data in escaped form
    Text(String),
    /// Any other markup, verbatim
    Markup(String),
}

/// An attribute with its raw (escaped) value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Qualified name, e.g. `w:val`
    pub key: String,
    /// Escaped value without quotes
    pub value: String,
}

/// An element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<XmlAttribute>,
    children: Vec<XmlNode>,
    self_closing: bool,
}

impl XmlElement {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    /// Qualified name, e.g. `w:p`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace prefix, if the name has one.
    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Name without its namespace prefix.
    #[inline]
    pub fn local_name(&self) -> &str {
        self.name
            .split_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    /// All attributes in source order.
    #[inline]
    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }

    /// Raw value of the first attribute whose local name matches.
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| {
                let local = attr.key.split_once(':').map_or(attr.key.as_str(), |(_, l)| l);
                local == local_name && !attr.key.starts_with("xmlns")
            })
            .map(|attr| attr.value.as_str())
    }

    /// Unescaped value of the first attribute whose local name matches.
    pub fn attribute_value(&self, local_name: &str) -> Option<String> {
        self.attribute(local_name).map(|raw| {
            quick_xml::escape::unescape(raw)
                .map(|value| value.into_owned())
                .unwrap_or_else(|_| raw.to_owned())
        })
    }

    /// Set an attribute by qualified name; `value` is escaped here.
    pub fn set_attribute(&mut self, key: &str, value: &str) {
        let value = quick_xml::escape::escape(value).into_owned();
        match self.attributes.iter_mut().find(|attr| attr.key == key) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(XmlAttribute {
                key: key.to_owned(),
                value,
            }),
        }
    }

    /// Builder form of [`XmlElement::set_attribute`].
    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder form of [`XmlElement::push_child`].
    pub fn with_child(mut self, node: XmlNode) -> Self {
        self.push_child(node);
        self
    }

    /// All child nodes.
    #[inline]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Child elements in order.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Mutable child elements in order.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// First child element matching `predicate`.
    pub fn find_child(&self, predicate: impl Fn(&XmlElement) -> bool) -> Option<&XmlElement> {
        self.child_elements().find(|element| predicate(element))
    }

    /// Mutable first child element matching `predicate`.
    pub fn find_child_mut(
        &mut self,
        predicate: impl Fn(&XmlElement) -> bool,
    ) -> Option<&mut XmlElement> {
        self.child_elements_mut().find(|element| predicate(element))
    }

    /// Position in `children` of the first child element matching `predicate`.
    pub fn position_of_child(&self, predicate: impl Fn(&XmlElement) -> bool) -> Option<usize> {
        self.children.iter().position(|node| match node {
            XmlNode::Element(element) => predicate(element),
            _ => false,
        })
    }

    /// First descendant (document order, excluding `self`) matching `predicate`.
    pub fn find_descendant(&self, predicate: &impl Fn(&XmlElement) -> bool) -> Option<&XmlElement> {
        for child in self.child_elements() {
            if predicate(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(predicate) {
                return Some(found);
            }
        }
        None
    }

    /// Mutable first descendant (document order, excluding `self`) matching `predicate`.
    pub fn find_descendant_mut(
        &mut self,
        predicate: &impl Fn(&XmlElement) -> bool,
    ) -> Option<&mut XmlElement> {
        for child in self.child_elements_mut() {
            if predicate(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant_mut(predicate) {
                return Some(found);
            }
        }
        None
    }

    /// Visit `self` and every descendant element in document order.
    ///
    /// `visit` runs on an element before its children, so children it adds
    /// are visited too.
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut XmlElement)) {
        visit(self);
        for child in self.child_elements_mut() {
            child.walk_mut(visit);
        }
    }

    /// Remove the child elements matching `predicate`, returning how many went.
    pub fn remove_children(&mut self, predicate: impl Fn(&XmlElement) -> bool) -> usize {
        let before = self.children.len();
        self.children.retain(|node| match node {
            XmlNode::Element(element) => !predicate(element),
            _ => true,
        });
        before - self.children.len()
    }

    /// Insert a node at `index` in `children`.
    pub fn insert_child(&mut self, index: usize, node: XmlNode) {
        let index = index.min(self.children.len());
        self.children.insert(index, node);
    }

    /// Append a node.
    pub fn push_child(&mut self, node: XmlNode) {
        self.children.push(node);
    }

    /// Concatenated escaped character data of the direct children.
    pub fn raw_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn from_start(start: &BytesStart<'_>, self_closing: bool) -> Result<Self> {
        let mut element = Self::new(utf8(start.name().as_ref())?);
        element.self_closing = self_closing;
        for attr in start.attributes() {
            let attr = attr.map_err(|e| Error::XmlError(e.to_string()))?;
            element.attributes.push(XmlAttribute {
                key: utf8(attr.key.as_ref())?.to_owned(),
                value: utf8(&attr.value)?.to_owned(),
            });
        }
        Ok(element)
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for attr in &self.attributes {
            let quote = if attr.value.contains('"') { '\'' } else { '"' };
            out.push(' ');
            out.push_str(&attr.key);
            out.push('=');
            out.push(quote);
            out.push_str(&attr.value);
            out.push(quote);
        }

        if self.self_closing && self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in &self.children {
            child.write_to(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

impl XmlNode {
    /// Create a text node from unescaped text.
    pub fn text(text: &str) -> Self {
        XmlNode::Text(quick_xml::escape::escape(text).into_owned())
    }

    fn write_to(&self, out: &mut String) {
        match self {
            XmlNode::Element(element) => element.write_to(out),
            XmlNode::Text(raw) | XmlNode::Markup(raw) => out.push_str(raw),
        }
    }
}

/// A parsed XML part: prolog, root element and trailing markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    nodes: Vec<XmlNode>,
}

impl XmlDocument {
    /// Parse a UTF-8 XML part. Malformed markup is an error.
    pub fn parse(xml_bytes: &[u8]) -> Result<Self> {
        let source = std::str::from_utf8(xml_bytes)
            .map_err(|e| Error::InvalidFormat(format!("part is not UTF-8: {}", e)))?;
        let mut reader = Reader::from_str(source);

        let mut nodes = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();

        loop {
            let start = reader.buffer_position() as usize;
            let event = reader.read_event()?;
            let end = reader.buffer_position() as usize;
            let raw = || source.get(start..end).unwrap_or_default().to_owned();

            match event {
                Event::Start(e) => stack.push(XmlElement::from_start(&e, false)?),
                Event::Empty(e) => {
                    let element = XmlElement::from_start(&e, true)?;
                    attach(&mut stack, &mut nodes, XmlNode::Element(element));
                },
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::XmlError("unexpected end tag".to_string()))?;
                    attach(&mut stack, &mut nodes, XmlNode::Element(element));
                },
                Event::Text(_) | Event::GeneralRef(_) => {
                    attach(&mut stack, &mut nodes, XmlNode::Text(raw()))
                },
                Event::Eof => break,
                _ => attach(&mut stack, &mut nodes, XmlNode::Markup(raw())),
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::XmlError(format!("unclosed element <{}>", open.name)));
        }
        if !nodes.iter().any(|node| matches!(node, XmlNode::Element(_))) {
            return Err(Error::XmlError("document has no root element".to_string()));
        }

        Ok(Self { nodes })
    }

    /// The root element.
    pub fn root(&self) -> Option<&XmlElement> {
        self.nodes.iter().find_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// The mutable root element.
    pub fn root_mut(&mut self) -> Option<&mut XmlElement> {
        self.nodes.iter_mut().find_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Serialize the document.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::with_capacity(4096);
        for node in &self.nodes {
            node.write_to(&mut out);
        }
        out
    }

    /// Serialize the document to bytes.
    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_xml_string().into_bytes()
    }
}

fn attach(stack: &mut [XmlElement], nodes: &mut Vec<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => nodes.push(node),
    }
}

#[inline]
fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| Error::InvalidFormat(e.to_string()))
}
