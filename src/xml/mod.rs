//! Owned, namespace-resolved XML element tree.
//!
//! The deserializer works on a whole document at once, so the streaming
//! `quick_xml::NsReader` events are folded into a small tree first:
//!
//! ```text
//! <xmi:XMI xmlns:xmi="…/XMI/2.1">         XmlNode { {…/XMI/2.1}XMI
//!   <uml:Model>…</uml:Model>       ──▶      children: [ {…/UML/2.1}Model, … ] }
//! </xmi:XMI>
//! ```
//!
//! Names are stored as (namespace URI, local name), so lookups use a [`Tag`]
//! rather than the prefix written in the document. Text content is dropped.

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use thiserror::Error;

/// Malformed markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("XML parse error at position {position}: {message}")]
pub struct XmlError {
    pub position: u64,
    pub message: String,
}

impl XmlError {
    fn new(position: u64, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

// ============================================================================
// NAMES
// ============================================================================

/// Lookup key for an element or attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag<'a> {
    pub namespace: Option<&'a str>,
    pub local: &'a str,
}

impl<'a> Tag<'a> {
    /// A name without namespace.
    pub const fn local(local: &'a str) -> Self {
        Self {
            namespace: None,
            local,
        }
    }

    /// A name bound to `namespace`.
    pub const fn qualified(namespace: &'a str, local: &'a str) -> Self {
        Self {
            namespace: Some(namespace),
            local,
        }
    }
}

/// Resolved name of a node or attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlName {
    pub namespace: Option<String>,
    pub local: String,
}

impl XmlName {
    pub fn matches(&self, tag: &Tag<'_>) -> bool {
        self.local == tag.local && self.namespace.as_deref() == tag.namespace
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlAttribute {
    pub name: XmlName,
    pub value: String,
}

// ============================================================================
// NODES
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlNode {
    pub name: XmlName,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn is(&self, tag: &Tag<'_>) -> bool {
        self.name.matches(tag)
    }

    /// Value of the attribute named `tag`, if present.
    pub fn attribute(&self, tag: &Tag<'_>) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.matches(tag))
            .map(|a| a.value.as_str())
    }

    /// First direct child named `tag`.
    pub fn find(&self, tag: &Tag<'_>) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.is(tag))
    }

    /// All direct children named `tag`, in document order.
    pub fn find_all<'s>(&'s self, tag: Tag<'_>) -> impl Iterator<Item = &'s XmlNode> {
        self.children.iter().filter(move |c| c.is(&tag))
    }

    /// Pre-order walk over this node and everything below it.
    pub fn walk(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// This node and all nodes below it named `tag`, in document order.
    pub fn descendants<'s>(&'s self, tag: Tag<'_>) -> impl Iterator<Item = &'s XmlNode> {
        self.walk().filter(move |n| n.is(&tag))
    }
}

// Subtrees are freed from a heap worklist so nesting depth never reaches the
// call stack.
impl Drop for XmlNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Iterator returned by [`XmlNode::walk`].
pub struct Descendants<'a> {
    stack: Vec<&'a XmlNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

// ============================================================================
// TREE
// ============================================================================

/// A parsed document. The root is absent for documents without any element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlTree {
    root: Option<XmlNode>,
}

impl XmlTree {
    pub fn root(&self) -> Option<&XmlNode> {
        self.root.as_ref()
    }

    pub fn parse_str(input: &str) -> Result<Self, XmlError> {
        Self::parse(input.as_bytes())
    }

    pub fn parse(input: &[u8]) -> Result<Self, XmlError> {
        let mut reader = NsReader::from_reader(input);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut open: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let node = read_node(&reader, e)?;
                    open.push(node);
                }
                Ok(Event::Empty(ref e)) => {
                    let node = read_node(&reader, e)?;
                    attach(&mut open, &mut root, node, reader.buffer_position())?;
                }
                Ok(Event::End(_)) => {
                    let position = reader.buffer_position();
                    let node = open
                        .pop()
                        .ok_or_else(|| XmlError::new(position, "unexpected closing tag"))?;
                    attach(&mut open, &mut root, node, position)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(XmlError::new(reader.error_position(), e.to_string()));
                }
                _ => {}
            }
            buf.clear();
        }

        if let Some(unclosed) = open.last() {
            return Err(XmlError::new(
                reader.buffer_position(),
                format!("unclosed element <{}>", unclosed.name.local),
            ));
        }

        Ok(Self { root })
    }
}

fn attach(
    open: &mut [XmlNode],
    root: &mut Option<XmlNode>,
    node: XmlNode,
    position: u64,
) -> Result<(), XmlError> {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => {
            return Err(XmlError::new(
                position,
                format!("second root element <{}>", node.name.local),
            ));
        }
    }
    Ok(())
}

fn read_node(reader: &NsReader<&[u8]>, e: &BytesStart<'_>) -> Result<XmlNode, XmlError> {
    let position = reader.buffer_position();
    let (ns, local) = reader.resolve_element(e.name());
    let name = XmlName {
        namespace: namespace_uri(ns),
        local: utf8(local.as_ref(), position)?,
    };

    let mut attributes = Vec::new();
    for attr_result in e.attributes() {
        let attr = attr_result
            .map_err(|err| XmlError::new(position, format!("attribute error: {err}")))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (ns, local) = reader.resolve_attribute(attr.key);
        let value = attr
            .unescape_value()
            .map_err(|err| XmlError::new(position, format!("attribute value error: {err}")))?
            .into_owned();
        attributes.push(XmlAttribute {
            name: XmlName {
                namespace: namespace_uri(ns),
                local: utf8(local.as_ref(), position)?,
            },
            value,
        });
    }

    Ok(XmlNode {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn namespace_uri(result: ResolveResult<'_>) -> Option<String> {
    match result {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
        ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
    }
}

fn utf8(bytes: &[u8], position: u64) -> Result<String, XmlError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| XmlError::new(position, format!("invalid UTF-8 in name: {e}")))
}
