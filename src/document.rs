//! Arena-backed attributed tree holding a model document.
//!
//! Elements live in a flat `Vec` and refer to each other by [`NodeId`]. Each
//! element is owned by exactly one parent through its content list; removing
//! an element detaches it and leaves the slot unreachable.

use crate::parser::{ParseError, Parser};
use crate::serializer::{self, DEFAULT_PREAMBLE};
use crate::tag::Tag;

/// The fixed chain from the document element down to the model root.
pub const MODEL_PATH: [Tag; 3] = [Tag::RootObject, Tag::Children, Tag::Model];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Element(NodeId),
    /// Raw character data, entity references left as written
    Text(String),
    Comment(String),
    CData(String),
    Instruction(String),
}

#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) tag: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) content: Vec<Content>,
    pub(crate) parent: Option<NodeId>,
}

impl Element {
    pub(crate) fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            content: Vec::new(),
            parent: None,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is(&self, tag: Tag) -> bool {
        self.tag == tag.as_str()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn content(&self) -> &[Content] {
        &self.content
    }

    /// The `Id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attr("Id")
    }

    /// The `Ref` attribute.
    pub fn reference(&self) -> Option<&str> {
        self.attr("Ref")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Node not found: {0}")]
pub struct NodeNotFound(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No identifiers left after o{0}")]
pub struct IdsExhausted(pub u64);

impl NodeNotFound {
    pub fn new(what: impl Into<String>) -> Self {
        Self(what.into())
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    root: NodeId,
    last_id: u64,
}

impl Document {
    /// Parse a document. Everything before the root element is dropped; the
    /// serializer writes its own preamble.
    pub fn load(text: &str) -> Result<Self, ParseError> {
        Parser::new(text)?.parse()
    }

    pub(crate) fn from_elements(elements: Vec<Element>, root: NodeId) -> Self {
        let mut doc = Self {
            elements,
            root,
            last_id: 0,
        };
        doc.last_id = doc
            .descendants(root)
            .filter_map(|id| doc.element(id).id().and_then(numeric_id))
            .max()
            .unwrap_or(0);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn element(&self, id: NodeId) -> &Element {
        &self.elements[id.0]
    }

    fn element_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.elements[id.0]
    }

    pub fn tag(&self, id: NodeId) -> &str {
        &self.element(id).tag
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.element(id).parent
    }

    /// Element children of `id`, in document order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.element(id).content.iter().filter_map(|c| match c {
            Content::Element(child) => Some(*child),
            _ => None,
        })
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.children(id).next().is_some()
    }

    /// Whether `id` is reachable from the document element.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    pub fn try_find_child(&self, node: NodeId, predicate: impl Fn(&Element) -> bool) -> Option<NodeId> {
        self.children(node).find(|&child| predicate(self.element(child)))
    }

    pub fn find_child(
        &self,
        node: NodeId,
        predicate: impl Fn(&Element) -> bool,
    ) -> Result<NodeId, NodeNotFound> {
        self.try_find_child(node, predicate)
            .ok_or_else(|| NodeNotFound::new(format!("matching child of <{}>", self.tag(node))))
    }

    pub fn find_children(&self, node: NodeId, predicate: impl Fn(&Element) -> bool) -> Vec<NodeId> {
        self.children(node)
            .filter(|&child| predicate(self.element(child)))
            .collect()
    }

    /// First child element with the given tag.
    pub fn child(&self, node: NodeId, tag: Tag) -> Option<NodeId> {
        self.try_find_child(node, |el| el.is(tag))
    }

    /// First child with `tag` whose `Id` equals `id`.
    pub fn child_by_id(&self, node: NodeId, tag: Tag, id: &str) -> Option<NodeId> {
        self.try_find_child(node, |el| el.is(tag) && el.id() == Some(id))
    }

    /// Follow `path` from `start`, taking the first matching child at each step.
    pub fn find_node(&self, start: NodeId, path: &[Tag]) -> Result<NodeId, NodeNotFound> {
        let mut current = start;
        for &step in path {
            current = self.child(current, step).ok_or_else(|| {
                NodeNotFound::new(format!("<{}> under <{}>", step, self.tag(current)))
            })?;
        }
        Ok(current)
    }

    pub fn model_root(&self) -> Result<NodeId, NodeNotFound> {
        self.find_node(self.root, &MODEL_PATH)
    }

    /// Follow `path` starting at the model root.
    pub fn find_path(&self, path: &[Tag]) -> Result<NodeId, NodeNotFound> {
        self.find_node(self.model_root()?, path)
    }

    /// The `Ref` attribute of the node at `path` below `start`.
    pub fn reference_at(&self, start: NodeId, path: &[Tag]) -> Option<&str> {
        let node = self.find_node(start, path).ok()?;
        self.element(node).reference()
    }

    pub fn raw_text(&self, id: NodeId) -> String {
        let mut text = String::new();
        for content in &self.element(id).content {
            match content {
                Content::Text(t) | Content::CData(t) => text.push_str(t),
                _ => {}
            }
        }
        text
    }

    /// Text payload with entity references decoded.
    pub fn text(&self, id: NodeId) -> String {
        let mut text = String::new();
        for content in &self.element(id).content {
            match content {
                Content::Text(t) => text.push_str(&decode_entities(t)),
                Content::CData(t) => text.push_str(t),
                _ => {}
            }
        }
        text
    }

    /// Decoded text of the first `tag` child of `node`.
    pub fn field(&self, node: NodeId, tag: Tag) -> Option<String> {
        self.child(node, tag).map(|field| self.text(field))
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.elements.push(Element::new(tag));
        NodeId(self.elements.len() - 1)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        let value = serializer::escape_attr(value);
        let element = self.element_mut(id);
        match element.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => element.attributes.push((name.to_string(), value)),
        }
    }

    /// Append `child` as the last content of `parent`, detaching it first if needed.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.remove(child);
        self.element_mut(child).parent = Some(parent);
        self.element_mut(parent).content.push(Content::Element(child));
    }

    /// Detach `id` from its parent. Surrounding text is left in place.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.element(id).parent else {
            return false;
        };
        self.element_mut(parent)
            .content
            .retain(|c| *c != Content::Element(id));
        self.element_mut(id).parent = None;
        true
    }

    /// Create-or-overwrite the text payload of the `tag` field under `node`.
    /// An empty value leaves the field element empty.
    pub fn set_field(&mut self, node: NodeId, tag: &str, value: &str) -> NodeId {
        let content = if value.is_empty() {
            Vec::new()
        } else {
            vec![Content::Text(serializer::escape_text(value))]
        };
        let field = match self.try_find_child(node, |el| el.tag == tag) {
            Some(field) => field,
            None => {
                let field = self.create_element(tag);
                self.append(node, field);
                field
            }
        };
        self.element_mut(field).content = content;
        field
    }

    /// Allocate the next `o<N>` identifier.
    pub fn next_id(&mut self) -> Result<String, IdsExhausted> {
        self.last_id = self.last_id.checked_add(1).ok_or(IdsExhausted(self.last_id))?;
        Ok(format!("o{}", self.last_id))
    }

    /// Highest numeric identifier handed out or seen at load.
    pub fn last_id(&self) -> u64 {
        self.last_id
    }

    /// Number of attached `Ref="<id>"` attributes.
    pub fn usage_count(&self, id: &str) -> usize {
        self.descendants(self.root)
            .filter(|&node| self.element(node).reference() == Some(id))
            .count()
    }

    /// Pre-order walk of `start` and everything attached below it.
    pub fn descendants(&self, start: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![start],
        }
    }

    pub fn to_xml(&self) -> String {
        serializer::serialize(self, DEFAULT_PREAMBLE)
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.stack.pop()?;
        let children: Vec<NodeId> = self.doc.children(node).collect();
        self.stack.extend(children.into_iter().rev());
        Some(node)
    }
}

fn numeric_id(id: &str) -> Option<u64> {
    id.strip_prefix('o')?.parse().ok()
}

/// Decode the predefined entities and character references. An ampersand
/// that does not start a well-formed reference is kept literally.
pub fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let decoded = rest
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_reference(&rest[1..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}
