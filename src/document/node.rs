//! The owned, mutable document tree.
//!
//! Nodes live in an arena owned by [`SvgDocument`] and refer to each other through
//! [`NodeId`] handles. Every node keeps a back-reference to its parent so that
//! structural rewrites (such as wrapping a shape in a new group) can find the
//! original position among its siblings.

use std::collections::HashSet;

use super::{error::Result, parser, writer};

/// Handle to a node inside an [`SvgDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A single attribute in source order. `name` is the qualified name (`xlink:href`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A namespace declared on an element (`xmlns` or `xmlns:prefix`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    /// `None` for the default namespace.
    pub prefix: Option<String>,
    pub uri: String,
}

/// An element node: namespace-stripped tag name plus the prefix needed to write it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgElement {
    pub prefix: Option<String>,
    pub name: String,
    pub namespaces: Vec<NamespaceDecl>,
    pub attributes: Vec<Attribute>,
}

impl SvgElement {
    pub fn new(prefix: Option<&str>, name: &str) -> Self {
        SvgElement {
            prefix: prefix.map(str::to_string),
            name: name.to_string(),
            namespaces: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// The tag as written in the document, e.g. `svg:rect` or `rect`.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Sets an attribute, replacing the value in place when it already exists so
    /// attribute order stays stable.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let position = self.attributes.iter().position(|attr| attr.name == name)?;
        Some(self.attributes.remove(position).value)
    }

    /// The `id` attribute, ignoring empty values.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    /// Appends class tokens that are not already present in the `class` attribute.
    pub fn add_classes(&mut self, classes: &[&str]) {
        let mut tokens: Vec<String> = self
            .attribute("class")
            .map(|current| current.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        for class in classes {
            if !class.is_empty() && !tokens.iter().any(|token| token == class) {
                tokens.push(class.to_string());
            }
        }
        self.set_attribute("class", tokens.join(" "));
    }
}

/// The payload of a tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The invisible document node holding the root element and any top-level comments.
    Document,
    Element(SvgElement),
    Text(String),
    /// Character data written as a CDATA section (used for generated scripts).
    CData(String),
    Comment(String),
    ProcessingInstruction {
        target: String,
        value: Option<String>,
    },
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed SVG document that can be queried and rewritten.
///
/// Cloning a document yields a fully independent copy; converters always work on
/// their own parse so the caller's source text is never affected.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl SvgDocument {
    /// Parses SVG text into a document tree.
    ///
    /// Fails with [`super::ParseError`] when the text is not well-formed XML or when the
    /// root element is not `<svg>`.
    pub fn parse(svg_text: &str) -> Result<Self> {
        parser::parse_document(svg_text)
    }

    /// Creates a document holding only the document node. The root element is set
    /// by the parser once it has been appended.
    pub(crate) fn empty() -> Self {
        SvgDocument {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    pub(crate) fn set_root_element(&mut self, root: NodeId) {
        self.root = root;
    }

    pub fn document_node(&self) -> NodeId {
        NodeId(0)
    }

    /// The root `<svg>` element.
    pub fn root_element(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn element(&self, id: NodeId) -> Option<&SvgElement> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut SvgElement> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Allocates a detached node. Attach it with [`Self::insert_child`] or
    /// [`Self::append_child`].
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Attaches `child` as the last child of `parent`, detaching it first if needed.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let position = self.nodes[parent.0].children.len();
        self.insert_child(parent, position, child);
    }

    /// Attaches `child` at `position` among the children of `parent`. Positions past
    /// the end append.
    pub fn insert_child(&mut self, parent: NodeId, position: usize, child: NodeId) {
        self.detach(child);
        let children = &mut self.nodes[parent.0].children;
        let position = position.min(children.len());
        children.insert(position, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Removes `child` from its parent's children. Returns the position it occupied.
    pub fn detach(&mut self, child: NodeId) -> Option<usize> {
        let parent = self.nodes[child.0].parent.take()?;
        let siblings = &mut self.nodes[parent.0].children;
        let position = siblings.iter().position(|sibling| *sibling == child)?;
        siblings.remove(position);
        Some(position)
    }

    /// Puts `wrapper` at the position `node` occupies among its siblings and moves
    /// `node` inside it as the last child.
    ///
    /// Returns `None` when `node` has no parent (the document node or a detached node).
    pub fn wrap_node(&mut self, node: NodeId, wrapper: NodeId) -> Option<()> {
        let parent = self.nodes[node.0].parent?;
        self.detach(wrapper);
        let position = self.detach(node)?;
        self.insert_child(parent, position, wrapper);
        self.append_child(wrapper, node);
        Some(())
    }

    /// All element nodes below (and including) `start`, in document order.
    pub fn descendant_elements(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if self.element(current).is_some() {
                result.push(current);
            }
            // Push in reverse so the first child is visited next.
            stack.extend(self.nodes[current.0].children.iter().rev());
        }
        result
    }

    /// The first element (document order) whose `id` attribute equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendant_elements(self.document_node())
            .into_iter()
            .find(|node| self.element(*node).and_then(SvgElement::id) == Some(id))
    }

    /// The first element (document order) with the given namespace-stripped tag name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.descendant_elements(self.document_node())
            .into_iter()
            .find(|node| self.element(*node).map(|e| e.name.as_str()) == Some(name))
    }

    /// Every non-empty `id` value present in the document.
    pub fn collect_ids(&self) -> HashSet<String> {
        self.descendant_elements(self.document_node())
            .into_iter()
            .filter_map(|node| self.element(node).and_then(SvgElement::id))
            .map(str::to_string)
            .collect()
    }

    /// Serializes the document back to SVG text.
    pub fn to_svg_string(&self) -> std::result::Result<String, std::fmt::Error> {
        writer::write_document(self)
    }
}
