//! Discovers configurable elements and assigns them stable identities.
//!
//! A node is configurable when its namespace-stripped tag is one of `g`, `path`,
//! `polygon`, `circle`, `ellipse` or `rect`. Its identity is the existing `id` attribute
//! when present, otherwise a positional fallback `element_<n>` where `n` counts the
//! configurable elements seen before it in document order.
//!
//! Fallback ids are only as stable as the document itself: if the file is edited and
//! re-uploaded, configurations keyed on fallback ids may point at different shapes.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{
    error::Result,
    node::{NodeId, SvgDocument, SvgElement},
};
use crate::{constants::FALLBACK_ID_PREFIX, store::ConfigurationStore};

/// Tag of a configurable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementTag {
    #[serde(rename = "g")]
    Group,
    Path,
    Polygon,
    Circle,
    Ellipse,
    Rect,
}

impl ElementTag {
    /// Maps a namespace-stripped tag name to a configurable tag.
    pub fn from_local_name(name: &str) -> Option<Self> {
        match name {
            "g" => Some(ElementTag::Group),
            "path" => Some(ElementTag::Path),
            "polygon" => Some(ElementTag::Polygon),
            "circle" => Some(ElementTag::Circle),
            "ellipse" => Some(ElementTag::Ellipse),
            "rect" => Some(ElementTag::Rect),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementTag::Group => "g",
            ElementTag::Path => "path",
            ElementTag::Polygon => "polygon",
            ElementTag::Circle => "circle",
            ElementTag::Ellipse => "ellipse",
            ElementTag::Rect => "rect",
        }
    }
}

/// An entry of the element list handed to the selection UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurableElement {
    pub id: String,
    pub tag: ElementTag,
    /// True iff `id` was a key of the store when the flag was last computed.
    pub configured: bool,
}

/// A configurable node together with the identity assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedElement {
    pub node: NodeId,
    pub id: String,
    pub tag: ElementTag,
    /// True when `id` is a fallback that is not yet written on the node.
    pub synthesized: bool,
}

/// Identities of all configurable elements plus every id in use in the document.
struct Identification {
    elements: Vec<IdentifiedElement>,
    taken: HashSet<String>,
}

fn identify(document: &SvgDocument) -> Identification {
    let mut taken = document.collect_ids();
    let mut elements: Vec<IdentifiedElement> = Vec::new();

    for node in document.descendant_elements(document.document_node()) {
        let Some(element) = document.element(node) else {
            continue;
        };
        let Some(tag) = ElementTag::from_local_name(&element.name) else {
            continue;
        };
        let (id, synthesized) = match element.id() {
            Some(existing) => (existing.to_string(), false),
            None => {
                let base = format!("{}{}", FALLBACK_ID_PREFIX, elements.len());
                (reserve_unique_id(&mut taken, base), true)
            }
        };
        elements.push(IdentifiedElement {
            node,
            id,
            tag,
            synthesized,
        });
    }

    Identification { elements, taken }
}

/// Returns `base` if it is free, otherwise the first free `base_<k>` for k = 1, 2, ...
/// The returned id is recorded in `taken`.
fn reserve_unique_id(taken: &mut HashSet<String>, base: String) -> String {
    if taken.insert(base.clone()) {
        return base;
    }
    let mut suffix = 1;
    loop {
        let candidate = format!("{}_{}", base, suffix);
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Computes the identity of every configurable element without modifying the document.
pub fn identify_elements(document: &SvgDocument) -> Vec<IdentifiedElement> {
    identify(document).elements
}

/// Resolves element ids against a document that was parsed independently of the index.
///
/// Uses the same identity rules as [`DocumentIndex`], so fallback ids computed by the
/// index resolve to the same nodes. A fallback id is written onto its node only when it
/// is resolved, leaving untouched elements byte-identical.
pub(crate) struct ElementLookup {
    by_id: HashMap<String, IdentifiedElement>,
    taken: HashSet<String>,
}

impl ElementLookup {
    pub(crate) fn new(document: &SvgDocument) -> Self {
        let Identification { elements, taken } = identify(document);
        let mut by_id = HashMap::with_capacity(elements.len());
        for element in elements {
            // Duplicate ids in the source resolve to the first occurrence.
            by_id.entry(element.id.clone()).or_insert(element);
        }
        ElementLookup { by_id, taken }
    }

    pub(crate) fn resolve(&mut self, document: &mut SvgDocument, id: &str) -> Option<NodeId> {
        let identified = self.by_id.get_mut(id)?;
        if identified.synthesized {
            if let Some(element) = document.element_mut(identified.node) {
                element.set_attribute("id", identified.id.clone());
            }
            identified.synthesized = false;
        }
        Some(identified.node)
    }

    /// Reserves a new document-unique id derived from `base`.
    pub(crate) fn reserve_id(&mut self, base: String) -> String {
        reserve_unique_id(&mut self.taken, base)
    }
}

/// The parsed document of an editing session and its configurable elements.
#[derive(Debug, Clone)]
pub struct DocumentIndex {
    document: SvgDocument,
    elements: Vec<ConfigurableElement>,
}

impl DocumentIndex {
    /// Parses `svg_text`, assigns ids to every configurable element (writing fallback
    /// ids onto the tree) and computes each element's `configured` flag against `store`.
    ///
    /// # Arguments
    /// * `svg_text` - The raw SVG document.
    /// * `store` - The session's configuration store, used only for the membership test.
    ///
    /// # Returns
    /// The index, or a [`super::ParseError`] if the text is not a well-formed SVG document.
    pub fn build(svg_text: &str, store: &ConfigurationStore) -> Result<Self> {
        let mut document = SvgDocument::parse(svg_text)?;
        let identified = identify_elements(&document);

        let mut elements = Vec::with_capacity(identified.len());
        for item in identified {
            if item.synthesized {
                if let Some(element) = document.element_mut(item.node) {
                    element.set_attribute("id", item.id.clone());
                }
            }
            elements.push(ConfigurableElement {
                configured: store.contains(&item.id),
                id: item.id,
                tag: item.tag,
            });
        }

        Ok(DocumentIndex { document, elements })
    }

    /// The indexed tree, with fallback ids written onto their nodes.
    pub fn document(&self) -> &SvgDocument {
        &self.document
    }

    pub fn elements(&self) -> &[ConfigurableElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ConfigurableElement> {
        self.elements.iter().find(|element| element.id == id)
    }

    /// The element node carrying `id` in the indexed tree.
    pub fn node(&self, id: &str) -> Option<&SvgElement> {
        self.document
            .find_by_id(id)
            .and_then(|node| self.document.element(node))
    }

    /// Recomputes every `configured` flag. Call after any store mutation.
    pub fn refresh_configured(&mut self, store: &ConfigurationStore) {
        for element in &mut self.elements {
            element.configured = store.contains(&element.id);
        }
    }

    /// Elements that are not configured yet, in document order.
    pub fn unconfigured(&self) -> impl Iterator<Item = &ConfigurableElement> {
        self.elements.iter().filter(|element| !element.configured)
    }

    pub fn configured_count(&self) -> usize {
        self.elements.iter().filter(|element| element.configured).count()
    }
}

/// Indexes `svg_text` against `store`. See [`DocumentIndex::build`].
pub fn index_document(svg_text: &str, store: &ConfigurationStore) -> Result<DocumentIndex> {
    DocumentIndex::build(svg_text, store)
}
