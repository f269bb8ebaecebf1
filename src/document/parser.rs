//! Builds an owned [`SvgDocument`] from text using `roxmltree`.

use roxmltree::NodeType;

use super::{
    error::{ParseError, Result},
    node::{Attribute, NamespaceDecl, NodeId, NodeKind, SvgDocument, SvgElement},
};
use crate::constants::XML_NAMESPACE;

pub(crate) fn parse_document(text: &str) -> Result<SvgDocument> {
    // Exported maps often carry a DOCTYPE; entities declared there are expanded by roxmltree.
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let xml = roxmltree::Document::parse_with_options(text, options)?;

    let root_name = xml.root_element().tag_name().name();
    if root_name != "svg" {
        return Err(ParseError::NotSvg {
            root: root_name.to_string(),
        });
    }

    let mut document = SvgDocument::empty();
    let document_node = document.document_node();
    for child in xml.root().children() {
        let copied = copy_node(&mut document, document_node, child);
        if child == xml.root_element() {
            if let Some(root) = copied {
                document.set_root_element(root);
            }
        }
    }
    Ok(document)
}

fn copy_node(
    document: &mut SvgDocument,
    parent: NodeId,
    node: roxmltree::Node<'_, '_>,
) -> Option<NodeId> {
    let kind = match node.node_type() {
        NodeType::Root => return None,
        NodeType::Element => NodeKind::Element(convert_element(node)),
        NodeType::Text => NodeKind::Text(node.text().unwrap_or_default().to_string()),
        NodeType::Comment => NodeKind::Comment(node.text().unwrap_or_default().to_string()),
        NodeType::PI => {
            let pi = node.pi()?;
            NodeKind::ProcessingInstruction {
                target: pi.target.to_string(),
                value: pi.value.map(str::to_string),
            }
        }
    };

    let id = document.create_node(kind);
    document.append_child(parent, id);
    for child in node.children() {
        copy_node(document, id, child);
    }
    Some(id)
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> SvgElement {
    let tag = node.tag_name();
    let prefix = tag
        .namespace()
        .and_then(|uri| resolve_prefix(node, uri, true));
    let mut element = SvgElement::new(prefix.as_deref(), tag.name());
    element.namespaces = declared_namespaces(node);

    for attr in node.attributes() {
        let name = match attr
            .namespace()
            .and_then(|uri| resolve_prefix(node, uri, false))
        {
            Some(prefix) => format!("{}:{}", prefix, attr.name()),
            None => attr.name().to_string(),
        };
        element.attributes.push(Attribute {
            name,
            value: attr.value().to_string(),
        });
    }
    element
}

/// Finds the prefix to write for a namespace URI. Element names prefer the default
/// namespace when it matches; attributes never use the default namespace.
fn resolve_prefix(node: roxmltree::Node<'_, '_>, uri: &str, allow_default: bool) -> Option<String> {
    if uri == XML_NAMESPACE {
        return Some("xml".to_string());
    }
    if allow_default
        && node
            .namespaces()
            .any(|ns| ns.name().is_none() && ns.uri() == uri)
    {
        return None;
    }
    node.namespaces()
        .find(|ns| ns.name().is_some() && ns.uri() == uri)
        .and_then(|ns| ns.name())
        .map(str::to_string)
}

/// Namespaces in scope on `node` that were not already in scope on its parent,
/// i.e. the `xmlns` declarations written on this element.
fn declared_namespaces(node: roxmltree::Node<'_, '_>) -> Vec<NamespaceDecl> {
    let inherited: Vec<(Option<String>, String)> = node
        .parent_element()
        .map(|parent| {
            parent
                .namespaces()
                .map(|ns| (ns.name().map(str::to_string), ns.uri().to_string()))
                .collect()
        })
        .unwrap_or_default();

    node.namespaces()
        .filter(|ns| ns.uri() != XML_NAMESPACE)
        .map(|ns| (ns.name().map(str::to_string), ns.uri().to_string()))
        .filter(|declared| !inherited.contains(declared))
        .map(|(prefix, uri)| NamespaceDecl { prefix, uri })
        .collect()
}
