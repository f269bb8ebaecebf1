//! Generates the highlighted preview and the interactive export of an annotated zoo map.
//!
//! Both entry points work on their own parse of the source text, so the caller's document
//! and index are never touched. Each comes in two flavours:
//! *   `try_*` returns a plain [`Result`] for callers that want to propagate errors.
//! *   The fail-soft variant returns a [`RenderOutcome`] that carries the original text
//!     alongside the error, which is what the editor displays.
//!
//! Elements are located with the same identity rules as the document index, so
//! configurations keyed on fallback ids (`element_<n>`) resolve on a fresh parse.

mod error;
mod export;
mod preview;
mod styles;

pub use error::{RenderError, RenderOutcome, Result};
pub use export::{export_interactive_svg, try_export_interactive_svg};
pub use preview::{render_preview, try_render_preview};
pub use styles::{export_stylesheet, interaction_script, js_string_literal, preview_stylesheet};

use crate::document::{NodeId, NodeKind, SvgDocument, SvgElement};

/// Creates an element named `name` holding a single `content` node, using the root
/// element's prefix so it lands in the SVG namespace of prefixed documents. The element
/// is returned detached.
fn create_block(document: &mut SvgDocument, name: &str, content: NodeKind) -> NodeId {
    let prefix = document
        .element(document.root_element())
        .and_then(|root| root.prefix.clone());
    let block = document.create_node(NodeKind::Element(SvgElement::new(prefix.as_deref(), name)));
    let inner = document.create_node(content);
    document.append_child(block, inner);
    block
}
