//! Parsing, indexing and serialization of the SVG floor plan.
//!
//! The document is parsed with `roxmltree` into an owned arena tree ([`SvgDocument`])
//! that supports the structural rewrites the converters need. Namespace prefixes are
//! stripped for tag matching but kept for writing the document back out.

mod error;
mod index;
mod node;
mod parser;
mod writer;

pub use error::{ParseError, Result};
pub use index::{
    identify_elements, index_document, ConfigurableElement, DocumentIndex, ElementTag,
    IdentifiedElement,
};
pub use node::{Attribute, NamespaceDecl, NodeId, NodeKind, SvgDocument, SvgElement};

pub(crate) use index::ElementLookup;
