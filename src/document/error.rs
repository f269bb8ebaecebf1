use thiserror::Error;

/// Errors that can occur while reading an uploaded SVG document.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Document is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("Root element must be <svg>, found <{root}>")]
    NotSvg { root: String },
}

/// A specialized Result type for document parsing.
pub type Result<T> = std::result::Result<T, ParseError>;
