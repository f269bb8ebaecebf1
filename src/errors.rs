use thiserror::Error;

use crate::document::ParseError;

/// Errors raised while importing a configuration snapshot.
/// On any of these the existing store is left untouched.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The payload is not valid JSON at all.
    #[error("Snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is JSON but lacks a `configurations` object.
    #[error("Snapshot does not contain a `configurations` mapping")]
    MissingConfigurations,

    /// One of the records inside `configurations` could not be read.
    #[error("Configuration for element '{element_id}' is invalid: {source}")]
    InvalidConfiguration {
        element_id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Represents errors that can occur while editing a zoo map annotation session.
#[derive(Error, Debug)]
pub enum EditorError {
    /// The uploaded SVG document could not be parsed.
    #[error("Failed to parse SVG document: {0}")]
    Parse(#[from] ParseError),

    /// A configuration snapshot could not be imported.
    #[error("Failed to import configuration: {0}")]
    Import(#[from] ImportError),

    /// An animal with the same name is already listed in the enclosure.
    #[error("Animal '{name}' is already listed in this enclosure")]
    DuplicateEntry { name: String },

    /// Saving requires an area type to be chosen.
    #[error("An area type must be selected before saving")]
    MissingAreaType,

    /// An edit operation was requested while no element is selected.
    #[error("No element is selected for editing")]
    NoSelection,

    /// An operation needs a loaded SVG document.
    #[error("No SVG document has been loaded")]
    NoDocument,

    /// Form input that does not satisfy the field rules (e.g. a malformed feeding time).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serializing the configuration snapshot failed.
    #[error("Failed to serialize configuration: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A type alias for `Result<T, EditorError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, EditorError>;
