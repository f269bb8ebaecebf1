use thiserror::Error;

use crate::document::ParseError;

/// Errors that can occur while generating the preview or the interactive export.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Source document could not be parsed: {0}")]
    Parse(#[from] ParseError),
    #[error("Formatting error during SVG generation: {0}")]
    FormatError(#[from] std::fmt::Error),
    #[error("Document structure does not allow the rewrite: {0}")]
    Structure(String),
}

/// A specialized Result type for SVG generation.
pub type Result<T> = std::result::Result<T, RenderError>;

/// The fail-soft result of a render or export.
///
/// On failure the caller still receives the unmodified input text, so a broken
/// configuration never destroys the working document.
#[derive(Debug)]
pub enum RenderOutcome {
    Rendered(String),
    Failed { original: String, error: RenderError },
}

impl RenderOutcome {
    /// Wraps a render result, falling back to `original` on error.
    pub fn from_result(result: Result<String>, original: &str) -> Self {
        match result {
            Ok(text) => RenderOutcome::Rendered(text),
            Err(error) => RenderOutcome::Failed {
                original: original.to_string(),
                error,
            },
        }
    }

    /// The text to display or download: the rendered document or the original.
    pub fn text(&self) -> &str {
        match self {
            RenderOutcome::Rendered(text) => text,
            RenderOutcome::Failed { original, .. } => original,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            RenderOutcome::Rendered(text) => text,
            RenderOutcome::Failed { original, .. } => original,
        }
    }

    pub fn error(&self) -> Option<&RenderError> {
        match self {
            RenderOutcome::Rendered(_) => None,
            RenderOutcome::Failed { error, .. } => Some(error),
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderOutcome::Rendered(_))
    }

    /// Converts back into a plain `Result`, dropping the fallback text.
    pub fn into_result(self) -> Result<String> {
        match self {
            RenderOutcome::Rendered(text) => Ok(text),
            RenderOutcome::Failed { error, .. } => Err(error),
        }
    }
}
