pub mod constants;
pub mod converters;
pub mod document;
pub mod errors;
pub mod models;
pub mod roster;
pub mod session;
pub mod store;
pub mod wasm;

pub use converters::{export_interactive_svg, render_preview, RenderError, RenderOutcome};
pub use document::{index_document, ConfigurableElement, DocumentIndex, ParseError};
pub use errors::{EditorError, ImportError, Result};
pub use models::configuration::{Configuration, ConfigurationForm};
pub use roster::{add_bulk_roster, parse_roster_text};
pub use session::EditorSession;
pub use store::ConfigurationStore;
pub use wasm::ZooEditor;
