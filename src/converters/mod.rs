//! Producers of the artifacts derived from a source map and its configuration store.

pub mod svg;

pub use svg::{
    export_interactive_svg, render_preview, try_export_interactive_svg, try_render_preview,
    RenderError, RenderOutcome,
};
