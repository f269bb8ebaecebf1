use log::{debug, warn};

use super::{
    create_block,
    error::{RenderOutcome, Result},
    styles::preview_stylesheet,
};
use crate::{
    constants::CONFIGURED_CLASS,
    document::{ElementLookup, NodeKind, SvgDocument},
    store::ConfigurationStore,
};

/// Renders the highlighted preview of `svg_text`.
///
/// Inserts the preview stylesheet (into the first `<defs>` if there is one, otherwise as
/// the first child of the root) and adds `configured-element <areaType>` to the `class`
/// of every configured element. Element nesting is left unchanged and records without an
/// area type are skipped.
///
/// # Arguments
/// * `svg_text` - The source SVG, as uploaded.
/// * `store` - The configurations to highlight.
///
/// # Returns
/// The preview text, or a [`super::RenderError`] if the source cannot be parsed or written.
pub fn try_render_preview(svg_text: &str, store: &ConfigurationStore) -> Result<String> {
    let mut document = SvgDocument::parse(svg_text)?;
    let mut lookup = ElementLookup::new(&document);

    let style = create_block(&mut document, "style", NodeKind::Text(preview_stylesheet()?));
    let container = document
        .find_by_name("defs")
        .unwrap_or_else(|| document.root_element());
    document.insert_child(container, 0, style);

    for (id, config) in store.iter() {
        let Some(area_type) = config.area_type() else {
            continue;
        };
        let Some(node) = lookup.resolve(&mut document, id) else {
            debug!("[try_render_preview] No element with id '{}', skipping", id);
            continue;
        };
        if let Some(element) = document.element_mut(node) {
            element.add_classes(&[CONFIGURED_CLASS, area_type.as_str()]);
        }
    }

    Ok(document.to_svg_string()?)
}

/// Fail-soft preview: on error the outcome carries the unmodified `svg_text`.
pub fn render_preview(svg_text: &str, store: &ConfigurationStore) -> RenderOutcome {
    let result = try_render_preview(svg_text, store);
    if let Err(e) = &result {
        warn!("[render_preview] Returning the original document: {}", e);
    }
    RenderOutcome::from_result(result, svg_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::svg::RenderError;
    use crate::models::area::AreaKind;
    use crate::models::configuration::{AreaConfig, Configuration};

    fn water(id: &str) -> Configuration {
        Configuration::Area(AreaConfig {
            kind: AreaKind::Water,
            element_id: id.to_string(),
            area_name: "Jezero".to_string(),
            area_description: String::new(),
        })
    }

    #[test]
    fn test_style_goes_into_defs() {
        let text = r#"<svg xmlns="http://www.w3.org/2000/svg"><defs><linearGradient id="grad"/></defs><rect id="lake" class="zone"/></svg>"#;
        let mut store = ConfigurationStore::new();
        store.set("lake", water("lake"));

        let preview = try_render_preview(text, &store).expect("preview renders");

        assert!(
            preview.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg"><defs><style>"#),
            "style should be the first child of defs: {}",
            preview
        );
        assert!(preview.contains(r#"</style><linearGradient id="grad"/></defs>"#));
        assert!(preview.contains(r#"<rect id="lake" class="zone configured-element water"/>"#));
        assert_eq!(preview.matches("<svg").count(), 1, "root tag must not be duplicated");
    }

    #[test]
    fn test_style_goes_after_root_without_defs() {
        let text = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10"><rect id="lake"/></svg>"#;
        let preview = try_render_preview(text, &ConfigurationStore::new()).expect("preview renders");
        assert!(preview.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="10"><style>"#));
        assert!(preview.ends_with(r#"</style><rect id="lake"/></svg>"#), "no class on an empty store");
    }

    #[test]
    fn test_ids_are_matched_exactly() {
        let text = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect id="lake"/><rect id="lake2"/></svg>"#;
        let mut store = ConfigurationStore::new();
        store.set("lake", water("lake"));
        let preview = try_render_preview(text, &store).expect("preview renders");
        assert!(preview.contains(r#"<rect id="lake2"/>"#), "prefix collision must not match");
    }

    #[test]
    fn test_fallback_ids_and_unassigned_records() {
        let text = r#"<svg xmlns="http://www.w3.org/2000/svg"><circle r="1"/><rect/></svg>"#;
        let mut store = ConfigurationStore::new();
        store.set("element_1", water("element_1"));
        store.set(
            "element_0",
            Configuration::Unassigned { element_id: "element_0".to_string() },
        );
        store.set("gone", water("gone"));

        let preview = try_render_preview(text, &store).expect("preview renders");

        assert!(preview.contains(r#"<circle r="1"/>"#), "unassigned records are skipped");
        assert!(preview.contains(r#"<rect id="element_1" class="configured-element water"/>"#));
    }

    #[test]
    fn test_prefixed_root_gets_prefixed_style() {
        let text = r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg"><svg:rect id="lake"/></svg:svg>"#;
        let preview = try_render_preview(text, &ConfigurationStore::new()).expect("preview renders");
        assert!(preview.contains("<svg:style>"));
    }

    #[test]
    fn test_failure_returns_original_text() {
        let text = "<svg><g></svg>";
        let outcome = render_preview(text, &ConfigurationStore::new());
        assert_eq!(outcome.text(), text);
        assert!(matches!(outcome.error(), Some(RenderError::Parse(_))));
    }
}
