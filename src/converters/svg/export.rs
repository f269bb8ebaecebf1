use log::{debug, info, warn};

use super::{
    create_block,
    error::{RenderError, RenderOutcome, Result},
    styles::{export_stylesheet, interaction_script, js_string_literal},
};
use crate::{
    constants::{CONFIGURED_CLASS, DEFAULT_ENCLOSURE_NAME, ENCLOSURE_CLASS, GROUP_ID_SUFFIX},
    document::{ElementLookup, ElementTag, NodeId, NodeKind, SvgDocument, SvgElement},
    models::{
        area::AreaType,
        configuration::{Configuration, EnclosureConfig, FacilityConfig},
    },
    store::ConfigurationStore,
};

/// Generates the self-contained interactive SVG.
///
/// The export stylesheet and the interaction script become the first two children of
/// the root. Every configuration whose element exists in the document is then applied:
/// *   All configured elements get `class="configured-element <areaType>"`.
/// *   Enclosures are moved into a `<g>` when they are not one already, and the group
///     receives the enclosure class, the `data-*` payload and the `selectEnclosure` handler.
/// *   Facilities receive their type, name and the `showFacility` handler.
///
/// Configurations whose element is missing are skipped; they usually belong to an older
/// revision of the map. The output is fully determined by the inputs.
///
/// # Arguments
/// * `svg_text` - The source SVG, as uploaded.
/// * `store` - The configurations to apply, in store order.
pub fn try_export_interactive_svg(svg_text: &str, store: &ConfigurationStore) -> Result<String> {
    let mut document = SvgDocument::parse(svg_text)?;
    let mut lookup = ElementLookup::new(&document);

    let root = document.root_element();
    let style = create_block(&mut document, "style", NodeKind::Text(export_stylesheet()?));
    let script = create_block(&mut document, "script", NodeKind::CData(interaction_script()));
    document.insert_child(root, 0, style);
    document.insert_child(root, 1, script);

    let mut applied = 0;
    for (id, config) in store.iter() {
        let Some(area_type) = config.area_type() else {
            debug!("[try_export_interactive_svg] '{}' has no area type, skipping", id);
            continue;
        };
        let Some(node) = lookup.resolve(&mut document, id) else {
            debug!("[try_export_interactive_svg] No element with id '{}', skipping", id);
            continue;
        };

        let class = format!("{} {}", CONFIGURED_CLASS, area_type.as_str());
        if let Some(element) = document.element_mut(node) {
            element.set_attribute("class", class.as_str());
        }

        match config {
            Configuration::Enclosure(enclosure) => {
                let group = ensure_group(&mut document, &mut lookup, node, id)?;
                if let Some(element) = document.element_mut(group) {
                    annotate_enclosure(element, id, area_type, enclosure);
                }
            }
            Configuration::Facility(facility) => {
                if let Some(element) = document.element_mut(node) {
                    annotate_facility(element, facility);
                }
            }
            Configuration::Area(_) | Configuration::Unassigned { .. } => {}
        }
        applied += 1;
    }

    info!(
        "[try_export_interactive_svg] Applied {} of {} configurations",
        applied,
        store.len()
    );
    Ok(document.to_svg_string()?)
}

/// Fail-soft export: on error the outcome carries the unmodified `svg_text`.
pub fn export_interactive_svg(svg_text: &str, store: &ConfigurationStore) -> RenderOutcome {
    let result = try_export_interactive_svg(svg_text, store);
    if let Err(e) = &result {
        warn!("[export_interactive_svg] Returning the original document: {}", e);
    }
    RenderOutcome::from_result(result, svg_text)
}

/// Returns `node` itself when it is a `<g>`, otherwise wraps it in a new group placed at
/// its position among the original siblings and returns the group.
fn ensure_group(
    document: &mut SvgDocument,
    lookup: &mut ElementLookup,
    node: NodeId,
    id: &str,
) -> Result<NodeId> {
    let prefix = match document.element(node) {
        Some(element) if ElementTag::from_local_name(&element.name) == Some(ElementTag::Group) => {
            return Ok(node);
        }
        Some(element) => element.prefix.clone(),
        None => {
            return Err(RenderError::Structure(format!(
                "Node for '{}' is not an element",
                id
            )))
        }
    };

    let mut group = SvgElement::new(prefix.as_deref(), ElementTag::Group.as_str());
    group.set_attribute("id", lookup.reserve_id(format!("{}{}", id, GROUP_ID_SUFFIX)));
    let wrapper = document.create_node(NodeKind::Element(group));
    document.wrap_node(node, wrapper).ok_or_else(|| {
        RenderError::Structure(format!("Element '{}' has no parent to be wrapped in", id))
    })?;
    debug!("[ensure_group] Wrapped '{}' in a new group", id);
    Ok(wrapper)
}

fn annotate_enclosure(
    element: &mut SvgElement,
    id: &str,
    area_type: AreaType,
    enclosure: &EnclosureConfig,
) {
    element.set_attribute(
        "class",
        format!("{} {} {}", ENCLOSURE_CLASS, CONFIGURED_CLASS, area_type.as_str()),
    );
    let name = match enclosure.enclosure_name.trim() {
        "" => DEFAULT_ENCLOSURE_NAME,
        name => name,
    };
    element.set_attribute("data-enclosure", name);
    element.set_attribute("data-info", enclosure.enclosure_description.as_str());
    element.set_attribute("data-zone", enclosure.zone.as_str());
    element.set_attribute("onclick", format!("selectEnclosure({})", js_string_literal(id)));

    if !enclosure.animals.is_empty() {
        element.set_attribute("data-animals", enclosure.animals.joined_names());
        element.set_attribute("data-animal-emojis", enclosure.animals.concatenated_emojis());
        element.set_attribute("data-animal-count", enclosure.animals.len().to_string());
    }
    if !enclosure.feeding_times.is_empty() {
        element.set_attribute("data-feeding-times", enclosure.feeding_times.join(", "));
    }
}

fn annotate_facility(element: &mut SvgElement, facility: &FacilityConfig) {
    element.set_attribute("data-facility-type", facility.facility_type.as_str());
    element.set_attribute("data-facility-name", facility.facility_name.as_str());
    element.set_attribute("onclick", "showFacility(this)");
}
