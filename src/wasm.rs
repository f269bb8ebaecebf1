//! Browser bindings for the editor UI.
//!
//! Structured values cross the boundary as JSON strings; errors become `JsValue` strings
//! carrying the error message.

use chrono::Local;
use wasm_bindgen::prelude::*;

use crate::{
    constants::{JSON_MIME_TYPE, SVG_MIME_TYPE},
    models::area::{AreaType, FacilityType},
    models::configuration::ConfigurationForm,
    session::{json_export_file_name, svg_export_file_name, EditorSession},
};

fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Installs the panic hook that forwards Rust panics to `console.error`.
#[wasm_bindgen(js_name = setPanicHook)]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Routes `log` output to the browser console.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() -> Result<(), JsValue> {
    console_log::init_with_level(log::Level::Info).map_err(to_js_error)
}

/// One annotation session as seen from JavaScript.
#[wasm_bindgen]
#[derive(Default)]
pub struct ZooEditor {
    session: EditorSession,
}

#[wasm_bindgen]
impl ZooEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ZooEditor {
        ZooEditor::default()
    }

    /// Returns the number of configurable elements.
    #[wasm_bindgen(js_name = loadSvg)]
    pub fn load_svg(&mut self, svg_text: String) -> Result<usize, JsValue> {
        self.session.load_svg(svg_text).map_err(to_js_error)
    }

    /// `[{"id": .., "tag": .., "configured": ..}, ...]`
    #[wasm_bindgen(js_name = elementsJson)]
    pub fn elements_json(&self) -> Result<String, JsValue> {
        let elements = self.session.elements().map_err(to_js_error)?;
        serde_json::to_string(elements).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = elementLabel)]
    pub fn element_label(&self, id: &str) -> String {
        self.session.element_label(id)
    }

    /// Opens an element for editing and returns the pre-filled form as JSON.
    pub fn select(&mut self, id: &str) -> Result<String, JsValue> {
        let form = self.session.select(id).map_err(to_js_error)?;
        serde_json::to_string(&form).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = animalsJson)]
    pub fn animals_json(&self) -> Result<String, JsValue> {
        match self.session.edit_animals() {
            Some(animals) => serde_json::to_string(animals).map_err(to_js_error),
            None => Ok("[]".to_string()),
        }
    }

    #[wasm_bindgen(js_name = addAnimal)]
    pub fn add_animal(&mut self, name: &str, emoji: &str) -> Result<(), JsValue> {
        self.session.add_animal(name, emoji).map(|_| ()).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = addPresetAnimal)]
    pub fn add_preset_animal(&mut self, emoji: &str) -> Result<(), JsValue> {
        self.session.add_preset_animal(emoji).map(|_| ()).map_err(to_js_error)
    }

    /// Returns the number of animals actually added.
    #[wasm_bindgen(js_name = addBulkAnimals)]
    pub fn add_bulk_animals(&mut self, text: &str) -> Result<usize, JsValue> {
        self.session
            .add_bulk_animals(text)
            .map(|report| report.added_count())
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = removeAnimal)]
    pub fn remove_animal(&mut self, index: usize) -> Result<bool, JsValue> {
        self.session
            .remove_animal(index)
            .map(|removed| removed.is_some())
            .map_err(to_js_error)
    }

    /// Saves the selected element from the form JSON.
    pub fn save(&mut self, form_json: &str) -> Result<(), JsValue> {
        let form: ConfigurationForm = serde_json::from_str(form_json).map_err(to_js_error)?;
        self.session.save(&form).map(|_| ()).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = deleteConfiguration)]
    pub fn delete_configuration(&mut self, id: &str) -> bool {
        self.session.delete(id).is_some()
    }

    #[wasm_bindgen(js_name = importSnapshot)]
    pub fn import_snapshot(&mut self, json: &str) -> Result<usize, JsValue> {
        self.session.import_snapshot(json).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = exportSnapshot)]
    pub fn export_snapshot(&self) -> Result<String, JsValue> {
        self.session.export_snapshot().map_err(to_js_error)
    }

    /// The preview text. Rendering errors are logged and the original text returned.
    #[wasm_bindgen(js_name = renderPreview)]
    pub fn render_preview(&self) -> Result<String, JsValue> {
        self.session
            .render_preview()
            .map(|outcome| outcome.into_text())
            .map_err(to_js_error)
    }

    /// Fails when the export could not be generated, so the UI never offers the
    /// unmodified map as the interactive download.
    #[wasm_bindgen(js_name = exportSvg)]
    pub fn export_svg(&self) -> Result<String, JsValue> {
        self.session
            .export_svg()
            .map_err(to_js_error)?
            .into_result()
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = progressPercent)]
    pub fn progress_percent(&self) -> u8 {
        self.session.progress().percent()
    }

    /// `[{"value": "enclosure-pedestrian", "label": "🚶 Výběh - pěší část"}, ...]`
    #[wasm_bindgen(js_name = areaTypesJson)]
    pub fn area_types_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&AreaType::options()).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = facilityTypesJson)]
    pub fn facility_types_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&FacilityType::options()).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = svgFileName)]
    pub fn svg_file_name(&self) -> String {
        svg_export_file_name(&Local::now().naive_local())
    }

    #[wasm_bindgen(js_name = svgMimeType)]
    pub fn svg_mime_type(&self) -> String {
        SVG_MIME_TYPE.to_string()
    }

    #[wasm_bindgen(js_name = jsonMimeType)]
    pub fn json_mime_type(&self) -> String {
        JSON_MIME_TYPE.to_string()
    }

    #[wasm_bindgen(js_name = jsonFileName)]
    pub fn json_file_name(&self) -> String {
        json_export_file_name(&Local::now().naive_local())
    }
}
