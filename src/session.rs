//! The editing session that ties the document index, the configuration store and the
//! in-progress edit of one element together.
//!
//! The hosting UI owns one [`EditorSession`] per edited map and drives it with explicit
//! calls; nothing here is global. Every operation runs to completion before the next.

use chrono::NaiveDateTime;
use log::{debug, info};

use crate::{
    constants::{JSON_EXPORT_FILE_PATTERN, SVG_EXPORT_FILE_PATTERN},
    converters::{export_interactive_svg, render_preview, RenderOutcome},
    document::{ConfigurableElement, DocumentIndex},
    errors::{EditorError, Result},
    models::{
        animal::{AnimalEntry, AnimalRoster},
        area::UNSET_AREA_ICON,
        configuration::{Configuration, ConfigurationForm},
    },
    roster::BulkAddReport,
    store::ConfigurationStore,
};

/// The element currently open in the configuration form.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EditBuffer {
    element_id: String,
    /// Animals edited so far; carried into the record on save.
    animals: AnimalRoster,
}

/// Configured versus total element counts for the progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub configured: usize,
    pub total: usize,
}

impl Progress {
    /// Fraction configured in `0.0..=1.0`; an empty map counts as nothing configured.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.configured as f64 / self.total as f64).min(1.0)
    }

    pub fn percent(&self) -> u8 {
        (self.ratio() * 100.0).round() as u8
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    source: Option<String>,
    index: Option<DocumentIndex>,
    store: ConfigurationStore,
    edit: Option<EditBuffer>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads (or replaces) the map being annotated.
    ///
    /// Existing configurations are kept; their `configured` flags are recomputed against
    /// the new document. On a parse error the session is left as it was.
    ///
    /// # Returns
    /// The number of configurable elements found.
    pub fn load_svg(&mut self, svg_text: impl Into<String>) -> Result<usize> {
        let svg_text = svg_text.into();
        let index = DocumentIndex::build(&svg_text, &self.store)?;
        info!(
            "[load_svg] Indexed {} configurable elements ({} already configured)",
            index.len(),
            index.configured_count()
        );
        let count = index.len();
        self.source = Some(svg_text);
        self.index = Some(index);
        self.edit = None;
        Ok(count)
    }

    /// The SVG text as uploaded.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn index(&self) -> Option<&DocumentIndex> {
        self.index.as_ref()
    }

    pub fn store(&self) -> &ConfigurationStore {
        &self.store
    }

    fn require_index(&self) -> Result<&DocumentIndex> {
        self.index.as_ref().ok_or(EditorError::NoDocument)
    }

    /// Configurable elements in document order.
    pub fn elements(&self) -> Result<&[ConfigurableElement]> {
        Ok(self.require_index()?.elements())
    }

    /// Elements without a configuration yet.
    pub fn unconfigured_elements(&self) -> Result<Vec<&ConfigurableElement>> {
        Ok(self.require_index()?.unconfigured().collect())
    }

    /// The name shown for an element: the configured name, else the element id.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.store
            .get(id)
            .and_then(Configuration::display_name)
            .unwrap_or(id)
    }

    /// List label of an element: area type icon followed by its display name.
    pub fn element_label(&self, id: &str) -> String {
        let icon = self
            .store
            .get(id)
            .and_then(Configuration::area_type)
            .map(|area_type| area_type.icon())
            .unwrap_or(UNSET_AREA_ICON);
        format!("{} {}", icon, self.display_name(id))
    }

    /// Opens `id` for editing and returns the form pre-filled from its record.
    ///
    /// The record's animals are copied into the edit buffer; an element without a record
    /// starts with an empty form.
    pub fn select(&mut self, id: &str) -> Result<ConfigurationForm> {
        if self.require_index()?.get(id).is_none() {
            return Err(EditorError::InvalidInput(format!(
                "Element '{}' is not configurable in this map",
                id
            )));
        }
        let existing = self.store.get(id);
        let form = existing
            .map(ConfigurationForm::from_configuration)
            .unwrap_or_default();
        let animals = existing
            .and_then(Configuration::animals)
            .cloned()
            .unwrap_or_default();
        debug!("[select] Editing '{}' with {} animals", id, animals.len());
        self.edit = Some(EditBuffer {
            element_id: id.to_string(),
            animals,
        });
        Ok(form)
    }

    /// The id of the element open for editing.
    pub fn selected(&self) -> Option<&str> {
        self.edit.as_ref().map(|edit| edit.element_id.as_str())
    }

    /// The animals of the element open for editing.
    pub fn edit_animals(&self) -> Option<&AnimalRoster> {
        self.edit.as_ref().map(|edit| &edit.animals)
    }

    fn edit_buffer(&mut self) -> Result<&mut EditBuffer> {
        self.edit.as_mut().ok_or(EditorError::NoSelection)
    }

    pub fn add_animal(&mut self, name: &str, emoji: &str) -> Result<&AnimalEntry> {
        self.edit_buffer()?.animals.add(name, emoji)
    }

    pub fn add_preset_animal(&mut self, emoji: &str) -> Result<&AnimalEntry> {
        self.edit_buffer()?.animals.add_preset(emoji)
    }

    /// Adds every animal of a bulk text block to the edit buffer, skipping names already
    /// listed.
    pub fn add_bulk_animals(&mut self, text: &str) -> Result<BulkAddReport> {
        let report = self.edit_buffer()?.animals.add_bulk(text);
        info!(
            "[add_bulk_animals] Added {} animals, skipped {} duplicates",
            report.added_count(),
            report.duplicates.len()
        );
        Ok(report)
    }

    pub fn remove_animal(&mut self, index: usize) -> Result<Option<AnimalEntry>> {
        Ok(self.edit_buffer()?.animals.remove(index))
    }

    /// Saves the form for the selected element, replacing any previous record.
    ///
    /// The record is rebuilt from `form`; only the edit buffer's animals are carried over.
    pub fn save(&mut self, form: &ConfigurationForm) -> Result<&Configuration> {
        let edit = self.edit.as_ref().ok_or(EditorError::NoSelection)?;
        let element_id = edit.element_id.clone();
        let config = Configuration::from_form(&element_id, form, edit.animals.clone())?;
        info!(
            "[save] Saving '{}' as {}",
            element_id,
            config.area_type().map(|t| t.as_str()).unwrap_or_default()
        );
        self.store.set(element_id.clone(), config);
        self.refresh_flags();
        self.store
            .get(&element_id)
            .ok_or_else(|| EditorError::InvalidInput(format!("Record for '{}' vanished", element_id)))
    }

    /// Removes the record of `id`. A missing record is a no-op.
    ///
    /// If `id` is open for editing its animal buffer is cleared.
    pub fn delete(&mut self, id: &str) -> Option<Configuration> {
        let removed = self.store.delete(id);
        if removed.is_some() {
            info!("[delete] Removed configuration of '{}'", id);
            self.refresh_flags();
        }
        if let Some(edit) = self.edit.as_mut().filter(|edit| edit.element_id == id) {
            edit.animals = AnimalRoster::new();
        }
        removed
    }

    /// Replaces every configuration with those of a JSON snapshot.
    ///
    /// On error nothing changes. On success the selected element, if any, is reloaded
    /// from the imported records.
    pub fn import_snapshot(&mut self, json: &str) -> Result<usize> {
        let imported = self.store.from_snapshot(json)?;
        self.refresh_flags();
        if let Some(edit) = self.edit.as_mut() {
            edit.animals = self
                .store
                .get(&edit.element_id)
                .and_then(Configuration::animals)
                .cloned()
                .unwrap_or_default();
        }
        info!("[import_snapshot] Imported {} configurations", imported);
        Ok(imported)
    }

    /// The JSON snapshot of the store, counting the elements of the loaded map.
    pub fn export_snapshot(&self) -> Result<String> {
        let total = self.index.as_ref().map(DocumentIndex::len).unwrap_or(0);
        Ok(self.store.to_snapshot(total).to_json()?)
    }

    /// Highlighted preview of the uploaded map.
    pub fn render_preview(&self) -> Result<RenderOutcome> {
        let source = self.source.as_deref().ok_or(EditorError::NoDocument)?;
        Ok(render_preview(source, &self.store))
    }

    /// The interactive export of the uploaded map.
    pub fn export_svg(&self) -> Result<RenderOutcome> {
        let source = self.source.as_deref().ok_or(EditorError::NoDocument)?;
        Ok(export_interactive_svg(source, &self.store))
    }

    pub fn progress(&self) -> Progress {
        match &self.index {
            Some(index) => Progress {
                configured: index.configured_count(),
                total: index.len(),
            },
            None => Progress::default(),
        }
    }

    fn refresh_flags(&mut self) {
        if let Some(index) = self.index.as_mut() {
            index.refresh_configured(&self.store);
        }
    }
}

/// Suggested file name of the interactive SVG download.
pub fn svg_export_file_name(at: &NaiveDateTime) -> String {
    at.format(SVG_EXPORT_FILE_PATTERN).to_string()
}

/// Suggested file name of the configuration snapshot download.
pub fn json_export_file_name(at: &NaiveDateTime) -> String {
    at.format(JSON_EXPORT_FILE_PATTERN).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::area::{AreaType, Zone};
    use chrono::NaiveDate;

    const MAP: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><circle id="c1" r="5"/><rect/><path id="wc" d="M0 0"/></svg>"#;

    fn loaded() -> EditorSession {
        let mut session = EditorSession::new();
        session.load_svg(MAP).expect("map loads");
        session
    }

    fn savana_form() -> ConfigurationForm {
        ConfigurationForm {
            area_type: Some(AreaType::EnclosureSafari),
            enclosure_name: "Savana".to_string(),
            zone: Zone::Africa,
            feeding_times: vec!["9:05".to_string(), "".to_string()],
            ..ConfigurationForm::default()
        }
    }

    #[test]
    fn test_load_lists_elements() {
        let session = loaded();
        let ids: Vec<&str> = session
            .elements()
            .expect("map loaded")
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c1", "element_1", "wc"]);
        assert_eq!(session.progress(), Progress { configured: 0, total: 3 });
    }

    #[test]
    fn test_operations_need_a_document_or_selection() {
        let mut session = EditorSession::new();
        assert!(matches!(session.elements(), Err(EditorError::NoDocument)));
        assert!(matches!(session.render_preview(), Err(EditorError::NoDocument)));
        assert!(matches!(session.add_animal("Lev", "🦁"), Err(EditorError::NoSelection)));
        assert!(matches!(session.save(&savana_form()), Err(EditorError::NoSelection)));
        assert!(session.load_svg("<svg><g></svg>").is_err());
        assert!(session.source().is_none(), "failed load keeps the previous state");
    }

    #[test]
    fn test_edit_and_save_enclosure() {
        let mut session = loaded();
        session.select("c1").expect("c1 is configurable");
        session.add_animal("Lev", "🦁").expect("add succeeds");
        let report = session.add_bulk_animals("🦁 Lev\n🐘 Slon").expect("selection exists");
        assert_eq!(report.added_count(), 1);
        assert!(matches!(
            session.add_preset_animal("🐘"),
            Err(EditorError::DuplicateEntry { .. })
        ));

        let saved = session.save(&savana_form()).expect("save succeeds").clone();

        assert_eq!(saved.animals().map(AnimalRoster::joined_names).as_deref(), Some("Lev, Slon"));
        match &saved {
            Configuration::Enclosure(enclosure) => assert_eq!(enclosure.feeding_times, vec!["09:05"]),
            other => panic!("Expected enclosure, got {:?}", other),
        }
        assert_eq!(session.progress().configured, 1);
        assert_eq!(session.element_label("c1"), "🚗 Savana");
        assert_eq!(session.element_label("wc"), "❓ wc");
    }

    #[test]
    fn test_save_without_area_type_is_rejected() {
        let mut session = loaded();
        session.select("wc").expect("wc is configurable");
        let result = session.save(&ConfigurationForm::default());
        assert!(matches!(result, Err(EditorError::MissingAreaType)));
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_select_loads_existing_record() {
        let mut session = loaded();
        session.select("c1").expect("c1 is configurable");
        session.add_animal("Zebra", "🦓").expect("add succeeds");
        session.save(&savana_form()).expect("save succeeds");

        session.select("wc").expect("wc is configurable");
        assert_eq!(session.edit_animals().map(AnimalRoster::len), Some(0));

        let form = session.select("c1").expect("c1 is configurable");
        assert_eq!(form.enclosure_name, "Savana");
        assert_eq!(session.edit_animals().map(AnimalRoster::len), Some(1));
        assert!(session.select("nope").is_err());
    }

    #[test]
    fn test_delete_clears_buffer_and_flags() {
        let mut session = loaded();
        session.select("c1").expect("c1 is configurable");
        session.add_animal("Lev", "").expect("add succeeds");
        session.save(&savana_form()).expect("save succeeds");

        assert!(session.delete("c1").is_some());
        assert!(session.delete("c1").is_none());
        assert_eq!(session.progress().configured, 0);
        assert_eq!(session.edit_animals().map(AnimalRoster::len), Some(0));
    }

    #[test]
    fn test_snapshot_round_trip_through_sessions() {
        let mut session = loaded();
        session.select("c1").expect("c1 is configurable");
        session.save(&savana_form()).expect("save succeeds");
        let json = session.export_snapshot().expect("snapshot serializes");
        assert!(json.contains("\"totalElements\": 3"));

        let mut other = loaded();
        assert_eq!(other.import_snapshot(&json).expect("snapshot imports"), 1);
        assert_eq!(other.store(), session.store());
        assert_eq!(other.progress().configured, 1);

        assert!(other.import_snapshot("{oops").is_err());
        assert_eq!(other.store().len(), 1, "failed import keeps the store");
    }

    #[test]
    fn test_preview_and_export_use_uploaded_text() {
        let mut session = loaded();
        session.select("element_1").expect("rect is configurable");
        session.save(&savana_form()).expect("save succeeds");

        let preview = session.render_preview().expect("map loaded");
        assert!(preview.is_rendered());
        assert!(preview.text().contains(r#"<rect id="element_1" class="configured-element enclosure-safari"/>"#));

        let export = session.export_svg().expect("map loaded");
        assert!(export.text().contains(r#"<g id="element_1_group""#));
        assert_eq!(session.source(), Some(MAP), "source text is never modified");
    }

    fn fixture(name: &str) -> String {
        let path = format!("{}/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {}", path, e))
    }

    #[test]
    fn test_fixture_map_with_saved_configuration() {
        let mut session = EditorSession::new();
        assert_eq!(session.load_svg(fixture("zoo_map.svg")).expect("fixture loads"), 9);
        assert_eq!(
            session.import_snapshot(&fixture("zoo_config.json")).expect("fixture imports"),
            5
        );
        // "stary-pavilon" belongs to an older revision of the map.
        assert_eq!(session.progress(), Progress { configured: 4, total: 9 });
        assert_eq!(session.element_label("savana"), "🚗 Africká savana");

        let export = session.export_svg().expect("map loaded");
        let text = export.text();
        assert!(export.is_rendered());
        assert!(text.contains(
            r#"<g id="savana_group" class="enclosure configured-element enclosure-safari" data-enclosure="Africká savana""#
        ));
        assert!(text.contains(r#"data-animals="Žirafa, Zebra" data-animal-emojis="🦒🦓" data-animal-count="2""#));
        assert!(text.contains(r#"data-feeding-times="09:00, 14:30""#));
        assert!(text.contains(r#"<g id="element_3_group" class="enclosure configured-element enclosure-pedestrian" data-enclosure="Lvi""#));
        assert!(text.contains(r#"<rect x="180" y="20" width="90" height="70" id="element_3" class="configured-element enclosure-pedestrian"/>"#));
        assert!(text.contains(r#"<ellipse id="rybnik" cx="90" cy="230" rx="60" ry="35" class="configured-element water"/>"#));
        assert!(text.contains(r#"onclick="showFacility(this)""#));
        assert!(!text.contains("stary-pavilon"));
        assert!(text.contains("Zoo Praha &amp; okolí"));
        assert!(text.contains(r##"fill="url(#grass)""##));
    }

    #[test]
    fn test_progress_ratio() {
        let progress = Progress { configured: 1, total: 4 };
        assert_eq!(progress.percent(), 25);
        assert_eq!(Progress::default().ratio(), 0.0);
        assert_eq!(Progress { configured: 5, total: 4 }.ratio(), 1.0);
    }

    #[test]
    fn test_download_file_names() {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(9, 7, 0))
            .expect("valid timestamp");
        assert_eq!(svg_export_file_name(&at), "zoo_mapa_interaktivni_20240501_0907.svg");
        assert_eq!(json_export_file_name(&at), "zoo_konfigurace_20240501_0907.json");
    }
}
