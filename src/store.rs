//! The in-memory configuration store of one editing session.

use chrono::{Local, SecondsFormat};
use indexmap::IndexMap;
use log::info;

use crate::errors::ImportError;
use crate::models::{configuration::Configuration, snapshot::ConfigSnapshot};

/// Mapping from element id to its configuration record.
///
/// Records are values: `set` replaces a record wholesale and `get` hands out a shared
/// reference, so nothing outside the store can patch individual fields. Iteration
/// follows insertion order, which keeps exports deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationStore {
    configurations: IndexMap<String, Configuration>,
}

impl ConfigurationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Configuration> {
        self.configurations.get(id)
    }

    /// Inserts or overwrites the record for `id`. Overwriting keeps the key's position.
    pub fn set(&mut self, id: impl Into<String>, config: Configuration) {
        self.configurations.insert(id.into(), config);
    }

    /// Removes the record for `id`; a missing id is a no-op.
    pub fn delete(&mut self, id: &str) -> Option<Configuration> {
        self.configurations.shift_remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.configurations.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Configuration> {
        self.configurations.iter()
    }

    /// Takes a snapshot stamped with the current local time.
    ///
    /// # Arguments
    /// * `total_elements` - Number of configurable elements in the current document.
    pub fn to_snapshot(&self, total_elements: usize) -> ConfigSnapshot {
        let timestamp = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);
        self.to_snapshot_at(total_elements, timestamp)
    }

    /// Takes a snapshot with an explicit timestamp.
    pub fn to_snapshot_at(&self, total_elements: usize, timestamp: impl Into<String>) -> ConfigSnapshot {
        ConfigSnapshot {
            timestamp: timestamp.into(),
            total_elements,
            configured_elements: self.configurations.len(),
            configurations: self.configurations.clone(),
        }
    }

    /// Replaces the whole store with the records of a JSON snapshot.
    ///
    /// On error the store is left exactly as it was. Returns the number of imported records.
    pub fn from_snapshot(&mut self, json: &str) -> Result<usize, ImportError> {
        let snapshot = ConfigSnapshot::from_json(json)?;
        self.replace_with(snapshot);
        Ok(self.configurations.len())
    }

    /// Replaces the whole store with the records of an already parsed snapshot.
    pub fn replace_with(&mut self, snapshot: ConfigSnapshot) {
        info!(
            "Replacing {} configurations with {} from snapshot taken at '{}'",
            self.configurations.len(),
            snapshot.configurations.len(),
            snapshot.timestamp
        );
        self.configurations = snapshot.configurations;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::animal::AnimalRoster;
    use crate::models::area::{AreaKind, EnclosureKind, FacilityType, Zone};
    use crate::models::configuration::{AreaConfig, EnclosureConfig, FacilityConfig};

    fn savana() -> Configuration {
        let mut animals = AnimalRoster::new();
        animals.add("Lev", "🦁").expect("add succeeds");
        Configuration::Enclosure(EnclosureConfig {
            kind: EnclosureKind::Safari,
            element_id: "c1".to_string(),
            enclosure_name: "Savana".to_string(),
            enclosure_description: "Africká savana".to_string(),
            zone: Zone::Africa,
            feeding_times: vec!["09:00".to_string()],
            animals,
        })
    }

    fn populated() -> ConfigurationStore {
        let mut store = ConfigurationStore::new();
        store.set("c1", savana());
        store.set(
            "wc",
            Configuration::Facility(FacilityConfig {
                element_id: "wc".to_string(),
                facility_type: FacilityType::Wc,
                facility_name: "Toalety".to_string(),
            }),
        );
        store.set(
            "lake",
            Configuration::Area(AreaConfig {
                kind: AreaKind::Water,
                element_id: "lake".to_string(),
                area_name: "Jezero".to_string(),
                area_description: String::new(),
            }),
        );
        store
    }

    #[test]
    fn test_set_then_get_returns_value() {
        let mut store = ConfigurationStore::new();
        store.set("c1", savana());
        assert_eq!(store.get("c1"), Some(&savana()));
        store.set("c1", savana());
        assert_eq!(store.len(), 1, "set is idempotent");
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut store = populated();
        store.set("c1", Configuration::Unassigned { element_id: "c1".to_string() });
        let keys: Vec<&str> = store.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["c1", "wc", "lake"]);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut store = populated();
        assert!(store.delete("nope").is_none());
        assert_eq!(store.len(), 3);
        assert!(store.delete("wc").is_some());
        assert!(!store.contains("wc"));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let store = populated();
        let json = store
            .to_snapshot_at(12, "2024-05-01T10:00:00+02:00")
            .to_json()
            .expect("snapshot serializes");
        assert!(json.contains("\"totalElements\": 12"));
        assert!(json.contains("\"configuredElements\": 3"));
        assert!(json.contains("Africká savana"), "non-ASCII text is kept verbatim");

        let mut restored = ConfigurationStore::new();
        let imported = restored.from_snapshot(&json).expect("snapshot imports");
        assert_eq!(imported, 3);
        assert_eq!(restored, store);
    }

    #[test]
    fn test_snapshot_timestamp_is_iso8601() {
        let snapshot = populated().to_snapshot(3);
        assert!(
            chrono::DateTime::parse_from_rfc3339(&snapshot.timestamp).is_ok(),
            "timestamp '{}' should be RFC 3339",
            snapshot.timestamp
        );
    }

    #[test]
    fn test_failed_import_leaves_store_untouched() {
        let mut store = populated();
        let before = store.clone();
        assert!(store.from_snapshot("not json").is_err());
        assert!(store.from_snapshot(r#"{"timestamp":"x"}"#).is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn test_import_with_repeated_animal_fails() {
        let mut store = populated();
        let before = store.clone();
        let result = store.from_snapshot(
            r#"{"configurations":{"c1":{"areaType":"enclosure-safari","animals":[{"name":"Lev"},{"name":"Lev"}]}}}"#,
        );
        match result {
            Err(ImportError::InvalidConfiguration { element_id, .. }) => assert_eq!(element_id, "c1"),
            other => panic!("Expected InvalidConfiguration, got {:?}", other),
        }
        assert_eq!(store, before);
    }

    #[test]
    fn test_import_replaces_wholesale() {
        let mut store = populated();
        store
            .from_snapshot(r#"{"configurations":{"new":{"areaType":"restricted","elementId":"new"}}}"#)
            .expect("snapshot imports");
        assert_eq!(store.len(), 1);
        assert!(store.contains("new"));
        assert!(!store.contains("c1"));
    }
}
