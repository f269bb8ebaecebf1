use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::configuration::Configuration;
use crate::errors::ImportError;

/// The JSON snapshot of a configuration store plus summary counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    /// ISO-8601 time the snapshot was taken.
    pub timestamp: String,
    /// Number of configurable elements in the document at export time.
    pub total_elements: usize,
    /// Number of configuration records.
    pub configured_elements: usize,
    pub configurations: IndexMap<String, Configuration>,
}

impl ConfigSnapshot {
    /// Reads a snapshot for import.
    ///
    /// Only `configurations` is required; missing counters default to the mapping's size
    /// and unknown top-level fields are ignored. Records with an empty `elementId` take
    /// their map key.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        let value: JsonValue = serde_json::from_str(json)?;
        let object = value.as_object().ok_or(ImportError::MissingConfigurations)?;
        let entries = object
            .get("configurations")
            .and_then(JsonValue::as_object)
            .ok_or(ImportError::MissingConfigurations)?;

        let mut configurations = IndexMap::with_capacity(entries.len());
        for (element_id, raw) in entries {
            let mut config: Configuration =
                serde_json::from_value(raw.clone()).map_err(|source| {
                    ImportError::InvalidConfiguration {
                        element_id: element_id.clone(),
                        source,
                    }
                })?;
            config.fill_element_id(element_id);
            configurations.insert(element_id.clone(), config);
        }

        let count = |field: &str| {
            object
                .get(field)
                .and_then(JsonValue::as_u64)
                .map(|n| n as usize)
        };
        Ok(ConfigSnapshot {
            timestamp: object
                .get("timestamp")
                .and_then(JsonValue::as_str)
                .unwrap_or_default()
                .to_string(),
            total_elements: count("totalElements").unwrap_or(configurations.len()),
            configured_elements: count("configuredElements").unwrap_or(configurations.len()),
            configurations,
        })
    }

    /// Pretty-printed JSON (two-space indent, non-ASCII kept as is).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
