//! The per-element configuration record.
//!
//! A [`Configuration`] is a tagged union over the three configuration shapes. On the
//! wire it is one flat JSON object discriminated by `areaType`, the format written by
//! the configuration export and read back on import:
//!
//! ```json
//! { "areaType": "enclosure-safari", "elementId": "c1", "enclosureName": "Savana",
//!   "enclosureDescription": "", "zone": "Afrika", "feedingTimes": ["09:00"], "animals": [] }
//! ```

use chrono::NaiveTime;
use serde::{de, Deserialize, Deserializer, Serialize};

use super::animal::AnimalRoster;
use super::area::{AreaKind, AreaType, ConfigurationShape, EnclosureKind, FacilityType, Zone};
use crate::errors::{EditorError, Result};

/// Configuration of an animal enclosure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnclosureConfig {
    pub kind: EnclosureKind,
    pub element_id: String,
    pub enclosure_name: String,
    pub enclosure_description: String,
    pub zone: Zone,
    /// `HH:MM` strings, unique and non-empty.
    pub feeding_times: Vec<String>,
    pub animals: AnimalRoster,
}

/// Configuration of a service facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilityConfig {
    pub element_id: String,
    pub facility_type: FacilityType,
    pub facility_name: String,
}

/// Configuration of paths, water and restricted zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaConfig {
    pub kind: AreaKind,
    pub element_id: String,
    pub area_name: String,
    pub area_description: String,
}

/// A configuration record keyed by element id in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfiguration", into = "RawConfiguration")]
pub enum Configuration {
    Enclosure(EnclosureConfig),
    Facility(FacilityConfig),
    Area(AreaConfig),
    /// A record without an area type. Only produced by importing older snapshots;
    /// saving requires an area type.
    Unassigned { element_id: String },
}

impl Configuration {
    /// The area type, or `None` for unassigned records.
    pub fn area_type(&self) -> Option<AreaType> {
        match self {
            Configuration::Enclosure(enclosure) => Some(enclosure.kind.area_type()),
            Configuration::Facility(_) => Some(AreaType::Facility),
            Configuration::Area(area) => Some(area.kind.area_type()),
            Configuration::Unassigned { .. } => None,
        }
    }

    pub fn element_id(&self) -> &str {
        match self {
            Configuration::Enclosure(enclosure) => &enclosure.element_id,
            Configuration::Facility(facility) => &facility.element_id,
            Configuration::Area(area) => &area.element_id,
            Configuration::Unassigned { element_id } => element_id,
        }
    }

    fn element_id_mut(&mut self) -> &mut String {
        match self {
            Configuration::Enclosure(enclosure) => &mut enclosure.element_id,
            Configuration::Facility(facility) => &mut facility.element_id,
            Configuration::Area(area) => &mut area.element_id,
            Configuration::Unassigned { element_id } => element_id,
        }
    }

    /// Fills in the element id from the store key when the record has none.
    pub(crate) fn fill_element_id(&mut self, key: &str) {
        let element_id = self.element_id_mut();
        if element_id.is_empty() {
            *element_id = key.to_string();
        }
    }

    /// The user-facing name of the region, if one was entered.
    pub fn display_name(&self) -> Option<&str> {
        let name = match self {
            Configuration::Enclosure(enclosure) => enclosure.enclosure_name.as_str(),
            Configuration::Facility(facility) => facility.facility_name.as_str(),
            Configuration::Area(area) => area.area_name.as_str(),
            Configuration::Unassigned { .. } => "",
        };
        Some(name).filter(|name| !name.trim().is_empty())
    }

    pub fn animals(&self) -> Option<&AnimalRoster> {
        match self {
            Configuration::Enclosure(enclosure) => Some(&enclosure.animals),
            _ => None,
        }
    }

    /// Builds a fresh record from form values.
    ///
    /// Nothing is merged from a previous record except `animals`, which the caller passes
    /// in from its edit buffer and which only enclosures keep.
    ///
    /// # Errors
    /// * [`EditorError::MissingAreaType`] if the form has no area type.
    /// * [`EditorError::InvalidInput`] if a feeding time is not `HH:MM`.
    pub fn from_form(element_id: &str, form: &ConfigurationForm, animals: AnimalRoster) -> Result<Self> {
        let area_type = form.area_type.ok_or(EditorError::MissingAreaType)?;
        let element_id = element_id.to_string();

        let config = match area_type.shape() {
            ConfigurationShape::Enclosure(kind) => Configuration::Enclosure(EnclosureConfig {
                kind,
                element_id,
                enclosure_name: form.enclosure_name.trim().to_string(),
                enclosure_description: form.enclosure_description.trim().to_string(),
                zone: form.zone,
                feeding_times: normalize_feeding_times(&form.feeding_times)?,
                animals,
            }),
            ConfigurationShape::Area(kind) => Configuration::Area(AreaConfig {
                kind,
                element_id,
                area_name: form.area_name.trim().to_string(),
                area_description: form.area_description.trim().to_string(),
            }),
            ConfigurationShape::Facility => Configuration::Facility(FacilityConfig {
                element_id,
                facility_type: form.facility_type,
                facility_name: form.facility_name.trim().to_string(),
            }),
        };
        Ok(config)
    }
}

/// Normalizes feeding times for saving: blanks dropped, each value validated as `HH:MM`
/// (seconds are accepted and discarded), re-formatted zero padded, duplicates dropped.
pub fn normalize_feeding_times(times: &[String]) -> Result<Vec<String>> {
    let mut normalized: Vec<String> = Vec::with_capacity(times.len());
    for raw in times {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let time = NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|_| {
                EditorError::InvalidInput(format!("Feeding time '{}' is not in HH:MM format", raw))
            })?;
        let formatted = time.format("%H:%M").to_string();
        if !normalized.contains(&formatted) {
            normalized.push(formatted);
        }
    }
    Ok(normalized)
}

/// Field values delivered by the configuration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigurationForm {
    #[serde(deserialize_with = "deserialize_optional_area_type")]
    pub area_type: Option<AreaType>,
    pub enclosure_name: String,
    pub enclosure_description: String,
    pub zone: Zone,
    pub feeding_times: Vec<String>,
    pub facility_type: FacilityType,
    pub facility_name: String,
    pub area_name: String,
    pub area_description: String,
}

impl ConfigurationForm {
    /// A form pre-filled from an existing record, as the editor shows it on selection.
    pub fn from_configuration(config: &Configuration) -> Self {
        let mut form = ConfigurationForm {
            area_type: config.area_type(),
            ..ConfigurationForm::default()
        };
        match config {
            Configuration::Enclosure(enclosure) => {
                form.enclosure_name = enclosure.enclosure_name.clone();
                form.enclosure_description = enclosure.enclosure_description.clone();
                form.zone = enclosure.zone;
                form.feeding_times = enclosure.feeding_times.clone();
            }
            Configuration::Facility(facility) => {
                form.facility_type = facility.facility_type;
                form.facility_name = facility.facility_name.clone();
            }
            Configuration::Area(area) => {
                form.area_name = area.area_name.clone();
                form.area_description = area.area_description.clone();
            }
            Configuration::Unassigned { .. } => {}
        }
        form
    }
}

/// The selector sends `""` for "no type selected".
fn deserialize_optional_area_type<'de, D>(deserializer: D) -> std::result::Result<Option<AreaType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => AreaType::from_name(name)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("unknown area type '{}'", name))),
    }
}

// --- Wire format ---

/// Flat JSON shape shared by all configuration variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfiguration {
    #[serde(default)]
    area_type: String,
    #[serde(default)]
    element_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enclosure_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enclosure_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    zone: Option<Zone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feeding_times: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    animals: Option<AnimalRoster>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    facility_type: Option<FacilityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    facility_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    area_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    area_description: Option<String>,
}

impl TryFrom<RawConfiguration> for Configuration {
    type Error = EditorError;

    fn try_from(raw: RawConfiguration) -> Result<Self> {
        let name = raw.area_type.trim();
        if name.is_empty() {
            return Ok(Configuration::Unassigned {
                element_id: raw.element_id,
            });
        }
        let area_type = AreaType::from_name(name)
            .ok_or_else(|| EditorError::InvalidInput(format!("Unknown area type '{}'", name)))?;

        let config = match area_type.shape() {
            ConfigurationShape::Enclosure(kind) => Configuration::Enclosure(EnclosureConfig {
                kind,
                element_id: raw.element_id,
                enclosure_name: raw.enclosure_name.unwrap_or_default(),
                enclosure_description: raw.enclosure_description.unwrap_or_default(),
                zone: raw.zone.unwrap_or_default(),
                // Imported times are kept as written; only the save path normalizes.
                feeding_times: raw
                    .feeding_times
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|time| !time.trim().is_empty())
                    .collect(),
                animals: raw.animals.unwrap_or_default(),
            }),
            ConfigurationShape::Area(kind) => Configuration::Area(AreaConfig {
                kind,
                element_id: raw.element_id,
                area_name: raw.area_name.unwrap_or_default(),
                area_description: raw.area_description.unwrap_or_default(),
            }),
            ConfigurationShape::Facility => Configuration::Facility(FacilityConfig {
                element_id: raw.element_id,
                facility_type: raw.facility_type.unwrap_or_default(),
                facility_name: raw.facility_name.unwrap_or_default(),
            }),
        };
        Ok(config)
    }
}

impl From<Configuration> for RawConfiguration {
    fn from(config: Configuration) -> Self {
        let area_type = config
            .area_type()
            .map(|area_type| area_type.as_str().to_string())
            .unwrap_or_default();
        match config {
            Configuration::Enclosure(enclosure) => RawConfiguration {
                area_type,
                element_id: enclosure.element_id,
                enclosure_name: Some(enclosure.enclosure_name),
                enclosure_description: Some(enclosure.enclosure_description),
                zone: Some(enclosure.zone),
                feeding_times: Some(enclosure.feeding_times),
                animals: Some(enclosure.animals),
                ..RawConfiguration::default()
            },
            Configuration::Facility(facility) => RawConfiguration {
                area_type,
                element_id: facility.element_id,
                facility_type: Some(facility.facility_type),
                facility_name: Some(facility.facility_name),
                ..RawConfiguration::default()
            },
            Configuration::Area(area) => RawConfiguration {
                area_type,
                element_id: area.element_id,
                area_name: Some(area.area_name),
                area_description: Some(area.area_description),
                ..RawConfiguration::default()
            },
            Configuration::Unassigned { element_id } => RawConfiguration {
                area_type,
                element_id,
                ..RawConfiguration::default()
            },
        }
    }
}
