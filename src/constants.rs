//! Defines constants shared by the index, the editor session and the SVG converters.

// Default values used when specific fields are missing or left blank.
pub const DEFAULT_ANIMAL_EMOJI: &str = "🐾"; // Generic paw used when no emoji is given
pub const DEFAULT_ENCLOSURE_NAME: &str = "Výběh"; // Placeholder for unnamed enclosures

// Identity synthesis
pub const FALLBACK_ID_PREFIX: &str = "element_";
pub const GROUP_ID_SUFFIX: &str = "_group"; // Appended to the id of a wrapped enclosure shape

// Class names written into the preview and the export
pub const CONFIGURED_CLASS: &str = "configured-element";
pub const ENCLOSURE_CLASS: &str = "enclosure";

// Element ids used by the popup script
pub const POPUP_ID: &str = "zoo-popup";

// Download metadata
pub const SVG_MIME_TYPE: &str = "image/svg+xml";
pub const JSON_MIME_TYPE: &str = "application/json";
pub const SVG_EXPORT_FILE_PATTERN: &str = "zoo_mapa_interaktivni_%Y%m%d_%H%M.svg";
pub const JSON_EXPORT_FILE_PATTERN: &str = "zoo_konfigurace_%Y%m%d_%H%M.json";

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
