use serde::{Deserialize, Serialize};
use std::fmt;

/// Icon shown for elements that have no area type yet.
pub const UNSET_AREA_ICON: &str = "❓";

/// The semantic type of an annotated map region.
///
/// `enclosure-*` types share the enclosure configuration shape, `facility` has its own,
/// and the remaining types share the generic area shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AreaType {
    /// Animal enclosure seen from the pedestrian part of the zoo.
    EnclosurePedestrian,
    /// Animal enclosure in the drive-through safari.
    EnclosureSafari,
    PathPedestrian,
    PathSafari,
    Water,
    /// Staff-only zone.
    Restricted,
    /// Service building (toilets, restaurant, shop, ...).
    Facility,
}

/// Which configuration record a given area type uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationShape {
    Enclosure(EnclosureKind),
    Facility,
    Area(AreaKind),
}

/// One entry of a selector list, as sent to the UI: `{"value": .., "label": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl AreaType {
    /// Every area type in the order the selection UI lists them.
    pub const ALL: [AreaType; 7] = [
        AreaType::EnclosurePedestrian,
        AreaType::EnclosureSafari,
        AreaType::PathPedestrian,
        AreaType::PathSafari,
        AreaType::Water,
        AreaType::Restricted,
        AreaType::Facility,
    ];

    /// The wire name, also used as the CSS class.
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaType::EnclosurePedestrian => "enclosure-pedestrian",
            AreaType::EnclosureSafari => "enclosure-safari",
            AreaType::PathPedestrian => "path-pedestrian",
            AreaType::PathSafari => "path-safari",
            AreaType::Water => "water",
            AreaType::Restricted => "restricted",
            AreaType::Facility => "facility",
        }
    }

    /// Parses a wire name. Empty or unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        AreaType::ALL
            .into_iter()
            .find(|area_type| area_type.as_str() == name)
    }

    pub fn shape(&self) -> ConfigurationShape {
        match self {
            AreaType::EnclosurePedestrian => ConfigurationShape::Enclosure(EnclosureKind::Pedestrian),
            AreaType::EnclosureSafari => ConfigurationShape::Enclosure(EnclosureKind::Safari),
            AreaType::Facility => ConfigurationShape::Facility,
            AreaType::PathPedestrian => ConfigurationShape::Area(AreaKind::PathPedestrian),
            AreaType::PathSafari => ConfigurationShape::Area(AreaKind::PathSafari),
            AreaType::Water => ConfigurationShape::Area(AreaKind::Water),
            AreaType::Restricted => ConfigurationShape::Area(AreaKind::Restricted),
        }
    }

    /// The area type selector entries, in [`AreaType::ALL`] order.
    pub fn options() -> Vec<SelectOption> {
        AreaType::ALL
            .iter()
            .map(|area_type| SelectOption {
                value: area_type.as_str(),
                label: area_type.label(),
            })
            .collect()
    }

    /// Icon used by the element list.
    pub fn icon(&self) -> &'static str {
        match self {
            AreaType::EnclosurePedestrian => "🚶",
            AreaType::EnclosureSafari => "🚗",
            AreaType::PathPedestrian => "🛤️",
            AreaType::PathSafari => "🛣️",
            AreaType::Water => "💧",
            AreaType::Restricted => "🚫",
            AreaType::Facility => "🏢",
        }
    }

    /// Human readable label for the area type selector.
    pub fn label(&self) -> &'static str {
        match self {
            AreaType::EnclosurePedestrian => "🚶 Výběh - pěší část",
            AreaType::EnclosureSafari => "🚗 Výběh - safari",
            AreaType::PathPedestrian => "🛤️ Cesta - pěší",
            AreaType::PathSafari => "🛣️ Cesta - safari",
            AreaType::Water => "💧 Vodní plocha",
            AreaType::Restricted => "🚫 Zázemí zoo",
            AreaType::Facility => "🏢 Služba/budova",
        }
    }

    /// Fill color used to highlight regions of this type in the preview and the export.
    pub fn fill_color(&self) -> &'static str {
        match self {
            AreaType::EnclosurePedestrian => "#90EE90",
            AreaType::EnclosureSafari => "#FFD700",
            AreaType::PathPedestrian => "#DDA0DD",
            AreaType::PathSafari => "#F0E68C",
            AreaType::Water => "#87CEEB",
            AreaType::Restricted => "#FFB6C1",
            AreaType::Facility => "#FFA500",
        }
    }
}

impl fmt::Display for AreaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two enclosure flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnclosureKind {
    Pedestrian,
    Safari,
}

impl EnclosureKind {
    pub fn area_type(&self) -> AreaType {
        match self {
            EnclosureKind::Pedestrian => AreaType::EnclosurePedestrian,
            EnclosureKind::Safari => AreaType::EnclosureSafari,
        }
    }
}

/// Area types that use the generic name/description shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaKind {
    PathPedestrian,
    PathSafari,
    Water,
    Restricted,
}

impl AreaKind {
    pub fn area_type(&self) -> AreaType {
        match self {
            AreaKind::PathPedestrian => AreaType::PathPedestrian,
            AreaKind::PathSafari => AreaType::PathSafari,
            AreaKind::Water => AreaType::Water,
            AreaKind::Restricted => AreaType::Restricted,
        }
    }
}

/// Geographic zone of an enclosure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Zone {
    #[default]
    #[serde(rename = "Afrika")]
    Africa,
    #[serde(rename = "Asie")]
    Asia,
    #[serde(rename = "Evropa")]
    Europe,
    #[serde(rename = "Amerika")]
    America,
    #[serde(rename = "Austrálie")]
    Australia,
    #[serde(rename = "Antarktida")]
    Antarctica,
    /// Species from all over the world.
    #[serde(rename = "Světové")]
    Worldwide,
}

impl Zone {
    pub const ALL: [Zone; 7] = [
        Zone::Africa,
        Zone::Asia,
        Zone::Europe,
        Zone::America,
        Zone::Australia,
        Zone::Antarctica,
        Zone::Worldwide,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Africa => "Afrika",
            Zone::Asia => "Asie",
            Zone::Europe => "Evropa",
            Zone::America => "Amerika",
            Zone::Australia => "Austrálie",
            Zone::Antarctica => "Antarktida",
            Zone::Worldwide => "Světové",
        }
    }
}

/// Kind of service a facility offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FacilityType {
    #[default]
    #[serde(rename = "WC")]
    Wc,
    Restaurant,
    Shop,
    Info,
    FirstAid,
    Parking,
}

impl FacilityType {
    pub const ALL: [FacilityType; 6] = [
        FacilityType::Wc,
        FacilityType::Restaurant,
        FacilityType::Shop,
        FacilityType::Info,
        FacilityType::FirstAid,
        FacilityType::Parking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FacilityType::Wc => "WC",
            FacilityType::Restaurant => "Restaurant",
            FacilityType::Shop => "Shop",
            FacilityType::Info => "Info",
            FacilityType::FirstAid => "FirstAid",
            FacilityType::Parking => "Parking",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FacilityType::Wc => "🚻 Toalety",
            FacilityType::Restaurant => "🍽️ Restaurace",
            FacilityType::Shop => "🛍️ Obchod",
            FacilityType::Info => "ℹ️ Informace",
            FacilityType::FirstAid => "🏥 První pomoc",
            FacilityType::Parking => "🅿️ Parkování",
        }
    }

    /// The facility type selector entries, in [`FacilityType::ALL`] order.
    pub fn options() -> Vec<SelectOption> {
        FacilityType::ALL
            .iter()
            .map(|facility| SelectOption {
                value: facility.as_str(),
                label: facility.label(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_type_names_round_trip() {
        for area_type in AreaType::ALL {
            assert_eq!(AreaType::from_name(area_type.as_str()), Some(area_type));
            let json = serde_json::to_string(&area_type).expect("area type serializes");
            assert_eq!(json, format!("\"{}\"", area_type.as_str()));
        }
        assert_eq!(AreaType::from_name(""), None);
        assert_eq!(AreaType::from_name("aviary"), None);
    }

    #[test]
    fn test_shapes() {
        assert_eq!(
            AreaType::EnclosureSafari.shape(),
            ConfigurationShape::Enclosure(EnclosureKind::Safari)
        );
        assert_eq!(AreaType::Facility.shape(), ConfigurationShape::Facility);
        assert_eq!(AreaType::Water.shape(), ConfigurationShape::Area(AreaKind::Water));
        for kind in [EnclosureKind::Pedestrian, EnclosureKind::Safari] {
            assert_eq!(kind.area_type().shape(), ConfigurationShape::Enclosure(kind));
        }
        for kind in [
            AreaKind::PathPedestrian,
            AreaKind::PathSafari,
            AreaKind::Water,
            AreaKind::Restricted,
        ] {
            assert_eq!(kind.area_type().shape(), ConfigurationShape::Area(kind));
        }
    }

    #[test]
    fn test_selector_options_carry_labels() {
        let areas = AreaType::options();
        assert_eq!(areas.len(), AreaType::ALL.len());
        assert_eq!(areas[0].value, "enclosure-pedestrian");
        assert_eq!(areas[0].label, "🚶 Výběh - pěší část");

        let json = serde_json::to_string(&FacilityType::options()).expect("options serialize");
        assert!(json.starts_with(r#"[{"value":"WC","label":"🚻 Toalety"}"#));
        assert_eq!(FacilityType::options().len(), FacilityType::ALL.len());
    }

    #[test]
    fn test_zone_and_facility_wire_names() {
        for zone in Zone::ALL {
            let json = serde_json::to_string(&zone).expect("zone serializes");
            assert_eq!(json, format!("\"{}\"", zone.as_str()));
        }
        for facility in FacilityType::ALL {
            let json = serde_json::to_string(&facility).expect("facility serializes");
            assert_eq!(json, format!("\"{}\"", facility.as_str()));
        }
        assert_eq!(Zone::default(), Zone::Africa);
        assert_eq!(FacilityType::default(), FacilityType::Wc);
    }
}
