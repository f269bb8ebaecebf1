use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ANIMAL_EMOJI;
use crate::errors::{EditorError, Result};

/// Preset species offered by the quick-add buttons, as `(emoji, name)`.
pub const ANIMAL_PRESETS: [(&str, &str); 19] = [
    ("🦁", "Lev"),
    ("🐘", "Slon"),
    ("🐅", "Tygr"),
    ("🦒", "Žirafa"),
    ("🦓", "Zebra"),
    ("🐒", "Opice"),
    ("🐧", "Tučňák"),
    ("🦏", "Nosorožec"),
    ("🦘", "Klokan"),
    ("🐻", "Medvěd"),
    ("🦜", "Papoušek"),
    ("🐺", "Vlk"),
    ("🦅", "Orel"),
    ("🦉", "Sova"),
    ("🐆", "Gepard"),
    ("🦌", "Jelen"),
    ("🐊", "Krokodýl"),
    ("🐍", "Had"),
    ("🦖", "Dinosaurus"),
];

/// Number of presets shown as quick-add buttons.
pub const QUICK_PRESET_COUNT: usize = 10;

/// The presets shown as quick-add buttons.
pub fn quick_presets() -> &'static [(&'static str, &'static str)] {
    &ANIMAL_PRESETS[..QUICK_PRESET_COUNT]
}

/// Looks up the preset name for an emoji.
pub fn preset_name(emoji: &str) -> Option<&'static str> {
    ANIMAL_PRESETS
        .iter()
        .find(|(preset_emoji, _)| *preset_emoji == emoji)
        .map(|(_, name)| *name)
}

fn default_emoji() -> String {
    DEFAULT_ANIMAL_EMOJI.to_string()
}

/// An animal listed in an enclosure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalEntry {
    /// Unique within its enclosure (case-sensitive).
    pub name: String,
    #[serde(default = "default_emoji")]
    pub emoji: String,
    /// Number of entries in the roster when this one was inserted.
    #[serde(rename = "id", default)]
    pub ordinal_id: usize,
}

/// The ordered animal list of one enclosure. Names are unique.
///
/// Reading a roster with a repeated name fails, so imported data keeps the same
/// guarantee as [`AnimalRoster::add`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AnimalEntry>", into = "Vec<AnimalEntry>")]
pub struct AnimalRoster {
    entries: Vec<AnimalEntry>,
}

impl TryFrom<Vec<AnimalEntry>> for AnimalRoster {
    type Error = EditorError;

    fn try_from(entries: Vec<AnimalEntry>) -> Result<Self> {
        for (index, entry) in entries.iter().enumerate() {
            if entries[..index].iter().any(|earlier| earlier.name == entry.name) {
                return Err(EditorError::DuplicateEntry {
                    name: entry.name.clone(),
                });
            }
        }
        Ok(AnimalRoster { entries })
    }
}

impl From<AnimalRoster> for Vec<AnimalEntry> {
    fn from(roster: AnimalRoster) -> Self {
        roster.entries
    }
}

impl AnimalRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[AnimalEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnimalEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Adds an animal. A blank emoji falls back to the paw symbol.
    ///
    /// Fails with [`EditorError::DuplicateEntry`] if the name is already listed, leaving
    /// the roster unchanged, and with [`EditorError::InvalidInput`] for a blank name.
    pub fn add(&mut self, name: &str, emoji: &str) -> Result<&AnimalEntry> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditorError::InvalidInput(
                "Animal name must not be empty".to_string(),
            ));
        }
        if self.contains(name) {
            return Err(EditorError::DuplicateEntry {
                name: name.to_string(),
            });
        }
        let emoji = match emoji.trim() {
            "" => DEFAULT_ANIMAL_EMOJI,
            trimmed => trimmed,
        };
        let ordinal_id = self.entries.len();
        self.entries.push(AnimalEntry {
            name: name.to_string(),
            emoji: emoji.to_string(),
            ordinal_id,
        });
        Ok(&self.entries[ordinal_id])
    }

    /// Adds the preset animal for `emoji`.
    pub fn add_preset(&mut self, emoji: &str) -> Result<&AnimalEntry> {
        let name = preset_name(emoji).ok_or_else(|| {
            EditorError::InvalidInput(format!("'{}' is not a preset animal", emoji))
        })?;
        self.add(name, emoji)
    }

    /// Removes the entry at `index`. Ordinal ids of the remaining entries are kept.
    pub fn remove(&mut self, index: usize) -> Option<AnimalEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Animal names joined with `", "`.
    pub fn joined_names(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// All emoji concatenated in roster order.
    pub fn concatenated_emojis(&self) -> String {
        self.entries.iter().map(|entry| entry.emoji.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assigns_ordinal_ids() {
        let mut roster = AnimalRoster::new();
        roster.add("Lev", "🦁").expect("first add succeeds");
        let slon = roster.add("Slon", "🐘").expect("second add succeeds");
        assert_eq!(slon.ordinal_id, 1);
        assert_eq!(roster.joined_names(), "Lev, Slon");
        assert_eq!(roster.concatenated_emojis(), "🦁🐘");
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut roster = AnimalRoster::new();
        roster.add("Lev", "🦁").expect("first add succeeds");
        let result = roster.add("Lev", "🐈");
        match result {
            Err(EditorError::DuplicateEntry { name }) => assert_eq!(name, "Lev"),
            other => panic!("Expected DuplicateEntry, got {:?}", other),
        }
        assert_eq!(roster.len(), 1);
        // Names are case-sensitive.
        assert!(roster.add("lev", "🦁").is_ok());
    }

    #[test]
    fn test_blank_emoji_defaults_to_paw() {
        let mut roster = AnimalRoster::new();
        let entry = roster.add("Surikata", "  ").expect("add succeeds");
        assert_eq!(entry.emoji, DEFAULT_ANIMAL_EMOJI);
        assert!(roster.add("   ", "🦁").is_err());
    }

    #[test]
    fn test_presets() {
        let mut roster = AnimalRoster::new();
        let entry = roster.add_preset("🦒").expect("preset exists");
        assert_eq!(entry.name, "Žirafa");
        assert!(roster.add_preset("🦒").is_err());
        assert!(roster.add_preset("🚗").is_err());
        assert_eq!(quick_presets().len(), QUICK_PRESET_COUNT);
    }

    #[test]
    fn test_remove_keeps_other_ordinals() {
        let mut roster = AnimalRoster::new();
        roster.add("Lev", "🦁").expect("add succeeds");
        roster.add("Slon", "🐘").expect("add succeeds");
        let removed = roster.remove(0).expect("index 0 exists");
        assert_eq!(removed.name, "Lev");
        assert_eq!(roster.entries()[0].ordinal_id, 1);
        assert!(roster.remove(5).is_none());
    }

    #[test]
    fn test_serializes_with_original_field_names() {
        let mut roster = AnimalRoster::new();
        roster.add("Lev", "🦁").expect("add succeeds");
        let json = serde_json::to_string(&roster).expect("roster serializes");
        assert_eq!(json, r#"[{"name":"Lev","emoji":"🦁","id":0}]"#);

        let parsed: AnimalRoster =
            serde_json::from_str(r#"[{"name":"Vlk"}]"#).expect("minimal entry parses");
        assert_eq!(parsed.entries()[0].emoji, DEFAULT_ANIMAL_EMOJI);
    }

    #[test]
    fn test_reading_repeated_names_fails() {
        let result =
            serde_json::from_str::<AnimalRoster>(r#"[{"name":"Lev"},{"name":"Slon"},{"name":"Lev"}]"#);
        let err = result.expect_err("repeated name must be rejected");
        assert!(err.to_string().contains("'Lev'"), "unexpected error: {}", err);

        let parsed: AnimalRoster = serde_json::from_str(r#"[{"name":"Lev"},{"name":"lev"}]"#)
            .expect("names differing in case are distinct");
        assert_eq!(parsed.len(), 2);
    }
}
