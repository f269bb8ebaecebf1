//! Bulk animal roster parsing.
//!
//! Turns a multi-line text block such as
//!
//! ```text
//! 🦜 Papoušek ara
//! 🦅 Orel mořský
//! Sova lesní
//! ```
//!
//! into `(emoji, name)` candidates. A line starts with a run of emoji/pictograph/symbol
//! characters followed by optional whitespace and the name; lines without a leading
//! emoji run become a name with the default paw emoji.

use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::constants::DEFAULT_ANIMAL_EMOJI;
use crate::models::animal::{AnimalEntry, AnimalRoster};

/// Emoji, pictograph and symbol ranges accepted as a leading emoji run. Variation
/// selector 16 and the zero-width joiner are included so composed emoji stay whole.
const EMOJI_CLASS: &str = r"[\x{1F600}-\x{1F64F}\x{1F300}-\x{1F5FF}\x{1F680}-\x{1F6FF}\x{1F1E0}-\x{1F1FF}\x{2600}-\x{26FF}\x{2700}-\x{27BF}\x{1F900}-\x{1F9FF}\x{1FA70}-\x{1FAFF}\x{FE0F}\x{200D}]";

fn re_roster_line() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| {
        Regex::new(&format!(r"^({}+)\s*(.+)$", EMOJI_CLASS)).expect("roster line pattern is valid")
    })
}

fn re_emoji_only() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| {
        Regex::new(&format!(r"^{}+$", EMOJI_CLASS)).expect("emoji run pattern is valid")
    })
}

/// One parsed line of a bulk roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterLine {
    pub emoji: String,
    pub name: String,
}

/// Parses a single line. Returns `None` for blank lines.
pub fn parse_roster_line(line: &str) -> Option<RosterLine> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(caps) = re_roster_line().captures(line) {
        let emoji = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let name = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
        // A lone composed emoji like "🛤️" would otherwise split into emoji + selector.
        if !name.is_empty() && !re_emoji_only().is_match(name) {
            return Some(RosterLine {
                emoji: emoji.to_string(),
                name: name.to_string(),
            });
        }
    }

    Some(RosterLine {
        emoji: DEFAULT_ANIMAL_EMOJI.to_string(),
        name: line.to_string(),
    })
}

/// Parses every non-blank line of `text`, in input order. Duplicates are kept; they
/// are filtered when the lines are added to a roster.
pub fn parse_roster_text(text: &str) -> Vec<RosterLine> {
    text.lines().filter_map(parse_roster_line).collect()
}

/// Outcome of a bulk add, for user feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkAddReport {
    /// Entries actually added, in input order.
    pub added: Vec<AnimalEntry>,
    /// Names skipped because the enclosure already lists them.
    pub duplicates: Vec<String>,
}

impl BulkAddReport {
    pub fn added_count(&self) -> usize {
        self.added.len()
    }
}

/// Parses `text` and adds every new animal to `roster`.
///
/// A candidate is skipped when its name is already in the roster, including names added
/// earlier in the same batch. Skips are not errors; they are listed in the report.
pub fn add_bulk_roster(text: &str, roster: &mut AnimalRoster) -> BulkAddReport {
    let mut report = BulkAddReport::default();
    for line in parse_roster_text(text) {
        if roster.contains(&line.name) {
            debug!("[add_bulk_roster] Skipping duplicate animal '{}'", line.name);
            report.duplicates.push(line.name);
            continue;
        }
        // Names are non-empty and unique here, so the add cannot fail.
        if let Ok(entry) = roster.add(&line.name, &line.emoji) {
            report.added.push(entry.clone());
        }
    }
    report
}

impl AnimalRoster {
    /// Adds every animal listed in a bulk text block. See [`add_bulk_roster`].
    pub fn add_bulk(&mut self, text: &str) -> BulkAddReport {
        add_bulk_roster(text, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(emoji: &str, name: &str) -> RosterLine {
        RosterLine {
            emoji: emoji.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_parse_line_with_emoji() {
        assert_eq!(parse_roster_line("🦜 Papoušek ara"), Some(line("🦜", "Papoušek ara")));
        assert_eq!(parse_roster_line("  🐘   Slon  "), Some(line("🐘", "Slon")));
        assert_eq!(parse_roster_line("🦁🐯 Kočkovité"), Some(line("🦁🐯", "Kočkovité")));
    }

    #[test]
    fn test_parse_line_without_emoji() {
        assert_eq!(
            parse_roster_line("Sova lesní"),
            Some(line(DEFAULT_ANIMAL_EMOJI, "Sova lesní"))
        );
        assert_eq!(parse_roster_line("   "), None);
    }

    #[test]
    fn test_emoji_without_space_still_splits() {
        assert_eq!(parse_roster_line("🐺Vlk"), Some(line("🐺", "Vlk")));
    }

    #[test]
    fn test_lone_emoji_becomes_name() {
        assert_eq!(parse_roster_line("🦁"), Some(line(DEFAULT_ANIMAL_EMOJI, "🦁")));
        assert_eq!(parse_roster_line("🛤️"), Some(line(DEFAULT_ANIMAL_EMOJI, "🛤️")));
    }

    #[test]
    fn test_bulk_add_skips_existing_names() {
        let mut roster = AnimalRoster::new();
        roster.add("Lev", "🦁").expect("add succeeds");

        let report = roster.add_bulk("🦁 Lev\n🐘 Slon");

        assert_eq!(report.added_count(), 1);
        assert_eq!(report.added[0].name, "Slon");
        assert_eq!(report.added[0].emoji, "🐘");
        assert_eq!(report.added[0].ordinal_id, 1);
        assert_eq!(report.duplicates, vec!["Lev".to_string()]);
        assert_eq!(roster.joined_names(), "Lev, Slon");
    }

    #[test]
    fn test_bulk_add_skips_duplicates_within_batch() {
        let mut roster = AnimalRoster::new();
        let report = roster.add_bulk("🦅 Orel\n\n   \nOrel\n🦉 Sova\n");
        assert_eq!(report.added_count(), 2);
        assert_eq!(roster.joined_names(), "Orel, Sova");
        assert_eq!(report.duplicates, vec!["Orel".to_string()]);
    }

    #[test]
    fn test_bulk_add_keeps_input_order() {
        let mut roster = AnimalRoster::new();
        roster.add_bulk("Zebra\nAntilopa\nBuvol");
        let names: Vec<&str> = roster.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["Zebra", "Antilopa", "Buvol"]);
    }
}
