use std::sync::LazyLock;

use regex::Regex;

use crate::matcher::cluster_jewel::ClusterJewelHandler;
use crate::models::{ItemMod, ModType, ParsedItem, Requirements};

/// Line the game client uses between item sections.
pub const SEPARATOR: &str = "--------";

pub(crate) static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").unwrap());

// Stat-block and cosmetic lines that never describe a modifier.
const SKIPPED_PREFIXES: &[&str] = &[
    "Quality:",
    "Physical Damage:",
    "Elemental Damage:",
    "Critical Strike Chance:",
    "Attacks per Second:",
    "Weapon Range:",
    "Armour:",
    "Energy Shield:",
    "Evasion:",
    "Radius:",
    "Limited to:",
    "\"",
    "-",
];

const RARITY_WORDS: &[&str] = &["Unique", "Rare", "Magic", "Normal"];

// Lines that may follow a modifier but are never its second half.
const NON_CONTINUATION_PREFIXES: &[&str] = &[
    "Radius:",
    "Limited to:",
    "\"",
    "-",
    "Item Level:",
    "Requirements:",
    "Rarity:",
];

pub struct ItemParser;

impl ItemParser {
    /// Every numeral in `text`, left to right. Decimals are kept as decimals.
    pub fn extract_numbers(text: &str) -> Vec<f64> {
        NUMBER_RE
            .find_iter(text)
            .filter_map(|m| m.as_str().parse::<f64>().ok())
            .collect()
    }

    pub fn mod_type(text: &str, base_type: &str) -> ModType {
        for mod_type in [
            ModType::Enchant,
            ModType::Implicit,
            ModType::Crafted,
            ModType::Fractured,
        ] {
            if let Some(tag) = mod_type.tag() {
                if text.contains(tag) {
                    return mod_type;
                }
            }
        }

        // Cluster jewel headers are pasted without the tag by some clients.
        if ClusterJewelHandler::is_cluster_jewel(base_type)
            && ((text.starts_with("Adds") && text.contains("Passive Skills"))
                || text.contains("Added Passive Skills are Jewel Sockets")
                || text.contains("Added Small Passive Skills grant")
                || text.starts_with("1 Added Passive Skill is"))
        {
            return ModType::Enchant;
        }

        ModType::Explicit
    }

    pub fn clean_mod_text(text: &str) -> String {
        let mut cleaned = text.to_string();
        for mod_type in ModType::ALL {
            if let Some(tag) = mod_type.tag() {
                cleaned = cleaned.replace(tag, "");
            }
        }
        cleaned.trim().to_string()
    }

    fn is_skipped_line(line: &str, item: &ParsedItem) -> bool {
        SKIPPED_PREFIXES.iter().any(|p| line.starts_with(p))
            || line.contains("Sockets:")
            || RARITY_WORDS.contains(&line)
            || line == item.name
            || line == item.base_type
    }

    fn is_continuation(line: &str, item: &ParsedItem) -> bool {
        line != SEPARATOR
            && line != "Corrupted"
            && line != "Fractured Item"
            && !NON_CONTINUATION_PREFIXES.iter().any(|p| line.starts_with(p))
            && !Self::is_skipped_line(line, item)
            && Self::mod_type(line, &item.base_type) == ModType::Explicit
    }

    // Reads the leading integer of a `Key: value` line, ignoring suffixes like "(augmented)".
    fn leading_int(value: &str) -> Option<u32> {
        let digits: String = value
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    /// Parses clipboard text of a single item. Never fails; garbage in yields
    /// a record with default fields.
    pub fn parse_item(item_text: &str) -> ParsedItem {
        let lines: Vec<&str> = item_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let mut item = ParsedItem::default();
        let mut header_line_count = 0;
        let mut in_header = true;

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];

            if line == SEPARATOR {
                in_header = false;
                i += 1;
                continue;
            }

            if in_header {
                if let Some(rarity) = line.strip_prefix("Rarity:") {
                    item.rarity = rarity.trim().to_string();
                    header_line_count = 0;
                } else if header_line_count == 0 {
                    item.name = line.to_string();
                    header_line_count += 1;
                } else if header_line_count == 1 {
                    item.base_type = line.to_string();
                    header_line_count += 1;
                }
                i += 1;
                continue;
            }

            if let Some(level) = line.strip_prefix("Item Level:") {
                item.item_level = Self::leading_int(level).unwrap_or(0);
            } else if line.starts_with("Requirements:") {
                let mut requirements = Requirements::default();
                i += 1;
                while i < lines.len() && lines[i] != SEPARATOR {
                    let req_line = lines[i];
                    if let Some(v) = req_line.strip_prefix("Level:") {
                        requirements.level = Self::leading_int(v);
                    } else if let Some(v) = req_line.strip_prefix("Str:") {
                        requirements.strength = Self::leading_int(v);
                    } else if let Some(v) = req_line.strip_prefix("Dex:") {
                        requirements.dexterity = Self::leading_int(v);
                    } else if let Some(v) = req_line.strip_prefix("Int:") {
                        requirements.intelligence = Self::leading_int(v);
                    }
                    i += 1;
                }
                item.requirements = Some(requirements);
                // `i` now points at the separator (or past the end); let the loop see it.
                continue;
            } else if line == "Corrupted" {
                item.corrupted = Some(true);
            } else if line == "Fractured Item" {
                item.fractured = Some(true);
            } else if !Self::is_skipped_line(line, &item) {
                let mod_type = Self::mod_type(line, &item.base_type);
                let clean_text = Self::clean_mod_text(line);

                if !clean_text.is_empty() {
                    let next = lines.get(i + 1).copied();
                    match next {
                        Some(next_line) if Self::is_continuation(next_line, &item) => {
                            let full_text =
                                format!("{}\n{}", clean_text, Self::clean_mod_text(next_line));
                            let values = Self::extract_numbers(&full_text);
                            item.mods.push(ItemMod::new(full_text, mod_type, values));
                            i += 2;
                            continue;
                        }
                        _ => {
                            let values = Self::extract_numbers(&clean_text);
                            item.mods.push(ItemMod::new(clean_text, mod_type, values));
                        }
                    }
                }
            }

            i += 1;
        }

        tracing::debug!(
            name = %item.name,
            base_type = %item.base_type,
            mods = item.mods.len(),
            "parsed item text"
        );
        item
    }
}
