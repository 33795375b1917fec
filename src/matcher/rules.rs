//! Per-item matching rules for unique jewels.
//!
//! Most uniques are found by name alone. The ones listed here have modifiers
//! that roll between copies, so a subset of their lines is turned into stat
//! filters. Adding support for another unique means adding a row to
//! [`UNIQUE_RULES`].

use crate::models::{ItemMod, ModType};

/// Which lines of the item a rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModSelector {
    StartsWith(&'static str),
    EndsWith(&'static str),
    Contains(&'static str),
    /// Case-insensitive; the needle must be lowercase.
    ContainsIgnoreCase(&'static str),
    OfType(ModType),
}

impl ModSelector {
    pub fn selects(&self, item_mod: &ItemMod) -> bool {
        let text = item_mod.text.as_str();
        match self {
            ModSelector::StartsWith(prefix) => text.starts_with(prefix),
            ModSelector::EndsWith(suffix) => text.ends_with(suffix),
            ModSelector::Contains(needle) => text.contains(needle),
            ModSelector::ContainsIgnoreCase(needle) => text.to_lowercase().contains(needle),
            ModSelector::OfType(mod_type) => item_mod.mod_type == *mod_type,
        }
    }
}

/// Which catalog groups are searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Groups permitted for the mod's own type.
    ByModType,
    /// The explicit group only, whatever the line was tagged as.
    ExplicitOnly,
}

/// What the resulting filter constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// min/max from the numbers on the line.
    Range,
    /// Only that the stat is present.
    Presence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Catalog { scope: SearchScope, shape: ValueShape },
    /// Resolve the allocated notable against the partner jewel's option list.
    PairedOption { partner_id: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Fixed(ModType),
    ModType,
}

impl Bucket {
    pub fn for_mod(&self, item_mod: &ItemMod) -> ModType {
        match self {
            Bucket::Fixed(mod_type) => *mod_type,
            Bucket::ModType => item_mod.mod_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueRule {
    pub name: &'static str,
    pub selector: ModSelector,
    pub resolution: Resolution,
    pub bucket: Bucket,
}

const BY_TYPE_RANGE: Resolution = Resolution::Catalog {
    scope: SearchScope::ByModType,
    shape: ValueShape::Range,
};

pub const UNIQUE_RULES: &[UniqueRule] = &[
    UniqueRule {
        name: "Megalomaniac",
        selector: ModSelector::StartsWith("1 Added Passive Skill is"),
        resolution: Resolution::Catalog {
            scope: SearchScope::ExplicitOnly,
            shape: ValueShape::Range,
        },
        bucket: Bucket::Fixed(ModType::Explicit),
    },
    UniqueRule {
        name: "Watcher's Eye",
        selector: ModSelector::ContainsIgnoreCase("while affected by"),
        resolution: BY_TYPE_RANGE,
        bucket: Bucket::ModType,
    },
    UniqueRule {
        name: "Forbidden Flesh",
        selector: ModSelector::EndsWith("modifier on Forbidden Flame"),
        resolution: Resolution::PairedOption {
            partner_id: "explicit.stat_2460506030",
        },
        bucket: Bucket::Fixed(ModType::Explicit),
    },
    UniqueRule {
        name: "Forbidden Flame",
        selector: ModSelector::EndsWith("modifier on Forbidden Flesh"),
        resolution: Resolution::PairedOption {
            partner_id: "explicit.stat_1190333629",
        },
        bucket: Bucket::Fixed(ModType::Explicit),
    },
    UniqueRule {
        name: "Impossible Escape",
        selector: ModSelector::Contains("Passives in Radius"),
        resolution: BY_TYPE_RANGE,
        bucket: Bucket::ModType,
    },
    UniqueRule {
        name: "The Balance of Terror",
        selector: ModSelector::ContainsIgnoreCase("if you've cast"),
        resolution: Resolution::Catalog {
            scope: SearchScope::ByModType,
            shape: ValueShape::Presence,
        },
        bucket: Bucket::ModType,
    },
    UniqueRule {
        name: "Sublime Vision",
        selector: ModSelector::ContainsIgnoreCase("while affected by"),
        resolution: BY_TYPE_RANGE,
        bucket: Bucket::ModType,
    },
    UniqueRule {
        name: "Split Personality",
        selector: ModSelector::OfType(ModType::Explicit),
        resolution: BY_TYPE_RANGE,
        bucket: Bucket::ModType,
    },
    UniqueRule {
        name: "The Light of Meaning",
        selector: ModSelector::Contains("Passive Skills in Radius also grant"),
        resolution: BY_TYPE_RANGE,
        bucket: Bucket::ModType,
    },
];

pub fn rules_for(name: &str) -> impl Iterator<Item = &'static UniqueRule> + '_ {
    UNIQUE_RULES.iter().filter(move |rule| rule.name == name)
}

/// Names of the uniques that get stat filters beyond their name.
pub fn supported_uniques() -> impl Iterator<Item = &'static str> {
    UNIQUE_RULES.iter().map(|rule| rule.name)
}
