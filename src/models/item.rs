use serde::{Deserialize, Serialize};

/// Source of a modifier line, taken from the inline tag in the pasted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModType {
    Enchant,
    Implicit,
    #[default]
    Explicit,
    Crafted,
    Fractured,
}

impl ModType {
    pub const ALL: [ModType; 5] = [
        ModType::Enchant,
        ModType::Implicit,
        ModType::Explicit,
        ModType::Crafted,
        ModType::Fractured,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModType::Enchant => "enchant",
            ModType::Implicit => "implicit",
            ModType::Explicit => "explicit",
            ModType::Crafted => "crafted",
            ModType::Fractured => "fractured",
        }
    }

    /// The inline marker the game client appends to lines of this type.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            ModType::Enchant => Some("(enchant)"),
            ModType::Implicit => Some("(implicit)"),
            ModType::Crafted => Some("(crafted)"),
            ModType::Fractured => Some("(fractured)"),
            ModType::Explicit => None,
        }
    }

    /// Catalog groups a mod of this type may be matched against.
    pub fn catalog_groups(&self) -> &'static [&'static str] {
        match self {
            ModType::Implicit => &["implicit"],
            ModType::Enchant => &["enchant"],
            ModType::Crafted => &["crafted"],
            ModType::Fractured => &["fractured", "explicit"],
            ModType::Explicit => &["explicit", "pseudo"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMod {
    pub text: String,
    #[serde(rename = "type")]
    pub mod_type: ModType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
}

impl ItemMod {
    pub fn new(text: impl Into<String>, mod_type: ModType, values: Vec<f64>) -> Self {
        Self {
            text: text.into(),
            mod_type,
            values: if values.is_empty() { None } else { Some(values) },
        }
    }

    pub fn first_value(&self) -> Option<f64> {
        self.values.as_ref().and_then(|v| v.first().copied())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dexterity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedItem {
    pub rarity: String,
    pub name: String,
    pub base_type: String,
    pub item_level: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Requirements>,
    pub mods: Vec<ItemMod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrupted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fractured: Option<bool>,
}

impl ParsedItem {
    pub fn is_corrupted(&self) -> bool {
        self.corrupted.unwrap_or(false)
    }

    pub fn is_fractured(&self) -> bool {
        self.fractured.unwrap_or(false)
    }

    /// Unique items, and items the client could not identify, are searched by name.
    pub fn is_unique_or_unknown(&self) -> bool {
        matches!(self.rarity.as_str(), "Unique" | "Unknown")
    }

    pub fn mods_of_type(&self, mod_type: ModType) -> impl Iterator<Item = &ItemMod> {
        self.mods.iter().filter(move |m| m.mod_type == mod_type)
    }
}
