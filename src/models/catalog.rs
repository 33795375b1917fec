use serde::{Deserialize, Serialize};

/// One selectable value of a categorical stat (e.g. a notable passive name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModOption {
    pub id: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModOptionList {
    pub options: Vec<ModOption>,
}

/// A canonical stat template as published by the trade site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoeMod {
    pub id: String,
    pub text: String,
    #[serde(rename = "type", default)]
    pub mod_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<ModOptionList>,
}

impl PoeMod {
    pub fn find_option(&self, text: &str) -> Option<&ModOption> {
        self.option
            .as_ref()?
            .options
            .iter()
            .find(|opt| opt.text == text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModGroup {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub entries: Vec<PoeMod>,
}

/// The full stat catalog. Loaded once and only ever read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModCatalog {
    pub result: Vec<ModGroup>,
}

impl ModCatalog {
    pub fn from_json(json: &str) -> crate::errors::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn groups(&self) -> impl Iterator<Item = &ModGroup> {
        self.result.iter()
    }

    /// First entry with this id that carries an option list.
    pub fn find_with_options(&self, id: &str) -> Option<&PoeMod> {
        self.result
            .iter()
            .flat_map(|g| g.entries.iter())
            .find(|m| m.id == id && m.option.is_some())
    }

    pub fn entry_count(&self) -> usize {
        self.result.iter().map(|g| g.entries.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "result": [
            {
                "id": "explicit",
                "label": "Explicit",
                "entries": [
                    {"id": "explicit.stat_3299347043", "text": "# to maximum Life", "type": "explicit"},
                    {
                        "id": "explicit.stat_2460506030",
                        "text": "Allocates # if you have the matching modifier on Forbidden Flame",
                        "type": "explicit",
                        "option": {"options": [{"id": 1, "text": "Rampart"}, {"id": 2, "text": "Avatar of Fire"}]}
                    }
                ]
            },
            {"id": "pseudo", "label": "Pseudo", "entries": []}
        ]
    }"##;

    #[test]
    fn test_catalog_deserializes_trade_schema() {
        let catalog = ModCatalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.result.len(), 2);
        assert_eq!(catalog.entry_count(), 2);
        let labels: Vec<_> = catalog.groups().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Explicit", "Pseudo"]);
        // Templates start with `#` placeholders and must come through untouched.
        assert_eq!(catalog.result[0].entries[0].text, "# to maximum Life");
    }

    #[test]
    fn test_find_option_is_exact() {
        let catalog = ModCatalog::from_json(SAMPLE).unwrap();
        let entry = catalog.find_with_options("explicit.stat_2460506030").unwrap();
        assert_eq!(entry.find_option("Rampart").map(|o| o.id), Some(1));
        assert!(entry.find_option("rampart").is_none());
        assert!(catalog.find_with_options("explicit.stat_3299347043").is_none());
    }
}
