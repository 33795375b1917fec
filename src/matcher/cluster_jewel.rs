use crate::models::{ItemMod, ModType};
use crate::trade::StatFilter;

pub const CLUSTER_JEWEL_MARKER: &str = "cluster jewel";

pub const PASSIVE_COUNT_STAT: &str = "enchant.stat_3086156145";
pub const JEWEL_SOCKETS_STAT: &str = "enchant.stat_4079888060";
pub const PASSIVE_GRANT_STAT: &str = "enchant.stat_3948993189";

const GRANT_PREFIX: &str = "Added Small Passive Skills grant:";

// Trade-site option codes for the small passive grant. Pairs sharing a code are
// the same option on the site.
const PASSIVE_GRANT_OPTIONS: &[(&str, u32)] = &[
    ("Axe Attacks deal 12% increased Damage with Hits and Ailments", 1),
    ("Sword Attacks deal 12% increased Damage with Hits and Ailments", 1),
    ("Staff Attacks deal 12% increased Damage with Hits and Ailments", 2),
    ("Mace or Sceptre Attacks deal 12% increased Damage with Hits and Ailments", 2),
    ("Claw Attacks deal 12% increased Damage with Hits and Ailments", 3),
    ("Dagger Attacks deal 12% increased Damage with Hits and Ailments", 3),
    ("12% increased Damage with Bows", 4),
    ("12% increased Damage Over Time with Bow Skills", 4),
    ("Wand Attacks deal 12% increased Damage with Hits and Ailments", 5),
    ("12% increased Damage with Two Handed Weapons", 6),
    ("12% increased Attack Damage while Dual Wielding", 7),
    ("12% increased Attack Damage while holding a Shield", 8),
    ("10% increased Attack Damage", 9),
    ("10% increased Spell Damage", 10),
    ("10% increased Elemental Damage", 11),
    ("12% increased Physical Damage", 12),
    ("12% increased Fire Damage", 13),
    ("12% increased Lightning Damage", 14),
    ("12% increased Cold Damage", 15),
    ("12% increased Chaos Damage", 16),
    ("Minions deal 10% increased Damage", 17),
    ("12% increased Burning Damage", 18),
    ("12% increased Chaos Damage over Time", 19),
    ("12% increased Physical Damage over Time", 20),
    ("12% increased Cold Damage over Time", 21),
    ("10% increased Damage over Time", 22),
    ("10% increased Effect of Non-Damaging Ailments", 23),
    ("10% increased Damage while affected by a Herald", 26),
    ("Minions deal 10% increased Damage while you are affected by a Herald", 27),
    ("Exerted Attacks deal 20% increased Damage", 28),
];

/// What the enchant lines of a cluster jewel say about its shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterEnchant {
    pub passive_count: Option<f64>,
    pub jewel_sockets: Option<f64>,
    pub passive_grant: Option<String>,
}

pub struct ClusterJewelHandler;

impl ClusterJewelHandler {
    pub fn is_cluster_jewel(base_type: &str) -> bool {
        base_type.to_lowercase().contains(CLUSTER_JEWEL_MARKER)
    }

    pub fn grant_option(grant: &str) -> Option<u32> {
        PASSIVE_GRANT_OPTIONS
            .iter()
            .find(|(text, _)| *text == grant)
            .map(|(_, code)| *code)
    }

    pub fn parse_enchants(mods: &[ItemMod]) -> ClusterEnchant {
        let mut enchant = ClusterEnchant::default();

        for item_mod in mods.iter().filter(|m| m.mod_type == ModType::Enchant) {
            let text = item_mod.text.as_str();
            if text.starts_with("Adds") && text.contains("Passive Skills") {
                enchant.passive_count = item_mod.first_value();
            } else if text.contains("Added Passive Skills are Jewel Sockets") {
                enchant.jewel_sockets = item_mod.first_value();
            } else if let Some(grant) = text.strip_prefix(GRANT_PREFIX) {
                enchant.passive_grant = Some(grant.trim().to_string());
            }
        }

        enchant
    }

    /// Synthetic enchant filters for a cluster jewel; empty for anything else.
    pub fn create_filters(base_type: &str, mods: &[ItemMod]) -> Vec<StatFilter> {
        if !Self::is_cluster_jewel(base_type) {
            return Vec::new();
        }

        let enchant = Self::parse_enchants(mods);
        let mut filters = Vec::new();

        if let Some(count) = enchant.passive_count {
            filters.push(StatFilter::range(PASSIVE_COUNT_STAT, count, count));
        }

        if let Some(sockets) = enchant.jewel_sockets {
            filters.push(StatFilter::range(JEWEL_SOCKETS_STAT, sockets, sockets));
        }

        if let Some(grant) = enchant.passive_grant {
            match Self::grant_option(&grant) {
                Some(code) => filters.push(StatFilter::option(PASSIVE_GRANT_STAT, code)),
                None => tracing::debug!(grant = %grant, "unknown cluster jewel grant, skipping"),
            }
        }

        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enchant(text: &str) -> ItemMod {
        ItemMod::new(text, ModType::Enchant, crate::parser::ItemParser::extract_numbers(text))
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        assert!(ClusterJewelHandler::is_cluster_jewel("Large Cluster Jewel"));
        assert!(ClusterJewelHandler::is_cluster_jewel("small CLUSTER jewel"));
        assert!(!ClusterJewelHandler::is_cluster_jewel("Leather Belt"));
        assert!(!ClusterJewelHandler::is_cluster_jewel("Prismatic Jewel"));
    }

    #[test]
    fn test_full_enchant_set() {
        let mods = vec![
            enchant("Adds 8 Passive Skills"),
            enchant("2 Added Passive Skills are Jewel Sockets"),
            enchant("Added Small Passive Skills grant: 12% increased Fire Damage"),
        ];
        let filters = ClusterJewelHandler::create_filters("Large Cluster Jewel", &mods);
        assert_eq!(
            filters,
            vec![
                StatFilter::range(PASSIVE_COUNT_STAT, 8.0, 8.0),
                StatFilter::range(JEWEL_SOCKETS_STAT, 2.0, 2.0),
                StatFilter::option(PASSIVE_GRANT_STAT, 13),
            ]
        );
    }

    #[test]
    fn test_unknown_grant_is_dropped() {
        let mods = vec![
            enchant("Adds 4 Passive Skills"),
            enchant("Added Small Passive Skills grant: 5% increased Hugging"),
        ];
        let filters = ClusterJewelHandler::create_filters("Medium Cluster Jewel", &mods);
        assert_eq!(filters, vec![StatFilter::range(PASSIVE_COUNT_STAT, 4.0, 4.0)]);
    }

    #[test]
    fn test_only_enchant_mods_are_considered() {
        let mods = vec![ItemMod::new("Adds 4 Passive Skills", ModType::Explicit, vec![4.0])];
        assert!(ClusterJewelHandler::create_filters("Medium Cluster Jewel", &mods).is_empty());
    }

    #[test]
    fn test_non_cluster_base_yields_nothing() {
        let mods = vec![enchant("Adds 4 Passive Skills")];
        for base in ["Leather Belt", "Cobalt Jewel", "Two-Stone Ring", ""] {
            assert!(ClusterJewelHandler::create_filters(base, &mods).is_empty());
        }
    }

    #[test]
    fn test_shared_grant_codes() {
        let axe = "Axe Attacks deal 12% increased Damage with Hits and Ailments";
        let sword = "Sword Attacks deal 12% increased Damage with Hits and Ailments";
        assert_eq!(
            ClusterJewelHandler::grant_option(axe),
            ClusterJewelHandler::grant_option(sword)
        );
        assert_eq!(
            ClusterJewelHandler::grant_option("Exerted Attacks deal 20% increased Damage"),
            Some(28)
        );
    }
}
