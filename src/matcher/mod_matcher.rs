use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::cluster_jewel::ClusterJewelHandler;
use super::rules::{self, Resolution, SearchScope, UniqueRule, ValueShape};
use crate::models::{ItemMod, ModCatalog, ModType, ParsedItem, PoeMod};
use crate::parser::NUMBER_RE;
use crate::trade::StatFilter;

/// Minimum word-overlap score for a catalog entry to count as a match.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

const MEGALOMANIAC: &str = "Megalomaniac";

static ALLOCATES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Allocates (.+) if you have").unwrap());

/// Lowercases, replaces numerals with `#` and collapses whitespace.
pub fn normalize_text(text: &str) -> String {
    let lower = text.to_lowercase();
    let masked = NUMBER_RE.replace_all(&lower, "#");
    masked.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Jaccard index over the normalized word sets; 1.0 on exact normalized equality.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize_text(a);
    let b = normalize_text(b);
    if a == b {
        return 1.0;
    }

    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();
    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    words_a.intersection(&words_b).count() as f64 / union as f64
}

/// Matched filters keyed by the modifier category they are reported under.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterBuckets {
    pub implicit: Vec<StatFilter>,
    pub enchant: Vec<StatFilter>,
    pub explicit: Vec<StatFilter>,
    pub crafted: Vec<StatFilter>,
    pub fractured: Vec<StatFilter>,
}

impl FilterBuckets {
    pub fn get(&self, mod_type: ModType) -> &[StatFilter] {
        match mod_type {
            ModType::Implicit => &self.implicit,
            ModType::Enchant => &self.enchant,
            ModType::Explicit => &self.explicit,
            ModType::Crafted => &self.crafted,
            ModType::Fractured => &self.fractured,
        }
    }

    pub fn get_mut(&mut self, mod_type: ModType) -> &mut Vec<StatFilter> {
        match mod_type {
            ModType::Implicit => &mut self.implicit,
            ModType::Enchant => &mut self.enchant,
            ModType::Explicit => &mut self.explicit,
            ModType::Crafted => &mut self.crafted,
            ModType::Fractured => &mut self.fractured,
        }
    }

    pub fn is_empty(&self) -> bool {
        ModType::ALL.iter().all(|t| self.get(*t).is_empty())
    }

    pub fn len(&self) -> usize {
        ModType::ALL.iter().map(|t| self.get(*t).len()).sum()
    }
}

pub struct ModMatcher<'a> {
    catalog: &'a ModCatalog,
}

impl<'a> ModMatcher<'a> {
    pub fn new(catalog: &'a ModCatalog) -> Self {
        Self { catalog }
    }

    fn group_allowed(group_id: &str, mod_type: ModType, scope: SearchScope) -> bool {
        match scope {
            SearchScope::ExplicitOnly => group_id == "explicit",
            SearchScope::ByModType => mod_type.catalog_groups().contains(&group_id),
        }
    }

    /// Best catalog entry for `item_mod`, if any scores above the threshold.
    pub fn find_matching_mod(
        &self,
        item_mod: &ItemMod,
        scope: SearchScope,
    ) -> Option<&'a PoeMod> {
        let masked = NUMBER_RE.replace_all(&item_mod.text, "#");
        let variants = [item_mod.text.as_str(), &*masked];

        let mut best: Option<&'a PoeMod> = None;
        let mut best_score = 0.0;

        for group in self.catalog.groups() {
            if !Self::group_allowed(&group.id, item_mod.mod_type, scope) {
                continue;
            }

            for candidate in &group.entries {
                let score = variants
                    .iter()
                    .map(|text| similarity(text, &candidate.text))
                    .fold(0.0, f64::max);

                if score > best_score && score > SIMILARITY_THRESHOLD {
                    best_score = score;
                    best = Some(candidate);
                }
            }
        }

        match best {
            Some(m) => tracing::debug!(
                line = %item_mod.text,
                mod_type = item_mod.mod_type.as_str(),
                id = %m.id,
                score = best_score,
                "matched mod"
            ),
            None => tracing::debug!(
                line = %item_mod.text,
                mod_type = item_mod.mod_type.as_str(),
                "no catalog match"
            ),
        }
        best
    }

    /// Range filter from the numbers on the line; a bare presence filter if it has none.
    pub fn build_filter(item_mod: &ItemMod, poe_mod: &PoeMod) -> StatFilter {
        match item_mod.values.as_deref() {
            Some(values) if !values.is_empty() => {
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                StatFilter::range(poe_mod.id.clone(), min, max)
            }
            _ => StatFilter::presence(poe_mod.id.clone()),
        }
    }

    /// Filter for an "Allocates X if you have the matching modifier on ..." line,
    /// resolved against the partner jewel's option list.
    pub fn paired_option_filter(
        &self,
        item_mod: &ItemMod,
        partner_id: &str,
    ) -> Option<StatFilter> {
        let captures = ALLOCATES_RE.captures(&item_mod.text)?;
        let skill_name = captures.get(1)?.as_str().trim();

        let partner = self.catalog.find_with_options(partner_id)?;
        let option = partner.find_option(skill_name)?;
        Some(StatFilter::option(partner_id, option.id))
    }

    fn resolve(&self, item_mod: &ItemMod, resolution: Resolution) -> Option<StatFilter> {
        match resolution {
            Resolution::Catalog { scope, shape } => {
                let poe_mod = self.find_matching_mod(item_mod, scope)?;
                Some(match shape {
                    ValueShape::Range => Self::build_filter(item_mod, poe_mod),
                    ValueShape::Presence => StatFilter::presence(poe_mod.id.clone()),
                })
            }
            Resolution::PairedOption { partner_id } => {
                self.paired_option_filter(item_mod, partner_id)
            }
        }
    }

    fn apply_rule(&self, item: &ParsedItem, rule: &UniqueRule, buckets: &mut FilterBuckets) {
        for item_mod in item.mods.iter().filter(|m| rule.selector.selects(m)) {
            if let Some(filter) = self.resolve(item_mod, rule.resolution) {
                buckets.get_mut(rule.bucket.for_mod(item_mod)).push(filter);
            }
        }
    }

    fn match_by_type<'m>(
        &self,
        mods: impl Iterator<Item = &'m ItemMod>,
        buckets: &mut FilterBuckets,
    ) {
        for item_mod in mods {
            if let Some(poe_mod) = self.find_matching_mod(item_mod, SearchScope::ByModType) {
                buckets
                    .get_mut(item_mod.mod_type)
                    .push(Self::build_filter(item_mod, poe_mod));
            }
        }
    }

    /// Turns the item's modifiers into filters, grouped by category.
    ///
    /// Unique and unknown-rarity items only get filters for the lines their
    /// rule selects (plus implicits when corrupted). Cluster jewels get their
    /// enchant filters plus every other line. Anything else yields no filters.
    pub fn match_all(&self, item: &ParsedItem) -> FilterBuckets {
        let mut buckets = FilterBuckets::default();

        if item.is_unique_or_unknown() {
            for rule in rules::rules_for(&item.name) {
                self.apply_rule(item, rule, &mut buckets);
            }

            if item.is_corrupted() {
                self.match_by_type(item.mods_of_type(ModType::Implicit), &mut buckets);
            }
            return buckets;
        }

        if ClusterJewelHandler::is_cluster_jewel(&item.base_type) && item.name != MEGALOMANIAC {
            buckets
                .enchant
                .extend(ClusterJewelHandler::create_filters(&item.base_type, &item.mods));

            self.match_by_type(
                item.mods.iter().filter(|m| m.mod_type != ModType::Enchant),
                &mut buckets,
            );
            return buckets;
        }

        buckets
    }
}
