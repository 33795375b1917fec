use crate::errors::{ConverterError, Result};
use crate::matcher::{ClusterJewelHandler, FilterBuckets};
use crate::models::ParsedItem;

use super::query::{BoolOption, StatGroup, TradeQuery, TradeStatus};

pub const TRADE_SEARCH_URL: &str = "https://www.pathofexile.com/trade/search";
pub const DEFAULT_LEAGUE: &str = "Settlers";

const MEGALOMANIAC: &str = "Megalomaniac";

/// The item families a query can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    /// Unique or unknown-rarity item, searched by name and base type.
    Unique,
    /// Non-unique cluster jewel, searched by its enchant and explicit stats.
    ClusterJewel,
}

impl Archetype {
    pub fn of(item: &ParsedItem) -> Option<Self> {
        if item.is_unique_or_unknown() {
            Some(Archetype::Unique)
        } else if ClusterJewelHandler::is_cluster_jewel(&item.base_type)
            && item.name != MEGALOMANIAC
        {
            Some(Archetype::ClusterJewel)
        } else {
            None
        }
    }
}

pub struct QueryBuilder;

impl QueryBuilder {
    pub fn build_query(item: &ParsedItem, buckets: &FilterBuckets) -> Result<TradeQuery> {
        let archetype = Archetype::of(item).ok_or_else(|| {
            ConverterError::UnsupportedItem(
                "Only Unique/Unknown items and Cluster Jewels are supported".to_string(),
            )
        })?;

        let mut query = TradeQuery::new(TradeStatus::Online);
        let mut stats = Vec::new();

        match archetype {
            Archetype::Unique => {
                query.query.name = Some(item.name.clone());
                query.query.item_type = Some(item.base_type.clone());

                if !buckets.explicit.is_empty() {
                    stats.push(StatGroup::and(buckets.explicit.clone()));
                }

                if item.is_corrupted() {
                    if !buckets.implicit.is_empty() {
                        stats.push(StatGroup::and(buckets.implicit.clone()));
                    }
                    query.misc_filters_mut().corrupted = Some(BoolOption { option: true });
                }
            }
            Archetype::ClusterJewel => {
                if !buckets.enchant.is_empty() {
                    stats.push(StatGroup::and(buckets.enchant.clone()));
                }

                let explicit: Vec<_> = buckets
                    .explicit
                    .iter()
                    .chain(buckets.fractured.iter())
                    .cloned()
                    .collect();
                if !explicit.is_empty() {
                    stats.push(StatGroup::and(explicit));
                }

                if item.is_fractured() {
                    query.misc_filters_mut().fractured_item = Some(BoolOption { option: true });
                }
            }
        }

        if !stats.is_empty() {
            query.query.stats = Some(stats);
        }

        tracing::debug!(?archetype, groups = query.stat_groups().len(), "built trade query");
        Ok(query)
    }

    pub fn build_url(query: &TradeQuery, league: &str) -> Result<String> {
        let json = serde_json::to_string(query)?;
        Ok(format!(
            "{}/{}?q={}",
            TRADE_SEARCH_URL,
            urlencoding::encode(league),
            urlencoding::encode(&json)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trade::StatFilter;

    fn unique(name: &str, base: &str) -> ParsedItem {
        ParsedItem {
            rarity: "Unique".to_string(),
            name: name.to_string(),
            base_type: base.to_string(),
            ..ParsedItem::default()
        }
    }

    #[test]
    fn test_unsupported_item_is_rejected() {
        let item = ParsedItem {
            rarity: "Rare".to_string(),
            name: "Corruption Cord".to_string(),
            base_type: "Leather Belt".to_string(),
            ..ParsedItem::default()
        };
        let err = QueryBuilder::build_query(&item, &FilterBuckets::default()).unwrap_err();
        assert!(matches!(err, ConverterError::UnsupportedItem(_)));
    }

    #[test]
    fn test_unique_without_filters_is_name_search() {
        let query = QueryBuilder::build_query(
            &unique("Headhunter", "Leather Belt"),
            &FilterBuckets::default(),
        )
        .unwrap();
        assert_eq!(query.query.name.as_deref(), Some("Headhunter"));
        assert_eq!(query.query.item_type.as_deref(), Some("Leather Belt"));
        assert!(query.query.stats.is_none());
        assert_eq!(query.misc_filters().unwrap().corrupted, None);
    }

    #[test]
    fn test_corrupted_unique_adds_implicit_group() {
        let mut item = unique("Split Personality", "Crimson Jewel");
        item.corrupted = Some(true);
        let buckets = FilterBuckets {
            explicit: vec![StatFilter::range("explicit.stat_4080418644", 5.0, 5.0)],
            implicit: vec![StatFilter::range("implicit.stat_3299347043", 8.0, 8.0)],
            ..FilterBuckets::default()
        };
        let query = QueryBuilder::build_query(&item, &buckets).unwrap();
        let groups = query.stat_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].filters, buckets.explicit);
        assert_eq!(groups[1].filters, buckets.implicit);
        assert_eq!(query.misc_filters().unwrap().corrupted, Some(BoolOption { option: true }));
    }

    #[test]
    fn test_implicits_ignored_when_not_corrupted() {
        let item = unique("Watcher's Eye", "Prismatic Jewel");
        let buckets = FilterBuckets {
            implicit: vec![StatFilter::presence("implicit.stat_1")],
            ..FilterBuckets::default()
        };
        let query = QueryBuilder::build_query(&item, &buckets).unwrap();
        assert!(query.query.stats.is_none());
    }

    #[test]
    fn test_cluster_jewel_groups_and_fractured_flag() {
        let item = ParsedItem {
            rarity: "Rare".to_string(),
            name: "Havoc Spark".to_string(),
            base_type: "Large Cluster Jewel".to_string(),
            fractured: Some(true),
            ..ParsedItem::default()
        };
        let buckets = FilterBuckets {
            enchant: vec![StatFilter::range("enchant.stat_3086156145", 8.0, 8.0)],
            explicit: vec![StatFilter::presence("explicit.stat_a")],
            fractured: vec![StatFilter::presence("fractured.stat_b")],
            ..FilterBuckets::default()
        };
        let query = QueryBuilder::build_query(&item, &buckets).unwrap();
        assert!(query.query.name.is_none());
        assert!(query.query.item_type.is_none());

        let groups = query.stat_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].filters.len(), 1);
        let ids: Vec<_> = groups[1].filters.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["explicit.stat_a", "fractured.stat_b"]);
        assert_eq!(query.misc_filters().unwrap().fractured_item, Some(BoolOption { option: true }));
    }

    #[test]
    fn test_megalomaniac_is_built_as_unique() {
        let item = unique("Megalomaniac", "Medium Cluster Jewel");
        assert_eq!(Archetype::of(&item), Some(Archetype::Unique));
    }

    #[test]
    fn test_url_encodes_league_and_query() {
        let query = QueryBuilder::build_query(
            &unique("Watcher's Eye", "Prismatic Jewel"),
            &FilterBuckets::default(),
        )
        .unwrap();
        let url = QueryBuilder::build_url(&query, "Hardcore Settlers").unwrap();
        assert!(url
            .starts_with("https://www.pathofexile.com/trade/search/Hardcore%20Settlers?q=%7B"));

        let encoded = url.split("?q=").nth(1).unwrap();
        let decoded = urlencoding::decode(encoded).unwrap();
        let back: TradeQuery = serde_json::from_str(&decoded).unwrap();
        assert_eq!(back, query);
    }
}
