use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeStatus {
    Online,
    Any,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Online => "online",
            TradeStatus::Any => "any",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeQuery {
    pub query: QueryBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryBody {
    pub status: StatusFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Vec<StatGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<QueryFilters>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusFilter {
    pub option: String,
}

/// A set of stat filters that must all match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatGroup {
    #[serde(rename = "type")]
    pub group_type: String,
    pub filters: Vec<StatFilter>,
    pub disabled: bool,
}

impl StatGroup {
    pub fn and(filters: Vec<StatFilter>) -> Self {
        Self {
            group_type: "and".to_string(),
            filters,
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatFilter {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<StatValue>,
    pub disabled: bool,
}

impl StatFilter {
    /// Filter on the stat being present at all.
    pub fn presence(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: None,
            disabled: false,
        }
    }

    pub fn range(id: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            id: id.into(),
            value: Some(StatValue {
                min: Some(min),
                max: Some(max),
                option: None,
            }),
            disabled: false,
        }
    }

    pub fn option(id: impl Into<String>, option: u32) -> Self {
        Self {
            id: id.into(),
            value: Some(StatValue {
                min: None,
                max: None,
                option: Some(option),
            }),
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_amount")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_amount")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<u32>,
}

// The trade site expects `4`, not `4.0`, for whole numbers.
fn serialize_amount<S>(value: &Option<f64>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
            serializer.serialize_i64(*v as i64)
        }
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub misc_filters: Option<MiscFilters>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiscFilters {
    pub filters: MiscFilterSet,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiscFilterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrupted: Option<BoolOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fractured_item: Option<BoolOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoolOption {
    pub option: bool,
}

impl TradeQuery {
    /// Empty query for listed items, cheapest first.
    pub fn new(status: TradeStatus) -> Self {
        Self {
            query: QueryBody {
                status: StatusFilter {
                    option: status.as_str().to_string(),
                },
                name: None,
                item_type: None,
                stats: None,
                filters: Some(QueryFilters {
                    misc_filters: Some(MiscFilters::default()),
                }),
            },
            sort: Some(serde_json::json!({
                "price": "asc"
            })),
        }
    }

    pub fn stat_groups(&self) -> &[StatGroup] {
        self.query.stats.as_deref().unwrap_or(&[])
    }

    pub fn misc_filters_mut(&mut self) -> &mut MiscFilterSet {
        let filters = self.query.filters.get_or_insert_with(QueryFilters::default);
        &mut filters.misc_filters.get_or_insert_with(MiscFilters::default).filters
    }

    pub fn misc_filters(&self) -> Option<&MiscFilterSet> {
        self.query
            .filters
            .as_ref()
            .and_then(|f| f.misc_filters.as_ref())
            .map(|m| &m.filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_shape() {
        let query = TradeQuery::new(TradeStatus::Online);
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["query"]["status"]["option"], "online");
        assert_eq!(json["sort"]["price"], "asc");
        assert!(json["query"].get("stats").is_none());
        assert!(json["query"].get("name").is_none());
        assert_eq!(json["query"]["filters"]["misc_filters"]["filters"], serde_json::json!({}));
    }

    #[test]
    fn test_whole_numbers_serialize_as_integers() {
        let json = serde_json::to_string(&StatFilter::range("explicit.stat_1", 4.0, 4.0)).unwrap();
        assert_eq!(json, r#"{"id":"explicit.stat_1","value":{"min":4,"max":4},"disabled":false}"#);

        let json = serde_json::to_string(&StatFilter::range("explicit.stat_1", 1.5, 2.0)).unwrap();
        assert!(json.contains(r#""min":1.5"#));
        assert!(json.contains(r#""max":2"#));
    }

    #[test]
    fn test_option_filter_has_no_range() {
        let json = serde_json::to_value(StatFilter::option("enchant.stat_3948993189", 13)).unwrap();
        assert_eq!(json["value"], serde_json::json!({"option": 13}));
    }

    #[test]
    fn test_presence_filter_omits_value() {
        let json = serde_json::to_value(StatFilter::presence("explicit.stat_2")).unwrap();
        assert!(json.get("value").is_none());
        assert_eq!(json["disabled"], false);
    }

    #[test]
    fn test_stat_group_type_field() {
        let json = serde_json::to_value(StatGroup::and(vec![])).unwrap();
        assert_eq!(json["type"], "and");
    }

    #[test]
    fn test_query_round_trips_through_json() {
        let mut query = TradeQuery::new(TradeStatus::Any);
        query.query.name = Some("Watcher's Eye".to_string());
        query.misc_filters_mut().corrupted = Some(BoolOption { option: true });
        let json = serde_json::to_string(&query).unwrap();
        let back: TradeQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(back, query);
    }
}
