use crate::errors::Result;
use crate::matcher::{FilterBuckets, ModMatcher};
use crate::models::{ModCatalog, ParsedItem};
use crate::parser::ItemParser;
use crate::trade::{QueryBuilder, TradeQuery};

/// Item text in, trade search out. Holds nothing but a borrow of the catalog,
/// so one catalog can back any number of converters.
pub struct PoeConverter<'a> {
    matcher: ModMatcher<'a>,
}

impl<'a> PoeConverter<'a> {
    pub fn new(catalog: &'a ModCatalog) -> Self {
        Self {
            matcher: ModMatcher::new(catalog),
        }
    }

    pub fn parse_item_text(&self, item_text: &str) -> ParsedItem {
        ItemParser::parse_item(item_text)
    }

    pub fn match_mods(&self, item: &ParsedItem) -> FilterBuckets {
        self.matcher.match_all(item)
    }

    pub fn convert_to_query(&self, item_text: &str) -> Result<TradeQuery> {
        let item = self.parse_item_text(item_text);
        let buckets = self.match_mods(&item);
        QueryBuilder::build_query(&item, &buckets)
    }

    pub fn convert_to_trade_url(&self, item_text: &str, league: &str) -> Result<String> {
        let query = self.convert_to_query(item_text)?;
        QueryBuilder::build_url(&query, league)
    }
}
