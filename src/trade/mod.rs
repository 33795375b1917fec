mod builder;
mod query;

pub use builder::{Archetype, QueryBuilder, DEFAULT_LEAGUE, TRADE_SEARCH_URL};
pub use query::{
    BoolOption,
    MiscFilterSet,
    MiscFilters,
    QueryBody,
    QueryFilters,
    StatFilter,
    StatGroup,
    StatValue,
    StatusFilter,
    TradeQuery,
    TradeStatus,
};
