mod trade_data_loader;

pub use trade_data_loader::{TradeDataLoader, LEAGUES_API_URL, STATS_API_URL};
