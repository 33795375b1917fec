mod item_parser;

pub(crate) use item_parser::NUMBER_RE;
pub use item_parser::{ItemParser, SEPARATOR};
