//! Turns clipboard text of a Path of Exile item into a trade site search.
//!
//! The pipeline is parse ([`parser::ItemParser`]) → match against the stat
//! catalog ([`matcher::ModMatcher`]) → assemble ([`trade::QueryBuilder`]).
//! [`PoeConverter`] wires the three together.

pub mod config;
pub mod converter;
pub mod data;
pub mod errors;
pub mod matcher;
pub mod models;
pub mod parser;
pub mod trade;

pub use converter::PoeConverter;
pub use errors::{ConverterError, Result};
