pub mod catalog;
pub mod item;
pub mod league;

pub use catalog::{
    ModCatalog,
    ModGroup,
    ModOption,
    ModOptionList,
    PoeMod,
};

pub use item::{
    ItemMod,
    ModType,
    ParsedItem,
    Requirements,
};

pub use league::{
    League,
    LeagueList,
    Realm,
};
