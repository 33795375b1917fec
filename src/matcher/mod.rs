pub mod cluster_jewel;
mod mod_matcher;
pub mod rules;

pub use cluster_jewel::ClusterJewelHandler;
pub use mod_matcher::{normalize_text, similarity, FilterBuckets, ModMatcher, SIMILARITY_THRESHOLD};
pub use rules::{SearchScope, UniqueRule, UNIQUE_RULES};
