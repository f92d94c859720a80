//! # tuvung-topics
//!
//! Static topic data consumed by the schema evolution log: the fixed
//! English→Vietnamese topic label mapping, the word-group tables used for
//! the one-time bulk reclassification, and the seed vocabulary list.

pub mod groups;
pub mod seeds;
pub mod vietnamese;

pub use groups::{classify, reclassification_groups, TopicGroup};
pub use seeds::{seed_vocabulary, SeedWord};
pub use vietnamese::{topic_vietnamese, vietnamese_label};
