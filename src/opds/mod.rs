//! The document graph handed to the normalizer, and the readers that build it
//! from raw bytes.

pub mod model;
pub mod parser;
pub mod rel;
pub mod search;

pub use model::{Category, FeedKind, OpdsEntry, OpdsFeed, OpdsLink, Person, Summary, TextKind};
pub use parser::parse_feed;
pub use search::parse_search_description;
