//! Catalog feed parsing and storage.

pub mod matchers;
pub mod models;
pub mod parser;
pub mod store;

pub use matchers::{LineMatch, LineMatcher, MatcherSet};
pub use models::{CatalogEntry, ParsedCatalog, SkippedLine};
pub use parser::CatalogParser;
pub use store::CatalogStore;
