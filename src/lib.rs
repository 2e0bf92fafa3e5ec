//! catalog-pricer - Catalog feed importer with tiered-markup localized pricing
//!
//! Parses pasted product feeds (category markers, bullet product lines, and a
//! CSV fallback) into catalog entries, then computes localized sale prices
//! from a currency rate and a tiered profit-rule table.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod format;
pub mod pricing;
pub mod rate;
pub mod store;

pub use catalog::{CatalogEntry, CatalogParser, CatalogStore, ParsedCatalog, SkippedLine};
pub use config::Config;
pub use pricing::{resolve_markup, round2, PriceContext, ProfitRule, RuleBook, RuleDraft, RuleError};
pub use rate::{FixedRate, RateClient, RateSource};
pub use store::AppState;
