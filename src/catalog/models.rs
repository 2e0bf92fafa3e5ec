//! Data models for catalog entries and parse results.

use serde::{Deserialize, Serialize};

/// A single product entry in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Product name
    pub name: String,
    /// Original price in USD (absent for entries added without a price)
    pub price_usd: Option<f64>,
    /// Category the entry belongs to (may be empty)
    #[serde(default)]
    pub category: String,
    /// Localized sale price, set by the price calculator
    pub final_price_local: Option<f64>,
}

impl CatalogEntry {
    /// Creates an entry as produced by the parser.
    pub fn new(name: impl Into<String>, price_usd: f64, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price_usd: Some(price_usd),
            category: category.into(),
            final_price_local: None,
        }
    }

    /// Creates a manually added entry without a price.
    pub fn unpriced(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price_usd: None,
            category: category.into(),
            final_price_local: None,
        }
    }

    /// Returns true if this entry carries a USD price.
    pub fn has_price(&self) -> bool {
        self.price_usd.is_some()
    }
}

/// A line the parser could not turn into an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    /// 1-based line number in the raw input
    pub line_number: usize,
    /// The trimmed line content
    pub content: String,
    /// Why the line was dropped
    pub reason: String,
}

/// Result of one parse call: entries in source order plus skip diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ParsedCatalog {
    /// Parsed entries, in source line order
    pub entries: Vec<CatalogEntry>,
    /// Lines that matched nothing or carried an unparseable price
    pub skipped: Vec<SkippedLine>,
}

impl ParsedCatalog {
    /// Creates an empty parse result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of parsed entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries were parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_new() {
        let entry = CatalogEntry::new("IPHONE 15", 625.0, "CELULARES");
        assert_eq!(entry.name, "IPHONE 15");
        assert_eq!(entry.price_usd, Some(625.0));
        assert_eq!(entry.category, "CELULARES");
        assert!(entry.final_price_local.is_none());
        assert!(entry.has_price());
    }

    #[test]
    fn test_entry_unpriced() {
        let entry = CatalogEntry::unpriced("Mystery Box", "");
        assert!(entry.price_usd.is_none());
        assert!(!entry.has_price());
        assert!(entry.final_price_local.is_none());
    }

    #[test]
    fn test_entry_serde_wire_names() {
        let entry = CatalogEntry::new("Test", 100.0, "Otros");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"priceUsd\""));
        assert!(json.contains("\"finalPriceLocal\""));
        assert!(json.contains("\"category\""));

        let parsed: CatalogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_entry_serde_missing_optionals() {
        let parsed: CatalogEntry = serde_json::from_str(r#"{"name":"Bare"}"#).unwrap();
        assert_eq!(parsed.name, "Bare");
        assert!(parsed.price_usd.is_none());
        assert_eq!(parsed.category, "");
        assert!(parsed.final_price_local.is_none());
    }

    #[test]
    fn test_parsed_catalog_counts() {
        let mut parsed = ParsedCatalog::new();
        assert!(parsed.is_empty());
        assert_eq!(parsed.count(), 0);

        parsed.entries.push(CatalogEntry::new("A", 1.0, ""));
        assert!(!parsed.is_empty());
        assert_eq!(parsed.count(), 1);
    }
}
