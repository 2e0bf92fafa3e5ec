//! Parser for raw catalog feed text.

use crate::catalog::matchers::{LineMatch, MatcherSet};
use crate::catalog::models::{CatalogEntry, ParsedCatalog, SkippedLine};
use tracing::{debug, warn};

/// Parser for pasted catalog feeds.
///
/// Never fails: unusable input yields an empty or partial result plus
/// diagnostics for every dropped line.
pub struct CatalogParser {
    matchers: MatcherSet,
}

impl CatalogParser {
    /// Creates a parser with the standard feed grammar.
    pub fn new() -> Self {
        Self { matchers: MatcherSet::default() }
    }

    /// Parses raw feed text into entries in source line order.
    pub fn parse(&self, raw_text: &str) -> ParsedCatalog {
        let text = match unwrap_json_payload(raw_text) {
            Some(inner) => inner,
            None => raw_text.to_string(),
        };

        let mut parsed = ParsedCatalog::new();
        let mut current_category = String::new();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.matchers.try_match(line) {
                Some(LineMatch::Category(name)) => {
                    current_category = name;
                }
                Some(LineMatch::Product { name, price_usd, category }) => {
                    let category = category.unwrap_or_else(|| current_category.clone());
                    parsed.entries.push(CatalogEntry::new(name, price_usd, category));
                }
                Some(LineMatch::Invalid { reason }) => {
                    parsed.skipped.push(SkippedLine {
                        line_number: idx + 1,
                        content: line.to_string(),
                        reason,
                    });
                }
                None => {
                    warn!("No pattern matched line {}: {}", idx + 1, line);
                    parsed.skipped.push(SkippedLine {
                        line_number: idx + 1,
                        content: line.to_string(),
                        reason: "no matching pattern".to_string(),
                    });
                }
            }
        }

        debug!("Parsed {} entries ({} lines skipped)", parsed.count(), parsed.skipped.len());

        parsed
    }
}

impl Default for CatalogParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the `data` field when the input is a JSON wrapper object.
///
/// Returns None when the input is not JSON, does not parse, or has no
/// string `data` field; the caller then treats the input as plain text.
fn unwrap_json_payload(raw_text: &str) -> Option<String> {
    if !raw_text.trim_start().starts_with('{') {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(raw_text) {
        Ok(value) => value.get("data").and_then(|d| d.as_str()).map(String::from),
        Err(e) => {
            debug!("Input looked like JSON but did not parse, treating as plain text: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_feed() {
        let parser = CatalogParser::new();
        let input = "► CELULARES\n▪️IPHONE 15 128 GB - $ 625.0\n► Laptops\n▪️MACBOOK AIR M1 - $ 900.5\nSimple Product, 100, Otros";

        let parsed = parser.parse(input);
        assert_eq!(parsed.count(), 3);
        assert!(parsed.skipped.is_empty());

        assert_eq!(parsed.entries[0].name, "IPHONE 15 128 GB");
        assert_eq!(parsed.entries[0].price_usd, Some(625.0));
        assert_eq!(parsed.entries[0].category, "CELULARES");

        assert_eq!(parsed.entries[1].name, "MACBOOK AIR M1");
        assert_eq!(parsed.entries[1].price_usd, Some(900.5));
        assert_eq!(parsed.entries[1].category, "Laptops");

        assert_eq!(parsed.entries[2].name, "Simple Product");
        assert_eq!(parsed.entries[2].price_usd, Some(100.0));
        assert_eq!(parsed.entries[2].category, "Otros");
    }

    #[test]
    fn test_parse_crlf_lines() {
        let parser = CatalogParser::new();
        let parsed = parser.parse("► A\r\n▪️One - $ 10\r\n▪️Two - $ 20");
        assert_eq!(parsed.count(), 2);
        assert_eq!(parsed.entries[0].category, "A");
        assert_eq!(parsed.entries[1].category, "A");
    }

    #[test]
    fn test_parse_blank_lines_skipped() {
        let parser = CatalogParser::new();
        let parsed = parser.parse("\n   \n► A\n\n▪️One - $ 10\n   \n");
        assert_eq!(parsed.count(), 1);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_parse_category_state_spans_whole_call() {
        let parser = CatalogParser::new();
        // The fallback line without its own category inherits the current one
        let parsed = parser.parse("► Perifericos\n▪️Mouse - $ 15\nTeclado, 35");
        assert_eq!(parsed.count(), 2);
        assert_eq!(parsed.entries[1].name, "Teclado");
        assert_eq!(parsed.entries[1].category, "Perifericos");
    }

    #[test]
    fn test_parse_unmatched_line_dropped_with_diagnostic() {
        let parser = CatalogParser::new();
        let parsed = parser.parse("▪️One - $ 10\nruido sin estructura\n▪️Two - $ 20");
        assert_eq!(parsed.count(), 2);
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].line_number, 2);
        assert_eq!(parsed.skipped[0].content, "ruido sin estructura");
        assert_eq!(parsed.skipped[0].reason, "no matching pattern");
    }

    #[test]
    fn test_parse_bad_price_dropped_without_breaking_later_lines() {
        let parser = CatalogParser::new();
        let parsed = parser.parse("▪️Broken - $ 1.2.3\nGood, 50");
        assert_eq!(parsed.count(), 1);
        assert_eq!(parsed.entries[0].name, "Good");
        assert_eq!(parsed.skipped.len(), 1);
        assert!(parsed.skipped[0].reason.contains("unparseable price"));
    }

    #[test]
    fn test_parse_json_wrapper() {
        let parser = CatalogParser::new();
        let input = r#"{"data": "► A\n▪️One - $ 10"}"#;
        let parsed = parser.parse(input);
        assert_eq!(parsed.count(), 1);
        assert_eq!(parsed.entries[0].name, "One");
        assert_eq!(parsed.entries[0].category, "A");
    }

    #[test]
    fn test_parse_broken_json_falls_back_to_plain_text() {
        let parser = CatalogParser::new();
        // Starts with '{' but is not JSON; the CSV line inside must still parse
        let parsed = parser.parse("{not json\nSimple Product, 100, Otros");
        assert_eq!(parsed.count(), 1);
        assert_eq!(parsed.entries[0].name, "Simple Product");
        assert_eq!(parsed.skipped.len(), 1);
    }

    #[test]
    fn test_parse_json_without_data_field_treated_as_plain() {
        let parser = CatalogParser::new();
        let parsed = parser.parse(r#"{"other": "value"}"#);
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_parse_empty_input() {
        let parser = CatalogParser::new();
        assert!(parser.parse("").is_empty());
        assert!(parser.parse("   \n  \n").is_empty());
    }

    #[test]
    fn test_unwrap_json_payload() {
        assert_eq!(unwrap_json_payload(r#"{"data": "text"}"#), Some("text".to_string()));
        assert_eq!(unwrap_json_payload(r#"  {"data": "x"}"#), Some("x".to_string()));
        assert_eq!(unwrap_json_payload("plain text"), None);
        assert_eq!(unwrap_json_payload(r#"{"data": 42}"#), None);
        assert_eq!(unwrap_json_payload("{broken"), None);
    }
}
