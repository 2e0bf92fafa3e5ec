//! Ordered line matchers for the catalog feed grammar.
//!
//! Each matcher recognizes one line shape and returns an optional parsed
//! record. The priority order lives in [`MatcherSet::default`], not in
//! control flow, so it cannot be reordered by accident.

use tracing::{debug, warn};

// Line patterns for the feed grammar
mod patterns {
    use regex_lite::Regex;
    use std::sync::LazyLock;

    /// Category line: starts with ►, rest is the category name.
    pub static CATEGORY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^►\s*(.*)").unwrap());

    /// Bullet product line: ▪️ name - $ price, trailing text ignored.
    pub static BULLET_PRODUCT: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^▪️\s*(.+?)\s*-\s*\$\s*([\d.,]+)").unwrap());
}

/// What a matcher recognized on a line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineMatch {
    /// A category marker; sets the current category, emits no entry.
    Category(String),
    /// A product record. `category` is set only when the line carries its own.
    Product { name: String, price_usd: f64, category: Option<String> },
    /// The line had a recognized shape but an unusable payload; drop it.
    Invalid { reason: String },
}

/// Trait for recognizing one line shape of the feed grammar.
pub trait LineMatcher: Send + Sync {
    /// Returns what this matcher recognized, or None if the line is not its shape.
    fn try_match(&self, line: &str) -> Option<LineMatch>;

    /// Returns the matcher's name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Matches `► CATEGORY` lines.
pub struct CategoryMatcher;

impl LineMatcher for CategoryMatcher {
    fn try_match(&self, line: &str) -> Option<LineMatch> {
        let caps = patterns::CATEGORY.captures(line)?;
        Some(LineMatch::Category(caps[1].trim().to_string()))
    }

    fn name(&self) -> &'static str {
        "category"
    }
}

/// Matches `▪️NAME - $ PRICE` lines.
pub struct BulletProductMatcher;

impl LineMatcher for BulletProductMatcher {
    fn try_match(&self, line: &str) -> Option<LineMatch> {
        let caps = patterns::BULLET_PRODUCT.captures(line)?;

        let name = caps[1].trim().to_string();
        if name.is_empty() {
            return Some(LineMatch::Invalid { reason: "empty product name".to_string() });
        }

        match parse_decimal(&caps[2]) {
            Some(price_usd) => Some(LineMatch::Product { name, price_usd, category: None }),
            None => {
                warn!("Could not parse price in line: {}", line);
                Some(LineMatch::Invalid { reason: format!("unparseable price '{}'", &caps[2]) })
            }
        }
    }

    fn name(&self) -> &'static str {
        "bullet-product"
    }
}

/// Matches `NAME,PRICE[,CATEGORY]` lines that are not glyph-marked.
pub struct CsvFallbackMatcher;

impl LineMatcher for CsvFallbackMatcher {
    fn try_match(&self, line: &str) -> Option<LineMatch> {
        if !line.contains(',') || line.starts_with('►') || line.starts_with("▪️") {
            return None;
        }

        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() < 2 {
            return None;
        }

        let name = parts[0].trim().to_string();
        if name.is_empty() {
            return Some(LineMatch::Invalid { reason: "empty product name".to_string() });
        }

        let price_text = parts[1].trim().trim_start_matches('$');
        match parse_decimal(price_text) {
            Some(price_usd) => {
                let category = parts.get(2).map(|c| c.trim().to_string());
                Some(LineMatch::Product { name, price_usd, category })
            }
            None => {
                debug!("Line failed delimited parsing: {}", line);
                Some(LineMatch::Invalid { reason: format!("unparseable price '{}'", price_text) })
            }
        }
    }

    fn name(&self) -> &'static str {
        "delimited-fallback"
    }
}

/// The ordered set of line matchers; first success wins.
pub struct MatcherSet {
    matchers: Vec<Box<dyn LineMatcher>>,
}

impl MatcherSet {
    /// Creates an empty matcher set.
    pub fn new() -> Self {
        Self { matchers: Vec::new() }
    }

    /// Appends a matcher; lower positions have higher priority.
    pub fn add(&mut self, matcher: impl LineMatcher + 'static) -> &mut Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    /// Tries matchers in priority order, returning the first recognition.
    pub fn try_match(&self, line: &str) -> Option<LineMatch> {
        self.matchers.iter().find_map(|m| m.try_match(line))
    }

    /// Returns the number of matchers.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Returns true if no matchers are configured.
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Returns matcher names in priority order.
    pub fn names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }
}

impl Default for MatcherSet {
    /// The feed grammar in its fixed priority order.
    fn default() -> Self {
        let mut set = Self::new();
        set.add(CategoryMatcher).add(BulletProductMatcher).add(CsvFallbackMatcher);
        set
    }
}

/// Parses a decimal with dot or comma as separator; comma is normalized to dot.
fn parse_decimal(text: &str) -> Option<f64> {
    let cleaned = text.trim();
    if cleaned.is_empty() {
        return None;
    }

    cleaned.replace(',', ".").parse().ok().filter(|p: &f64| *p >= 0.0 && p.is_finite())
}
