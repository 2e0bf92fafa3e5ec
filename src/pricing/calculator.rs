//! Localized price calculation.

use crate::catalog::models::CatalogEntry;
use crate::pricing::rules::{resolve_markup, ProfitRule};
use tracing::debug;

/// Rounds to two decimals, halves rounding up.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Pricing inputs for one batch pass.
///
/// The rate, the rule table, and the global markup are captured once at
/// construction so every entry of the batch sees the same consistent view;
/// rule-table changes never leak into an in-flight pass.
pub struct PriceContext {
    rate: f64,
    rules: Vec<ProfitRule>,
    global_markup_percent: f64,
}

impl PriceContext {
    /// Captures a pricing snapshot.
    pub fn new(rate: f64, rules: Vec<ProfitRule>, global_markup_percent: f64) -> Self {
        debug!(
            "Pricing context: {} rules, global markup {}%, rate {}",
            rules.len(),
            global_markup_percent,
            rate
        );
        Self { rate, rules, global_markup_percent }
    }

    /// Returns the captured currency rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the markup percentage for a USD price: the first matching
    /// tiered rule, or the global fallback.
    pub fn markup_for(&self, price_usd: f64) -> f64 {
        resolve_markup(price_usd, &self.rules).unwrap_or(self.global_markup_percent)
    }

    /// Sets the localized price on one entry.
    ///
    /// Entries without a USD price are left untouched; that is not an error.
    /// Only `final_price_local` is ever written.
    pub fn finalize(&self, entry: &mut CatalogEntry) {
        let Some(price_usd) = entry.price_usd else {
            return;
        };

        let markup = self.markup_for(price_usd);
        let local = round2(price_usd * self.rate * (1.0 + markup / 100.0));

        debug!(
            "'{}' usd={} markup={}% rate={} -> local={}",
            entry.name, price_usd, markup, self.rate, local
        );

        entry.final_price_local = Some(local);
    }

    /// Prices a whole batch against this one snapshot.
    pub fn finalize_all(&self, entries: &mut [CatalogEntry]) {
        for entry in entries.iter_mut() {
            self.finalize(entry);
        }
    }
}
