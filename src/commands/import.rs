//! Import command implementation.

use crate::catalog::CatalogParser;
use crate::config::Config;
use crate::format::Formatter;
use crate::pricing::PriceContext;
use crate::rate::RateSource;
use crate::store::AppState;
use anyhow::{Context, Result};
use tracing::info;

/// Executes a catalog import: parse, replace, price, render.
pub struct ImportCommand {
    config: Config,
}

impl ImportCommand {
    /// Creates a new import command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Imports raw feed text into the state and returns the priced catalog.
    pub async fn execute(
        &self,
        raw_text: &str,
        state: &mut AppState,
        rate_source: &dyn RateSource,
    ) -> Result<String> {
        // Rate comes first so an unavailable rate aborts before any state change
        let rate = rate_source.sell_rate().await.context("Currency rate unavailable")?;

        let parser = CatalogParser::new();
        let parsed = parser.parse(raw_text);

        if !parsed.skipped.is_empty() {
            info!("{} lines skipped during import", parsed.skipped.len());
        }

        let imported = state.catalog.replace_all(parsed.entries);
        if imported == 0 {
            return Ok("No entries recognized; existing catalog left unchanged.".to_string());
        }

        let context =
            PriceContext::new(rate, state.rules.rules().to_vec(), state.global_markup_percent);
        context.finalize_all(state.catalog.entries_mut());

        let formatter = Formatter::new(self.config.format, self.config.currency.clone());
        Ok(formatter.format_entries(state.catalog.entries()))
    }
}
