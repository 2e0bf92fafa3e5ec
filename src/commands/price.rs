//! Pricing command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::pricing::PriceContext;
use crate::rate::RateSource;
use crate::store::AppState;
use anyhow::{Context, Result};
use tracing::info;

/// Runs a fresh pricing pass over the stored catalog and renders it.
pub struct PriceCommand {
    config: Config,
}

impl PriceCommand {
    /// Creates a new price command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Prices every stored entry against one rate/rule snapshot.
    pub async fn execute(
        &self,
        state: &mut AppState,
        rate_source: &dyn RateSource,
    ) -> Result<String> {
        let rate = rate_source.sell_rate().await.context("Currency rate unavailable")?;

        let context =
            PriceContext::new(rate, state.rules.rules().to_vec(), state.global_markup_percent);
        context.finalize_all(state.catalog.entries_mut());

        info!("Priced {} entries at rate {}", state.catalog.len(), rate);

        let formatter = Formatter::new(self.config.format, self.config.currency.clone());
        Ok(formatter.format_entries(state.catalog.entries()))
    }
}
