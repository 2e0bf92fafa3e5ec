//! Manual entry command implementation.

use crate::catalog::CatalogEntry;
use crate::config::Config;
use crate::format::Formatter;
use crate::pricing::PriceContext;
use crate::rate::RateSource;
use crate::store::AppState;
use anyhow::{Context, Result};
use tracing::info;

/// Adds a single entry by hand and prices it.
pub struct AddCommand {
    config: Config,
}

impl AddCommand {
    /// Creates a new add command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Appends one entry to the catalog and returns it priced.
    pub async fn execute(
        &self,
        name: &str,
        price_usd: Option<f64>,
        category: &str,
        state: &mut AppState,
        rate_source: &dyn RateSource,
    ) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("Entry name must not be empty");
        }
        if let Some(price) = price_usd {
            if price < 0.0 {
                anyhow::bail!("Entry price must not be negative, got {}", price);
            }
        }

        let rate = rate_source.sell_rate().await.context("Currency rate unavailable")?;

        let mut entry = match price_usd {
            Some(price) => CatalogEntry::new(name, price, category),
            None => CatalogEntry::unpriced(name, category),
        };

        let context =
            PriceContext::new(rate, state.rules.rules().to_vec(), state.global_markup_percent);
        context.finalize(&mut entry);

        info!("Added entry '{}'", entry.name);
        state.catalog.add(entry.clone());

        let formatter = Formatter::new(self.config.format, self.config.currency.clone());
        Ok(formatter.format_entry(&entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate::FixedRate;

    #[tokio::test]
    async fn test_add_priced_entry() {
        let cmd = AddCommand::new(Config::default());
        let mut state = AppState::default();
        state.global_markup_percent = 20.0;

        let output = cmd
            .execute("Parlante JBL", Some(100.0), "Audio", &mut state, &FixedRate(1000.0))
            .await
            .unwrap();

        assert_eq!(state.catalog.len(), 1);
        assert_eq!(state.catalog.entries()[0].final_price_local, Some(120000.0));
        assert!(output.contains("Parlante JBL"));
    }

    #[tokio::test]
    async fn test_add_unpriced_entry() {
        let cmd = AddCommand::new(Config::default());
        let mut state = AppState::default();

        cmd.execute("Sin precio", None, "", &mut state, &FixedRate(1000.0)).await.unwrap();

        assert_eq!(state.catalog.len(), 1);
        assert!(state.catalog.entries()[0].final_price_local.is_none());
    }

    #[tokio::test]
    async fn test_add_rejects_empty_name() {
        let cmd = AddCommand::new(Config::default());
        let mut state = AppState::default();

        let result = cmd.execute("   ", Some(10.0), "", &mut state, &FixedRate(1.0)).await;

        assert!(result.is_err());
        assert!(state.catalog.is_empty());
    }

    #[tokio::test]
    async fn test_add_rejects_negative_price() {
        let cmd = AddCommand::new(Config::default());
        let mut state = AppState::default();

        let result = cmd.execute("Negativo", Some(-5.0), "", &mut state, &FixedRate(1.0)).await;

        assert!(result.is_err());
        assert!(state.catalog.is_empty());
    }
}
