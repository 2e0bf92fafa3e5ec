//! HTTP client for the currency rate API.

use super::RateSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;

const RATE_API_BASE: &str = "https://dolarapi.com";

/// One quote from the rate API; only the sell side is consumed.
#[derive(Debug, Deserialize)]
struct RateQuote {
    venta: Option<f64>,
}

/// Rate API HTTP client.
pub struct RateClient {
    client: Client,
    base_url: String,
}

impl RateClient {
    /// Creates a client against the public rate API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(RATE_API_BASE.to_string())
    }

    /// Creates a client with a custom base URL (for testing).
    pub fn with_base_url(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Fetches the current blue-dollar quote.
    async fn fetch(&self) -> Result<RateQuote> {
        let url = format!("{}/v1/dolares/blue", self.base_url);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send rate request")?;

        if !response.status().is_success() {
            anyhow::bail!("Rate API returned status: {}", response.status());
        }

        let body = response.text().await.context("Failed to read rate response body")?;
        serde_json::from_str(&body).context("Failed to decode rate response")
    }
}

#[async_trait]
impl RateSource for RateClient {
    async fn sell_rate(&self) -> Result<f64> {
        let quote = self.fetch().await?;
        let venta = quote.venta.context("Rate response has no sell value")?;

        info!("Current sell rate: {}", venta);
        Ok(venta)
    }
}
