//! Currency rate sources.
//!
//! The pricing core consumes the rate as an opaque value or failure signal;
//! everything about obtaining it lives behind [`RateSource`].

mod client;

pub use client::RateClient;

use anyhow::Result;
use async_trait::async_trait;

/// Trait for obtaining the sell rate (local currency per USD) - enables
/// mocking for tests and manual overrides.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Returns the current sell rate.
    async fn sell_rate(&self) -> Result<f64>;
}

/// A fixed rate, for `--rate` overrides and tests.
pub struct FixedRate(pub f64);

#[async_trait]
impl RateSource for FixedRate {
    async fn sell_rate(&self) -> Result<f64> {
        Ok(self.0)
    }
}
