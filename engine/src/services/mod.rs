// Rate source contract and its mock implementation
use crate::error::EngineError;
use async_trait::async_trait;
use shared::models::{CurrencyRate, HistoricalRate};

pub mod rate_service;

pub use rate_service::MockRateSource;

/// What a remote exchange-rate API would offer the dashboard.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Latest rates for the popular currencies, excluding `base`. `None`
    /// uses the provider's configured base currency.
    async fn fetch_current_rates(&self, base: Option<&str>) -> Result<Vec<CurrencyRate>, EngineError>;

    /// `days` daily points for `target`, oldest first.
    async fn fetch_historical_rates(
        &self,
        base: &str,
        target: &str,
        days: u32,
    ) -> Result<Vec<HistoricalRate>, EngineError>;

    async fn check_api_health(&self) -> bool;

    /// Looks up one currency in a fresh fetch.
    ///
    /// Returns `None` both when `target` is not part of the result and when
    /// the fetch itself failed; the failure is only logged.
    async fn fetch_single_currency_rate(&self, base: Option<&str>, target: &str) -> Option<CurrencyRate> {
        match self.fetch_current_rates(base).await {
            Ok(rates) => rates.into_iter().find(|rate| rate.code == target),
            Err(e) => {
                tracing::warn!(target_currency = %target, error = %e, "Error fetching single currency rate");
                None
            }
        }
    }
}
