// engine/src/services/rate_service/mod.rs
// MockRateSource owns the snapshot pair and the random source; each RateProvider
// operation is dispatched to its handler module.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::models::{CurrencyPair, CurrencyRate, HistoricalRate, RateSnapshot};
use tokio::sync::Mutex;

use super::RateProvider;
use crate::config::EngineSettings;
use crate::data::rate_book::{baseline_snapshot, generate_mock_rates, RateBook};
use crate::error::EngineError;

pub mod check_api_health;
pub mod fetch_current_rates;
pub mod fetch_historical_rates;
pub mod helpers;

/// Everything a fetch mutates, guarded together.
pub struct SourceState {
    pub book: RateBook,
    pub rng: StdRng,
    pub baseline: RateSnapshot,
}

pub struct MockRateSource {
    settings: EngineSettings,
    state: Mutex<SourceState>,
}

impl MockRateSource {
    /// Seeds from `settings.seed` when present, from OS entropy otherwise.
    pub fn new(settings: EngineSettings) -> Result<Self, EngineError> {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(settings, rng)
    }

    pub fn with_rng(settings: EngineSettings, rng: StdRng) -> Result<Self, EngineError> {
        Self::with_baseline(settings, rng, baseline_snapshot())
    }

    pub fn with_baseline(
        settings: EngineSettings,
        mut rng: StdRng,
        baseline: RateSnapshot,
    ) -> Result<Self, EngineError> {
        settings.validate()?;
        let initial = generate_mock_rates(&baseline, settings.rate_fluctuation, &mut rng);
        tracing::debug!(currencies = baseline.len(), "Initialized mock rate source");

        Ok(MockRateSource {
            settings,
            state: Mutex::new(SourceState {
                book: RateBook::new(initial),
                rng,
                baseline,
            }),
        })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Copies of the `(previous, current)` snapshots.
    pub async fn snapshots(&self) -> (RateSnapshot, RateSnapshot) {
        let state = self.state.lock().await;
        (state.book.previous().clone(), state.book.current().clone())
    }

    /// Cross rate between two currencies on the latest snapshot.
    pub async fn fetch_currency_pair(&self, from: &str, to: &str) -> Option<CurrencyPair> {
        let state = self.state.lock().await;
        helpers::cross_pair(from, to, state.book.current(), state.book.previous())
    }
}

#[async_trait]
impl RateProvider for MockRateSource {
    async fn fetch_current_rates(&self, base: Option<&str>) -> Result<Vec<CurrencyRate>, EngineError> {
        let base = base.unwrap_or(self.settings.base_currency.as_str());
        tracing::info!(base = %base, "Fetching current rates");
        fetch_current_rates::handle_fetch_current_rates(base, &self.state, &self.settings).await
    }

    async fn fetch_historical_rates(
        &self,
        base: &str,
        target: &str,
        days: u32,
    ) -> Result<Vec<HistoricalRate>, EngineError> {
        tracing::info!(base = %base, target_currency = %target, days, "Fetching historical rates");
        fetch_historical_rates::handle_fetch_historical_rates(base, target, days, &self.state, &self.settings).await
    }

    async fn check_api_health(&self) -> bool {
        check_api_health::handle_check_api_health(&self.state, &self.settings).await
    }
}
