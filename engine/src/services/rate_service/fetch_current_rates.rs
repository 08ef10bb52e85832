// Handler for fetch_current_rates
use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Utc};
use shared::catalog::popular_currencies;
use shared::models::{ApiResponse, CurrencyRate, RateSnapshot};
use tokio::sync::Mutex;

use super::helpers::to_currency_rate;
use super::SourceState;
use crate::config::EngineSettings;
use crate::data::rate_book::{generate_mock_rates, quote};
use crate::error::{EngineError, FetchKind};

pub async fn handle_fetch_current_rates(
    base: &str,
    state: &Mutex<SourceState>,
    settings: &EngineSettings,
) -> Result<Vec<CurrencyRate>, EngineError> {
    tracing::debug!(base = %base, "Handling fetch_current_rates");

    // Held across the simulated latency: at most one fetch is in flight and
    // each fetch sees the previous one's snapshot as its baseline.
    let mut guard = state.lock().await;
    tokio::time::sleep(settings.fetch_latency()).await;

    let SourceState { book, rng, baseline } = &mut *guard;
    let now = Utc::now();
    let response = ApiResponse {
        success: true,
        timestamp: now.timestamp_millis(),
        base: base.to_string(),
        date: now.date_naive(),
        rates: generate_mock_rates(baseline, settings.rate_fluctuation, rng),
    };

    match derive_currency_rates(&response, book.current(), now) {
        Ok(rates) => {
            book.advance(response.rates);
            tracing::info!(base = %base, count = rates.len(), "Fetched current rates");
            tracing::debug!(previous = ?book.previous(), current = ?book.current(), "Advanced rate snapshots");
            Ok(rates)
        }
        Err(e) => Err(EngineError::fetch_failed(FetchKind::CurrentRates, &e)),
    }
}

/// One record per popular currency except the response's base, with change
/// measured against `previous` (unchanged when `previous` has no quote).
pub fn derive_currency_rates(
    response: &ApiResponse,
    previous: &RateSnapshot,
    at: DateTime<Utc>,
) -> Result<Vec<CurrencyRate>> {
    if !response.success {
        bail!("Rates response for base {} was not successful", response.base);
    }

    popular_currencies()
        .filter(|info| info.code != response.base)
        .map(|info| {
            let rate = quote(&response.rates, info.code)
                .ok_or_else(|| anyhow!("Missing rate for {}", info.code))?;
            if !rate.is_finite() || rate <= 0.0 {
                bail!("Invalid rate {} for {}", rate, info.code);
            }
            let previous_rate = quote(previous, info.code).unwrap_or(rate);
            Ok(to_currency_rate(info, rate, previous_rate, at))
        })
        .collect()
}
