// Handler for fetch_historical_rates
use shared::history::generate_mock_historical_data;
use shared::models::HistoricalRate;
use tokio::sync::Mutex;

use super::SourceState;
use crate::config::EngineSettings;
use crate::data::rate_book::quote;
use crate::error::{EngineError, FetchKind};

/// The series is anchored on the latest current rate for `target` (1.0 when
/// unknown). `base` is accepted for contract parity and otherwise ignored.
pub async fn handle_fetch_historical_rates(
    base: &str,
    target: &str,
    days: u32,
    state: &Mutex<SourceState>,
    settings: &EngineSettings,
) -> Result<Vec<HistoricalRate>, EngineError> {
    tracing::debug!(base = %base, target_currency = %target, days, "Handling fetch_historical_rates");
    tokio::time::sleep(settings.history_latency()).await;

    let mut guard = state.lock().await;
    let SourceState { book, rng, .. } = &mut *guard;
    let anchor = quote(book.current(), target).unwrap_or(1.0);

    generate_mock_historical_data(anchor, days, rng)
        .map_err(|e| EngineError::fetch_failed(FetchKind::HistoricalRates, &e))
}
