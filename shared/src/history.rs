// Synthetic historical series and their chart representation
use crate::models::{ChartData, HistoricalRate};
use crate::utils::{midnight_utc, round_to};
use anyhow::{anyhow, Result};
use chrono::{Days, NaiveDate, Utc};
use rand::Rng;

/// Largest per-point deviation from the anchor rate (±2%).
pub const HISTORY_VARIATION: f64 = 0.02;

/// Longest window a series may span (about ten years of daily points).
pub const MAX_HISTORY_DAYS: u32 = 3_660;

/// Generates `days` daily points ending today (UTC), anchored on `base_rate`.
pub fn generate_mock_historical_data<R: Rng + ?Sized>(
    base_rate: f64,
    days: u32,
    rng: &mut R,
) -> Result<Vec<HistoricalRate>> {
    generate_historical_series(base_rate, days, Utc::now().date_naive(), rng)
}

/// Points cover `[today - (days - 1), today]`, oldest first. The variation of
/// a point `i` days before `today` is damped by `i / days`, so the series
/// converges on `base_rate` and the final point equals it (to 6 decimals).
pub fn generate_historical_series<R: Rng + ?Sized>(
    base_rate: f64,
    days: u32,
    today: NaiveDate,
    rng: &mut R,
) -> Result<Vec<HistoricalRate>> {
    if days == 0 {
        return Ok(Vec::new());
    }
    if days > MAX_HISTORY_DAYS {
        return Err(anyhow!("History window of {} days exceeds the {} day limit", days, MAX_HISTORY_DAYS));
    }
    let earliest = today
        .checked_sub_days(Days::new(u64::from(days - 1)))
        .ok_or_else(|| anyhow!("Date out of range: {} days before {}", days - 1, today))?;

    let mut series = Vec::with_capacity(days as usize);

    for i in (0..days).rev() {
        let date = earliest + Days::new(u64::from(days - 1 - i));

        let variation = rng.gen_range(-HISTORY_VARIATION..=HISTORY_VARIATION);
        let rate = base_rate * (1.0 + variation * (f64::from(i) / f64::from(days)));

        series.push(HistoricalRate {
            date,
            rate: round_to(rate, 6),
        });
    }

    Ok(series)
}

pub fn convert_historical_to_chart_data(historical: &[HistoricalRate]) -> Vec<ChartData> {
    historical
        .iter()
        .map(|point| ChartData {
            date: point.date,
            rate: point.rate,
            timestamp: midnight_utc(point.date).timestamp_millis(),
        })
        .collect()
}
