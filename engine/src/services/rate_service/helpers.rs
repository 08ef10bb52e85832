// Helper functions shared by the rate_service handlers
use crate::data::rate_book::quote;
use chrono::{DateTime, Utc};
use shared::models::{CurrencyInfo, CurrencyPair, CurrencyRate, RateSnapshot};
use shared::utils::{calculate_change, round_to, RateChange};

pub fn to_currency_rate(
    info: &CurrencyInfo,
    rate: f64,
    previous_rate: f64,
    last_updated: DateTime<Utc>,
) -> CurrencyRate {
    let RateChange { change, change_percent } = calculate_change(rate, previous_rate);
    CurrencyRate {
        code: info.code.to_string(),
        name: info.name.to_string(),
        rate: round_to(rate, 6),
        change,
        change_percent,
        last_updated,
        flag: Some(info.flag.to_string()),
    }
}

/// Cross rate `to / from`, compared against the same cross on `previous`.
/// Falls back to "unchanged" when `previous` lacks either leg.
pub fn cross_pair(
    from: &str,
    to: &str,
    current: &RateSnapshot,
    previous: &RateSnapshot,
) -> Option<CurrencyPair> {
    let rate = quote(current, to)? / quote(current, from)?;
    let previous_rate = match (quote(previous, from), quote(previous, to)) {
        (Some(prev_from), Some(prev_to)) => prev_to / prev_from,
        _ => rate,
    };

    let RateChange { change, change_percent } = calculate_change(rate, previous_rate);
    Some(CurrencyPair {
        from: from.to_string(),
        to: to.to_string(),
        rate: round_to(rate, 6),
        change,
        change_percent,
    })
}
