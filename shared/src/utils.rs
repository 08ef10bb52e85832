// Pure derivation and display helpers shared by the engine and any UI consumer.
// Number output follows en-US conventions: ',' groups thousands and '.' separates decimals.

use crate::catalog::{get_currency_info, has_minor_units};
use crate::models::TimeFrame;
use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateChange {
    pub change: f64,
    pub change_percent: f64,
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Delta between two rates: `change` to 6 decimals, `change_percent` to 2.
///
/// A zero `previous_rate` yields a `change_percent` of 0 rather than a
/// non-finite value.
pub fn calculate_change(current_rate: f64, previous_rate: f64) -> RateChange {
    let change = current_rate - previous_rate;
    let change_percent = if previous_rate == 0.0 {
        0.0
    } else {
        change / previous_rate * 100.0
    };

    RateChange {
        change: round_to(change, 6),
        change_percent: round_to(change_percent, 2),
    }
}

/// Formats `value` with between `min_fraction` and `max_fraction` decimals
/// and thousands grouping. Exact ties round away from zero.
pub fn format_decimal(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let value = round_half_away(value, max_fraction);

    let fixed = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut frac = frac_part.trim_end_matches('0').to_string();
    while frac.len() < min_fraction {
        frac.push('0');
    }

    // "-0.00" is printed as "0.00"
    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    let mut out = String::with_capacity(fixed.len() + 4);
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

// `{:.N}` alone rounds exact ties to even
fn round_half_away(value: f64, decimals: usize) -> f64 {
    let rounded = round_to(value, decimals as i32);
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_currency(amount: f64, currency: &str) -> String {
    let number = if has_minor_units(currency) {
        format_decimal(amount.abs(), 2, 4)
    } else {
        format_decimal(amount.abs(), 0, 0)
    };

    let symbol = get_currency_info(currency).map_or(currency, |info| info.symbol);
    let separator = if symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        "\u{a0}"
    } else {
        ""
    };
    let sign = if amount < 0.0 && number.bytes().any(|b| (b'1'..=b'9').contains(&b)) {
        "-"
    } else {
        ""
    };

    format!("{sign}{symbol}{separator}{number}")
}

/// Precision tiers: large rates get fewer decimals.
pub fn format_rate(rate: f64) -> String {
    if rate >= 1000.0 {
        format_decimal(rate, 0, 2)
    } else if rate >= 100.0 {
        format_decimal(rate, 2, 2)
    } else {
        format_decimal(rate, 4, 6)
    }
}

pub fn format_change(change: f64) -> String {
    let rounded = round_half_away(normalize_zero(change), 4);
    format!("{}{:.4}", sign_prefix(change), rounded)
}

pub fn format_change_percent(change_percent: f64) -> String {
    let rounded = round_half_away(normalize_zero(change_percent), 2);
    format!("{}{:.2}%", sign_prefix(change_percent), rounded)
}

fn sign_prefix(value: f64) -> &'static str {
    if value >= 0.0 {
        "+"
    } else {
        ""
    }
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` and plain
/// `YYYY-MM-DD` dates (taken as UTC midnight).
pub fn parse_chart_date(date: &str) -> Result<DateTime<Utc>> {
    let date = date.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| anyhow!("Failed to parse chart date '{}': {}", date, e))?;
    Ok(midnight_utc(day))
}

pub fn midnight_utc(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default()).and_utc()
}

pub fn format_date_for_chart(date: &str, time_frame: TimeFrame) -> Result<String> {
    let dt = parse_chart_date(date)?;
    let label = match time_frame {
        TimeFrame::OneDay => dt.format("%I:%M %p").to_string(),
        TimeFrame::SevenDays => dt.format("%a").to_string(),
        TimeFrame::ThirtyDays | TimeFrame::ThreeMonths => dt.format("%b %-d").to_string(),
    };
    Ok(label)
}

/// Full numeric date, e.g. `3/7/2024`.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn get_time_ago(date: DateTime<Utc>) -> String {
    time_ago_between(date, Utc::now())
}

pub fn time_ago_between(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - date).num_seconds().max(0);
    if seconds < 60 {
        return ago(seconds, "second");
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return ago(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return ago(hours, "hour");
    }

    format_date(date)
}

fn ago(count: i64, unit: &str) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fraction_digits(s: &str) -> usize {
        s.split_once('.').map_or(0, |(_, frac)| frac.len())
    }

    #[test]
    fn test_calculate_change_rounding() {
        let result = calculate_change(0.86, 0.85);
        assert_eq!(result.change, 0.01);
        assert_eq!(result.change_percent, 1.18);

        let result = calculate_change(149.123_456_78, 150.0);
        assert_eq!(result.change, round_to(149.123_456_78 - 150.0, 6));
        assert_eq!(result.change, -0.876543);
        assert_eq!(result.change_percent, -0.58);
    }

    #[test]
    fn test_calculate_change_unchanged() {
        let result = calculate_change(1.36, 1.36);
        assert_eq!(result.change, 0.0);
        assert_eq!(result.change_percent, 0.0);
    }

    #[test]
    fn test_calculate_change_zero_previous() {
        let result = calculate_change(1.0, 0.0);
        assert_eq!(result.change, 1.0);
        assert_eq!(result.change_percent, 0.0);
    }

    #[test]
    fn test_format_decimal_grouping() {
        assert_eq!(format_decimal(1_234_567.891, 0, 2), "1,234,567.89");
        assert_eq!(format_decimal(999.0, 0, 2), "999");
        assert_eq!(format_decimal(-1500.5, 2, 2), "-1,500.50");
        assert_eq!(format_decimal(-0.0001, 2, 2), "0.00");
    }

    #[test]
    fn test_format_rate_tiers() {
        let large = format_rate(1234.5);
        assert_eq!(large, "1,234.5");
        assert!(fraction_digits(&large) <= 2);

        let medium = format_rate(150.2);
        assert_eq!(medium, "150.20");
        assert_eq!(fraction_digits(&medium), 2);

        let small = format_rate(0.5);
        assert_eq!(small, "0.5000");
        let digits = fraction_digits(&small);
        assert!((4..=6).contains(&digits));

        assert_eq!(format_rate(0.123_456_78), "0.123457");
        assert_eq!(format_rate(1340.256), "1,340.26");
        assert_eq!(format_rate(1234.125), "1,234.13");
        assert_eq!(format_rate(100.125), "100.13");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5, "USD"), "$1,234.50");
        assert_eq!(format_currency(0.85123, "EUR"), "€0.8512");
        assert_eq!(format_currency(149.56, "JPY"), "¥150");
        assert_eq!(format_currency(1340.25, "KRW"), "₩1,340");
        assert_eq!(format_currency(-2.5, "GBP"), "-£2.50");
        assert_eq!(format_currency(0.91, "CHF"), "CHF\u{a0}0.91");
        assert_eq!(format_currency(10.0, "XYZ"), "XYZ\u{a0}10.00");
        assert_eq!(format_currency(2.5, "JPY"), "¥3");
        assert_eq!(format_currency(-2.5, "JPY"), "-¥3");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(-0.0023), "-0.0023");
        assert_eq!(format_change(0.001), "+0.0010");
        assert_eq!(format_change(0.0), "+0.0000");
        assert_eq!(format_change(-0.0), "+0.0000");
        assert_eq!(format_change(0.03125), "+0.0313");
        assert_eq!(format_change(-0.03125), "-0.0313");
    }

    #[test]
    fn test_format_change_percent() {
        assert_eq!(format_change_percent(1.5), "+1.50%");
        assert_eq!(format_change_percent(-0.25), "-0.25%");
        assert_eq!(format_change_percent(0.125), "+0.13%");
        assert_eq!(format_change_percent(-0.125), "-0.13%");
    }

    #[test]
    fn test_format_date_for_chart() {
        assert_eq!(format_date_for_chart("2024-03-07", TimeFrame::OneDay).unwrap(), "12:00 AM");
        assert_eq!(
            format_date_for_chart("2024-03-07T15:45:00Z", TimeFrame::OneDay).unwrap(),
            "03:45 PM"
        );
        assert_eq!(format_date_for_chart("2024-03-07", TimeFrame::SevenDays).unwrap(), "Thu");
        assert_eq!(format_date_for_chart("2024-03-07", TimeFrame::ThirtyDays).unwrap(), "Mar 7");
        assert_eq!(format_date_for_chart("2024-12-25", TimeFrame::ThreeMonths).unwrap(), "Dec 25");
    }

    #[test]
    fn test_format_date_for_chart_invalid() {
        let err = format_date_for_chart("not-a-date", TimeFrame::SevenDays).unwrap_err();
        assert!(err.to_string().contains("Failed to parse chart date 'not-a-date'"));
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(time_ago_between(now - Duration::seconds(30), now), "30 seconds ago");
        assert_eq!(time_ago_between(now - Duration::seconds(1), now), "1 second ago");
        assert_eq!(time_ago_between(now - Duration::seconds(90), now), "1 minute ago");
        assert_eq!(time_ago_between(now - Duration::minutes(45), now), "45 minutes ago");
        assert_eq!(time_ago_between(now - Duration::minutes(61), now), "1 hour ago");
        assert_eq!(time_ago_between(now - Duration::hours(23), now), "23 hours ago");
        assert_eq!(time_ago_between(now - Duration::hours(25), now), "3/6/2024");
    }

    #[test]
    fn test_time_ago_future_date_clamps() {
        let now = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(time_ago_between(now + Duration::seconds(5), now), "0 seconds ago");
    }

    #[test]
    fn test_get_time_ago_uses_wall_clock() {
        assert_eq!(get_time_ago(Utc::now() - Duration::seconds(90)), "1 minute ago");
        let old = Utc::now() - Duration::hours(25);
        assert_eq!(get_time_ago(old), format_date(old));
    }
}
