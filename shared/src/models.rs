use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Currency code -> rate against the implicit base currency.
pub type RateSnapshot = BTreeMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRate {
    pub code: String,
    pub name: String,
    pub rate: f64,
    pub change: f64,
    pub change_percent: f64,
    pub last_updated: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPair {
    pub from: String,
    pub to: String,
    pub rate: f64,
    pub change: f64,
    pub change_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRate {
    pub date: NaiveDate,
    pub rate: f64,
}

/// A historical point enriched for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub date: NaiveDate,
    pub rate: f64,
    /// Epoch milliseconds of `date` at UTC midnight.
    pub timestamp: i64,
}

/// Envelope returned by one simulated rates call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub timestamp: i64,
    pub base: String,
    pub date: NaiveDate,
    pub rates: RateSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub flag: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeFrame {
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "7D")]
    SevenDays,
    #[serde(rename = "30D")]
    ThirtyDays,
    #[serde(rename = "3M")]
    ThreeMonths,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 4] = [
        TimeFrame::OneDay,
        TimeFrame::SevenDays,
        TimeFrame::ThirtyDays,
        TimeFrame::ThreeMonths,
    ];

    /// Length of the historical window requested for this frame.
    pub fn days(self) -> u32 {
        match self {
            TimeFrame::OneDay => 1,
            TimeFrame::SevenDays => 7,
            TimeFrame::ThirtyDays => 30,
            TimeFrame::ThreeMonths => 90,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeFrame::OneDay => "1D",
            TimeFrame::SevenDays => "7D",
            TimeFrame::ThirtyDays => "30D",
            TimeFrame::ThreeMonths => "3M",
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFrame {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        TimeFrame::ALL
            .into_iter()
            .find(|tf| tf.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("Unknown time frame '{}'. Use 1D, 7D, 30D or 3M.", s))
    }
}

/// Fetch-in-flight status tracked by the consumer of the rate source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshState {
    pub is_refreshing: bool,
    pub last_refresh: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl RefreshState {
    pub fn begin(&mut self) {
        self.is_refreshing = true;
        self.error = None;
    }

    pub fn succeed(&mut self, at: DateTime<Utc>) {
        self.is_refreshing = false;
        self.last_refresh = Some(at);
        self.error = None;
    }

    /// Keeps `last_refresh` so the UI can still show how stale the data is.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.is_refreshing = false;
        self.error = Some(message.into());
    }
}
