use std::fmt;
use thiserror::Error;

/// What a failed fetch was trying to load. Only affects the message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    CurrentRates,
    HistoricalRates,
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchKind::CurrentRates => f.write_str("currency rates"),
            FetchKind::HistoricalRates => f.write_str("historical data"),
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    /// The one failure surfaced to callers of the rate source. The
    /// underlying cause is logged, never carried.
    #[error("Failed to fetch {0}. Please try again.")]
    FetchFailed(FetchKind),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    /// Logs `cause` and collapses it into the generic fetch failure.
    pub fn fetch_failed(kind: FetchKind, cause: &anyhow::Error) -> Self {
        tracing::error!(kind = %kind, error = ?cause, "Error fetching {}", kind);
        EngineError::FetchFailed(kind)
    }

    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, EngineError::FetchFailed(_))
    }
}
