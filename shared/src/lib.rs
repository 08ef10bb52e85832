//! Data model and pure derivation helpers for the FX dashboard.
//!
//! Everything here is free of I/O; the only ambient inputs are the wall clock
//! (`get_time_ago`, `generate_mock_historical_data`) and the caller-supplied
//! random source.

pub mod catalog;
pub mod debounce;
pub mod history;
pub mod models;
pub mod utils;

pub use catalog::{get_currency_info, BASE_CURRENCY};
pub use debounce::{debounce, Debouncer};
pub use history::{convert_historical_to_chart_data, generate_mock_historical_data};
pub use utils::calculate_change;
