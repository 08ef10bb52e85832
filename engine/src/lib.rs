// Engine library root: the simulated rate source and its supporting modules.

pub mod config;
pub mod data;
pub mod error;
pub mod services;

pub use error::{EngineError, FetchKind};
pub use services::{MockRateSource, RateProvider};
