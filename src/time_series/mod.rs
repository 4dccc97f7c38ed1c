//! Forecasting
//!
//! Two interchangeable strategies implement [`Forecaster`]:
//!
//! - [`StatisticalForecaster`]: ARIMA(1,1,1) with 95% confidence intervals
//! - [`TrendHeuristicForecaster`]: moving average plus trend, labelled "LSTM"
//!   for compatibility but not a neural network
//!
//! [`ForecastEngine`] picks one by [`ModelKind`].

pub mod arima;
pub mod engine;
pub mod forecasting;
pub mod trend;

pub use arima::{ArimaFit, StatisticalForecaster};
pub use engine::{ForecastEngine, ModelKind};
pub use forecasting::{future_timestamps, ConfidenceInterval, ForecastResult, Forecaster};
pub use trend::TrendHeuristicForecaster;
