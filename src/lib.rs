//! Energy consumption resampling, forecasting and alerting.
//!
//! A raw `(timestamp, value)` series is resampled into calendar buckets,
//! forecast with one of two strategies and checked against an alert
//! threshold:
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use enerts::{evaluate_alert, predict, resample, Period, Series};
//!
//! let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
//! let raw = Series::from_pairs((0..96).map(|i| {
//!     let t = i as f64;
//!     (start + Duration::minutes(30 * i), 40.0 + 10.0 * (t / 8.0).sin() + 0.1 * t)
//! }));
//!
//! let hourly = resample(&raw, Period::Hourly).unwrap();
//! let forecast = predict(&hourly, "statistical", 6).unwrap();
//! assert_eq!(forecast.values.len(), 6);
//!
//! assert!(evaluate_alert(85.0, 90.0).is_none());
//! ```

pub mod analytics;
pub mod config;
pub mod error;
pub mod io;
pub mod ml;
pub mod stats;
pub mod temporal;
pub mod time_series;

pub use analytics::{Alert, AlertConfig, AlertEvaluator, AlertLevel};
pub use config::EnergyConfig;
pub use error::{Error, Result};
pub use temporal::{resample, resample_view, EnergyConsumption, Period, Series, TimePoint};
pub use time_series::{
    ConfidenceInterval, ForecastEngine, ForecastResult, Forecaster, ModelKind,
    StatisticalForecaster, TrendHeuristicForecaster,
};

/// Forecast `steps` points with the model named by `model`
/// (`statistical` / `arima` or `trend_heuristic` / `lstm`).
pub fn predict(series: &Series, model: &str, steps: usize) -> Result<ForecastResult> {
    ForecastEngine::new().predict_by_name(series, model, steps)
}

/// Alert for `value` against `threshold`, or `None` when within the limit
pub fn evaluate_alert(value: f64, threshold: f64) -> Option<Alert> {
    analytics::evaluate(value, threshold)
}

/// Crate version, reported by `enerts --version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
