//! Strategy selection and dispatch

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::temporal::{resample, Period, Series};
use crate::time_series::arima::StatisticalForecaster;
use crate::time_series::forecasting::{ForecastResult, Forecaster};
use crate::time_series::trend::TrendHeuristicForecaster;

/// The forecasting strategies the engine recognises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// ARIMA(1,1,1) with confidence intervals
    Statistical,
    /// Moving average plus trend heuristic ("LSTM" in legacy naming)
    TrendHeuristic,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Statistical => "statistical",
            ModelKind::TrendHeuristic => "trend_heuristic",
        }
    }
}

impl FromStr for ModelKind {
    type Err = Error;

    /// Accepts the canonical names and the legacy `arima` / `lstm` aliases
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "statistical" | "arima" => Ok(ModelKind::Statistical),
            "trend_heuristic" | "lstm" => Ok(ModelKind::TrendHeuristic),
            _ => Err(Error::UnknownModel(s.to_string())),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dispatches forecast requests to the strategy registered for a model kind.
///
/// The engine is read-only once built and can be shared between threads.
#[derive(Debug)]
pub struct ForecastEngine {
    strategies: HashMap<ModelKind, Box<dyn Forecaster>>,
}

impl ForecastEngine {
    /// Engine with no strategies registered
    pub fn empty() -> Self {
        ForecastEngine {
            strategies: HashMap::new(),
        }
    }

    /// Engine with the built-in strategies
    pub fn new() -> Self {
        Self::empty()
            .register(ModelKind::Statistical, Box::new(StatisticalForecaster::new()))
            .register(
                ModelKind::TrendHeuristic,
                Box::new(TrendHeuristicForecaster::new()),
            )
    }

    /// Register (or replace) the strategy serving `kind`
    pub fn register(mut self, kind: ModelKind, strategy: Box<dyn Forecaster>) -> Self {
        self.strategies.insert(kind, strategy);
        self
    }

    pub fn strategy(&self, kind: ModelKind) -> Option<&dyn Forecaster> {
        self.strategies.get(&kind).map(|s| s.as_ref())
    }

    /// Forecast `steps` points with the strategy registered for `kind`.
    /// The strategy's result is returned unchanged.
    pub fn predict(&self, series: &Series, kind: ModelKind, steps: usize) -> Result<ForecastResult> {
        if steps == 0 {
            return Err(Error::InvalidInput(
                "forecast steps must be positive, got 0".to_string(),
            ));
        }
        let strategy = self
            .strategy(kind)
            .ok_or_else(|| Error::UnknownModel(kind.to_string()))?;

        log::info!(
            "forecasting {} steps from {} points with {} ({})",
            steps,
            series.len(),
            kind,
            strategy.name()
        );
        strategy.forecast(series, steps)
    }

    /// Same as [`ForecastEngine::predict`] with the model given by name
    pub fn predict_by_name(&self, series: &Series, model: &str, steps: usize) -> Result<ForecastResult> {
        self.predict(series, model.parse()?, steps)
    }

    /// Resample raw readings, then forecast from the regular series
    pub fn resample_and_predict(
        &self,
        raw: &Series,
        period: Period,
        kind: ModelKind,
        steps: usize,
    ) -> Result<ForecastResult> {
        let regular = resample(raw, period)?;
        self.predict(&regular, kind, steps)
    }
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn sample() -> Series {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Series::from_pairs((0..30).map(|i| {
            let t = i as f64;
            (base + Duration::hours(i), 40.0 + 8.0 * (t / 2.0).sin() + 0.3 * t)
        }))
    }

    #[test]
    fn test_model_kind_parsing() {
        assert_eq!("statistical".parse::<ModelKind>().unwrap(), ModelKind::Statistical);
        assert_eq!("ARIMA".parse::<ModelKind>().unwrap(), ModelKind::Statistical);
        assert_eq!("lstm".parse::<ModelKind>().unwrap(), ModelKind::TrendHeuristic);
        assert!(matches!(
            "unknown".parse::<ModelKind>(),
            Err(Error::UnknownModel(m)) if m == "unknown"
        ));
    }

    #[test]
    fn test_dispatch_labels() {
        let engine = ForecastEngine::new();
        let series = sample();

        let arima = engine.predict(&series, ModelKind::Statistical, 5).unwrap();
        assert_eq!(arima.model_label, "ARIMA");
        assert!(arima.confidence_intervals.is_some());

        let trend = engine.predict(&series, ModelKind::TrendHeuristic, 5).unwrap();
        assert_eq!(trend.model_label, "LSTM");
        assert!(trend.confidence_intervals.is_none());
    }

    #[test]
    fn test_unknown_model_name() {
        let engine = ForecastEngine::new();
        assert!(matches!(
            engine.predict_by_name(&sample(), "unknown", 5),
            Err(Error::UnknownModel(_))
        ));
    }

    #[test]
    fn test_zero_steps_rejected() {
        let engine = ForecastEngine::new();
        assert!(matches!(
            engine.predict(&sample(), ModelKind::TrendHeuristic, 0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unregistered_kind() {
        let engine = ForecastEngine::empty();
        assert!(matches!(
            engine.predict(&sample(), ModelKind::Statistical, 1),
            Err(Error::UnknownModel(m)) if m == "statistical"
        ));
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = std::sync::Arc::new(ForecastEngine::new());
        let series = sample();

        let handles: Vec<_> = [ModelKind::Statistical, ModelKind::TrendHeuristic]
            .into_iter()
            .map(|kind| {
                let engine = std::sync::Arc::clone(&engine);
                let series = series.clone();
                std::thread::spawn(move || engine.predict(&series, kind, 4).map(|r| r.len()))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), 4);
        }
    }
}
