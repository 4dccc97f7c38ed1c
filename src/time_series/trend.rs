//! Moving-average-plus-trend heuristic, reported under the legacy "LSTM" label.
//!
//! This is not a neural network and nothing is trained. The series is
//! min-max scaled, the recent level and mean step are extrapolated linearly,
//! and a small sine term is added so the output is not a straight line. That
//! sine term is cosmetic: it does not model seasonality and its period has no
//! relation to the data.

use std::f64::consts::PI;

use crate::error::{Error, Result};
use crate::ml::MinMaxScaler;
use crate::temporal::Series;
use crate::time_series::forecasting::{future_timestamps, ForecastResult, Forecaster};

/// Label used for results of this strategy
pub const TREND_LABEL: &str = "LSTM";

/// Upper bound on the trailing window length
pub const MAX_WINDOW: usize = 14;

/// Amplitude of the cosmetic oscillation, in scaled units
pub const OSCILLATION_AMPLITUDE: f64 = 0.02;

/// Trend-extrapolation strategy without confidence intervals
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendHeuristicForecaster;

impl TrendHeuristicForecaster {
    pub fn new() -> Self {
        TrendHeuristicForecaster
    }

    /// Scaled forecasts in [0, 1] for already-scaled history
    pub fn extrapolate(scaled: &[f64], steps: usize) -> Vec<f64> {
        let n = scaled.len();
        let window = MAX_WINDOW.min(n.saturating_sub(1));
        let tail = &scaled[n - window..];

        let moving_avg = if tail.is_empty() {
            0.0
        } else {
            tail.iter().sum::<f64>() / tail.len() as f64
        };
        let deltas: Vec<f64> = tail.windows(2).map(|w| w[1] - w[0]).collect();
        let trend = if deltas.is_empty() {
            0.0
        } else {
            deltas.iter().sum::<f64>() / deltas.len() as f64
        };

        (1..=steps)
            .map(|i| {
                let oscillation = OSCILLATION_AMPLITUDE * ((i - 1) as f64 * PI / 4.0).sin();
                (moving_avg + i as f64 * trend + oscillation).clamp(0.0, 1.0)
            })
            .collect()
    }
}

impl Forecaster for TrendHeuristicForecaster {
    fn name(&self) -> &str {
        TREND_LABEL
    }

    fn forecast(&self, series: &Series, steps: usize) -> Result<ForecastResult> {
        let history = series.defined();
        let values = history.defined_values();
        if values.len() < 2 {
            return Err(Error::InsufficientData {
                needed: 2,
                got: values.len(),
            });
        }

        let (scaler, scaled) = MinMaxScaler::fit_transform(&values)?;
        let forecast = scaler.inverse_transform(&Self::extrapolate(&scaled, steps));

        ForecastResult::new(future_timestamps(&history, steps)?, forecast, TREND_LABEL)
    }
}
