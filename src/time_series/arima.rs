//! ARIMA(1,1,1) forecasting strategy
//!
//! The model is fitted on first differences by minimising the conditional
//! sum of squares (CSS) with a bounded Nelder-Mead search:
//!
//! ```text
//! d_t = phi * d_{t-1} + theta * e_{t-1} + e_t
//! ```
//!
//! There is no constant term, so the point forecast levels off as
//! `phi^h` decays instead of drifting without bound.
//! Forecast error variance is propagated through the psi weights of the
//! integrated model, so interval width grows with the horizon.

use crate::error::{Error, Result};
use crate::stats::{self, nelder_mead, NelderMeadConfig, Z_95};
use crate::temporal::Series;
use crate::time_series::forecasting::{
    future_timestamps, ConfidenceInterval, ForecastResult, Forecaster,
};

/// Label used for results of this strategy
pub const ARIMA_LABEL: &str = "ARIMA";

/// Fewest defined observations the fit accepts
pub const MIN_OBSERVATIONS: usize = 3;

/// Largest absolute AR / MA coefficient allowed during estimation
const COEFFICIENT_BOUND: f64 = 0.99;

/// Parameters of a fitted ARIMA(1,1,1) model together with the state needed
/// to continue the recursion past the last observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArimaFit {
    /// AR(1) coefficient
    pub ar: f64,
    /// MA(1) coefficient
    pub ma: f64,
    /// Residual variance
    pub sigma2: f64,
    /// Number of observations on the original scale
    pub n_obs: usize,
    last_value: f64,
    last_diff: f64,
    last_residual: f64,
}

impl ArimaFit {
    /// Point forecasts on the original scale
    pub fn forecast(&self, steps: usize) -> Vec<f64> {
        let mut values = Vec::with_capacity(steps);
        let mut level = self.last_value;
        let mut prev_diff = self.last_diff;
        let mut prev_residual = self.last_residual;

        for _ in 0..steps {
            let diff = self.ar * prev_diff + self.ma * prev_residual;
            level += diff;
            values.push(level);
            prev_diff = diff;
            // future shocks have zero expectation
            prev_residual = 0.0;
        }
        values
    }

    /// Standard error of the h-step forecast for h = 1..=steps.
    ///
    /// Uses psi*_0 = 1 and psi*_j = psi*_{j-1} + phi^(j-1) * (phi + theta),
    /// the MA(infinity) weights of the integrated process.
    pub fn forecast_std_errors(&self, steps: usize) -> Vec<f64> {
        let mut errors = Vec::with_capacity(steps);
        let mut psi_star = 1.0;
        let mut phi_power = 1.0;
        let mut cumulative = 0.0;

        for h in 0..steps {
            if h > 0 {
                psi_star += phi_power * (self.ar + self.ma);
                phi_power *= self.ar;
            }
            cumulative += psi_star * psi_star;
            errors.push((self.sigma2 * cumulative).sqrt());
        }
        errors
    }
}

/// Conditional sum of squares and residuals for the given parameters
fn conditional_residuals(diff: &[f64], ar: f64, ma: f64) -> (f64, Vec<f64>) {
    let mut residuals = vec![0.0; diff.len()];
    let mut css = 0.0;
    for t in 1..diff.len() {
        let pred = ar * diff[t - 1] + ma * residuals[t - 1];
        let error = diff[t] - pred;
        residuals[t] = error;
        css += error * error;
    }
    (css, residuals)
}

/// Statistical strategy fitting a fixed-order ARIMA(1,1,1) model and
/// reporting 95% confidence intervals.
#[derive(Debug, Clone, Default)]
pub struct StatisticalForecaster {
    optimizer: NelderMeadConfig,
}

impl StatisticalForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom optimiser configuration
    pub fn with_optimizer(optimizer: NelderMeadConfig) -> Self {
        StatisticalForecaster { optimizer }
    }

    /// Fit the model to raw values
    pub fn fit(&self, values: &[f64]) -> Result<ArimaFit> {
        if values.len() < MIN_OBSERVATIONS {
            return Err(Error::ModelFitError(format!(
                "ARIMA(1,1,1) needs at least {} observations, got {}",
                MIN_OBSERVATIONS,
                values.len()
            )));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(Error::ModelFitError(format!(
                "series contains non-finite value {}",
                bad
            )));
        }
        let first = values[0];
        if values.iter().all(|&v| v == first) {
            return Err(Error::ModelFitError(format!(
                "series is constant at {} over {} observations; estimation is singular",
                first,
                values.len()
            )));
        }

        let diff = stats::difference(values);
        // a straight line has zero residual variance
        if stats::variance(&diff) == Some(0.0) {
            return Err(Error::ModelFitError(format!(
                "first differences are constant at {} over {} observations; estimation is singular",
                diff[0],
                values.len()
            )));
        }

        let bounds = [
            (-COEFFICIENT_BOUND, COEFFICIENT_BOUND),
            (-COEFFICIENT_BOUND, COEFFICIENT_BOUND),
        ];
        let result = nelder_mead(
            |params| conditional_residuals(&diff, params[0], params[1]).0,
            &[0.1, 0.1],
            Some(&bounds),
            self.optimizer.clone(),
        );

        let (ar, ma) = (result.optimal_point[0], result.optimal_point[1]);
        if ![ar, ma, result.optimal_value].iter().all(|v| v.is_finite()) {
            return Err(Error::ModelFitError(format!(
                "parameter estimation diverged (ar={}, ma={})",
                ar, ma
            )));
        }

        let (css, residuals) = conditional_residuals(&diff, ar, ma);
        let sigma2 = css / (diff.len() - 1) as f64;
        if sigma2.is_nan() || sigma2 <= 0.0 {
            return Err(Error::ModelFitError(format!(
                "residual variance is {} after fitting; intervals would be degenerate",
                sigma2
            )));
        }

        log::debug!(
            "fitted ARIMA(1,1,1): phi={:.4} theta={:.4} sigma2={:.4} after {} iterations (converged: {})",
            ar,
            ma,
            sigma2,
            result.iterations,
            result.converged
        );

        Ok(ArimaFit {
            ar,
            ma,
            sigma2,
            n_obs: values.len(),
            last_value: values[values.len() - 1],
            last_diff: diff[diff.len() - 1],
            last_residual: residuals[residuals.len() - 1],
        })
    }
}

impl Forecaster for StatisticalForecaster {
    fn name(&self) -> &str {
        ARIMA_LABEL
    }

    fn forecast(&self, series: &Series, steps: usize) -> Result<ForecastResult> {
        let history = series.defined();
        let fit = self.fit(&history.defined_values())?;

        let values = fit.forecast(steps);
        let intervals = values
            .iter()
            .zip(fit.forecast_std_errors(steps))
            .map(|(&v, se)| ConfidenceInterval::new(v - Z_95 * se, v + Z_95 * se))
            .collect();

        ForecastResult::new(future_timestamps(&history, steps)?, values, ARIMA_LABEL)?
            .with_confidence_intervals(intervals)
    }
}
