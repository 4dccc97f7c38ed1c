//! Feature scaling

use crate::error::{Error, Result};

/// Min-max scaler mapping a fitted range onto [0, 1].
///
/// The scaler is a plain value: fit one per forecast call and drop it
/// afterwards, so concurrent calls never share fitted state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScaler {
    min: f64,
    max: f64,
}

impl MinMaxScaler {
    /// Fit to the observed range of `values`
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::InvalidInput(
                "cannot fit a scaler to an empty slice".to_string(),
            ));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "cannot fit a scaler to non-finite value {}",
                bad
            )));
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Ok(MinMaxScaler { min, max })
    }

    /// Fit and scale in one step
    pub fn fit_transform(values: &[f64]) -> Result<(Self, Vec<f64>)> {
        let scaler = Self::fit(values)?;
        let scaled = scaler.transform(values);
        Ok((scaler, scaled))
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Whether every fitted value was equal
    pub fn is_constant(&self) -> bool {
        self.range() <= 0.0
    }

    /// Scale one value. A constant fit maps everything to the 0.5 midpoint.
    pub fn transform_value(&self, value: f64) -> f64 {
        if self.is_constant() {
            0.5
        } else {
            (value - self.min) / self.range()
        }
    }

    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.transform_value(v)).collect()
    }

    /// Map a scaled value back to original units. A constant fit returns the
    /// constant.
    pub fn inverse_transform_value(&self, scaled: f64) -> f64 {
        if self.is_constant() {
            self.min
        } else {
            self.min + scaled * self.range()
        }
    }

    pub fn inverse_transform(&self, scaled: &[f64]) -> Vec<f64> {
        scaled
            .iter()
            .map(|&s| self.inverse_transform_value(s))
            .collect()
    }
}
