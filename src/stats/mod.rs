// Statistics helpers
//
// Small descriptive helpers shared by the forecasting strategies, plus the
// simplex optimiser used for ARIMA parameter estimation.

pub mod optimization;

pub use optimization::{nelder_mead, NelderMeadConfig, NelderMeadResult};

/// Two-sided 95% standard normal quantile
pub const Z_95: f64 = 1.959_963_984_540_054;

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Population variance, `None` for an empty slice
pub fn variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    Some(values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64)
}

/// First differences
pub fn difference(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(variance(&[2.0, 4.0]), Some(1.0));
    }

    #[test]
    fn test_difference() {
        assert_eq!(difference(&[1.0, 4.0, 9.0]), vec![3.0, 5.0]);
        assert!(difference(&[1.0]).is_empty());
    }
}
