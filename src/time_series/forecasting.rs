//! Forecast strategy interface and result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::temporal::Series;

/// Uncertainty band for one forecast step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn new(lower: f64, upper: f64) -> Self {
        ConfidenceInterval { lower, upper }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Output of a forecast strategy.
///
/// `timestamps` and `values` always have one entry per requested step, and
/// `confidence_intervals`, when present, is aligned with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub timestamps: Vec<DateTime<Utc>>,
    pub values: Vec<f64>,
    #[serde(rename = "model_type")]
    pub model_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_intervals: Option<Vec<ConfidenceInterval>>,
}

impl ForecastResult {
    pub fn new(
        timestamps: Vec<DateTime<Utc>>,
        values: Vec<f64>,
        model_label: impl Into<String>,
    ) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(Error::LengthMismatch {
                expected: timestamps.len(),
                actual: values.len(),
            });
        }
        Ok(ForecastResult {
            timestamps,
            values,
            model_label: model_label.into(),
            confidence_intervals: None,
        })
    }

    /// Attach per-step confidence intervals
    pub fn with_confidence_intervals(mut self, intervals: Vec<ConfidenceInterval>) -> Result<Self> {
        if intervals.len() != self.values.len() {
            return Err(Error::LengthMismatch {
                expected: self.values.len(),
                actual: intervals.len(),
            });
        }
        self.confidence_intervals = Some(intervals);
        Ok(self)
    }

    /// Number of forecast steps
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(timestamp, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.timestamps.iter().copied().zip(self.values.iter().copied())
    }

    /// The forecast as a series continuing the history
    pub fn to_series(&self) -> Series {
        Series::from_pairs(self.iter())
    }
}

/// A forecasting strategy.
///
/// Implementations hold only configuration. Any fitted state lives inside a
/// single `forecast` call, so one instance can serve concurrent callers.
pub trait Forecaster: Send + Sync + Debug {
    /// Label reported in [`ForecastResult::model_label`]
    fn name(&self) -> &str;

    /// Forecast `steps` points past the end of a regular series
    fn forecast(&self, series: &Series, steps: usize) -> Result<ForecastResult>;
}

/// Timestamps for `steps` future points, spaced by the series' final
/// interval (one hour when it cannot be measured).
pub fn future_timestamps(series: &Series, steps: usize) -> Result<Vec<DateTime<Utc>>> {
    let last = series
        .last()
        .ok_or_else(|| Error::EmptySeries("cannot extend an empty series".to_string()))?
        .timestamp;
    let interval = series.last_interval();

    let mut timestamps = Vec::with_capacity(steps);
    let mut current = last;
    for step in 1..=steps {
        current = current.checked_add_signed(interval).ok_or_else(|| {
            Error::InvalidInput(format!(
                "forecast step {} overflows the representable time range",
                step
            ))
        })?;
        timestamps.push(current);
    }
    Ok(timestamps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_future_timestamps_use_last_interval() {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let series = Series::from_pairs(vec![
            (base, 1.0),
            (base + Duration::days(1), 2.0),
            (base + Duration::days(2), 3.0),
        ]);
        let ts = future_timestamps(&series, 3).unwrap();
        assert_eq!(
            ts,
            vec![
                base + Duration::days(3),
                base + Duration::days(4),
                base + Duration::days(5)
            ]
        );
    }

    #[test]
    fn test_future_timestamps_default_to_one_hour() {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let series = Series::from_pairs(vec![(base, 1.0)]);
        let ts = future_timestamps(&series, 2).unwrap();
        assert_eq!(ts, vec![base + Duration::hours(1), base + Duration::hours(2)]);
    }

    #[test]
    fn test_result_length_checks() {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert!(ForecastResult::new(vec![base], vec![1.0, 2.0], "X").is_err());

        let result = ForecastResult::new(vec![base], vec![1.0], "X").unwrap();
        assert!(result
            .clone()
            .with_confidence_intervals(vec![])
            .is_err());
        let with_ci = result
            .with_confidence_intervals(vec![ConfidenceInterval::new(0.5, 1.5)])
            .unwrap();
        assert_eq!(with_ci.confidence_intervals.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_serialized_field_names() {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let result = ForecastResult::new(vec![base], vec![1.0], "LSTM").unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["model_type"], "LSTM");
        assert!(json.get("confidence_intervals").is_none());
    }
}
