//! Time series containers and calendar bucketing

mod period;
mod resample;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use self::period::Period;
pub use self::resample::{forward_fill, resample, resample_view, Resample};

/// Interval assumed between samples when a series is too short to measure one
pub const DEFAULT_SAMPLE_INTERVAL_SECS: i64 = 3_600;

/// Default unit for consumption values
pub const DEFAULT_UNIT: &str = "kWh";

/// Parse a timestamp in any of the formats the data files use.
///
/// Accepts RFC 3339, `%Y-%m-%d %H:%M:%S` and `%Y-%m-%dT%H:%M:%S`. Naive
/// timestamps are taken as UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    match NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        Ok(dt) => Ok(dt.and_utc()),
        Err(_) => match NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            Ok(dt) => Ok(dt.and_utc()),
            Err(e) => Err(Error::Format(format!(
                "unrecognised timestamp {:?}: {}",
                s, e
            ))),
        },
    }
}

/// A single observation. `value` is `None` for a bucket with no data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub timestamp: DateTime<Utc>,
    pub value: Option<f64>,
}

impl TimePoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        TimePoint {
            timestamp,
            value: Some(value),
        }
    }

    pub fn undefined(timestamp: DateTime<Utc>) -> Self {
        TimePoint {
            timestamp,
            value: None,
        }
    }
}

/// One consumption reading as exposed to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyConsumption {
    pub timestamp: DateTime<Utc>,
    pub consumption: f64,
    pub unit: String,
}

/// Ordered sequence of timestamped consumption values.
///
/// Series are never mutated once built; resampling and forecasting return new
/// values. Callers are expected to supply points sorted by timestamp.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    points: Vec<TimePoint>,
    name: Option<String>,
    period: Option<Period>,
}

impl Series {
    pub fn new(points: Vec<TimePoint>, name: Option<String>) -> Self {
        Series {
            points,
            name,
            period: None,
        }
    }

    /// Build a series from parallel timestamp and value vectors
    pub fn from_vecs(
        timestamps: Vec<DateTime<Utc>>,
        values: Vec<f64>,
        name: Option<String>,
    ) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(Error::LengthMismatch {
                expected: timestamps.len(),
                actual: values.len(),
            });
        }
        let points = timestamps
            .into_iter()
            .zip(values)
            .map(|(ts, v)| TimePoint::new(ts, v))
            .collect();
        Ok(Series::new(points, name))
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (DateTime<Utc>, f64)>,
    {
        Series::new(
            pairs
                .into_iter()
                .map(|(ts, v)| TimePoint::new(ts, v))
                .collect(),
            None,
        )
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Bucket width this series was resampled at, if any
    pub fn period(&self) -> Option<Period> {
        self.period
    }

    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.points.iter().map(|p| p.timestamp).collect()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Values of the defined points, in order
    pub fn defined_values(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.value).collect()
    }

    /// Copy of the series without undefined points.
    ///
    /// After resampling only a leading run can be undefined, so this keeps the
    /// remaining points regular.
    pub fn defined(&self) -> Series {
        Series {
            points: self
                .points
                .iter()
                .filter(|p| p.value.is_some())
                .copied()
                .collect(),
            name: self.name.clone(),
            period: self.period,
        }
    }

    pub fn first(&self) -> Option<&TimePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TimePoint> {
        self.points.last()
    }

    /// Most recent defined value
    pub fn latest_value(&self) -> Option<f64> {
        self.points.iter().rev().find_map(|p| p.value)
    }

    /// Gap between the final two timestamps.
    ///
    /// Falls back to one hour when there are fewer than two points or the
    /// final gap is not positive.
    pub fn last_interval(&self) -> Duration {
        let n = self.points.len();
        if n >= 2 {
            let delta = self.points[n - 1].timestamp - self.points[n - 2].timestamp;
            if delta > Duration::zero() {
                return delta;
            }
        }
        Duration::seconds(DEFAULT_SAMPLE_INTERVAL_SECS)
    }

    /// Resample into calendar buckets of the given width
    pub fn resample(&self, period: Period) -> Result<Series> {
        resample(self, period)
    }

    /// Defined points as consumption records
    pub fn to_records(&self, unit: &str) -> Vec<EnergyConsumption> {
        self.points
            .iter()
            .filter_map(|p| {
                p.value.map(|consumption| EnergyConsumption {
                    timestamp: p.timestamp,
                    consumption,
                    unit: unit.to_string(),
                })
            })
            .collect()
    }
}
