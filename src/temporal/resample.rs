use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::temporal::{Period, Series, TimePoint};

/// Resampling of a series into calendar buckets
#[derive(Debug)]
pub struct Resample<'a> {
    /// Source series, sorted ascending by timestamp
    series: &'a Series,

    /// Bucket width
    period: Period,
}

impl<'a> Resample<'a> {
    pub fn new(series: &'a Series, period: Period) -> Self {
        Resample { series, period }
    }

    /// Bucket means, forward-filled
    pub fn mean(&self) -> Result<Series> {
        self.aggregate(|values| values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Bucket sums, forward-filled
    pub fn sum(&self) -> Result<Series> {
        self.aggregate(|values| values.iter().sum())
    }

    /// Bucket maxima, forward-filled
    pub fn max(&self) -> Result<Series> {
        self.aggregate(|values| values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    /// Resample with a custom aggregator.
    ///
    /// The aggregator only ever sees non-empty slices. Buckets without any
    /// defined sample are filled with the previous bucket's value; a leading
    /// run of empty buckets stays undefined.
    pub fn aggregate<F>(&self, aggregator: F) -> Result<Series>
    where
        F: Fn(&[f64]) -> f64,
    {
        let (first, last) = match (self.series.first(), self.series.last()) {
            (Some(first), Some(last)) => (first.timestamp, last.timestamp),
            _ => {
                return Err(Error::EmptySeries(format!(
                    "cannot resample an empty series into {} buckets",
                    self.period
                )))
            }
        };

        let first_bucket = self.period.bucket_index(&first);
        let last_bucket = self.period.bucket_index(&last);
        if last_bucket < first_bucket {
            return Err(Error::InvalidInput(format!(
                "series is not sorted: first timestamp {} is after last timestamp {}",
                first, last
            )));
        }

        let mut groups: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
        for point in self.series.points() {
            if let Some(value) = point.value {
                groups
                    .entry(self.period.bucket_index(&point.timestamp))
                    .or_default()
                    .push(value);
            }
        }

        let raw: Vec<Option<f64>> = (first_bucket..=last_bucket)
            .map(|bucket| groups.get(&bucket).map(|values| aggregator(values)))
            .collect();
        let filled = forward_fill(&raw);

        let mut points = Vec::with_capacity(filled.len());
        for (bucket, value) in (first_bucket..=last_bucket).zip(filled) {
            points.push(TimePoint {
                timestamp: self.period.bucket_start_at(bucket)?,
                value,
            });
        }

        log::debug!(
            "resampled {} points into {} {} buckets",
            self.series.len(),
            points.len(),
            self.period
        );

        Ok(Series::new(points, self.series.name().cloned()).with_period(self.period))
    }
}

/// Mean-resample `series` into buckets of width `period`.
///
/// `series` must be sorted ascending by timestamp.
pub fn resample(series: &Series, period: Period) -> Result<Series> {
    Resample::new(series, period).mean()
}

/// Resample for one of the legacy view labels (`daily`, `weekly`, `monthly`)
pub fn resample_view(series: &Series, view_label: &str) -> Result<Series> {
    resample(series, Period::from_view_label(view_label)?)
}

/// Carry the last defined value forward into undefined slots.
/// Slots before the first defined value stay undefined.
pub fn forward_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut last = None;
    values
        .iter()
        .map(|value| {
            if value.is_some() {
                last = *value;
            }
            last
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, d, h, m, 0).unwrap()
    }

    #[test]
    fn test_hourly_mean_with_gap() {
        let series = Series::from_pairs(vec![
            (at(1, 0, 10), 10.0),
            (at(1, 0, 50), 20.0),
            (at(1, 2, 30), 40.0),
        ]);
        let result = resample(&series, Period::Hourly).unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result.period(), Some(Period::Hourly));
        assert_eq!(result.timestamps(), vec![at(1, 0, 0), at(1, 1, 0), at(1, 2, 0)]);
        assert_eq!(result.values(), vec![Some(15.0), Some(15.0), Some(40.0)]);
    }

    #[test]
    fn test_daily_buckets_start_at_midnight() {
        let series = Series::from_pairs(vec![
            (at(1, 6, 0), 2.0),
            (at(1, 18, 0), 4.0),
            (at(3, 1, 0), 9.0),
        ]);
        let result = resample(&series, Period::Daily).unwrap();
        assert_eq!(result.timestamps(), vec![at(1, 0, 0), at(2, 0, 0), at(3, 0, 0)]);
        assert_eq!(result.values(), vec![Some(3.0), Some(3.0), Some(9.0)]);
    }

    #[test]
    fn test_weekly_buckets_are_monday_aligned() {
        // Wednesday, Sunday, then the following Monday
        let series = Series::from_pairs(vec![
            (at(1, 12, 0), 10.0),
            (at(5, 12, 0), 30.0),
            (at(6, 0, 0), 50.0),
        ]);
        let result = resample(&series, Period::Weekly).unwrap();
        assert_eq!(
            result.timestamps(),
            vec![Utc.with_ymd_and_hms(2024, 12, 30, 0, 0, 0).unwrap(), at(6, 0, 0)]
        );
        assert_eq!(result.values(), vec![Some(20.0), Some(50.0)]);
    }

    #[test]
    fn test_leading_undefined_bucket_is_not_fabricated() {
        let series = Series::new(
            vec![TimePoint::undefined(at(1, 0, 10)), TimePoint::new(at(1, 2, 10), 5.0)],
            None,
        );
        let result = resample(&series, Period::Hourly).unwrap();
        assert_eq!(result.values(), vec![None, None, Some(5.0)]);
    }

    #[test]
    fn test_empty_series() {
        let series = Series::default();
        assert!(matches!(
            resample(&series, Period::Daily),
            Err(Error::EmptySeries(_))
        ));
    }

    #[test]
    fn test_resample_view_rejects_unknown_label() {
        let series = Series::from_pairs(vec![(at(1, 0, 0), 1.0)]);
        assert!(matches!(
            resample_view(&series, "invalid_period"),
            Err(Error::InvalidPeriod(p)) if p == "invalid_period"
        ));
        let daily_view = resample_view(&series, "daily").unwrap();
        assert_eq!(daily_view.period(), Some(Period::Hourly));
    }

    #[test]
    fn test_other_aggregators() {
        let series = Series::from_pairs(vec![(at(1, 0, 0), 1.0), (at(1, 0, 30), 3.0)]);
        let resampler = Resample::new(&series, Period::Hourly);
        assert_eq!(resampler.sum().unwrap().values(), vec![Some(4.0)]);
        assert_eq!(resampler.max().unwrap().values(), vec![Some(3.0)]);
    }

    #[test]
    fn test_forward_fill() {
        let filled = forward_fill(&[None, Some(1.0), None, None, Some(2.0), None]);
        assert_eq!(
            filled,
            vec![None, Some(1.0), Some(1.0), Some(1.0), Some(2.0), Some(2.0)]
        );
    }
}
