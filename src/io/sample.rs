//! Synthetic consumption data for demos and first runs

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use rand::Rng;
use std::f64::consts::PI;

use crate::temporal::Series;

/// Hourly readings from `start` through `start + days`, inclusive.
///
/// Consumption follows `30 + 20 * sin(pi * hour / 12)`, is scaled by 0.8 on
/// weekends, gets uniform noise in [-5, 5) and is clamped at zero.
pub fn generate_sample<R: Rng>(start: DateTime<Utc>, days: u32, rng: &mut R) -> Series {
    let hours = i64::from(days) * 24;
    Series::from_pairs((0..=hours).map(|h| {
        let ts = start + Duration::hours(h);
        let base = 30.0 + 20.0 * (PI * f64::from(ts.hour()) / 12.0).sin();
        let weekday_factor = if ts.weekday().num_days_from_monday() < 5 {
            1.0
        } else {
            0.8
        };
        let noise = rng.random_range(-5.0..5.0);
        (ts, (base * weekday_factor + noise).max(0.0))
    }))
}

/// A simulated live reading derived from the last known one.
///
/// Scales `last` by a time-of-day factor `1 + 0.2 * sin(pi * hour / 12)` and
/// adds up to +/-10% of `last` as noise. Never negative.
pub fn simulate_realtime<R: Rng>(last: f64, hour: u32, rng: &mut R) -> f64 {
    let fluctuation = rng.random_range(-0.1..0.1) * last;
    let time_factor = 1.0 + 0.2 * (PI * f64::from(hour) / 12.0).sin();
    (last * time_factor + fluctuation).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_shape() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let series = generate_sample(start, 30, &mut rng);

        assert_eq!(series.len(), 30 * 24 + 1);
        assert_eq!(series.first().unwrap().timestamp, start);
        assert_eq!(
            series.last().unwrap().timestamp,
            Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap()
        );
        // base peaks at 50, so noise keeps every reading below 55
        assert!(series.defined_values().iter().all(|&v| (0.0..55.0).contains(&v)));
    }

    #[test]
    fn test_sample_is_reproducible() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let a = generate_sample(start, 2, &mut StdRng::seed_from_u64(1));
        let b = generate_sample(start, 2, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_realtime_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for hour in 0..24 {
            let v = simulate_realtime(50.0, hour, &mut rng);
            assert!(v >= 0.0);
            assert!(v <= 50.0 * 1.2 + 5.0);
        }
        assert_eq!(simulate_realtime(0.0, 6, &mut rng), 0.0);
    }
}
