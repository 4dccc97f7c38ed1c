//! Shared fixtures for the integration tests
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use enerts::Series;

/// 2025-01-01 00:00 UTC, a Wednesday
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

/// Series with one value per `step`, starting at [`base_time`]
pub fn regular_series(values: &[f64], step: Duration) -> Series {
    Series::from_pairs(
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| (base_time() + step * i as i32, v)),
    )
}

pub fn hourly_series(values: &[f64]) -> Series {
    regular_series(values, Duration::hours(1))
}

/// Smooth daily-cycle consumption with a gentle upward drift
pub fn daily_cycle(hours: usize) -> Vec<f64> {
    (0..hours)
        .map(|h| {
            let t = h as f64;
            30.0 + 20.0 * (std::f64::consts::PI * (h % 24) as f64 / 12.0).sin()
                + 0.05 * t
                + 1.5 * (t * 0.7).cos()
        })
        .collect()
}
