use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Seconds between the Unix epoch (a Thursday) and the first Monday after it.
/// Weekly buckets are aligned to Monday 00:00 UTC.
const FIRST_MONDAY_OFFSET: i64 = 4 * 86_400;

/// Bucket width used when resampling a series.
///
/// The dashboard views are labelled one step coarser than the buckets they
/// use: the "daily" view is built from hourly buckets, the "weekly" view from
/// daily buckets and the "monthly" view from weekly buckets. Use
/// [`Period::from_view_label`] for those labels and [`FromStr`] for bucket
/// names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// One-hour buckets starting at the top of each hour
    Hourly,
    /// One-day buckets starting at midnight UTC
    Daily,
    /// Seven-day buckets starting Monday 00:00 UTC
    Weekly,
}

impl Period {
    /// Map a legacy view label to its bucket width.
    pub fn from_view_label(label: &str) -> Result<Self> {
        match label.trim().to_lowercase().as_str() {
            "daily" => Ok(Period::Hourly),
            "weekly" => Ok(Period::Daily),
            "monthly" => Ok(Period::Weekly),
            _ => Err(Error::InvalidPeriod(label.to_string())),
        }
    }

    /// The view label served by this bucket width
    pub fn view_label(&self) -> &'static str {
        match self {
            Period::Hourly => "daily",
            Period::Daily => "weekly",
            Period::Weekly => "monthly",
        }
    }

    /// Bucket width in seconds
    pub fn to_seconds(&self) -> i64 {
        match self {
            Period::Hourly => 3_600,
            Period::Daily => 86_400,
            Period::Weekly => 604_800,
        }
    }

    /// Bucket width as a duration
    pub fn duration(&self) -> Duration {
        Duration::seconds(self.to_seconds())
    }

    fn alignment_offset(&self) -> i64 {
        match self {
            Period::Weekly => FIRST_MONDAY_OFFSET,
            Period::Hourly | Period::Daily => 0,
        }
    }

    /// Index of the bucket containing `ts`. Consecutive buckets have
    /// consecutive indices.
    pub fn bucket_index(&self, ts: &DateTime<Utc>) -> i64 {
        (ts.timestamp() - self.alignment_offset()).div_euclid(self.to_seconds())
    }

    /// Start instant of the bucket with the given index
    pub fn bucket_start_at(&self, index: i64) -> Result<DateTime<Utc>> {
        index
            .checked_mul(self.to_seconds())
            .and_then(|secs| secs.checked_add(self.alignment_offset()))
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "bucket index {} is out of range for {} buckets",
                    index, self
                ))
            })
    }

    /// Start instant of the bucket containing `ts`
    pub fn bucket_start(&self, ts: &DateTime<Utc>) -> Result<DateTime<Utc>> {
        self.bucket_start_at(self.bucket_index(ts))
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "h" | "hour" | "hourly" => Ok(Period::Hourly),
            "d" | "day" | "daily" => Ok(Period::Daily),
            "w" | "week" | "weekly" => Ok(Period::Weekly),
            _ => Err(Error::InvalidPeriod(s.to_string())),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Hourly => write!(f, "hourly"),
            Period::Daily => write!(f, "daily"),
            Period::Weekly => write!(f, "weekly"),
        }
    }
}
