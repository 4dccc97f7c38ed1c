//! Consumption data files

pub mod csv;
pub mod sample;

use chrono::{TimeZone, Utc};
use rand::Rng;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::temporal::Series;

pub use self::csv::{parse_consumption_csv, read_consumption_csv, write_consumption_csv};
pub use self::sample::{generate_sample, simulate_realtime};

/// Days of hourly data written when no data file exists yet
pub const SAMPLE_DAYS: u32 = 30;

/// Read the consumption file at `path`, first writing a synthetic 30-day
/// hourly sample starting 2025-01-01 if the file does not exist.
pub fn load_or_generate<P: AsRef<Path>, R: Rng>(path: P, rng: &mut R) -> Result<Series> {
    let path = path.as_ref();
    if !path.exists() {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let start = Utc
            .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| Error::InvalidInput("invalid sample start date".to_string()))?;
        let sample = generate_sample(start, SAMPLE_DAYS, rng);
        write_consumption_csv(path, &sample)?;
        log::info!(
            "no data file at {}, wrote {} synthetic readings",
            path.display(),
            sample.len()
        );
    }
    read_consumption_csv(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generates_missing_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("energy.csv");
        let mut rng = StdRng::seed_from_u64(11);

        let first = load_or_generate(&path, &mut rng).unwrap();
        assert!(path.exists());
        assert_eq!(first.len(), 30 * 24 + 1);

        let second = load_or_generate(&path, &mut rng).unwrap();
        assert_eq!(first.timestamps(), second.timestamps());
    }
}
