mod common;

use enerts::io::{load_or_generate, read_consumption_csv, write_consumption_csv};
use enerts::{predict, resample_view, Period};
use rand::rngs::StdRng;
use rand::SeedableRng;

use common::{daily_cycle, hourly_series};

#[test]
fn test_csv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("readings.csv");
    let series = hourly_series(&daily_cycle(12));

    write_consumption_csv(&path, &series).unwrap();
    let loaded = read_consumption_csv(&path).unwrap();
    assert_eq!(loaded.points(), series.points());
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        read_consumption_csv(dir.path().join("absent.csv")),
        Err(enerts::Error::Io(_))
    ));
}

#[test]
fn test_generated_sample_feeds_every_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample_energy_data.csv");
    let raw = load_or_generate(&path, &mut StdRng::seed_from_u64(2025)).unwrap();

    for (view, period, buckets) in [
        ("daily", Period::Hourly, 30 * 24 + 1),
        ("weekly", Period::Daily, 31),
        ("monthly", Period::Weekly, 5),
    ] {
        let history = resample_view(&raw, view).unwrap();
        assert_eq!(history.period(), Some(period));
        assert_eq!(history.len(), buckets, "view {}", view);
        assert!(history.values().iter().all(Option::is_some));
    }

    let history = resample_view(&raw, "weekly").unwrap();
    let forecast = predict(&history, "statistical", 10).unwrap();
    assert_eq!(forecast.len(), 10);
}
