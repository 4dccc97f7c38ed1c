use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::temporal::{parse_timestamp, Series};

/// Timestamp layout written to consumption files
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
struct ConsumptionRow {
    timestamp: String,
    consumption: f64,
}

#[derive(Debug, Serialize)]
struct ConsumptionRecord {
    timestamp: String,
    consumption: f64,
}

/// Parse `timestamp,consumption` rows from any reader.
///
/// Rows are returned in file order; callers resampling the result must make
/// sure the file is sorted.
pub fn parse_consumption_csv<R: Read>(reader: R) -> Result<Series> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut pairs = Vec::new();
    for (line, row) in rdr.deserialize::<ConsumptionRow>().enumerate() {
        let row = row?;
        if !row.consumption.is_finite() || row.consumption < 0.0 {
            return Err(Error::Format(format!(
                "row {}: consumption must be a non-negative number, got {}",
                line + 1,
                row.consumption
            )));
        }
        pairs.push((parse_timestamp(&row.timestamp)?, row.consumption));
    }

    Ok(Series::from_pairs(pairs))
}

/// Read a consumption CSV file
pub fn read_consumption_csv<P: AsRef<Path>>(path: P) -> Result<Series> {
    let file = File::open(path.as_ref())?;
    let series = parse_consumption_csv(file)?;
    log::debug!(
        "read {} readings from {}",
        series.len(),
        path.as_ref().display()
    );
    Ok(series)
}

/// Write the defined points of `series` as `timestamp,consumption` rows
pub fn write_consumption<W: Write>(writer: W, series: &Series) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for point in series.points() {
        if let Some(consumption) = point.value {
            wtr.serialize(ConsumptionRecord {
                timestamp: point.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                consumption,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Write a consumption CSV file
pub fn write_consumption_csv<P: AsRef<Path>>(path: P, series: &Series) -> Result<()> {
    write_consumption(File::create(path.as_ref())?, series)
}
