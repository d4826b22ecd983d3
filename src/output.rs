//! Output formatting and persistence for daily metric records.
//!
//! Operator entries are journaled to a CSV file, one row per day, and can
//! be read back for aggregation. Also supports pretty-printing and JSON
//! serialization for downstream consumers.

use anyhow::{Result, bail};
use tracing::{debug, info};

use crate::record::MetricRecord;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Logs a record using Rust's debug pretty-print format.
pub fn print_pretty(record: &MetricRecord) {
    debug!("{:#?}", record);
}

/// Logs any report as pretty-printed JSON.
pub fn print_json<T: Serialize>(report: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Appends a [`MetricRecord`] as a row to the CSV journal.
///
/// Creates the file with headers if it does not already exist. The entry
/// is validated first: deaths may not exceed the population on the same
/// entry, and quantities must be finite and non-negative.
pub fn append_record(path: &str, record: &MetricRecord) -> Result<()> {
    validate_entry(record)?;

    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}

/// Reads all records from a CSV journal. A missing file reads as an
/// empty collection, matching how a failed fetch is treated upstream.
pub fn read_records(path: &str) -> Result<Vec<MetricRecord>> {
    if !Path::new(path).exists() {
        debug!(path, "journal not found, treating as empty");
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut records = Vec::new();

    for result in rdr.deserialize() {
        let record: MetricRecord = result?;
        records.push(record);
    }

    Ok(records)
}

fn validate_entry(record: &MetricRecord) -> Result<()> {
    if let (Some(deaths), Some(population)) = (record.number_of_deaths, record.total_population) {
        if deaths > population {
            bail!("number of deaths ({deaths}) cannot exceed total population ({population})");
        }
    }

    for (name, value) in [
        ("water_intake", record.water_intake),
        ("feed_intake", record.feed_intake),
        ("average_weight", record.average_weight),
    ] {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                bail!("{name} must be a non-negative number, got {v}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_record() -> MetricRecord {
        MetricRecord {
            timestamp: Some(Utc::now()),
            age: Some(12),
            number_of_deaths: Some(1),
            total_population: Some(200),
            water_intake: Some(14.0),
            feed_intake: Some(9.5),
            average_weight: Some(0.52),
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&MetricRecord::default());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_record()).unwrap();
    }

    #[test]
    fn test_append_record_creates_file() {
        let path = temp_path("flock_metrics_test_create.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        append_record(&path, &sample_record()).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_record_writes_header_once() {
        let path = temp_path("flock_metrics_test_header.csv");
        let _ = fs::remove_file(&path);

        append_record(&path, &sample_record()).unwrap();
        append_record(&path, &sample_record()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Header line should appear exactly once
        let header_count = content.lines().filter(|l| l.contains("timestamp")).count();
        assert_eq!(header_count, 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_round_trip_through_journal() {
        let path = temp_path("flock_metrics_test_round_trip.csv");
        let _ = fs::remove_file(&path);

        let record = sample_record();
        append_record(&path, &record).unwrap();
        append_record(&path, &record).unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].age, Some(12));
        assert_eq!(records[0].water_intake, Some(14.0));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_records_missing_file_is_empty() {
        let records = read_records(&temp_path("flock_metrics_test_missing.csv")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_rejects_deaths_exceeding_population() {
        let path = temp_path("flock_metrics_test_reject.csv");
        let _ = fs::remove_file(&path);

        let mut record = sample_record();
        record.number_of_deaths = Some(500);
        assert!(append_record(&path, &record).is_err());
        assert!(!Path::new(&path).exists());
    }

    #[test]
    fn test_rejects_negative_quantities() {
        let mut record = sample_record();
        record.feed_intake = Some(-1.0);
        assert!(validate_entry(&record).is_err());

        record.feed_intake = Some(f64::NAN);
        assert!(validate_entry(&record).is_err());
    }
}
