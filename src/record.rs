use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One operator-entered daily observation for a flock.
///
/// Every field except the timestamp may be absent: the monitoring form
/// allows partial entries, and older documents in the store predate some
/// fields. Aggregation skips what it cannot use rather than failing.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Moment the entry was saved. A record without a timestamp cannot
    /// be placed in a week or month bucket.
    pub timestamp: Option<DateTime<Utc>>,

    /// Flock age in days at the time of observation.
    pub age: Option<u32>,

    pub number_of_deaths: Option<u32>,
    pub total_population: Option<u32>,

    /// Flock-level totals, not per-bird figures.
    pub water_intake: Option<f64>,
    pub feed_intake: Option<f64>,

    /// Flock-level average, kilograms.
    pub average_weight: Option<f64>,
}

impl MetricRecord {
    /// Calendar date of the observation with the time of day stripped.
    pub fn observation_date(&self) -> Option<NaiveDate> {
        self.timestamp.map(|t| t.date_naive())
    }

    /// Mortality rate in percent for this record, when both deaths and a
    /// non-zero population were entered. A zero population would divide
    /// by zero and is treated the same as a missing field.
    pub fn mortality_rate(&self) -> Option<f64> {
        match (self.number_of_deaths, self.total_population) {
            (Some(deaths), Some(population)) if population > 0 => {
                Some(deaths as f64 / population as f64 * 100.0)
            }
            _ => None,
        }
    }

    /// Divides a flock-level quantity by a head count to get the
    /// per-bird figure. Returns `None` for an empty flock.
    pub fn per_bird(total: f64, population: u32) -> Option<f64> {
        if population == 0 {
            return None;
        }
        Some(total / population as f64)
    }
}

/// Current flock age in days, counted from the earliest recorded
/// observation. The hatch day itself counts as day one.
pub fn flock_age_days(earliest: NaiveDate, today: NaiveDate) -> i64 {
    (today - earliest).num_days() + 1
}
