//! Dashboard-facing aggregation over a raw record snapshot.
//!
//! Everything here is a pure function of the full record collection plus
//! the caller's current selections (week, month, entered population).
//! The data layer re-invokes these on every new snapshot; nothing is
//! cached between calls, and week numbering is always anchored on the
//! complete collection rather than the filtered subset.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::analyzers::classify::{
    Assessment, classify_average_weight, classify_feed_intake, classify_humidity,
    classify_mortality, classify_temperature, classify_water_intake,
};
use crate::analyzers::month::{DailyMortality, WINDOWS_PER_MONTH, bucket_by_month};
use crate::analyzers::week::bucket_by_week;
use crate::record::MetricRecord;

/// One entry of the week selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekChoice {
    pub index: u32,
    pub label: String,
}

/// One plotted day of flock-level intake, keyed the way the charts label
/// their x axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntakePoint {
    pub month: u32,
    pub day: u32,
    pub feed_kilograms: Option<f64>,
    pub water_litres: Option<f64>,
}

/// Intake chart data for one selected week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyIntakeReport {
    /// Anchor date the week numbering is counted from.
    pub earliest: Option<NaiveDate>,
    /// All weeks with data, for the selector.
    pub weeks: Vec<WeekChoice>,
    /// Week actually shown; defaults to the first available week.
    pub selected_week: Option<u32>,
    pub points: Vec<IntakePoint>,
}

/// Builds the feed/water chart data for the selected week. Passing `None`
/// selects the first week that has data. The anchor date and the selector
/// contents do not depend on the selection.
pub fn weekly_intake(records: &[MetricRecord], selected_week: Option<u32>) -> WeeklyIntakeReport {
    let buckets = bucket_by_week(records);

    let weeks: Vec<WeekChoice> = buckets
        .weeks
        .iter()
        .map(|w| WeekChoice {
            index: w.index,
            label: w.label.clone(),
        })
        .collect();

    let selected_week = selected_week.or_else(|| weeks.first().map(|w| w.index));

    let points: Vec<IntakePoint> = selected_week
        .and_then(|index| buckets.week(index))
        .map(|bucket| {
            bucket
                .records
                .iter()
                .filter_map(|record| {
                    use chrono::Datelike;
                    let date = record.observation_date()?;
                    Some(IntakePoint {
                        month: date.month(),
                        day: date.day(),
                        feed_kilograms: record.feed_intake,
                        water_litres: record.water_intake,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    debug!(
        weeks = weeks.len(),
        ?selected_week,
        points = points.len(),
        "weekly intake assembled"
    );

    WeeklyIntakeReport {
        earliest: buckets.earliest,
        weeks,
        selected_week,
        points,
    }
}

/// Mortality chart data for one selected month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MortalityReport {
    /// Months with at least one valid record, ascending.
    pub months: Vec<u32>,
    /// Month actually shown; defaults to the first available month.
    pub selected_month: Option<u32>,
    /// Daily rates of the selected month, sorted by day.
    pub daily: Vec<DailyMortality>,
    /// Average rate per fixed 7-day window of the selected month.
    pub weekly_averages: [f64; WINDOWS_PER_MONTH],
}

/// Builds the mortality report for the selected month. Passing `None`
/// selects the first month that has data.
pub fn monthly_mortality(
    records: &[MetricRecord],
    selected_month: Option<u32>,
) -> MortalityReport {
    let buckets = bucket_by_month(records);
    let months = buckets.available_months();
    let selected_month = selected_month.or_else(|| months.first().copied());

    let (daily, weekly_averages) = match selected_month {
        Some(month) => (
            buckets.daily_rates(month).to_vec(),
            buckets.weekly_averages(month),
        ),
        None => (Vec::new(), [0.0; WINDOWS_PER_MONTH]),
    };

    MortalityReport {
        months,
        selected_month,
        daily,
        weekly_averages,
    }
}

/// Classified status of each metric on one day's record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailySummary {
    pub mortality: Assessment,
    pub water_intake: Assessment,
    pub feed_intake: Assessment,
    pub average_weight: Assessment,
}

/// Classifies one record's metrics. Intake normalization divides by the
/// caller-supplied current population, not the head count stored on the
/// record; mortality uses the record's own population since the rate
/// describes that day.
pub fn summarize_record(record: &MetricRecord, total_population: u32) -> DailySummary {
    let intake = |total: Option<f64>, classify: fn(f64, Option<u32>, u32) -> Assessment| {
        match total {
            Some(total) => classify(total, record.age, total_population),
            None => Assessment::NoInput,
        }
    };

    DailySummary {
        mortality: classify_mortality(record.number_of_deaths, record.total_population),
        water_intake: intake(record.water_intake, classify_water_intake),
        feed_intake: intake(record.feed_intake, classify_feed_intake),
        average_weight: match record.average_weight {
            Some(kg) => classify_average_weight(kg, record.age),
            None => Assessment::NoInput,
        },
    }
}

/// Classified status of a live temperature/humidity reading pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentSummary {
    pub temperature: Assessment,
    pub humidity: Assessment,
}

/// Classifies the current house climate for the given flock age. The
/// telemetry transport is the caller's business; values arrive as plain
/// numbers.
pub fn assess_environment(
    celsius: f64,
    humidity_percent: f64,
    age: Option<u32>,
) -> EnvironmentSummary {
    EnvironmentSummary {
        temperature: classify_temperature(celsius, age),
        humidity: classify_humidity(humidity_percent, age),
    }
}

/// The most recently saved record, by timestamp. Records without a
/// timestamp never win.
pub fn latest_record(records: &[MetricRecord]) -> Option<&MetricRecord> {
    records
        .iter()
        .filter(|r| r.timestamp.is_some())
        .max_by_key(|r| r.timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::classify::Status;
    use chrono::{DateTime, Utc};

    fn record_on(date: &str) -> MetricRecord {
        MetricRecord {
            timestamp: Some(
                format!("{date}T09:00:00Z")
                    .parse::<DateTime<Utc>>()
                    .unwrap(),
            ),
            ..Default::default()
        }
    }

    fn full_record(date: &str) -> MetricRecord {
        MetricRecord {
            age: Some(10),
            number_of_deaths: Some(5),
            total_population: Some(100),
            water_intake: Some(1.0),
            feed_intake: Some(2.0),
            average_weight: Some(0.4),
            ..record_on(date)
        }
    }

    #[test]
    fn test_weekly_intake_defaults_to_first_week() {
        let records = [record_on("2024-03-01"), record_on("2024-03-10")];
        let report = weekly_intake(&records, None);
        assert_eq!(report.selected_week, Some(1));
        assert_eq!(report.weeks.len(), 2);
        assert_eq!(report.points.len(), 1);
    }

    #[test]
    fn test_weekly_intake_anchor_independent_of_selection() {
        let records = [
            full_record("2024-03-01"),
            full_record("2024-03-10"),
            full_record("2024-03-20"),
        ];
        let week1 = weekly_intake(&records, Some(1));
        let week3 = weekly_intake(&records, Some(3));
        assert_eq!(week1.earliest, week3.earliest);
        assert_eq!(week1.weeks, week3.weeks);
        assert_eq!(week3.points.len(), 1);
        assert_eq!(week3.points[0].day, 20);
    }

    #[test]
    fn test_weekly_intake_empty_collection() {
        let report = weekly_intake(&[], None);
        assert_eq!(report.earliest, None);
        assert!(report.weeks.is_empty());
        assert_eq!(report.selected_week, None);
        assert!(report.points.is_empty());
    }

    #[test]
    fn test_weekly_intake_selection_without_data() {
        let records = [record_on("2024-03-01")];
        let report = weekly_intake(&records, Some(9));
        assert_eq!(report.selected_week, Some(9));
        assert!(report.points.is_empty());
        // Selector still lists the weeks that do have data.
        assert_eq!(report.weeks.len(), 1);
    }

    #[test]
    fn test_monthly_mortality_defaults_to_first_month() {
        let records = [full_record("2024-04-02"), full_record("2024-06-05")];
        let report = monthly_mortality(&records, None);
        assert_eq!(report.months, vec![4, 6]);
        assert_eq!(report.selected_month, Some(4));
        assert_eq!(report.daily.len(), 1);
        assert_eq!(report.weekly_averages[0], 5.0);
    }

    #[test]
    fn test_monthly_mortality_empty_collection() {
        let report = monthly_mortality(&[], None);
        assert!(report.months.is_empty());
        assert_eq!(report.selected_month, None);
        assert!(report.daily.is_empty());
    }

    #[test]
    fn test_summarize_record_statuses() {
        let record = full_record("2024-03-05");
        let summary = summarize_record(&record, 100);

        // 5 deaths of 100 is exactly the 5% cutoff.
        assert_eq!(
            summary.mortality,
            Assessment::Classified {
                value: 5.0,
                status: Status::Normal
            }
        );
        // 1 litre over 100 birds at age 10 is under the water band.
        assert_eq!(
            summary.water_intake,
            Assessment::Classified {
                value: 0.01,
                status: Status::Low
            }
        );
        // 0.4 kg sits inside the age-10 weight band.
        assert_eq!(
            summary.average_weight,
            Assessment::Classified {
                value: 0.4,
                status: Status::Normal
            }
        );
    }

    #[test]
    fn test_summarize_record_missing_fields() {
        let record = record_on("2024-03-05");
        let summary = summarize_record(&record, 100);
        assert_eq!(summary.mortality, Assessment::NoInput);
        assert_eq!(summary.water_intake, Assessment::NoInput);
        assert_eq!(summary.feed_intake, Assessment::NoInput);
        assert_eq!(summary.average_weight, Assessment::NoInput);
    }

    #[test]
    fn test_summarize_record_uses_caller_population_for_intake() {
        let mut record = full_record("2024-03-05");
        record.water_intake = Some(6.0);
        // With the record's own 100 birds this would be Normal; the
        // currently entered population of 50 doubles the per-bird figure.
        let summary = summarize_record(&record, 50);
        assert_eq!(
            summary.water_intake,
            Assessment::Classified {
                value: 0.12,
                status: Status::High
            }
        );
    }

    #[test]
    fn test_assess_environment() {
        let env = assess_environment(30.0, 65.0, Some(1));
        assert_eq!(
            env.temperature,
            Assessment::Classified {
                value: 30.0,
                status: Status::Normal
            }
        );
        assert_eq!(
            env.humidity,
            Assessment::Classified {
                value: 65.0,
                status: Status::Normal
            }
        );
    }

    #[test]
    fn test_latest_record() {
        let records = [
            record_on("2024-03-01"),
            record_on("2024-03-15"),
            MetricRecord::default(),
            record_on("2024-03-10"),
        ];
        let latest = latest_record(&records).unwrap();
        assert_eq!(
            latest.observation_date(),
            Some("2024-03-15".parse().unwrap())
        );
        assert_eq!(latest_record(&[MetricRecord::default()]), None);
    }
}
