//! Calendar-month mortality aggregation.
//!
//! Days within a month are further split into five fixed 7-day windows
//! (1-7, 8-14, 15-21, 22-28, 29-35). The last window absorbs any day of
//! 29 or later regardless of the month's real length; the windows are a
//! reporting convention, not ISO weeks.

use chrono::Datelike;
use std::collections::BTreeMap;

use crate::analyzers::utility::mean;
use crate::record::MetricRecord;

/// Number of fixed 7-day windows a month is split into.
pub const WINDOWS_PER_MONTH: usize = 5;

/// One day's mortality rate within a month.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct DailyMortality {
    /// Day of month, 1-31.
    pub day: u32,
    /// Percent, `deaths / population * 100`.
    pub rate: f64,
}

/// Daily mortality rates grouped by calendar month (1-12).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthBuckets {
    months: BTreeMap<u32, Vec<DailyMortality>>,
}

impl MonthBuckets {
    /// Months that have at least one valid record, ascending, for the
    /// month selector.
    pub fn available_months(&self) -> Vec<u32> {
        self.months.keys().copied().collect()
    }

    /// Daily rates for one month, sorted by day of month. Empty slice
    /// when the month has no valid records.
    pub fn daily_rates(&self, month: u32) -> &[DailyMortality] {
        self.months.get(&month).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Average mortality rate per fixed 7-day window of the month.
    /// Windows with no data report 0.
    pub fn weekly_averages(&self, month: u32) -> [f64; WINDOWS_PER_MONTH] {
        let mut windows: [Vec<f64>; WINDOWS_PER_MONTH] = Default::default();

        for entry in self.daily_rates(month) {
            let window = ((entry.day - 1) / 7) as usize;
            windows[window].push(entry.rate);
        }

        windows.map(|rates| mean(&rates))
    }
}

/// Groups mortality rates by calendar month. Records missing the
/// timestamp, the death count, or the population are skipped outright;
/// no default is substituted.
pub fn bucket_by_month(records: &[MetricRecord]) -> MonthBuckets {
    let mut months: BTreeMap<u32, Vec<DailyMortality>> = BTreeMap::new();

    for record in records {
        let (Some(date), Some(rate)) = (record.observation_date(), record.mortality_rate())
        else {
            continue;
        };
        months.entry(date.month()).or_default().push(DailyMortality {
            day: date.day(),
            rate,
        });
    }

    for rates in months.values_mut() {
        rates.sort_by_key(|d| d.day);
    }

    MonthBuckets { months }
}
