//! Calendar-week bucketing anchored to the first recorded observation.
//!
//! Weeks are plain 7-day spans counted from the earliest record's date,
//! not ISO weeks: day 0-6 is week 1, day 7-13 is week 2, and so on. The
//! anchor is always taken from the full record collection so the week
//! numbering does not shift when the caller filters to one week.

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::record::MetricRecord;

/// One week's worth of records, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekBucket {
    /// 1-based week number counted from the earliest record.
    pub index: u32,
    /// Selector label, e.g. "Mar: Week 1" or "Mar-Apr: Week 5".
    pub label: String,
    pub records: Vec<MetricRecord>,
}

/// Result of bucketing a record collection by week.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeekBuckets {
    /// Date of the earliest timestamped record; `None` when nothing in
    /// the collection carried a timestamp.
    pub earliest: Option<NaiveDate>,
    /// Non-empty buckets, ascending by week index.
    pub weeks: Vec<WeekBucket>,
}

impl WeekBuckets {
    /// `(index, label)` pairs for a week-selector UI.
    pub fn choices(&self) -> Vec<(u32, String)> {
        self.weeks
            .iter()
            .map(|w| (w.index, w.label.clone()))
            .collect()
    }

    /// The bucket with the given index, if any record fell into it.
    pub fn week(&self, index: u32) -> Option<&WeekBucket> {
        self.weeks.iter().find(|w| w.index == index)
    }
}

/// Groups records into 7-day buckets anchored to the earliest observation
/// date. Records without a timestamp are dropped; an input with no
/// timestamped records at all yields an empty result.
pub fn bucket_by_week(records: &[MetricRecord]) -> WeekBuckets {
    let Some(earliest) = records
        .iter()
        .filter_map(MetricRecord::observation_date)
        .min()
    else {
        debug!("no timestamped records, nothing to bucket");
        return WeekBuckets::default();
    };

    let mut weeks: Vec<WeekBucket> = Vec::new();

    for record in records {
        let Some(date) = record.observation_date() else {
            continue;
        };
        let index = week_index(earliest, date);

        let pos = match weeks.iter().position(|w| w.index == index) {
            Some(pos) => pos,
            None => {
                weeks.push(WeekBucket {
                    index,
                    label: week_label(earliest, index),
                    records: Vec::new(),
                });
                weeks.len() - 1
            }
        };
        weeks[pos].records.push(record.clone());
    }

    weeks.sort_by_key(|w| w.index);
    for bucket in &mut weeks {
        sort_for_display(&mut bucket.records);
    }

    WeekBuckets {
        earliest: Some(earliest),
        weeks,
    }
}

/// 1-based week number of `date` counted from the anchor date.
/// Monotonic in `date` for a fixed anchor.
pub fn week_index(earliest: NaiveDate, date: NaiveDate) -> u32 {
    let days_since_start = (date - earliest).num_days();
    (days_since_start / 7 + 1) as u32
}

/// Label naming the month(s) a week spans plus its number. A week that
/// crosses a month boundary names both months.
pub fn week_label(earliest: NaiveDate, index: u32) -> String {
    let start = earliest + Days::new(7 * (index as u64 - 1));
    let end = start + Days::new(6);

    let start_month = start.format("%b");
    if start.month() == end.month() {
        format!("{start_month}: Week {index}")
    } else {
        format!("{start_month}-{}: Week {index}", end.format("%b"))
    }
}

/// Orders records the way the intake charts plot them: by month first,
/// then day of month. A bucket spanning a year boundary therefore sorts
/// the January days before the December days; the charts have always
/// shown it that way.
fn sort_for_display(records: &mut [MetricRecord]) {
    records.sort_by_key(|r| {
        r.observation_date()
            .map(|d| (d.month(), d.day()))
            .unwrap_or((0, 0))
    });
}
