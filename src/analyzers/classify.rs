//! Threshold classification of daily metrics against the reference tables.
//!
//! Classification is total: missing fields, empty flocks, and ages the
//! tables do not cover all map to sentinel variants instead of errors, so
//! the presentation layer can always render something.

use std::fmt;

use crate::analyzers::reference::{
    self, MORTALITY_RATE_CUTOFF, ReferenceRange,
};
use crate::analyzers::utility::round_to;
use crate::record::MetricRecord;

/// Human-facing status label for a classified value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Status {
    Low,
    Normal,
    High,
    Underweight,
    Overweight,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Low => "Low",
            Status::Normal => "Normal",
            Status::High => "High",
            Status::Underweight => "Underweight",
            Status::Overweight => "Overweight",
        };
        f.write_str(s)
    }
}

/// Outcome of classifying one metric reading.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(tag = "result")]
pub enum Assessment {
    /// The (already normalized) value and its label.
    Classified { value: f64, status: Status },
    /// A required field was never entered.
    NoInput,
    /// A value or age that cannot be interpreted, or an empty flock
    /// where a per-bird division was needed.
    InvalidInput,
    /// The weight table has no row for this age; weight deliberately
    /// refuses the unbounded fallback other metrics use.
    AgeNotCovered,
}

/// Metric kinds the classifier knows about. Water and feed are per-bird
/// figures; mortality is a percentage and ignores age entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    WaterIntakePerBird,
    FeedIntakePerBird,
    AverageWeight,
    Temperature,
    Humidity,
    MortalityRate,
}

impl MetricKind {
    fn table(&self) -> Option<&'static reference::ReferenceTable> {
        match self {
            MetricKind::WaterIntakePerBird => Some(&reference::WATER_INTAKE),
            MetricKind::FeedIntakePerBird => Some(&reference::FEED_INTAKE),
            MetricKind::AverageWeight => Some(&reference::AVERAGE_WEIGHT),
            MetricKind::Temperature => Some(&reference::TEMPERATURE),
            MetricKind::Humidity => Some(&reference::HUMIDITY),
            MetricKind::MortalityRate => None,
        }
    }
}

/// Classifies a normalized value for `kind` at the given flock age.
///
/// `age` is ignored for mortality. For every other kind a missing age is
/// invalid input, and an age outside the table falls back to the
/// unbounded default range, except average weight which reports
/// [`Assessment::AgeNotCovered`].
pub fn classify(kind: MetricKind, value: f64, age: Option<u32>) -> Assessment {
    if value.is_nan() {
        return Assessment::InvalidInput;
    }

    if kind == MetricKind::MortalityRate {
        // No low case: a mortality rate cannot be "too low".
        let status = if value <= MORTALITY_RATE_CUTOFF {
            Status::Normal
        } else {
            Status::High
        };
        return Assessment::Classified { value, status };
    }

    let Some(age) = age else {
        return Assessment::InvalidInput;
    };

    let range = match kind.table().and_then(|t| t.get(age)) {
        Some(range) => range,
        None if kind == MetricKind::AverageWeight => {
            return Assessment::AgeNotCovered;
        }
        None => ReferenceRange::DEFAULT,
    };

    let status = match kind {
        // The brooding-temperature sheet treats its lower bound itself
        // as too cold.
        MetricKind::Temperature if value <= range.low => Status::Low,
        MetricKind::Temperature if value <= range.high => Status::Normal,
        MetricKind::Temperature => Status::High,

        MetricKind::AverageWeight if value < range.low => Status::Underweight,
        MetricKind::AverageWeight if value <= range.high => Status::Normal,
        MetricKind::AverageWeight => Status::Overweight,

        _ if value < range.low => Status::Low,
        _ if value <= range.high => Status::Normal,
        _ => Status::High,
    };

    Assessment::Classified { value, status }
}

/// Mortality rate for a day's entry, classified against the fixed cutoff.
/// Missing deaths or population, or an empty flock, is "no input".
pub fn classify_mortality(
    number_of_deaths: Option<u32>,
    total_population: Option<u32>,
) -> Assessment {
    let rate = match (number_of_deaths, total_population) {
        (Some(deaths), Some(population)) if population > 0 => {
            deaths as f64 / population as f64 * 100.0
        }
        _ => return Assessment::NoInput,
    };
    classify(MetricKind::MortalityRate, round_to(rate, 2), None)
}

/// Per-bird water intake, litres, classified for the given age. The raw
/// reading is a flock total and is divided by the caller-supplied
/// population, rounded to four decimals as displayed.
pub fn classify_water_intake(
    total_litres: f64,
    age: Option<u32>,
    total_population: u32,
) -> Assessment {
    match MetricRecord::per_bird(total_litres, total_population) {
        Some(each) => classify(MetricKind::WaterIntakePerBird, round_to(each, 4), age),
        None => Assessment::InvalidInput,
    }
}

/// Per-bird feed intake, kilograms, classified for the given age.
///
/// The upper bound is compared against the flock total rather than the
/// per-bird figure. That is how the dashboard has always behaved, so any
/// realistic flock total lands on High once the per-bird figure clears
/// the low bound; kept for parity with historical classifications.
pub fn classify_feed_intake(
    total_kilograms: f64,
    age: Option<u32>,
    total_population: u32,
) -> Assessment {
    if total_kilograms.is_nan() {
        return Assessment::InvalidInput;
    }
    let Some(age) = age else {
        return Assessment::InvalidInput;
    };
    let Some(each) = MetricRecord::per_bird(total_kilograms, total_population) else {
        return Assessment::InvalidInput;
    };
    let each = round_to(each, 4);
    let range = reference::FEED_INTAKE.range_or_default(age);

    let status = if each < range.low {
        Status::Low
    } else if total_kilograms <= range.high {
        Status::Normal
    } else {
        Status::High
    };
    Assessment::Classified { value: each, status }
}

/// Average bird weight, kilograms. Ages past the end of the weight table
/// get an explicit refusal instead of a default range.
pub fn classify_average_weight(kilograms: f64, age: Option<u32>) -> Assessment {
    classify(MetricKind::AverageWeight, kilograms, age)
}

/// Current house temperature in degrees Celsius.
pub fn classify_temperature(celsius: f64, age: Option<u32>) -> Assessment {
    classify(MetricKind::Temperature, celsius, age)
}

/// Current relative humidity in percent.
pub fn classify_humidity(percent: f64, age: Option<u32>) -> Assessment {
    classify(MetricKind::Humidity, percent, age)
}
