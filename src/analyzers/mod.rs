//! Metric aggregation and threshold classification.
//!
//! This module buckets daily records into anchored calendar weeks and
//! months, derives mortality and per-bird intake figures, and labels them
//! against age-indexed husbandry reference ranges for the dashboard.

pub mod classify;
pub mod month;
pub mod reference;
pub mod summary;
pub mod utility;
pub mod week;
