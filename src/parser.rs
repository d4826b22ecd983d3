//! JSON decoder for record snapshots.

use anyhow::Result;

use crate::record::MetricRecord;

/// Decodes a JSON array of daily metric records from raw bytes.
///
/// Fields absent from a document deserialize as `None`; the aggregation
/// layer decides what to do with partial records.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid JSON array of records.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<MetricRecord>> {
    Ok(serde_json::from_slice(bytes)?)
}
