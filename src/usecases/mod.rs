//! Use Cases
//!
//! Orchestration over the storage port: assignment, completion,
//! courier/order CRUD and the meta report.

pub mod assign;
pub mod couriers;
pub mod orders;

use chrono::NaiveTime;

use crate::domain::error::CoreError;

/// Parse an `HH:MM-HH:MM` interval with start strictly before end
pub(crate) fn parse_hours_interval(s: &str) -> Result<(NaiveTime, NaiveTime), CoreError> {
    let (start, end) = s
        .split_once('-')
        .ok_or_else(|| CoreError::invalid(format!("invalid hours interval: {s}")))?;

    let start = NaiveTime::parse_from_str(start, "%H:%M")
        .map_err(|_| CoreError::invalid(format!("invalid time of day: {start}")))?;
    let end = NaiveTime::parse_from_str(end, "%H:%M")
        .map_err(|_| CoreError::invalid(format!("invalid time of day: {end}")))?;

    if start >= end {
        return Err(CoreError::invalid(format!(
            "interval start must precede its end: {s}"
        )));
    }

    Ok((start, end))
}
