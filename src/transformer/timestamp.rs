//! Epoch timestamps to ISO-8601 UTC strings
//!
//! Input timestamps are decimal seconds since the Unix epoch, fractional
//! seconds allowed. Conversion is multiply-by-1000 then truncate toward
//! zero to whole milliseconds, rendered as UTC calendar time.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::SchemaError;

const MILLIS_PER_SECOND: Decimal = Decimal::ONE_THOUSAND;

/// Convert decimal epoch seconds to `yyyy-MM-ddTHH:mm:ssZ`.
///
/// Truncation is toward zero, not rounding. The formatted year is the
/// proleptic Gregorian calendar year, never a week-based year, and the
/// calendar math runs in UTC regardless of the process locale.
pub fn format_epoch_seconds(seconds: Decimal) -> Result<String, SchemaError> {
    let out_of_range = || SchemaError::TimestampOutOfRange { timestamp: seconds };

    let milliseconds = seconds
        .checked_mul(MILLIS_PER_SECOND)
        .map(|ms| ms.trunc())
        .and_then(|ms| ms.to_i64())
        .ok_or_else(out_of_range)?;

    let datetime: DateTime<Utc> =
        DateTime::from_timestamp_millis(milliseconds).ok_or_else(out_of_range)?;

    Ok(format!("{}Z", datetime.format("%Y-%m-%dT%H:%M:%S")))
}
