//! Measurement timestamp conversion

use chrono::NaiveDateTime;

use crate::error::{T8Error, T8Result};

/// Format the T8 server uses for acquisition times
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Convert an ISO-8601 local datetime, interpreted as UTC, to Unix seconds
///
/// Only `YYYY-MM-DDTHH:MM:SS` is accepted; fractional seconds, offsets and
/// a trailing `Z` are rejected.
pub fn iso_to_timestamp(value: &str) -> T8Result<i64> {
    let datetime = NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map_err(|e| {
        T8Error::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(datetime.and_utc().timestamp())
}
