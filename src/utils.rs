/// Utility functions for rendering and summarising readings
use time::{format_description, OffsetDateTime};

use crate::models::Reading;

const TIMESTAMP_FORMAT: &str = "[day].[month].[year] - [hour]:[minute]:[second]";

/// Format a Unix timestamp for human-readable logging
///
/// Converts seconds since the epoch to DD.MM.YYYY - HH:MM:SS (UTC).
/// Falls back to the raw number if the timestamp is out of range or
/// formatting fails.
pub fn format_timestamp(secs: i64) -> String {
    let dt = match OffsetDateTime::from_unix_timestamp(secs) {
        Ok(dt) => dt,
        Err(_) => return secs.to_string(),
    };
    let format = match format_description::parse(TIMESTAMP_FORMAT) {
        Ok(format) => format,
        Err(_) => return dt.to_string(),
    };
    dt.format(&format).unwrap_or_else(|_| dt.to_string())
}

/// Render a reading as a single log line: timestamp, sensor name, fields
pub fn render_reading(reading: &Reading) -> String {
    format!(
        "{} {} {}",
        format_timestamp(reading.time),
        reading.sensor_name(),
        reading.payload
    )
}
