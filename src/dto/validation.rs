//! Validation helpers for DTOs.

use time::{Time, format_description::BorrowedFormatItem, macros::format_description};
use validator::ValidationError;

const HOURS_MINUTES: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");
const HOURS_MINUTES_SECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Parse a 24h wall-clock time written `HH:MM` or `HH:MM:SS`. Seconds are dropped: schedules
/// have minute precision.
pub fn parse_clock_time(value: &str) -> Option<Time> {
    let value = value.trim();
    let time = Time::parse(value, HOURS_MINUTES)
        .or_else(|_| Time::parse(value, HOURS_MINUTES_SECONDS))
        .ok()?;
    Time::from_hms(time.hour(), time.minute(), 0).ok()
}

/// Render a time as `HH:MM`.
pub fn format_clock_time(time: Time) -> String {
    time.format(HOURS_MINUTES)
        .unwrap_or_else(|_| "invalid-time".into())
}

/// Validates that a schedule bound is a `HH:MM` (or `HH:MM:SS`) 24h time.
///
/// # Examples
///
/// ```ignore
/// validate_clock_time("08:30")    // Ok
/// validate_clock_time("23:59:59") // Ok
/// validate_clock_time("8h30")     // Err
/// ```
pub fn validate_clock_time(value: &str) -> Result<(), ValidationError> {
    if parse_clock_time(value).is_some() {
        return Ok(());
    }

    let mut err = ValidationError::new("clock_time_format");
    err.message = Some(format!("`{value}` is not a HH:MM time").into());
    Err(err)
}

/// English name of a schedule day (1 = Monday ... 7 = Sunday).
pub fn day_name(day: i16) -> &'static str {
    match day {
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        7 => "Sunday",
        _ => "Unknown",
    }
}
