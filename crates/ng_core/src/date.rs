//! Display formatting for article timestamps.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::{Error, Result};

/// Shown in place of a timestamp that cannot be parsed.
pub const DATE_PLACEHOLDER: &str = "Unknown date";

/// Formats `timestamp` as `D/M/YYYY h:m:s` in the local time zone, without
/// zero padding.
pub fn format(timestamp: &str) -> Result<String> {
    format_in(timestamp, &Local)
}

/// Same layout as [`format`], rendered in `tz`.
pub fn format_in<Tz: TimeZone>(timestamp: &str, tz: &Tz) -> Result<String> {
    let date = parse_in(timestamp, tz)?;
    Ok(format!(
        "{}/{}/{} {}:{}:{}",
        date.day(),
        date.month(),
        date.year(),
        date.hour(),
        date.minute(),
        date.second()
    ))
}

/// [`format`], falling back to `placeholder` for unparsable input.
pub fn format_or(timestamp: &str, placeholder: &str) -> String {
    format_or_in(timestamp, &Local, placeholder)
}

/// [`format_in`], falling back to `placeholder` for unparsable input.
pub fn format_or_in<Tz: TimeZone>(timestamp: &str, tz: &Tz, placeholder: &str) -> String {
    match format_in(timestamp, tz) {
        Ok(formatted) => formatted,
        Err(e) => {
            tracing::debug!("{}", e);
            placeholder.to_string()
        }
    }
}

/// Parses the timestamp shapes the news service and its sources emit.
///
/// A date-time without an offset is read as wall-clock time in `tz`; a bare
/// date is midnight UTC.
pub fn parse_in<Tz: TimeZone>(timestamp: &str, tz: &Tz) -> Result<DateTime<Tz>> {
    let s = timestamp.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Ok(date.with_timezone(tz));
    }

    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
            return from_wall_clock(tz, &naive)
                .ok_or_else(|| Error::InvalidTimestamp(timestamp.to_string()));
        }
    }

    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight).with_timezone(tz));
        }
    }

    if let Ok(date) = DateTime::parse_from_rfc2822(s) {
        return Ok(date.with_timezone(tz));
    }

    Err(Error::InvalidTimestamp(timestamp.to_string()))
}

/// Wall-clock time in `tz`. A time skipped by a forward clock change moves
/// ahead one hour, the way browsers resolve it.
fn from_wall_clock<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(naive).earliest().or_else(|| {
        tz.from_local_datetime(&(*naive + chrono::Duration::hours(1)))
            .earliest()
    })
}
