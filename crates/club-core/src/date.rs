//! Lenient parsing of event dates as sent by the backend and by operators.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Naive forms accepted after RFC 3339, tried in order.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses an event date into `tz`.
///
/// RFC 3339 strings carry their own offset and are converted into `tz`.
/// Naive date-times and bare dates (taken as midnight) are read as wall
/// clock time in `tz`. A wall clock time skipped by a DST transition is
/// treated as invalid; an ambiguous one resolves to the earlier instant.
pub fn parse_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    tz.from_local_datetime(&naive).earliest()
}

/// Returns true if `raw` has a shape the classifier can place on a timeline.
///
/// Checked in UTC, which has no DST gaps. A naive time that falls inside a
/// gap of the viewer's zone therefore passes here but is classified as an
/// unparseable date (and lands in `past`) when read with [`parse_in`] in
/// that zone.
pub fn is_parseable(raw: &str) -> bool {
    parse_in(raw, &Utc).is_some()
}
