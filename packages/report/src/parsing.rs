//! Date and timestamp parsing for loosely typed backend data.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use housing_registry_report_models::DAY_KEY_FORMAT;

const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a backend timestamp.
///
/// Accepts RFC 3339 (offset or `Z`), naive ISO 8601 date-times with a `T`
/// or space separator, and bare `YYYY-MM-DD` dates (midnight). Offset
/// timestamps keep their own wall-clock time; no timezone conversion
/// happens. Blank input is `None`.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, DAY_KEY_FORMAT)
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Parses a calendar day from a date or timestamp string.
#[must_use]
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|dt| dt.date())
}

/// What a record's `createdAt` says about when it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordDay {
    /// No timestamp, or a blank one.
    Absent,
    /// A timestamp was present but could not be read.
    Unparseable,
    /// The calendar day the record was created on.
    Day(NaiveDate),
}

impl RecordDay {
    /// Classifies an optional raw `createdAt` value.
    #[must_use]
    pub fn of(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::Absent,
            Some(s) => parse_day(s).map_or(Self::Unparseable, Self::Day),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_date_as_midnight() {
        let dt = parse_timestamp("2025-06-01").unwrap();
        assert_eq!(dt.to_string(), "2025-06-01 00:00:00");
    }

    #[test]
    fn parses_space_separated_timestamp() {
        let dt = parse_timestamp("2025-06-01 14:30:00").unwrap();
        assert_eq!(dt.to_string(), "2025-06-01 14:30:00");
    }

    #[test]
    fn parses_iso_timestamp_with_fraction() {
        let dt = parse_timestamp("2025-06-01T14:30:00.123").unwrap();
        assert_eq!(dt.date().to_string(), "2025-06-01");
    }

    #[test]
    fn keeps_wall_clock_of_offset_timestamps() {
        // 23:30 in UTC+7 is still June 1st locally.
        let day = parse_day("2025-06-01T23:30:00+07:00").unwrap();
        assert_eq!(day.to_string(), "2025-06-01");

        let day = parse_day("2025-06-01T23:30:00.000000Z").unwrap();
        assert_eq!(day.to_string(), "2025-06-01");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("2025-13-40").is_none());
        assert!(parse_timestamp("   ").is_none());
    }

    #[test]
    fn classifies_record_days() {
        assert_eq!(RecordDay::of(None), RecordDay::Absent);
        assert_eq!(RecordDay::of(Some("  ")), RecordDay::Absent);
        assert_eq!(RecordDay::of(Some("soon")), RecordDay::Unparseable);
        assert_eq!(
            RecordDay::of(Some("2025-06-03 08:00:00")),
            RecordDay::Day(NaiveDate::from_ymd_opt(2025, 6, 3).unwrap())
        );
    }
}
