//! Dates used in section headings and `**Date:**` fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// `<date> - <title>` with the date optionally wrapped in brackets.
static DATED_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\[?(\d{4}-\d{2}-\d{2}(?:[T ]\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:Z|[+-]\d{2}:?\d{2})?)?)\]?\s+-\s+(.+?)\s*$",
    )
    .expect("valid regex")
});

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a record date: RFC 3339, `YYYY-MM-DD[ HH:MM[:SS]]`, or a bare date.
/// Times without an offset are taken as UTC.
pub fn parse_record_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Render a date the way headings are written: bare date at midnight,
/// otherwise minutes precision.
pub fn format_record_date(date: &DateTime<Utc>) -> String {
    if date.hour() == 0 && date.minute() == 0 && date.second() == 0 {
        date.format("%Y-%m-%d").to_string()
    } else {
        date.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Split a `<date> - <title>` heading. Returns the raw date text, the parsed
/// date, and the title.
pub(crate) fn split_dated_heading(heading: &str) -> Option<(&str, DateTime<Utc>, &str)> {
    let caps = DATED_HEADING_RE.captures(heading)?;
    let raw_date = caps.get(1)?.as_str();
    let title = caps.get(2)?.as_str();
    let date = parse_record_date(raw_date)?;
    Some((raw_date, date, title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_supported_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let with_time = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(parse_record_date("2024-01-15"), Some(midnight));
        assert_eq!(parse_record_date("2024-01-15 10:30"), Some(with_time));
        assert_eq!(parse_record_date("2024-01-15T10:30:00"), Some(with_time));
        assert_eq!(parse_record_date("2024-01-15T12:30:00+02:00"), Some(with_time));
        assert_eq!(parse_record_date("2024-01-15T10:30:00Z"), Some(with_time));
        assert_eq!(parse_record_date("yesterday"), None);
        assert_eq!(parse_record_date("2024-13-40"), None);
    }

    #[test]
    fn splits_plain_and_bracketed_headings() {
        let (raw, _, title) = split_dated_heading("2024-01-15 - Use Postgres").unwrap();
        assert_eq!(raw, "2024-01-15");
        assert_eq!(title, "Use Postgres");

        let (raw, date, title) = split_dated_heading("[2024-01-15 09:00] - Auth flow ").unwrap();
        assert_eq!(raw, "2024-01-15 09:00");
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap());
        assert_eq!(title, "Auth flow");
    }

    #[test]
    fn rejects_headings_without_date_title_shape() {
        assert!(split_dated_heading("Decisions Log").is_none());
        assert!(split_dated_heading("2024-01-15").is_none());
        assert!(split_dated_heading("2024-01-15 -").is_none());
        assert!(split_dated_heading("2024-02-31 - Impossible date").is_none());
    }

    #[test]
    fn formats_midnight_as_bare_date() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let with_time = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_record_date(&midnight), "2024-01-15");
        assert_eq!(format_record_date(&with_time), "2024-01-15 10:30");
    }
}
