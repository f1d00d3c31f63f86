//! `B` record decoding
//!
//! Fixed layout, 35 characters minimum:
//!
//! ```text
//! B HHMMSS DDMMmmmN DDDMMmmmE V PPPPP GGGGG
//! 0 1      7        15        24 25   30   35
//! ```
//!
//! Anything past column 35 belongs to I-record extensions and is ignored.

use crate::conversion::{dms_to_decimal, parse_digits};
use crate::error::RecordError;
use crate::parser::helpers::{char_len, char_slice};
use crate::types::Fix;
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Minimum length of a `B` record
pub const FIX_RECORD_LEN: usize = 35;

/// Column fields of a `B` record before the reference date is applied
#[derive(Debug, Clone, PartialEq)]
struct FixColumns {
    time_of_day_ms: i64,
    latitude: f64,
    longitude: f64,
    validity: char,
    pressure_altitude: i32,
    gnss_altitude: i32,
}

fn column<'a>(
    line: &'a str,
    field: &'static str,
    start: usize,
    end: usize,
) -> Result<&'a str, RecordError> {
    char_slice(line, start, end)
        .ok_or_else(|| RecordError::fix(field, "column not addressable"))
}

fn time_part(
    line: &str,
    field: &'static str,
    start: usize,
    limit: u32,
) -> Result<i64, RecordError> {
    let raw = column(line, field, start, start + 2)?;
    let value = parse_digits(raw)
        .ok_or_else(|| RecordError::fix(field, format!("'{}' is not numeric", raw)))?;
    if value >= limit {
        return Err(RecordError::fix(
            field,
            format!("{} out of range (0-{})", value, limit - 1),
        ));
    }
    Ok(value as i64)
}

/// Altitudes are five characters: digits, or a leading `-` followed by digits
fn altitude(line: &str, field: &'static str, start: usize) -> Result<i32, RecordError> {
    let raw = column(line, field, start, start + 5)?;
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let value = parse_digits(digits)
        .ok_or_else(|| RecordError::fix(field, format!("'{}' is not numeric", raw)))?
        as i32;
    Ok(if negative { -value } else { value })
}

fn decode_columns(line: &str) -> Result<FixColumns, RecordError> {
    let len = char_len(line);
    if len < FIX_RECORD_LEN {
        return Err(RecordError::fix(
            "record",
            format!("{} characters, expected at least {}", len, FIX_RECORD_LEN),
        ));
    }

    let hours = time_part(line, "hours", 1, 24)?;
    let minutes = time_part(line, "minutes", 3, 60)?;
    let seconds = time_part(line, "seconds", 5, 60)?;

    let latitude = dms_to_decimal(column(line, "latitude", 7, 15)?)
        .map_err(|e| RecordError::fix("latitude", e.to_string()))?;
    let longitude = dms_to_decimal(column(line, "longitude", 15, 24)?)
        .map_err(|e| RecordError::fix("longitude", e.to_string()))?;

    let validity = column(line, "validity", 24, 25)?
        .chars()
        .next()
        .ok_or_else(|| RecordError::fix("validity", "missing flag"))?;

    Ok(FixColumns {
        time_of_day_ms: hours * 3_600_000 + minutes * 60_000 + seconds * 1000,
        latitude,
        longitude,
        validity,
        pressure_altitude: altitude(line, "pressure altitude", 25)?,
        gnss_altitude: altitude(line, "GNSS altitude", 30)?,
    })
}

/// Decode one `B` line against the flight date.
///
/// Columns are validated first, so a malformed line reports `MalformedFixLine`
/// whether or not a date is known; a well-formed line without a date reports
/// `MissingReferenceDate`.
pub fn parse_fix_line(line: &str, reference_date: Option<NaiveDate>) -> Result<Fix, RecordError> {
    let columns = decode_columns(line)?;
    let date = reference_date.ok_or(RecordError::MissingReferenceDate)?;

    let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    let timestamp = midnight + Duration::milliseconds(columns.time_of_day_ms);

    Ok(Fix {
        timestamp,
        latitude: columns.latitude,
        longitude: columns.longitude,
        validity: columns.validity,
        pressure_altitude: columns.pressure_altitude,
        gnss_altitude: columns.gnss_altitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_LINE: &str = "B0930235103116N00203726WA0148801540";

    fn date() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2010, 9, 5)
    }

    #[test]
    fn test_reference_fix() {
        let fix = parse_fix_line(REFERENCE_LINE, date()).unwrap();

        assert_eq!(
            fix.timestamp,
            Utc.with_ymd_and_hms(2010, 9, 5, 9, 30, 23).unwrap()
        );
        assert!((fix.latitude - 51.051933).abs() < 1e-6);
        assert!((fix.longitude + 2.0621).abs() < 1e-6);
        assert_eq!(fix.validity, 'A');
        assert!(fix.is_3d());
        assert_eq!(fix.pressure_altitude, 1488);
        assert_eq!(fix.gnss_altitude, 1540);
    }

    #[test]
    fn test_missing_reference_date() {
        assert_eq!(
            parse_fix_line(REFERENCE_LINE, None),
            Err(RecordError::MissingReferenceDate)
        );
    }

    #[test]
    fn test_malformed_reported_before_missing_date() {
        let err = parse_fix_line("B0930", None).unwrap_err();
        assert!(matches!(
            err,
            RecordError::MalformedFixLine { field: "record", .. }
        ));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 34 characters, 35 bytes
        let err = parse_fix_line("B0930235103116N00203726WA01488\u{e9}154", date()).unwrap_err();
        assert!(matches!(
            err,
            RecordError::MalformedFixLine { field: "record", .. }
        ));
    }

    #[test]
    fn test_extension_columns_are_ignored() {
        let line = format!("{}0123456", REFERENCE_LINE);
        let fix = parse_fix_line(&line, date()).unwrap();
        assert_eq!(fix.gnss_altitude, 1540);
    }

    #[test]
    fn test_estimated_fix_and_negative_altitude() {
        let fix = parse_fix_line("B1200003330000S01015000EV-0012-0003", date()).unwrap();
        assert_eq!(fix.validity, 'V');
        assert!(!fix.is_3d());
        assert!((fix.latitude + 33.5).abs() < 1e-9);
        assert!((fix.longitude - 10.25).abs() < 1e-9);
        assert_eq!(fix.pressure_altitude, -12);
        assert_eq!(fix.gnss_altitude, -3);
    }

    #[test]
    fn test_malformed_columns() {
        let cases = [
            ("B2430235103116N00203726WA0148801540", "hours"),
            ("B0960235103116N00203726WA0148801540", "minutes"),
            ("B09302x5103116N00203726WA0148801540", "seconds"),
            ("B0930235103116X00203726WA0148801540", "latitude"),
            ("B0930235103116N00203726NA0148801540", "longitude"),
            ("B093023510311 N00203726WA0148801540", "latitude"),
            ("B0930235103116N00203726WA01488015a0", "GNSS altitude"),
            ("B0930235103116N00203726WA+148801540", "pressure altitude"),
        ];
        for (line, expected_field) in cases {
            match parse_fix_line(line, date()) {
                Err(RecordError::MalformedFixLine { field, .. }) => {
                    assert_eq!(field, expected_field, "line {line}")
                }
                other => panic!("line {line} gave {other:?}"),
            }
        }
    }

    #[test]
    fn test_time_of_day_boundaries() {
        let fix = parse_fix_line("B2359595103116N00203726WA0148801540", date()).unwrap();
        assert_eq!(
            fix.timestamp,
            Utc.with_ymd_and_hms(2010, 9, 5, 23, 59, 59).unwrap()
        );
        let fix = parse_fix_line("B0000005103116N00203726WA0148801540", date()).unwrap();
        assert_eq!(
            fix.timestamp,
            Utc.with_ymd_and_hms(2010, 9, 5, 0, 0, 0).unwrap()
        );
    }
}
