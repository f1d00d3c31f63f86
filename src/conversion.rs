//! Coordinate conversion utilities for IGC parsing
//!
//! IGC stores positions as degrees plus minutes with three implied decimals
//! (`DDMMmmmN` for latitude, `DDDMMmmmE` for longitude). These helpers turn
//! them into signed decimal degrees and back.

use crate::error::CoordinateError;

const LATITUDE_LEN: usize = 8;
const LONGITUDE_LEN: usize = 9;

/// Thousandths of a minute per degree
const MILLI_MINUTES_PER_DEGREE: f64 = 60_000.0;

/// Parse a run of ASCII digits. Rejects signs and whitespace that `str::parse` would accept.
pub(crate) fn parse_digits(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Convert a DMS coordinate (`5103116N`, `00203726W`) to signed decimal degrees.
///
/// The layout is picked from the hemisphere letter: `N`/`S` expects two degree
/// digits, `E`/`W` three. Minutes must be below 60 and the result must fall
/// within +-90 or +-180 degrees.
pub fn dms_to_decimal(value: &str) -> Result<f64, CoordinateError> {
    let hemisphere = value
        .chars()
        .last()
        .ok_or(CoordinateError::InvalidLength(0))?;

    let (degree_digits, expected_len, limit) = match hemisphere {
        'N' | 'S' => (2, LATITUDE_LEN, 90.0),
        'E' | 'W' => (3, LONGITUDE_LEN, 180.0),
        other => return Err(CoordinateError::InvalidHemisphere(other)),
    };

    let len = value.chars().count();
    if len != expected_len {
        return Err(CoordinateError::InvalidLength(len));
    }

    let non_numeric = || CoordinateError::NonNumeric(value.to_string());
    let degrees = value
        .get(..degree_digits)
        .and_then(parse_digits)
        .ok_or_else(non_numeric)?;
    let minutes = value
        .get(degree_digits..degree_digits + 2)
        .and_then(parse_digits)
        .ok_or_else(non_numeric)?;
    let thousandths = value
        .get(degree_digits + 2..degree_digits + 5)
        .and_then(parse_digits)
        .ok_or_else(non_numeric)?;

    if minutes >= 60 {
        return Err(CoordinateError::MinutesOutOfRange(minutes));
    }

    let mut decimal = degrees as f64 + (minutes as f64 + thousandths as f64 / 1000.0) / 60.0;
    if decimal > limit {
        return Err(CoordinateError::OutOfRange(decimal));
    }
    if matches!(hemisphere, 'S' | 'W') {
        decimal = -decimal;
    }

    Ok(decimal)
}

/// Split |degrees| into whole degrees, minutes and thousandths of a minute,
/// rounding to the nearest thousandth with carry into minutes and degrees.
fn split_dms(value: f64) -> (u32, u32, u32) {
    let total = (value.abs() * MILLI_MINUTES_PER_DEGREE).round() as u64;
    let degrees = (total / 60_000) as u32;
    let minutes = ((total % 60_000) / 1000) as u32;
    let thousandths = (total % 1000) as u32;
    (degrees, minutes, thousandths)
}

/// Format decimal degrees as an IGC latitude (`DDMMmmmN`/`S`)
pub fn decimal_to_dms_latitude(lat: f64) -> String {
    let (degrees, minutes, thousandths) = split_dms(lat);
    let hemisphere = if lat >= 0.0 { 'N' } else { 'S' };
    format!(
        "{:02}{:02}{:03}{}",
        degrees, minutes, thousandths, hemisphere
    )
}

/// Format decimal degrees as an IGC longitude (`DDDMMmmmE`/`W`)
pub fn decimal_to_dms_longitude(lon: f64) -> String {
    let (degrees, minutes, thousandths) = split_dms(lon);
    let hemisphere = if lon >= 0.0 { 'E' } else { 'W' };
    format!(
        "{:03}{:02}{:03}{}",
        degrees, minutes, thousandths, hemisphere
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_dms_to_decimal_reference_values() {
        assert_close(dms_to_decimal("5103116N").unwrap(), 51.051933);
        assert_close(dms_to_decimal("00203726W").unwrap(), -2.0621);
        assert_close(dms_to_decimal("3330000S").unwrap(), -33.5);
        assert_close(dms_to_decimal("01015000E").unwrap(), 10.25);
        assert_eq!(dms_to_decimal("0000000N").unwrap(), 0.0);
    }

    #[test]
    fn test_dms_to_decimal_rejects_bad_input() {
        assert_eq!(dms_to_decimal(""), Err(CoordinateError::InvalidLength(0)));
        assert_eq!(
            dms_to_decimal("5103116X"),
            Err(CoordinateError::InvalidHemisphere('X'))
        );
        assert_eq!(
            dms_to_decimal("510311N"),
            Err(CoordinateError::InvalidLength(7))
        );
        // Latitude layout with a longitude hemisphere
        assert_eq!(
            dms_to_decimal("5103116E"),
            Err(CoordinateError::InvalidLength(8))
        );
        assert!(matches!(
            dms_to_decimal("51A3116N"),
            Err(CoordinateError::NonNumeric(_))
        ));
        assert!(matches!(
            dms_to_decimal("51+3116N"),
            Err(CoordinateError::NonNumeric(_))
        ));
        assert_eq!(
            dms_to_decimal("5165000N"),
            Err(CoordinateError::MinutesOutOfRange(65))
        );
        assert!(matches!(
            dms_to_decimal("9100000N"),
            Err(CoordinateError::OutOfRange(_))
        ));
        assert!(matches!(
            dms_to_decimal("18100000W"),
            Err(CoordinateError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_decimal_to_dms() {
        assert_eq!(decimal_to_dms_latitude(54.11868), "5407121N");
        assert_eq!(decimal_to_dms_latitude(-33.5), "3330000S");
        assert_eq!(decimal_to_dms_longitude(-2.82237), "00249342W");
        assert_eq!(decimal_to_dms_longitude(10.25), "01015000E");
        assert_eq!(decimal_to_dms_longitude(0.0), "00000000E");
    }

    #[test]
    fn test_decimal_to_dms_carries_rounding() {
        // 59.9996 minutes rounds up to the next whole degree
        assert_eq!(decimal_to_dms_latitude(10.0 + 59.9996 / 60.0), "1100000N");
    }

    #[test]
    fn test_latitude_round_trip() {
        let mut lat = -89.9;
        while lat <= 89.9 {
            let dms = decimal_to_dms_latitude(lat);
            let back = dms_to_decimal(&dms).unwrap();
            assert!((back - lat).abs() < 1e-5, "{lat} -> {dms} -> {back}");
            lat += 0.0731;
        }
    }

    #[test]
    fn test_longitude_round_trip() {
        let mut lon = -179.9;
        while lon <= 179.9 {
            let dms = decimal_to_dms_longitude(lon);
            let back = dms_to_decimal(&dms).unwrap();
            assert!((back - lon).abs() < 1e-5, "{lon} -> {dms} -> {back}");
            lon += 0.1379;
        }
    }

    #[test]
    fn test_dms_round_trip_from_string() {
        for dms in ["5103116N", "0000001S", "8959999N", "4512345S"] {
            let decimal = dms_to_decimal(dms).unwrap();
            assert_eq!(decimal_to_dms_latitude(decimal), dms);
        }
    }

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_digits("0148"), Some(148));
        assert_eq!(parse_digits(""), None);
        assert_eq!(parse_digits("+12"), None);
        assert_eq!(parse_digits(" 12"), None);
    }
}
