//! `H` record decoding
//!
//! Header lines look like `HFDTE050910` or `HFPLTPILOTINCHARGE:Jane Doe`.
//! Characters 2..5 carry the three-letter sub-type; the value starts at
//! column 5 or just past the first colon, whichever is later.

use crate::conversion::parse_digits;
use crate::error::RecordError;
use crate::parser::helpers::{char_slice, char_slice_from};
use crate::types::{HeaderCode, HeaderField};
use chrono::NaiveDate;

/// Value column for a header line: the later of column 5 or one past the first `:`
fn value_start(line: &str) -> usize {
    let after_colon = line.chars().position(|c| c == ':').map(|i| i + 1).unwrap_or(0);
    after_colon.max(5)
}

/// Decode one `H` line.
///
/// Returns `Ok(None)` for lines with no recognised sub-type code (vendor
/// extensions, truncated lines); those are tolerated, not errors.
pub fn parse_header_line(line: &str) -> Result<Option<HeaderField>, RecordError> {
    let code = match char_slice(line, 2, 5).and_then(|s| s.parse::<HeaderCode>().ok()) {
        Some(code) => code,
        None => {
            tracing::debug!(header = line, "Ignoring unrecognised header record");
            return Ok(None);
        }
    };

    let value = char_slice_from(line, value_start(line)).unwrap_or("").trim();

    let text = || value.to_string();
    let field = match code {
        HeaderCode::Dte => HeaderField::Date(decode_date(value)?),
        HeaderCode::Fxa => HeaderField::FixAccuracy(decode_fix_accuracy(value)?),
        HeaderCode::Plt => HeaderField::Pilot(text()),
        HeaderCode::Cm2 => HeaderField::SecondCrew(text()),
        HeaderCode::Gty => HeaderField::GliderType(text()),
        HeaderCode::Gid => HeaderField::GliderId(text()),
        HeaderCode::Dtm => HeaderField::GpsDatum(text()),
        HeaderCode::Rfw => HeaderField::FirmwareRevision(text()),
        HeaderCode::Rhw => HeaderField::HardwareRevision(text()),
        HeaderCode::Fty => HeaderField::RecorderType(text()),
        HeaderCode::Gps => HeaderField::GpsReceiver(text()),
        HeaderCode::Prs => HeaderField::PressureSensor(text()),
        HeaderCode::Cid => HeaderField::CompetitionId(text()),
        HeaderCode::Ccl => HeaderField::CompetitionClass(text()),
    };

    Ok(Some(field))
}

/// Decode a `ddmmyy` flight date, optionally followed by a `,nn` flight number.
///
/// Years map to 2000 + yy; flights before 2000 cannot be represented.
pub fn decode_date(value: &str) -> Result<NaiveDate, RecordError> {
    let malformed = |reason: &str| RecordError::MalformedHeaderValue {
        code: HeaderCode::Dte.as_str(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let (date_part, rest) = match (value.get(..6), value.get(6..)) {
        (Some(date), Some(rest)) => (date, rest),
        _ => return Err(malformed("expected 6 digits (ddmmyy)")),
    };
    if !rest.is_empty() && !rest.starts_with(',') {
        return Err(malformed("unexpected trailing characters"));
    }

    let digits = |range: std::ops::Range<usize>| date_part.get(range).and_then(parse_digits);
    let (day, month, year) = match (digits(0..2), digits(2..4), digits(4..6)) {
        (Some(d), Some(m), Some(y)) => (d, m, y),
        _ => return Err(malformed("expected 6 digits (ddmmyy)")),
    };

    NaiveDate::from_ymd_opt(2000 + year as i32, month, day)
        .ok_or_else(|| malformed("not a calendar date"))
}

/// Decode the fix accuracy in meters
pub fn decode_fix_accuracy(value: &str) -> Result<u32, RecordError> {
    parse_digits(value).ok_or_else(|| RecordError::MalformedHeaderValue {
        code: HeaderCode::Fxa.as_str(),
        value: value.to_string(),
        reason: "not a non-negative integer".to_string(),
    })
}
