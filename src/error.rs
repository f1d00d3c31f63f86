use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Failure to decode a DMS coordinate string
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoordinateError {
    /// String length does not match the 8 (latitude) or 9 (longitude) character layout
    InvalidLength(usize),
    /// Trailing character is not one of N, S, E, W
    InvalidHemisphere(char),
    /// Degree or minute columns contain something other than ASCII digits
    NonNumeric(String),
    /// Minutes field of 60 or more
    MinutesOutOfRange(u32),
    /// Decoded value lies outside +-90 (latitude) or +-180 (longitude)
    OutOfRange(f64),
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateError::InvalidLength(len) => {
                write!(f, "coordinate has {} characters, expected 8 or 9", len)
            }
            CoordinateError::InvalidHemisphere(c) => write!(f, "invalid hemisphere letter '{}'", c),
            CoordinateError::NonNumeric(value) => write!(f, "non-numeric coordinate '{}'", value),
            CoordinateError::MinutesOutOfRange(minutes) => {
                write!(f, "minutes {} out of range (0-59)", minutes)
            }
            CoordinateError::OutOfRange(degrees) => {
                write!(f, "decoded value {:.6} outside valid range", degrees)
            }
        }
    }
}

impl std::error::Error for CoordinateError {}

/// Per-record decode failure.
///
/// None of these abort a parse: the offending line (or header field) is skipped
/// and the error is kept as a [`crate::ParseWarning`]. Lines whose leading
/// character is not `A`, `H` or `B` never produce an error at all.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum RecordError {
    /// A header field whose value failed its type-specific decode
    MalformedHeaderValue {
        code: &'static str,
        value: String,
        reason: String,
    },
    /// A fix line seen before any valid `DTE` header
    MissingReferenceDate,
    /// A fix line that is too short or carries an invalid column
    MalformedFixLine { field: &'static str, reason: String },
    /// An `A` line too short to carry a manufacturer code
    MalformedManufacturerRecord(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MalformedHeaderValue {
                code,
                value,
                reason,
            } => write!(f, "Malformed {} header value '{}': {}", code, value, reason),
            RecordError::MissingReferenceDate => {
                write!(f, "Fix record precedes the DTE header; no reference date")
            }
            RecordError::MalformedFixLine { field, reason } => {
                write!(f, "Malformed fix record ({}): {}", field, reason)
            }
            RecordError::MalformedManufacturerRecord(line) => {
                write!(f, "Malformed manufacturer record '{}'", line)
            }
        }
    }
}

impl std::error::Error for RecordError {}

impl RecordError {
    pub(crate) fn fix(field: &'static str, reason: impl Into<String>) -> Self {
        RecordError::MalformedFixLine {
            field,
            reason: reason.into(),
        }
    }
}

/// A recoverable problem found while parsing, tied to its source line
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ParseWarning {
    /// 1-based line number in the input
    pub line_number: usize,
    pub error: RecordError,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.error)
    }
}
