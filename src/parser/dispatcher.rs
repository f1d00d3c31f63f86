use crate::error::RecordError;
use crate::parser::assembler::FlightAssembler;
use crate::parser::fix::parse_fix_line;
use crate::parser::header::parse_header_line;
use crate::parser::helpers::{char_slice, char_slice_from};
use crate::types::{ManufacturerId, ParsedFlight};

/// Record type, taken from the first character of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    /// `A`: manufacturer and logger id
    Manufacturer,
    /// `H`: flight metadata
    Header,
    /// `B`: position fix
    Fix,
    /// Every other record type (C, D, E, F, G, I, J, K, L, ...), skipped
    Unknown(char),
}

impl RecordType {
    pub fn classify(line: &str) -> Option<Self> {
        let first = line.chars().next()?;
        Some(match first {
            'A' => RecordType::Manufacturer,
            'H' => RecordType::Header,
            'B' => RecordType::Fix,
            other => RecordType::Unknown(other),
        })
    }
}

/// Decode an `A` record: `A` + 3-char manufacturer + logger serial + extension
pub fn parse_manufacturer_line(line: &str) -> Result<ManufacturerId, RecordError> {
    let manufacturer = char_slice(line, 1, 4)
        .ok_or_else(|| RecordError::MalformedManufacturerRecord(line.to_string()))?;
    let logger_id = char_slice(line, 4, 7)
        .or_else(|| char_slice_from(line, 4))
        .unwrap_or("");
    let id_extension = char_slice_from(line, 7).unwrap_or("");

    Ok(ManufacturerId {
        manufacturer: manufacturer.to_string(),
        logger_id: logger_id.trim().to_string(),
        id_extension: id_extension.trim().to_string(),
    })
}

/// Route every line of `raw` to its handler, in order.
///
/// Lines are terminated by `\r\n`; bare `\n` is accepted too. Empty lines and
/// unknown record types are skipped without a warning.
pub fn dispatch_records(raw: &str) -> ParsedFlight {
    let mut assembler = FlightAssembler::new();

    for (index, line) in raw.lines().enumerate() {
        let line_number = index + 1;
        let Some(record_type) = RecordType::classify(line) else {
            continue;
        };
        tracing::trace!(line = line_number, ?record_type, "dispatching record");

        match record_type {
            RecordType::Manufacturer => match parse_manufacturer_line(line) {
                Ok(id) => assembler.set_manufacturer(id),
                Err(e) => assembler.warn(line_number, e),
            },
            RecordType::Header => match parse_header_line(line) {
                Ok(Some(field)) => assembler.set_header_field(field),
                Ok(None) => {}
                Err(e) => assembler.warn(line_number, e),
            },
            RecordType::Fix => match parse_fix_line(line, assembler.reference_date()) {
                Ok(fix) => assembler.append_fix(fix),
                Err(e) => assembler.warn(line_number, e),
            },
            RecordType::Unknown(_) => {}
        }
    }

    assembler.finalize()
}
