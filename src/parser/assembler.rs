use crate::error::{ParseWarning, RecordError};
use crate::types::{FlightRecord, Fix, HeaderField, ManufacturerId, ParsedFlight};
use chrono::NaiveDate;

/// Owns the [`FlightRecord`] while lines are being decoded
#[derive(Debug, Default)]
pub struct FlightAssembler {
    record: FlightRecord,
    warnings: Vec<ParseWarning>,
}

impl FlightAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_manufacturer(&mut self, id: ManufacturerId) {
        self.record.manufacturer = Some(id.manufacturer.clone());
        self.record.manufacturer_id = Some(id);
    }

    pub fn set_header_field(&mut self, field: HeaderField) {
        self.record.header.set(field);
    }

    pub fn append_fix(&mut self, fix: Fix) {
        self.record.fixes.push(fix);
    }

    pub fn warn(&mut self, line_number: usize, error: RecordError) {
        tracing::warn!(line = line_number, "{}", error);
        self.warnings.push(ParseWarning { line_number, error });
    }

    /// Flight date decoded so far, needed to timestamp fixes
    pub fn reference_date(&self) -> Option<NaiveDate> {
        self.record.header.date
    }

    pub fn finalize(self) -> ParsedFlight {
        ParsedFlight {
            flight: self.record,
            warnings: self.warnings,
        }
    }
}
