use crate::parser::dispatcher::dispatch_records;
use crate::types::ParsedFlight;
use anyhow::Context;
use std::path::Path;

/// Parse IGC text held in memory.
///
/// Never fails: lines that cannot be decoded are skipped and reported in
/// [`ParsedFlight::warnings`]. Empty input gives an empty record.
pub fn parse(raw_text: &str) -> ParsedFlight {
    let parsed = dispatch_records(raw_text);

    tracing::debug!(
        fixes = parsed.flight.fixes.len(),
        warnings = parsed.warnings.len(),
        manufacturer = parsed.flight.manufacturer.as_deref().unwrap_or("-"),
        "Parsed IGC data"
    );

    parsed
}

/// Decode single-byte (ASCII / Latin-1) IGC data and parse it
pub fn parse_igc_bytes(data: &[u8]) -> ParsedFlight {
    let text: String = data.iter().map(|&b| b as char).collect();
    parse(&text)
}

/// Read an IGC file from disk and parse it
pub fn parse_igc_file(file_path: &Path) -> crate::Result<ParsedFlight> {
    let data = std::fs::read(file_path)
        .with_context(|| format!("Failed to read IGC file: {:?}", file_path))?;

    tracing::debug!(path = ?file_path, bytes = data.len(), "Read IGC file");

    Ok(parse_igc_bytes(&data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let parsed = parse("");
        assert!(parsed.is_clean());
        assert!(parsed.flight.manufacturer.is_none());
        assert!(parsed.flight.header.is_empty());
        assert!(parsed.flight.fixes.is_empty());
    }

    #[test]
    fn test_latin1_bytes() {
        let data = b"HFPLTPILOT:Ren\xe9\r\n";
        let parsed = parse_igc_bytes(data);
        assert_eq!(parsed.flight.header.pilot.as_deref(), Some("Ren\u{e9}"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = parse_igc_file(Path::new("/nonexistent/flight.igc")).unwrap_err();
        assert!(err.to_string().contains("Failed to read IGC file"));
    }
}
