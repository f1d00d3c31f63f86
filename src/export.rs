//! Export functionality for parsed flights
//!
//! Writes a [`FlightRecord`] next to its source file (or into
//! [`ExportOptions::output_dir`]) as a CSV fix table, a GPX track, or a JSON
//! dump of the whole record.

use crate::types::FlightRecord;
use crate::Result;
use anyhow::Context;
use chrono::SecondsFormat;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Export options for controlling output formats
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub gpx: bool,
    pub json: bool,
    /// Defaults to the input file's directory
    pub output_dir: Option<String>,
}

impl ExportOptions {
    pub fn any(&self) -> bool {
        self.csv || self.gpx || self.json
    }
}

/// Paths written by [`export_flight`]; `None` when a format was off or skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    pub csv_path: Option<PathBuf>,
    pub gpx_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
}

/// Output paths for every format, derived from the input file stem
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPaths {
    pub csv: PathBuf,
    pub gpx: PathBuf,
    pub json: PathBuf,
}

pub fn compute_export_paths(input_path: &Path, export_options: &ExportOptions) -> ExportPaths {
    let base_name = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("flight");

    let output_dir = match export_options.output_dir {
        Some(ref dir) => PathBuf::from(dir),
        None => input_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    ExportPaths {
        csv: output_dir.join(format!("{base_name}.csv")),
        gpx: output_dir.join(format!("{base_name}.gpx")),
        json: output_dir.join(format!("{base_name}.json")),
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {dir:?}"))?;
            tracing::debug!(?dir, "Created output directory");
        }
    }
    Ok(())
}

/// Run every export enabled in `export_options`
pub fn export_flight(
    flight: &FlightRecord,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<ExportReport> {
    let mut report = ExportReport::default();

    #[cfg(feature = "csv")]
    {
        if export_options.csv {
            report.csv_path = export_to_csv(flight, input_path, export_options)?;
        }
    }
    #[cfg(not(feature = "csv"))]
    {
        if export_options.csv {
            tracing::warn!("CSV export requested but the `csv` feature is disabled");
        }
    }

    if export_options.gpx {
        report.gpx_path = export_to_gpx(flight, input_path, export_options)?;
    }

    #[cfg(feature = "json")]
    {
        if export_options.json {
            report.json_path = Some(export_to_json(flight, input_path, export_options)?);
        }
    }
    #[cfg(not(feature = "json"))]
    {
        if export_options.json {
            tracing::warn!("JSON export requested but the `json` feature is disabled");
        }
    }

    Ok(report)
}

/// Export fixes as CSV, one row per fix. Skipped (returns `None`) without fixes.
#[cfg(feature = "csv")]
pub fn export_to_csv(
    flight: &FlightRecord,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<Option<PathBuf>> {
    use crate::conversion::{decimal_to_dms_latitude, decimal_to_dms_longitude};

    if flight.fixes.is_empty() {
        return Ok(None);
    }

    let output_path = compute_export_paths(input_path, export_options).csv;
    ensure_parent_dir(&output_path)?;

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("Failed to create CSV file: {output_path:?}"))?;

    writer.write_record([
        "time",
        "latitude",
        "longitude",
        "latitude_dms",
        "longitude_dms",
        "validity",
        "pressure_altitude_m",
        "gnss_altitude_m",
    ])?;

    for fix in &flight.fixes {
        writer.write_record([
            fix.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            format!("{:.6}", fix.latitude),
            format!("{:.6}", fix.longitude),
            decimal_to_dms_latitude(fix.latitude),
            decimal_to_dms_longitude(fix.longitude),
            fix.validity.to_string(),
            fix.pressure_altitude.to_string(),
            fix.gnss_altitude.to_string(),
        ])?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file: {output_path:?}"))?;

    tracing::info!(path = ?output_path, fixes = flight.fixes.len(), "Exported CSV");
    Ok(Some(output_path))
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Export the path as a GPX 1.1 track. Skipped (returns `None`) without fixes.
pub fn export_to_gpx(
    flight: &FlightRecord,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<Option<PathBuf>> {
    if flight.fixes.is_empty() {
        return Ok(None);
    }

    let output_path = compute_export_paths(input_path, export_options).gpx;
    ensure_parent_dir(&output_path)?;

    let file = File::create(&output_path)
        .with_context(|| format!("Failed to create GPX file: {output_path:?}"))?;
    let mut gpx = BufWriter::new(file);

    let name = match (&flight.header.pilot, flight.header.date) {
        (Some(pilot), Some(date)) => format!("{} {}", pilot, date.format("%Y-%m-%d")),
        (Some(pilot), None) => pilot.clone(),
        (None, Some(date)) => format!("Flight {}", date.format("%Y-%m-%d")),
        (None, None) => "IGC flight".to_string(),
    };
    let name = xml_escape(&name);

    writeln!(gpx, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        gpx,
        r#"<gpx creator="IGC Parser (Rust)" version="1.1" xmlns="http://www.topografix.com/GPX/1/1" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd">"#
    )?;
    writeln!(gpx, "<metadata><name>{name}</name></metadata>")?;
    writeln!(gpx, "<trk><name>{name}</name><trkseg>")?;

    for fix in &flight.fixes {
        writeln!(
            gpx,
            r#"  <trkpt lat="{:.7}" lon="{:.7}"><ele>{}</ele><time>{}</time></trkpt>"#,
            fix.latitude,
            fix.longitude,
            fix.gnss_altitude,
            fix.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
    }

    writeln!(gpx, "</trkseg></trk>")?;
    writeln!(gpx, "</gpx>")?;
    gpx.flush()
        .with_context(|| format!("Failed to flush GPX file: {output_path:?}"))?;

    tracing::info!(path = ?output_path, fixes = flight.fixes.len(), "Exported GPX");
    Ok(Some(output_path))
}

/// Export the whole record as pretty-printed JSON. Always written, even for empty flights.
#[cfg(feature = "json")]
pub fn export_to_json(
    flight: &FlightRecord,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<PathBuf> {
    let output_path = compute_export_paths(input_path, export_options).json;
    ensure_parent_dir(&output_path)?;

    let json = flight.to_json().context("Failed to serialize flight")?;
    std::fs::write(&output_path, json)
        .with_context(|| format!("Failed to write JSON file: {output_path:?}"))?;

    tracing::info!(path = ?output_path, "Exported JSON");
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_export_paths_defaults_to_input_dir() {
        let paths = compute_export_paths(
            Path::new("/data/flights/2010-09-05.igc"),
            &ExportOptions::default(),
        );
        assert_eq!(paths.csv, PathBuf::from("/data/flights/2010-09-05.csv"));
        assert_eq!(paths.gpx, PathBuf::from("/data/flights/2010-09-05.gpx"));
        assert_eq!(paths.json, PathBuf::from("/data/flights/2010-09-05.json"));
    }

    #[test]
    fn test_compute_export_paths_with_output_dir() {
        let options = ExportOptions {
            output_dir: Some("/tmp/out".to_string()),
            ..ExportOptions::default()
        };
        let paths = compute_export_paths(Path::new("flight.IGC"), &options);
        assert_eq!(paths.gpx, PathBuf::from("/tmp/out/flight.gpx"));
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape(r#"A & B <"c">"#), "A &amp; B &lt;&quot;c&quot;&gt;");
    }

    #[test]
    fn test_export_options_any() {
        assert!(!ExportOptions::default().any());
        let options = ExportOptions {
            gpx: true,
            ..ExportOptions::default()
        };
        assert!(options.any());
    }
}
