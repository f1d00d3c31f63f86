//! IGC Parser Library
//!
//! A Rust library for parsing IGC flight recorder logs, the line-oriented
//! fixed-column format written by gliding and soaring instruments.
//! This library provides both in-memory data access and export capabilities.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export of fixes
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`**: Enable JSON export of the whole flight record
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Parse a log held in memory and access its fixes:
//! ```rust
//! use igc_parser::parse;
//!
//! let raw = "ALXNGIIFLIGHT:1\r\nHFDTE050910\r\nB0930235103116N00203726WA0148801540\r\n";
//! let parsed = parse(raw);
//! assert!(parsed.is_clean());
//!
//! let fix = &parsed.flight.fixes[0];
//! println!("{} at {:.5},{:.5}", fix.timestamp, fix.latitude, fix.longitude);
//! ```
//!
//! Parse a file from disk and export a GPX track:
//! ```rust,no_run
//! use igc_parser::{export_flight, parse_igc_file, ExportOptions};
//! use std::path::Path;
//!
//! let path = Path::new("flight.igc");
//! let parsed = parse_igc_file(path).unwrap();
//! for warning in &parsed.warnings {
//!     eprintln!("{}", warning);
//! }
//!
//! let export_options = ExportOptions {
//!     gpx: true,
//!     ..ExportOptions::default()
//! };
//! let report = export_flight(&parsed.flight, path, &export_options).unwrap();
//! if let Some(path) = report.gpx_path {
//!     println!("Exported to: {}", path.display());
//! }
//! ```
//!
//! # Public API
//!
//! ## Parsing Functions
//! - [`parse`] - Parse IGC text held in memory
//! - [`parse_igc_bytes`] - Parse single-byte (ASCII/Latin-1) IGC data
//! - [`parse_igc_file`] - Read and parse an IGC file
//! - [`dispatch_records`], [`parse_header_line`], [`parse_fix_line`],
//!   [`parse_manufacturer_line`] - Per-record building blocks
//!
//! ## Data Types
//! - [`ParsedFlight`] - Parse result with recoverable warnings
//! - [`FlightRecord`] - Manufacturer, header metadata and fixes
//! - [`FlightHeader`] / [`HeaderCode`] / [`HeaderField`] - Decoded `H` records
//! - [`Fix`] - One timestamped position/altitude sample
//! - [`RecordError`] / [`ParseWarning`] - Per-line decode failures
//!
//! ## Analysis
//! - [`FlightStats`], [`Leg`], [`Bounds`] - Derived distance, speed and climb values
//!
//! ## Export Functions
//! - [`export_flight`] - Run every enabled export
//! - [`export_to_csv`] - Export fixes to CSV
//! - [`export_to_gpx`] - Export the path to GPX
//! - `export_to_json` - Export the whole record to JSON (`json` feature)
//!
//! ## Conversion Utilities
//! - [`dms_to_decimal`] - Decode an IGC coordinate to decimal degrees
//! - [`decimal_to_dms_latitude`] / [`decimal_to_dms_longitude`] - The inverse

// Module declarations
pub mod analysis;
pub mod conversion;
pub mod error;
pub mod export;
pub mod parser;
pub mod types;

#[allow(ambiguous_glob_reexports)]
pub use analysis::*;
#[allow(ambiguous_glob_reexports)]
pub use conversion::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;

// Re-export Result type for convenience
pub use anyhow::Result;
