//! CLI binary for IGC Parser
//!
//! This provides the command-line interface for the IGC parser library.

use anyhow::Result;
use clap::{Arg, Command};
use glob::glob;
use igc_parser::{export_flight, parse_igc_file, ExportOptions};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn long_version() -> String {
    format!(
        "{} (git {} {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        option_env!("VERGEN_GIT_COMMIT_DATE").unwrap_or("unknown"),
    )
}

fn build_command() -> Command {
    Command::new("IGC Parser")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version())
        .about("Read and parse IGC flight recorder logs. Output to various formats.")
        .arg(
            Arg::new("files")
                .help("IGC files to parse (.IGC extension, case-insensitive, supports globbing)")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed parsing information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Export fixes to a CSV file (.csv)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("gpx")
                .long("gpx")
                .help("Export the flight path to a GPX track (.gpx)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Export the whole flight record as JSON (.json, requires the `json` feature)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for exported files (default: same as input file)")
                .value_name("DIR"),
        )
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Expand globs and keep existing files with an `.igc` extension
fn collect_input_paths(file_patterns: &[&String]) -> Vec<PathBuf> {
    let mut valid_paths = Vec::new();

    for pattern in file_patterns {
        tracing::debug!("Processing pattern: {pattern}");

        let paths: Vec<PathBuf> = if pattern.contains('*') || pattern.contains('?') {
            match glob(pattern) {
                Ok(glob_iter) => match glob_iter.collect::<Result<Vec<_>, _>>() {
                    Ok(paths) => {
                        tracing::debug!("Glob pattern '{pattern}' matched {} files", paths.len());
                        paths
                    }
                    Err(e) => {
                        eprintln!("Error expanding glob pattern '{pattern}': {e}");
                        continue;
                    }
                },
                Err(e) => {
                    eprintln!("Invalid glob pattern '{pattern}': {e}");
                    continue;
                }
            }
        } else {
            vec![Path::new(pattern.as_str()).to_path_buf()]
        };

        for path in paths {
            if !path.exists() {
                eprintln!("Warning: File does not exist: {path:?}");
                continue;
            }

            let valid_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("igc"))
                .unwrap_or(false);

            if !valid_extension {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("none");
                eprintln!("Warning: Skipping file with unsupported extension '{ext}': {path:?}");
                continue;
            }

            tracing::debug!("Added valid file: {path:?}");
            valid_paths.push(path);
        }
    }

    valid_paths
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    init_tracing(debug);

    let export_options = ExportOptions {
        csv: matches.get_flag("csv"),
        gpx: matches.get_flag("gpx"),
        json: matches.get_flag("json"),
        output_dir: matches.get_one::<String>("output-dir").cloned(),
    };
    let file_patterns: Vec<&String> = matches
        .get_many::<String>("files")
        .map(|values| values.collect())
        .unwrap_or_default();

    let valid_paths = collect_input_paths(&file_patterns);
    tracing::debug!("Found {} valid files to process", valid_paths.len());

    if valid_paths.is_empty() {
        eprintln!("Error: No valid files found to process.");
        eprintln!("Supported extensions: .IGC (case-insensitive)");
        eprintln!("Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    let mut processed_files = 0;

    for (index, path) in valid_paths.iter().enumerate() {
        if index > 0 {
            println!();
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        println!("Processing: {filename}");

        let parsed = match parse_igc_file(path) {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("Error processing {filename}: {e:#}");
                eprintln!("Continuing with next file...");
                continue;
            }
        };

        print!("{}", parsed.flight);
        if !parsed.is_clean() {
            println!("Warnings        {}", parsed.warnings.len());
            if debug {
                for warning in &parsed.warnings {
                    println!("  {warning}");
                }
            }
        }

        if export_options.any() {
            match export_flight(&parsed.flight, path, &export_options) {
                Ok(report) => {
                    for written in [report.csv_path, report.gpx_path, report.json_path]
                        .into_iter()
                        .flatten()
                    {
                        println!("Exported to: {}", written.display());
                    }
                }
                Err(e) => {
                    eprintln!("Error exporting {filename}: {e:#}");
                    continue;
                }
            }
        }

        processed_files += 1;
    }

    if processed_files == 0 {
        eprintln!(
            "Error: No files were successfully processed out of {} files found.",
            valid_paths.len()
        );
        eprintln!("Use --debug flag for more detailed error information.");
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parses_flags() {
        let matches = build_command()
            .try_get_matches_from([
                "igc_parser",
                "--gpx",
                "--output-dir",
                "out",
                "a.igc",
                "b.IGC",
            ])
            .unwrap();
        assert!(matches.get_flag("gpx"));
        assert!(!matches.get_flag("csv"));
        assert_eq!(
            matches.get_one::<String>("output-dir").map(String::as_str),
            Some("out")
        );
        assert_eq!(matches.get_many::<String>("files").unwrap().count(), 2);
    }

    #[test]
    fn test_command_requires_files() {
        assert!(build_command()
            .try_get_matches_from(["igc_parser", "--csv"])
            .is_err());
    }

    #[test]
    fn test_collect_input_paths_filters_extension() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let igc = temp_dir.path().join("flight.IGC");
        let txt = temp_dir.path().join("notes.txt");
        std::fs::write(&igc, "HFDTE050910\r\n").unwrap();
        std::fs::write(&txt, "notes").unwrap();

        let igc_arg = igc.to_string_lossy().to_string();
        let txt_arg = txt.to_string_lossy().to_string();
        let missing = temp_dir
            .path()
            .join("missing.igc")
            .to_string_lossy()
            .to_string();
        let paths = collect_input_paths(&[&igc_arg, &txt_arg, &missing]);

        assert_eq!(paths, vec![igc.clone()]);
    }

    #[test]
    fn test_collect_input_paths_expands_globs() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        for name in ["a.igc", "b.IGC", "c.txt"] {
            std::fs::write(temp_dir.path().join(name), "").unwrap();
        }

        let pattern = temp_dir.path().join("*").to_string_lossy().to_string();
        let mut paths = collect_input_paths(&[&pattern]);
        paths.sort();

        assert_eq!(
            paths,
            vec![temp_dir.path().join("a.igc"), temp_dir.path().join("b.IGC")]
        );
    }
}
