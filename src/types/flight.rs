use crate::analysis::{self, Bounds, FlightStats, Leg};
use crate::error::ParseWarning;
use crate::types::{FlightHeader, Fix, ManufacturerId};
use chrono::{DateTime, Utc};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete parsed IGC flight
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlightRecord {
    /// Three-character manufacturer code from the `A` record
    pub manufacturer: Option<String>,
    /// Full `A` record decoding (code, logger serial, extension)
    pub manufacturer_id: Option<ManufacturerId>,
    pub header: FlightHeader,
    /// Fixes in file order
    pub fixes: Vec<Fix>,
}

impl FlightRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.manufacturer.is_none() && self.header.is_empty() && self.fixes.is_empty()
    }

    /// `(latitude, longitude)` pairs in flight order
    pub fn path(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.fixes.iter().map(|f| (f.latitude, f.longitude))
    }

    /// `(timestamp, GNSS altitude)` pairs in flight order
    pub fn altitude_profile(&self) -> impl Iterator<Item = (DateTime<Utc>, i32)> + '_ {
        self.fixes.iter().map(|f| (f.timestamp, f.gnss_altitude))
    }

    /// Bounding box of the path, `None` without fixes
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_fixes(&self.fixes)
    }

    /// Derived values between each pair of consecutive fixes
    pub fn legs(&self) -> Vec<Leg> {
        analysis::compute_legs(&self.fixes)
    }

    pub fn stats(&self) -> FlightStats {
        FlightStats::from_fixes(&self.fixes)
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.fixes.first().map(|f| f.timestamp)
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.fixes.last().map(|f| f.timestamp)
    }

    /// Pretty-printed JSON of the whole record
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for FlightRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_dash = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());

        writeln!(f, "Manufacturer    {}", or_dash(self.manufacturer.clone()))?;
        for (code, value) in self.header.entries() {
            if let Some(value) = value {
                writeln!(f, "{:<16}{}", code.description(), value)?;
            }
        }

        let stats = self.stats();
        writeln!(f, "Fixes           {}", stats.fix_count)?;
        if let (Some(start), Some(end)) = (self.start_time(), self.end_time()) {
            writeln!(
                f,
                "Time            {} - {} UTC",
                start.format("%H:%M:%S"),
                end.format("%H:%M:%S")
            )?;
            let secs = stats.duration.num_seconds();
            writeln!(
                f,
                "Duration        {}h{:02}m{:02}s",
                secs / 3600,
                (secs % 3600) / 60,
                secs % 60
            )?;
        }
        if stats.fix_count > 1 {
            writeln!(f, "Distance        {:.1} km", stats.total_distance_km)?;
        }
        if let (Some(min), Some(max)) = (stats.min_gnss_altitude, stats.max_gnss_altitude) {
            writeln!(f, "GNSS altitude   {} - {} m", min, max)?;
        }
        if let (Some(min), Some(max)) = (stats.min_pressure_altitude, stats.max_pressure_altitude)
        {
            writeln!(f, "Press. altitude {} - {} m", min, max)?;
        }
        if let (Some(min), Some(max)) = (stats.min_ground_speed_kmh, stats.max_ground_speed_kmh) {
            writeln!(f, "Ground speed    {:.0} - {:.0} km/h", min, max)?;
        }
        Ok(())
    }
}

/// Parse outcome: the best-effort record plus every recoverable problem met on the way
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ParsedFlight {
    pub flight: FlightRecord,
    /// Warnings in input order
    pub warnings: Vec<ParseWarning>,
}

impl ParsedFlight {
    /// True when no line was skipped or partially decoded
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_flight(self) -> FlightRecord {
        self.flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HeaderField;
    use chrono::{NaiveDate, TimeZone};

    fn fix_at(secs: u32, lat: f64, lon: f64, alt: i32) -> Fix {
        Fix {
            timestamp: Utc.with_ymd_and_hms(2010, 9, 5, 10, 0, 0).unwrap()
                + chrono::Duration::seconds(secs as i64),
            latitude: lat,
            longitude: lon,
            validity: 'A',
            pressure_altitude: alt - 50,
            gnss_altitude: alt,
        }
    }

    #[test]
    fn test_new_record_is_empty() {
        let record = FlightRecord::new();
        assert!(record.is_empty());
        assert!(record.bounds().is_none());
        assert!(record.legs().is_empty());
        assert_eq!(record.path().count(), 0);
    }

    #[test]
    fn test_path_and_profile_follow_fix_order() {
        let mut record = FlightRecord::new();
        record.fixes.push(fix_at(0, 51.0, -2.0, 500));
        record.fixes.push(fix_at(4, 51.01, -2.01, 520));

        let path: Vec<_> = record.path().collect();
        assert_eq!(path, vec![(51.0, -2.0), (51.01, -2.01)]);

        let profile: Vec<_> = record.altitude_profile().map(|(_, alt)| alt).collect();
        assert_eq!(profile, vec![500, 520]);
        assert_eq!(record.start_time(), Some(record.fixes[0].timestamp));
        assert_eq!(record.end_time(), Some(record.fixes[1].timestamp));
    }

    #[test]
    fn test_display_summary() {
        let mut record = FlightRecord::new();
        record.manufacturer = Some("LXN".to_string());
        record
            .header
            .set(HeaderField::Date(NaiveDate::from_ymd_opt(2010, 9, 5).unwrap()));
        record.header.set(HeaderField::Pilot("Jane Doe".to_string()));
        record.fixes.push(fix_at(0, 51.0, -2.0, 500));
        record.fixes.push(fix_at(3600, 51.1, -2.0, 900));

        let text = record.to_string();
        assert!(text.contains("Manufacturer    LXN"));
        assert!(text.contains("Date            2010-09-05"));
        assert!(text.contains("Pilot           Jane Doe"));
        assert!(text.contains("Fixes           2"));
        assert!(text.contains("Duration        1h00m00s"));
        assert!(text.contains("GNSS altitude   500 - 900 m"));
        assert!(text.contains("Ground speed    11 - 11 km/h"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_parse_outcome_serializes() {
        let parsed = crate::parse(
            "HFFXAabc\r\nHFDTE050910\r\n\
B0930235103116N00203726WA0148801540\r\n\
B0930275103200N00203800WA0149001545\r\n",
        );

        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["warnings"][0]["line_number"], 1);
        assert_eq!(
            value["warnings"][0]["error"]["MalformedHeaderValue"]["code"],
            "FXA"
        );
        assert_eq!(value["flight"]["fixes"].as_array().map(Vec::len), Some(2));

        let stats = serde_json::to_value(parsed.flight.stats()).unwrap();
        assert_eq!(stats["duration"], 4);
        assert_eq!(stats["fix_count"], 2);

        let field = HeaderField::Pilot("Jane Doe".to_string());
        let back: HeaderField =
            serde_json::from_value(serde_json::to_value(&field).unwrap()).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_parsed_flight_is_clean() {
        let parsed = ParsedFlight {
            flight: FlightRecord::new(),
            warnings: Vec::new(),
        };
        assert!(parsed.is_clean());
        assert!(parsed.into_flight().is_empty());
    }
}
