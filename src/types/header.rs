use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Header sub-type codes understood by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeaderCode {
    Fxa,
    Dte,
    Plt,
    Cm2,
    Gty,
    Gid,
    Dtm,
    Rfw,
    Rhw,
    Fty,
    Gps,
    Prs,
    Cid,
    Ccl,
}

impl HeaderCode {
    pub const ALL: [HeaderCode; 14] = [
        HeaderCode::Fxa,
        HeaderCode::Dte,
        HeaderCode::Plt,
        HeaderCode::Cm2,
        HeaderCode::Gty,
        HeaderCode::Gid,
        HeaderCode::Dtm,
        HeaderCode::Rfw,
        HeaderCode::Rhw,
        HeaderCode::Fty,
        HeaderCode::Gps,
        HeaderCode::Prs,
        HeaderCode::Cid,
        HeaderCode::Ccl,
    ];

    /// Three-letter code as it appears in the file
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderCode::Fxa => "FXA",
            HeaderCode::Dte => "DTE",
            HeaderCode::Plt => "PLT",
            HeaderCode::Cm2 => "CM2",
            HeaderCode::Gty => "GTY",
            HeaderCode::Gid => "GID",
            HeaderCode::Dtm => "DTM",
            HeaderCode::Rfw => "RFW",
            HeaderCode::Rhw => "RHW",
            HeaderCode::Fty => "FTY",
            HeaderCode::Gps => "GPS",
            HeaderCode::Prs => "PRS",
            HeaderCode::Cid => "CID",
            HeaderCode::Ccl => "CCL",
        }
    }

    /// Short label for summaries, at most 15 characters
    pub fn description(&self) -> &'static str {
        match self {
            HeaderCode::Fxa => "Fix accuracy",
            HeaderCode::Dte => "Date",
            HeaderCode::Plt => "Pilot",
            HeaderCode::Cm2 => "Crew 2",
            HeaderCode::Gty => "Glider type",
            HeaderCode::Gid => "Glider ID",
            HeaderCode::Dtm => "GPS datum",
            HeaderCode::Rfw => "Firmware",
            HeaderCode::Rhw => "Hardware",
            HeaderCode::Fty => "Recorder type",
            HeaderCode::Gps => "GPS receiver",
            HeaderCode::Prs => "Pressure sensor",
            HeaderCode::Cid => "Comp. ID",
            HeaderCode::Ccl => "Comp. class",
        }
    }
}

impl fmt::Display for HeaderCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderCode {
    type Err = ();

    /// Case-insensitive; anything outside the known set is `Err(())`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeaderCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// A decoded header value, typed per code
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeaderField {
    FixAccuracy(u32),
    Date(NaiveDate),
    Pilot(String),
    SecondCrew(String),
    GliderType(String),
    GliderId(String),
    GpsDatum(String),
    FirmwareRevision(String),
    HardwareRevision(String),
    RecorderType(String),
    GpsReceiver(String),
    PressureSensor(String),
    CompetitionId(String),
    CompetitionClass(String),
}

impl HeaderField {
    pub fn code(&self) -> HeaderCode {
        match self {
            HeaderField::FixAccuracy(_) => HeaderCode::Fxa,
            HeaderField::Date(_) => HeaderCode::Dte,
            HeaderField::Pilot(_) => HeaderCode::Plt,
            HeaderField::SecondCrew(_) => HeaderCode::Cm2,
            HeaderField::GliderType(_) => HeaderCode::Gty,
            HeaderField::GliderId(_) => HeaderCode::Gid,
            HeaderField::GpsDatum(_) => HeaderCode::Dtm,
            HeaderField::FirmwareRevision(_) => HeaderCode::Rfw,
            HeaderField::HardwareRevision(_) => HeaderCode::Rhw,
            HeaderField::RecorderType(_) => HeaderCode::Fty,
            HeaderField::GpsReceiver(_) => HeaderCode::Gps,
            HeaderField::PressureSensor(_) => HeaderCode::Prs,
            HeaderField::CompetitionId(_) => HeaderCode::Cid,
            HeaderField::CompetitionClass(_) => HeaderCode::Ccl,
        }
    }
}

/// Flight metadata decoded from `H` records. Every field starts absent.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlightHeader {
    pub fix_accuracy: Option<u32>,
    /// Flight date (UTC). Years are always 2000 + yy.
    pub date: Option<NaiveDate>,
    pub pilot: Option<String>,
    pub second_crew: Option<String>,
    pub glider_type: Option<String>,
    pub glider_id: Option<String>,
    pub gps_datum: Option<String>,
    pub firmware_revision: Option<String>,
    pub hardware_revision: Option<String>,
    pub recorder_type: Option<String>,
    pub gps_receiver: Option<String>,
    pub pressure_sensor: Option<String>,
    pub competition_id: Option<String>,
    pub competition_class: Option<String>,
}

impl FlightHeader {
    /// Store a decoded field, replacing any earlier value for the same code
    pub fn set(&mut self, field: HeaderField) {
        match field {
            HeaderField::FixAccuracy(v) => self.fix_accuracy = Some(v),
            HeaderField::Date(v) => self.date = Some(v),
            HeaderField::Pilot(v) => self.pilot = Some(v),
            HeaderField::SecondCrew(v) => self.second_crew = Some(v),
            HeaderField::GliderType(v) => self.glider_type = Some(v),
            HeaderField::GliderId(v) => self.glider_id = Some(v),
            HeaderField::GpsDatum(v) => self.gps_datum = Some(v),
            HeaderField::FirmwareRevision(v) => self.firmware_revision = Some(v),
            HeaderField::HardwareRevision(v) => self.hardware_revision = Some(v),
            HeaderField::RecorderType(v) => self.recorder_type = Some(v),
            HeaderField::GpsReceiver(v) => self.gps_receiver = Some(v),
            HeaderField::PressureSensor(v) => self.pressure_sensor = Some(v),
            HeaderField::CompetitionId(v) => self.competition_id = Some(v),
            HeaderField::CompetitionClass(v) => self.competition_class = Some(v),
        }
    }

    /// Value for `code` rendered as text (dates as `YYYY-MM-DD`)
    pub fn get(&self, code: HeaderCode) -> Option<String> {
        let text = |v: &Option<String>| v.clone();
        match code {
            HeaderCode::Fxa => self.fix_accuracy.map(|v| v.to_string()),
            HeaderCode::Dte => self.date.map(|d| d.format("%Y-%m-%d").to_string()),
            HeaderCode::Plt => text(&self.pilot),
            HeaderCode::Cm2 => text(&self.second_crew),
            HeaderCode::Gty => text(&self.glider_type),
            HeaderCode::Gid => text(&self.glider_id),
            HeaderCode::Dtm => text(&self.gps_datum),
            HeaderCode::Rfw => text(&self.firmware_revision),
            HeaderCode::Rhw => text(&self.hardware_revision),
            HeaderCode::Fty => text(&self.recorder_type),
            HeaderCode::Gps => text(&self.gps_receiver),
            HeaderCode::Prs => text(&self.pressure_sensor),
            HeaderCode::Cid => text(&self.competition_id),
            HeaderCode::Ccl => text(&self.competition_class),
        }
    }

    /// All known codes in declaration order, paired with their value if set
    pub fn entries(&self) -> impl Iterator<Item = (HeaderCode, Option<String>)> + '_ {
        HeaderCode::ALL
            .into_iter()
            .map(move |code| (code, self.get(code)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries().all(|(_, value)| value.is_none())
    }
}

/// Manufacturer and logger identification from the `A` record
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ManufacturerId {
    /// Three-character manufacturer code
    pub manufacturer: String,
    /// Logger serial, usually three characters; empty when not present
    pub logger_id: String,
    /// Free text after the logger serial
    pub id_extension: String,
}
