use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One timestamped position/altitude sample decoded from a `B` record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fix {
    pub timestamp: DateTime<Utc>,
    /// Decimal degrees, negative south of the equator
    pub latitude: f64,
    /// Decimal degrees, negative west of Greenwich
    pub longitude: f64,
    /// Raw validity flag: `A` for a 3-D fix, `V` for 2-D or estimated
    pub validity: char,
    /// Meters, ICAO ISA 1013.25 hPa datum
    pub pressure_altitude: i32,
    /// Meters above the WGS84 ellipsoid
    pub gnss_altitude: i32,
}

impl Fix {
    pub fn is_3d(&self) -> bool {
        self.validity == 'A'
    }
}
