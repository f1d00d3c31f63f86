//! Derived flight values
//!
//! Great-circle geometry between fixes, per-leg speed and climb rates,
//! whole-flight statistics and the path bounding box. Everything here is
//! computed on demand from [`Fix`] slices; nothing is stored on the record.

use crate::types::Fix;
use chrono::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Initial bearing from point 1 to point 2, degrees in [0, 360)
pub fn initial_bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let y = dlon.sin() * lat2_rad.cos();
    let x = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * dlon.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Signed change from one bearing to the next, degrees in (-180, 180]
pub fn bearing_change_deg(from: f64, to: f64) -> f64 {
    let delta = (to - from) % 360.0;
    if delta > 180.0 {
        delta - 360.0
    } else if delta <= -180.0 {
        delta + 360.0
    } else {
        delta
    }
}

/// Values derived between two consecutive fixes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Leg {
    pub distance_km: f64,
    pub bearing_deg: f64,
    /// Seconds between the fixes; negative if timestamps go backwards
    pub time_delta_s: i64,
    /// `None` when both fixes share a timestamp
    pub ground_speed_kmh: Option<f64>,
    /// Pressure altitude change rate (m/s)
    pub pressure_vario: Option<f64>,
    /// GNSS altitude change rate (m/s)
    pub gnss_vario: Option<f64>,
    /// Bearing change from the previous leg (deg/s, positive clockwise).
    /// `None` on the first leg.
    pub turn_rate_deg_s: Option<f64>,
}

impl Leg {
    /// Leg from `from` to `to`; the turn rate needs a previous leg and is left unset
    pub fn between(from: &Fix, to: &Fix) -> Self {
        let distance_km =
            haversine_distance_km(from.latitude, from.longitude, to.latitude, to.longitude);
        let bearing_deg =
            initial_bearing_deg(from.latitude, from.longitude, to.latitude, to.longitude);
        let time_delta_s = (to.timestamp - from.timestamp).num_seconds();

        let rate = |delta: f64| per_second(delta, time_delta_s);

        Self {
            distance_km,
            bearing_deg,
            time_delta_s,
            ground_speed_kmh: rate(distance_km * 3600.0),
            pressure_vario: rate((to.pressure_altitude - from.pressure_altitude) as f64),
            gnss_vario: rate((to.gnss_altitude - from.gnss_altitude) as f64),
            turn_rate_deg_s: None,
        }
    }
}

fn per_second(delta: f64, time_delta_s: i64) -> Option<f64> {
    if time_delta_s > 0 {
        Some(delta / time_delta_s as f64)
    } else {
        None
    }
}

/// One [`Leg`] per consecutive pair of fixes, turn rates filled from the preceding leg
pub fn compute_legs(fixes: &[Fix]) -> Vec<Leg> {
    let mut legs: Vec<Leg> = Vec::with_capacity(fixes.len().saturating_sub(1));

    for pair in fixes.windows(2) {
        let mut leg = Leg::between(&pair[0], &pair[1]);
        if let Some(previous) = legs.last() {
            let change = bearing_change_deg(previous.bearing_deg, leg.bearing_deg);
            leg.turn_rate_deg_s = per_second(change, leg.time_delta_s);
        }
        legs.push(leg);
    }

    legs
}

/// Whole-flight summary
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FlightStats {
    pub fix_count: usize,
    /// Last fix time minus first fix time, serialized as whole seconds
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_seconds"))]
    pub duration: Duration,
    pub total_distance_km: f64,
    pub min_pressure_altitude: Option<i32>,
    pub max_pressure_altitude: Option<i32>,
    pub min_gnss_altitude: Option<i32>,
    pub max_gnss_altitude: Option<i32>,
    pub min_ground_speed_kmh: Option<f64>,
    pub max_ground_speed_kmh: Option<f64>,
}

#[cfg(feature = "serde")]
fn serialize_seconds<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(duration.num_seconds())
}

impl FlightStats {
    pub fn from_fixes(fixes: &[Fix]) -> Self {
        let legs = compute_legs(fixes);

        let duration = match (fixes.first(), fixes.last()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => Duration::zero(),
        };

        Self {
            fix_count: fixes.len(),
            duration,
            total_distance_km: legs.iter().map(|l| l.distance_km).sum(),
            min_pressure_altitude: fixes.iter().map(|f| f.pressure_altitude).min(),
            max_pressure_altitude: fixes.iter().map(|f| f.pressure_altitude).max(),
            min_gnss_altitude: fixes.iter().map(|f| f.gnss_altitude).min(),
            max_gnss_altitude: fixes.iter().map(|f| f.gnss_altitude).max(),
            min_ground_speed_kmh: legs
                .iter()
                .filter_map(|l| l.ground_speed_kmh)
                .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |a| a.min(s)))),
            max_ground_speed_kmh: legs
                .iter()
                .filter_map(|l| l.ground_speed_kmh)
                .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |a| a.max(s)))),
        }
    }
}

/// Latitude/longitude bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl Bounds {
    pub fn from_fixes(fixes: &[Fix]) -> Option<Self> {
        let first = fixes.first()?;
        let init = Bounds {
            min_latitude: first.latitude,
            max_latitude: first.latitude,
            min_longitude: first.longitude,
            max_longitude: first.longitude,
        };
        Some(fixes[1..].iter().fold(init, |b, f| Bounds {
            min_latitude: b.min_latitude.min(f.latitude),
            max_latitude: b.max_latitude.max(f.latitude),
            min_longitude: b.min_longitude.min(f.longitude),
            max_longitude: b.max_longitude.max(f.longitude),
        }))
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_latitude + self.max_latitude) / 2.0,
            (self.min_longitude + self.max_longitude) / 2.0,
        )
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }
}
