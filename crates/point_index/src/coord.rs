//! Coordinate validation and great-circle distance.
//!
//! Positions are geographic (longitude, latitude) in degrees. Distances are
//! computed on a spherical earth and expressed in meters unless converted with
//! [`convert_unit`].

use crate::error::IndexError;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

/// Earth radius in meters used for all distance math.
pub const EARTH_RADIUS_M: f64 = 6_372_797.560_856;

pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Slack applied to the inclusive radius boundary.
pub const DISTANCE_TOLERANCE_M: f64 = 1e-6;

/// A validated geographic coordinate.
///
/// Construction always goes through [`validate_coordinate`], so a
/// `Coordinate` is finite and in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    longitude: f64,
    latitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    longitude: f64,
    latitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = IndexError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        validate_coordinate(raw.longitude, raw.latitude)
    }
}

impl Coordinate {
    /// Creates a coordinate from longitude and latitude in degrees.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, IndexError> {
        validate_coordinate(longitude, latitude)
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Position on the earth sphere in 3D Cartesian meters.
    ///
    /// Straight-line distance between two such points is the chord, which
    /// grows monotonically with great-circle distance.
    pub fn to_cartesian(&self) -> [f64; 3] {
        let lat = self.latitude.to_radians();
        let lon = self.longitude.to_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();
        [
            EARTH_RADIUS_M * cos_lat * cos_lon,
            EARTH_RADIUS_M * cos_lat * sin_lon,
            EARTH_RADIUS_M * sin_lat,
        ]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.longitude, self.latitude)
    }
}

/// Validates longitude `x` and latitude `y` and builds a [`Coordinate`].
pub fn validate_coordinate(x: f64, y: f64) -> Result<Coordinate, IndexError> {
    if !x.is_finite() || !y.is_finite() || !(MIN_LON..=MAX_LON).contains(&x) || !(MIN_LAT..=MAX_LAT).contains(&y) {
        return Err(IndexError::InvalidCoordinate {
            longitude: x,
            latitude: y,
        });
    }

    Ok(Coordinate {
        longitude: x,
        latitude: y,
    })
}

/// Great-circle distance between two coordinates in meters (haversine).
///
/// The formula only squares the latitude and longitude deltas, so swapping
/// the arguments yields a bit-identical result.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let u = ((lat2 - lat1) / 2.0).sin();
    let v = ((b.longitude.to_radians() - a.longitude.to_radians()) / 2.0).sin();
    let h = (u * u + lat1.cos() * lat2.cos() * v * v).min(1.0);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Chord length in meters matching a great-circle distance in meters.
///
/// Distances at or beyond half the circumference map to the sphere diameter.
pub fn chord_length(distance_m: f64) -> f64 {
    let half_angle = distance_m / (2.0 * EARTH_RADIUS_M);
    if half_angle >= FRAC_PI_2 {
        2.0 * EARTH_RADIUS_M
    } else {
        2.0 * EARTH_RADIUS_M * half_angle.sin()
    }
}

/// Inclusive radius membership shared by every query path.
#[inline]
pub fn within_radius(distance_m: f64, radius_m: f64) -> bool {
    distance_m <= radius_m + DISTANCE_TOLERANCE_M
}

/// Units a radius or a reported distance can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[default]
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "mi")]
    Miles,
    #[serde(rename = "ft")]
    Feet,
}

impl DistanceUnit {
    pub fn meters_per_unit(self) -> f64 {
        match self {
            DistanceUnit::Meters => 1.0,
            DistanceUnit::Kilometers => 1000.0,
            DistanceUnit::Miles => 1609.34,
            DistanceUnit::Feet => 0.3048,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mi",
            DistanceUnit::Feet => "ft",
        }
    }

    /// Converts a value in this unit to meters.
    pub fn to_meters(self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }
}

impl FromStr for DistanceUnit {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "m" => Ok(DistanceUnit::Meters),
            "km" => Ok(DistanceUnit::Kilometers),
            "mi" => Ok(DistanceUnit::Miles),
            "ft" => Ok(DistanceUnit::Feet),
            _ => Err(IndexError::UnsupportedUnit(s.to_string())),
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts a distance in meters to `unit`.
pub fn convert_unit(meters: f64, unit: DistanceUnit) -> f64 {
    meters / unit.meters_per_unit()
}
