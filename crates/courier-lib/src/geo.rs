//! Geographic coordinates and the spherical geometry used by routing.
//!
//! A [`Coordinate`] keeps the exact decimal text it was read from. Equality,
//! hashing and ordering are defined over that text, so `34.0500000` and
//! `34.05` name two different graph nodes even though they describe the same
//! point. Map data is expected to use one fixed precision throughout.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

const EARTH_RADIUS_KM: f64 = 6371.0;
const MILES_PER_KM: f64 = 1.0 / 1.609_344;

/// A point on the map identified by its textual latitude and longitude.
#[derive(Debug, Clone, Serialize)]
pub struct Coordinate {
    #[serde(rename = "latitude")]
    latitude_text: String,
    #[serde(rename = "longitude")]
    longitude_text: String,
    #[serde(skip)]
    latitude: f64,
    #[serde(skip)]
    longitude: f64,
}

impl Coordinate {
    /// Build a coordinate from its latitude and longitude text.
    ///
    /// The text is stored verbatim; numeric values are only used for
    /// geometry.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self> {
        let lat = parse_component(latitude, 90.0)?;
        let lon = parse_component(longitude, 180.0)?;
        Ok(Self {
            latitude_text: latitude.to_string(),
            longitude_text: longitude.to_string(),
            latitude: lat,
            longitude: lon,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude_text(&self) -> &str {
        &self.latitude_text
    }

    pub fn longitude_text(&self) -> &str {
        &self.longitude_text
    }
}

fn parse_component(text: &str, limit: f64) -> Result<f64> {
    let invalid = |reason: &str| Error::InvalidCoordinate {
        text: text.to_string(),
        reason: reason.to_string(),
    };

    if text.is_empty() {
        return Err(invalid("empty component"));
    }
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
    {
        return Err(invalid("expected a plain decimal number"));
    }
    let value: f64 = text.parse().map_err(|_| invalid("not a decimal number"))?;
    if !value.is_finite() || value.abs() > limit {
        return Err(invalid(&format!("outside the range -{limit}..={limit}")));
    }
    Ok(value)
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.latitude_text == other.latitude_text && self.longitude_text == other.longitude_text
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude_text.hash(state);
        self.longitude_text.hash(state);
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.latitude_text
            .cmp(&other.latitude_text)
            .then_with(|| self.longitude_text.cmp(&other.longitude_text))
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.latitude_text, self.longitude_text)
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    /// Accepts `"lat lon"` or `"lat,lon"`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        match parts.as_slice() {
            [lat, lon] => Coordinate::parse(lat, lon),
            _ => Err(Error::InvalidCoordinate {
                text: s.to_string(),
                reason: "expected a latitude and a longitude".to_string(),
            }),
        }
    }
}

/// Great-circle ("crow") distance between two coordinates in miles.
pub fn crow_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let u = ((lat2 - lat1) / 2.0).sin();
    let v = ((b.longitude.to_radians() - a.longitude.to_radians()) / 2.0).sin();
    2.0 * EARTH_RADIUS_KM
        * MILES_PER_KM
        * (u * u + lat1.cos() * lat2.cos() * v * v).sqrt().asin()
}

/// Direction of travel from `from` to `to` in degrees, counter-clockwise from
/// east, normalised to `[0, 360)`.
///
/// Latitude and longitude are treated as planar axes, which is accurate
/// enough to describe a street segment.
pub fn bearing(from: &Coordinate, to: &Coordinate) -> f64 {
    let angle = (to.latitude - from.latitude)
        .atan2(to.longitude - from.longitude)
        .to_degrees();
    normalize_degrees(angle)
}

/// Counter-clockwise angle needed to go from `previous` to `next` bearing,
/// normalised to `[0, 360)`.
pub fn turn_angle(previous: f64, next: f64) -> f64 {
    normalize_degrees(next - previous)
}

fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
