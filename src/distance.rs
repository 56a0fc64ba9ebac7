use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Mean radius of the earth in km
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geo-point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Returns a new [`Coordinate`].
    /// # Error
    /// Errors with [`Error::InvalidCoordinate`] if either value is not finite or out of range
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Errors with [`Error::InvalidCoordinate`] unless latitude is in `[-90, 90]`
    /// and longitude in `[-180, 180]`. NaN is never valid.
    pub fn validate(&self) -> Result<()> {
        let valid = (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude);
        if valid {
            Ok(())
        } else {
            Err(Error::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Whether a trip is flown once or there and back again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelType {
    OneWay,
    Return,
}

impl TravelType {
    /// How many times the route is flown
    pub fn legs(&self) -> f64 {
        match self {
            TravelType::OneWay => 1.0,
            TravelType::Return => 2.0,
        }
    }
}

impl FromStr for TravelType {
    type Err = Error;

    /// Accepts `ONE_WAY` (also `ONE-WAY`, `ONEWAY`) and `RETURN`, case insensitive.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ONE_WAY" | "ONE-WAY" | "ONEWAY" => Ok(TravelType::OneWay),
            "RETURN" => Ok(TravelType::Return),
            _ => Err(Error::UnknownTravelType(s.to_string())),
        }
    }
}

impl std::fmt::Display for TravelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TravelType::OneWay => f.write_str("ONE_WAY"),
            TravelType::Return => f.write_str("RETURN"),
        }
    }
}

/// Returns the great-circle distance in km between `departure` and `arrival`
/// using the spherical law of cosines, doubled for [`TravelType::Return`].
/// # Error
/// Errors with [`Error::InvalidCoordinate`] if either coordinate is invalid
pub fn distance_km(
    departure: Coordinate,
    arrival: Coordinate,
    travel_type: TravelType,
) -> Result<f64> {
    departure.validate()?;
    arrival.validate()?;
    if departure == arrival {
        // acos loses precision next to 1.0
        return Ok(0.0);
    }

    let lat1 = departure.latitude.to_radians();
    let lon1 = departure.longitude.to_radians();
    let lat2 = arrival.latitude.to_radians();
    let lon2 = arrival.longitude.to_radians();

    // rounding can push the cosine slightly outside of acos' domain for (near) identical points
    let cosine = (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon2 - lon1).cos())
        .clamp(-1.0, 1.0);
    let distance = cosine.acos() * EARTH_RADIUS_KM;

    Ok(distance * travel_type.legs())
}
