//! Errors raised while loading data sets or computing trips.

use thiserror::Error;

/// Everything that can go wrong in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Latitude or longitude is not a finite number within its range.
    #[error("Invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Latitude in degrees, expected in `[-90, 90]`.
        latitude: f64,
        /// Longitude in degrees, expected in `[-180, 180]`.
        longitude: f64,
    },

    /// A range spec of the emissions table could not be parsed.
    #[error("Malformed range spec: {0:?}")]
    MalformedRangeSpec(String),

    /// A factor of the emissions table is not a finite, non-negative number.
    #[error("Invalid factor {value:?} for class {class} in range {range:?}")]
    InvalidFactor {
        range: String,
        class: String,
        value: String,
    },

    /// The emissions table has no column with the range specs.
    #[error("Missing column {0:?}")]
    MissingColumn(String),

    /// The travel class is not a column of the matched bracket.
    #[error("Unknown travel class {0:?}")]
    UnknownTravelClass(String),

    /// The travel type is neither `ONE_WAY` nor `RETURN`.
    #[error("Unknown travel type {0:?}")]
    UnknownTravelType(String),

    /// The airport directory has no airport with this code.
    #[error("Unknown airport {0:?}")]
    UnknownAirport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
