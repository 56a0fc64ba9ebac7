use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{Coordinate, Error, Result};

static AIRPORTS: &'static [u8] = include_bytes!("./airports.csv");

/// An airport of the [`Airports`] directory
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Airport {
    /// the IATA code (e.g. `CPH`)
    pub iata_code: String,
    /// the city or town it serves (e.g. `Copenhagen`)
    pub city_town: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Airport {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// An entry of an airport picker, e.g. `{"value": "CPH", "label": "Copenhagen (CPH)"}`
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct AirportOption {
    pub value: String,
    pub label: String,
}

/// Something that can resolve an IATA code to a [`Coordinate`]
pub trait AirportDirectory {
    /// # Error
    /// Errors with [`Error::UnknownAirport`] if no airport has `iata_code`
    fn lookup(&self, iata_code: &str) -> Result<Coordinate>;
}

fn normalize(iata_code: &str) -> Arc<str> {
    iata_code.trim().to_ascii_uppercase().into()
}

/// An in-memory [`AirportDirectory`] keyed by IATA code (case insensitive)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Airports(HashMap<Arc<str>, Airport>);

impl Airports {
    pub fn new(airports: impl IntoIterator<Item = Airport>) -> Self {
        Self(
            airports
                .into_iter()
                .map(|airport| (normalize(&airport.iata_code), airport))
                .collect(),
        )
    }

    /// Reads airports from a CSV with columns `iata_code,city_town,latitude,longitude`.
    /// # Error
    /// Errors if a row can't be read or has an invalid coordinate
    pub fn from_csv(data: &[u8]) -> Result<Self> {
        let airports = super::csv::deserialize::<Airport>(data)
            .map(|airport| -> Result<Airport> {
                let airport = airport?;
                airport.coordinate().validate()?;
                Ok(airport)
            })
            .collect::<Result<Vec<_>>>()?;
        log::info!("Airport directory loaded: {} airports", airports.len());
        Ok(Self::new(airports))
    }

    /// Loads airports from a CSV on disk (see [`Airports::from_csv`])
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::from_csv(&std::fs::read(path)?)
    }

    /// The airports bundled with this crate (`src/airports.csv`)
    pub fn bundled() -> Result<Self> {
        Self::from_csv(AIRPORTS)
    }

    pub fn get(&self, iata_code: &str) -> Option<&Airport> {
        self.0.get(&normalize(iata_code))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns all airports as picker options, sorted by code
    pub fn options(&self) -> Vec<AirportOption> {
        let mut options = self
            .0
            .iter()
            .map(|(code, airport)| AirportOption {
                value: code.to_string(),
                label: format!("{} ({code})", airport.city_town),
            })
            .collect::<Vec<_>>();
        options.sort_unstable_by(|a, b| a.value.cmp(&b.value));
        options
    }
}

impl AirportDirectory for Airports {
    fn lookup(&self, iata_code: &str) -> Result<Coordinate> {
        self.get(iata_code)
            .map(Airport::coordinate)
            .ok_or_else(|| Error::UnknownAirport(iata_code.to_string()))
    }
}

impl<D: AirportDirectory + ?Sized> AirportDirectory for &D {
    fn lookup(&self, iata_code: &str) -> Result<Coordinate> {
        (**self).lookup(iata_code)
    }
}

impl<D: AirportDirectory + ?Sized> AirportDirectory for Arc<D> {
    fn lookup(&self, iata_code: &str) -> Result<Coordinate> {
        (**self).lookup(iata_code)
    }
}
