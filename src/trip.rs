use serde::{Deserialize, Serialize};

use crate::{
    distance_km, estimate_emissions, AirportDirectory, EmissionsTable, Estimate, Result,
    TravelType,
};

/// A request to compute the emissions of a trip between two airports
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    /// IATA code of the departure airport
    pub departure: String,
    /// IATA code of the arrival airport
    pub arrival: String,
    /// a class of the emissions table (e.g. `ECONOMY`)
    pub travel_class: String,
    pub travel_type: TravelType,
    pub num_travelers: u32,
}

/// The in-memory representation of a computed trip. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    pub departure: String,
    pub arrival: String,
    pub travel_class: String,
    pub travel_type: TravelType,
    pub num_travelers: u32,
    /// distance flown by one traveler in km (both ways for [`TravelType::Return`])
    pub distance_km: f64,
    /// `distance_km` times the number of travelers
    pub total_distance_km: f64,
    /// emissions of all travelers in kg
    pub emissions_kg: f64,
    /// position of the bracket of the emissions table used; `None` when no bracket matched
    pub bracket: Option<usize>,
}

/// Computes a [`Trip`]: resolves both airports, computes the distance, scales it by the
/// number of travelers and estimates the emissions of the total distance.
/// # Error
/// Errors if an airport is unknown, a coordinate is invalid or the class is unknown
pub fn calculate(
    request: &TripRequest,
    airports: &impl AirportDirectory,
    table: &EmissionsTable,
) -> Result<Trip> {
    let departure = airports.lookup(&request.departure)?;
    let arrival = airports.lookup(&request.arrival)?;

    let distance = distance_km(departure, arrival, request.travel_type)?;
    let total_distance = distance * request.num_travelers as f64;
    let estimate = estimate_emissions(total_distance, &request.travel_class, table)?;

    Ok(Trip {
        departure: request.departure.clone(),
        arrival: request.arrival.clone(),
        travel_class: request.travel_class.clone(),
        travel_type: request.travel_type,
        num_travelers: request.num_travelers,
        distance_km: distance,
        total_distance_km: total_distance,
        emissions_kg: estimate.emissions_kg(),
        bracket: match estimate {
            Estimate::Bracket { index, .. } => Some(index),
            Estimate::NoBracket => None,
        },
    })
}

/// A row of an uploaded CSV of trips
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TripRow {
    #[serde(rename = "Departure")]
    pub departure: String,
    #[serde(rename = "Arrival")]
    pub arrival: String,
    #[serde(rename = "Travel Type")]
    pub travel_type: String,
    #[serde(rename = "Travel Class")]
    pub travel_class: String,
    /// defaults to 1 when absent or empty
    #[serde(rename = "Travelers", default)]
    pub num_travelers: Option<u32>,
}

impl TripRow {
    pub fn request(self) -> Result<TripRequest> {
        Ok(TripRequest {
            travel_type: self.travel_type.parse()?,
            departure: self.departure,
            arrival: self.arrival,
            travel_class: self.travel_class,
            num_travelers: self.num_travelers.unwrap_or(1),
        })
    }
}

/// Computes a [`Trip`] for every row of a CSV with columns `Departure`, `Arrival`,
/// `Travel Type`, `Travel Class` and optionally `Travelers`.
/// Rows are independent: a row that fails does not affect the others.
pub fn calculate_csv(
    data: &[u8],
    airports: &impl AirportDirectory,
    table: &EmissionsTable,
) -> Vec<Result<Trip>> {
    super::csv::deserialize::<TripRow>(data)
        .map(|row| calculate(&row?.request()?, airports, table))
        .collect()
}
