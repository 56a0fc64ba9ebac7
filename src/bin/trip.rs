use std::error::Error;

use clap::Parser;
use simple_logger::SimpleLogger;

use etcc::{calculate, Airports, EmissionsTable, TravelType, TripRequest};

const ABOUT: &'static str = r#"Prints the distance (km) and emissions (kg CO2e) of flying between two airports as JSON:
* the distance is the great-circle distance, doubled for return trips, times the number of travelers
* the emissions are the distance times the factor of the travel class in the matching range of the emissions table
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// IATA code of the departure airport (e.g. `CPH`)
    #[arg(long)]
    from: String,
    /// IATA code of the arrival airport (e.g. `LHR`)
    #[arg(long)]
    to: String,
    /// The travel class; a column of the emissions table
    #[arg(long, default_value = "ECONOMY")]
    class: String,
    /// The number of travelers
    #[arg(long, default_value_t = 1)]
    travelers: u32,
    /// `ONE_WAY` or `RETURN`
    #[arg(long, value_parser = parse_travel_type, default_value = "ONE_WAY")]
    travel_type: TravelType,
    /// Optional CSV of airports (else the bundled one)
    #[arg(long)]
    airports: Option<String>,
    /// Optional CSV of emissions factors (else the bundled one)
    #[arg(long)]
    emissions: Option<String>,
}

fn parse_travel_type(arg: &str) -> Result<TravelType, String> {
    arg.parse().map_err(|e: etcc::Error| e.to_string())
}

#[derive(serde::Serialize)]
struct Response {
    distance: f64,
    emissions: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let cli = Cli::parse();

    // load datasets to memory
    let airports = match &cli.airports {
        Some(path) => Airports::load(path)?,
        None => Airports::bundled()?,
    };
    let table = match &cli.emissions {
        Some(path) => EmissionsTable::load(path)?,
        None => EmissionsTable::bundled()?,
    };

    let request = TripRequest {
        departure: cli.from,
        arrival: cli.to,
        travel_class: cli.class,
        travel_type: cli.travel_type,
        num_travelers: cli.travelers,
    };
    let trip = calculate(&request, &airports, &table)?;
    log::debug!("{trip:?}");
    if trip.bracket.is_none() {
        log::warn!(
            "No range of the emissions table contains {:.1} km",
            trip.total_distance_km
        );
    }

    let response = Response {
        distance: trip.total_distance_km,
        emissions: trip.emissions_kg,
    };
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
