use std::{collections::BTreeMap, error::Error};

use clap::Parser;
use num_format::{Locale, ToFormattedString};
use simple_logger::SimpleLogger;
use tinytemplate::TinyTemplate;

use etcc::{calculate_csv, Airports, EmissionsTable, Trip};

static TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/bin/batch_template.md"
));
static TEMPLATE_NAME: &'static str = "t";

const ABOUT: &'static str = r#"Computes the distance and emissions of every trip of a CSV with columns
`Departure`, `Arrival`, `Travel Type`, `Travel Class` and (optionally) `Travelers`.
Rows that can't be computed are logged and skipped; the others are written as CSV."#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// The CSV of trips
    #[arg(long)]
    input: String,
    /// Where to write the computed trips as CSV
    #[arg(long)]
    output: String,
    /// Optional path of a markdown summary
    #[arg(long)]
    report: Option<String>,
    /// Optional CSV of airports (else the bundled one)
    #[arg(long)]
    airports: Option<String>,
    /// Optional CSV of emissions factors (else the bundled one)
    #[arg(long)]
    emissions: Option<String>,
}

#[derive(serde::Serialize)]
struct ClassSummary {
    name: String,
    trips: usize,
    distance_km: String,
    emissions_kg: String,
}

#[derive(serde::Serialize)]
struct Context {
    trips: usize,
    failed: usize,
    no_bracket: usize,
    total_distance_km: String,
    total_emissions_kg: String,
    classes: Vec<ClassSummary>,
}

fn thousands(value: f64) -> String {
    (value.round() as u64).to_formatted_string(&Locale::en)
}

fn context(trips: &[Trip], failed: usize) -> Context {
    let mut classes = BTreeMap::<&str, (usize, f64, f64)>::new();
    for trip in trips {
        let entry = classes.entry(&trip.travel_class).or_default();
        entry.0 += 1;
        entry.1 += trip.total_distance_km;
        entry.2 += trip.emissions_kg;
    }

    Context {
        trips: trips.len(),
        failed,
        no_bracket: trips.iter().filter(|trip| trip.bracket.is_none()).count(),
        total_distance_km: thousands(trips.iter().map(|trip| trip.total_distance_km).sum()),
        total_emissions_kg: thousands(trips.iter().map(|trip| trip.emissions_kg).sum()),
        classes: classes
            .into_iter()
            .map(|(name, (trips, distance, emissions))| ClassSummary {
                name: name.to_string(),
                trips,
                distance_km: thousands(distance),
                emissions_kg: thousands(emissions),
            })
            .collect(),
    }
}

fn render(path: &str, context: &Context) -> Result<(), Box<dyn Error>> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template(TEMPLATE_NAME, TEMPLATE)?;

    let rendered = tt.render(TEMPLATE_NAME, context)?;

    log::info!("Report written to {path}");
    std::fs::write(path, rendered)?;
    Ok(())
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

    let data = std::fs::read(&cli.input)?;
    let results = calculate_csv(&data, &airports, &table);

    let mut trips = Vec::with_capacity(results.len());
    let mut failed = 0;
    for (row, result) in results.into_iter().enumerate() {
        match result {
            Ok(trip) => trips.push(trip),
            Err(e) => {
                failed += 1;
                // the header is line 1
                log::warn!("Line {} skipped: {e}", row + 2);
            }
        }
    }
    log::info!("Trips computed: {} ({failed} failed)", trips.len());

    std::fs::write(&cli.output, etcc::csv::serialize(trips.iter())?)?;
    log::info!("Trips written to {}", cli.output);

    if let Some(path) = &cli.report {
        render(path, &context(&trips, failed))?;
    }
    Ok(())
}
