use std::error::Error;

use clap::Parser;
use simple_logger::SimpleLogger;

use etcc::Airports;

/// Prints the airports of the directory as JSON picker options (`{"value": "CPH", "label": "Copenhagen (CPH)"}`)
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Optional CSV of airports (else the bundled one)
    #[arg(long)]
    airports: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let cli = Cli::parse();

    let airports = match &cli.airports {
        Some(path) => Airports::load(path)?,
        None => Airports::bundled()?,
    };

    println!("{}", serde_json::to_string_pretty(&airports.options())?);
    Ok(())
}
