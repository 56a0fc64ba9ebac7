use std::{error::Error, sync::Arc};

use etcc::{
    calculate, distance_km, estimate_emissions, AirportDirectory, Airports, Coordinate,
    EmissionsTable, Estimate, TravelType, TripRequest,
};

fn abs_difference<T: std::ops::Sub<Output = T> + PartialOrd>(x: T, y: T) -> T {
    if x < y {
        y - x
    } else {
        x - y
    }
}

/// Verifies that the spherical law of cosines agrees with haversine (as implemented by `geoutils`)
/// for routes of all lengths, within 0.1%.
#[test]
fn distance_agrees_with_haversine() -> Result<(), Box<dyn Error>> {
    let airports = Airports::bundled()?;
    let routes = [
        ("BER", "BRU"),
        ("CPH", "LHR"),
        ("LHR", "JFK"),
        ("LHR", "SYD"),
        ("SIN", "DUB"),
    ];

    let accepted_error = 0.001;
    for (from, to) in routes {
        let from = airports.lookup(from)?;
        let to = airports.lookup(to)?;
        let expected = geoutils::Location::new(from.latitude, from.longitude)
            .haversine_distance_to(&geoutils::Location::new(to.latitude, to.longitude))
            .meters()
            / 1000.0;
        let distance = distance_km(from, to, TravelType::OneWay)?;
        assert!(
            abs_difference(distance, expected) / expected < accepted_error,
            "{distance} != {expected}"
        );
    }
    Ok(())
}

/// From: Berlin (BER) to: Brussels (BRU), ca. 640 km
#[test]
fn acceptance_bundled_data() -> Result<(), Box<dyn Error>> {
    let airports = Airports::bundled()?;
    let table = EmissionsTable::bundled()?;

    let request = TripRequest {
        departure: "BER".to_string(),
        arrival: "BRU".to_string(),
        travel_class: "BUSINESS".to_string(),
        travel_type: TravelType::OneWay,
        num_travelers: 1,
    };
    let trip = calculate(&request, &airports, &table)?;
    assert!(abs_difference(trip.distance_km, 642.6) < 1.0);
    assert_eq!(trip.bracket, Some(0));
    assert_eq!(trip.emissions_kg, trip.distance_km * 0.15);

    // Dublin (DUB) to London (LHR) is ca. 450 km; two travelers make it the second range
    let request = TripRequest {
        departure: "DUB".to_string(),
        arrival: "LHR".to_string(),
        num_travelers: 2,
        ..request
    };
    let trip = calculate(&request, &airports, &table)?;
    assert_eq!(trip.bracket, Some(1));
    assert_eq!(trip.emissions_kg, trip.total_distance_km * 0.13);

    // long haul
    let request = TripRequest {
        departure: "LHR".to_string(),
        arrival: "JFK".to_string(),
        travel_class: "FIRST".to_string(),
        travel_type: TravelType::Return,
        num_travelers: 1,
    };
    let trip = calculate(&request, &airports, &table)?;
    assert_eq!(trip.bracket, Some(2));
    assert!(abs_difference(trip.distance_km, 2.0 * 5540.0) < 10.0);
    Ok(())
}

/// The 1° at the equator example: ca. 111.2 km in the first range with an economy factor of 0.15
#[test]
fn equator() -> Result<(), Box<dyn Error>> {
    let data = b"Kilometers Travelled,ECONOMY,BUSINESS
<800,0.15,0.2
>=800 - <1107.2,0.1,0.2
>=1107.2,0.08,0.2
";
    let table = EmissionsTable::from_csv(data)?;
    let a = Coordinate::new(0.0, 0.0)?;
    let b = Coordinate::new(1.0, 0.0)?;

    let total = distance_km(a, b, TravelType::OneWay)? * 1.0;
    let emissions = estimate_emissions(total, "ECONOMY", &table)?.emissions_kg();
    assert!(abs_difference(emissions, 16.68) < 0.01);

    let total = distance_km(a, b, TravelType::Return)? * 3.0;
    assert!(abs_difference(total, 667.2) < 0.05);
    let emissions = estimate_emissions(total, "ECONOMY", &table)?.emissions_kg();
    assert!(abs_difference(emissions, 100.08) < 0.01);
    Ok(())
}

#[test]
fn boundary() -> Result<(), Box<dyn Error>> {
    let table = EmissionsTable::bundled()?;
    let r = estimate_emissions(800.0, "ECONOMY", &table)?;
    assert_eq!(
        r,
        Estimate::Bracket {
            index: 1,
            factor: 0.09,
            emissions_kg: 72.0
        }
    );
    Ok(())
}

#[test]
fn malformed_table() {
    let r = EmissionsTable::from_csv(
        b"Kilometers Travelled,ECONOMY\n<800,0.15\n800-1107.2,0.09\n>=1107.2,0.08\n",
    );
    assert!(matches!(r, Err(etcc::Error::MalformedRangeSpec(_))));
}

/// Airports and table are shared across threads without locks
#[test]
fn shared_directory() -> Result<(), Box<dyn Error>> {
    let airports = Arc::new(Airports::bundled()?);
    let table = Arc::new(EmissionsTable::bundled()?);
    let request = TripRequest {
        departure: "CPH".to_string(),
        arrival: "LHR".to_string(),
        travel_class: "ECONOMY".to_string(),
        travel_type: TravelType::Return,
        num_travelers: 1,
    };
    let expected = calculate(&request, &airports, &table)?;

    let handles = (0..4)
        .map(|_| {
            let airports = airports.clone();
            let table = table.clone();
            let request = request.clone();
            std::thread::spawn(move || calculate(&request, &airports, &table).unwrap())
        })
        .collect::<Vec<_>>();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
    Ok(())
}

/// A table is shared across threads without locks
#[test]
fn shared_table() -> Result<(), Box<dyn Error>> {
    let table = Arc::new(EmissionsTable::bundled()?);
    let expected = estimate_emissions(1500.0, "FIRST", &table)?;

    let handles = (0..4)
        .map(|_| {
            let table = table.clone();
            std::thread::spawn(move || estimate_emissions(1500.0, "FIRST", &table).unwrap())
        })
        .collect::<Vec<_>>();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
    Ok(())
}
