use std::{collections::HashMap, sync::Arc};

use crate::{DistanceRange, Error, Result};

/// Name of the column of the emissions table holding the range specs
pub const RANGE_COLUMN: &str = "Kilometers Travelled";

// note: default factors in kg CO2e per passenger km, one row per distance range
// ordered from the shortest to the longest range
static EMISSIONS: &'static [u8] = include_bytes!("./emissions.csv");

/// A row of an emissions table, as provided by its source (e.g. a CSV)
#[derive(Debug, Clone, PartialEq)]
pub struct RawBracket {
    /// the range spec (e.g. `>=800 - <1107.2`)
    pub range: String,
    /// pairs of travel class and factor (e.g. `("ECONOMY", "0.15")`)
    pub factors: Vec<(String, String)>,
}

impl RawBracket {
    pub fn new<C: Into<String>, F: ToString>(
        range: impl Into<String>,
        factors: impl IntoIterator<Item = (C, F)>,
    ) -> Self {
        Self {
            range: range.into(),
            factors: factors
                .into_iter()
                .map(|(class, factor)| (class.into(), factor.to_string()))
                .collect(),
        }
    }
}

/// A parsed row of an [`EmissionsTable`]: a [`DistanceRange`] and the
/// emissions factor (kg / km) of each travel class within it.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionsBracket {
    spec: String,
    range: DistanceRange,
    factors: HashMap<Arc<str>, f64>,
}

impl EmissionsBracket {
    fn try_new(raw: RawBracket) -> Result<Self> {
        let range = raw.range.parse::<DistanceRange>()?;
        let factors = raw
            .factors
            .into_iter()
            .map(|(class, value)| -> Result<(Arc<str>, f64)> {
                let factor = value
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .ok_or_else(|| Error::InvalidFactor {
                        range: raw.range.clone(),
                        class: class.clone(),
                        value: value.clone(),
                    })?;
                Ok((Arc::<str>::from(class), factor))
            })
            .collect::<Result<_>>()?;
        Ok(Self {
            spec: raw.range,
            range,
            factors,
        })
    }

    /// The range spec this bracket was parsed from
    pub fn spec(&self) -> &str {
        &self.spec
    }

    pub fn range(&self) -> &DistanceRange {
        &self.range
    }

    /// The factor (kg / km) of `travel_class`, if the class is known to this bracket
    pub fn factor(&self, travel_class: &str) -> Option<f64> {
        self.factors.get(travel_class).copied()
    }
}

/// An ordered sequence of [`EmissionsBracket`]s. Immutable once loaded; share it with an [`Arc`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionsTable {
    classes: Vec<Arc<str>>,
    brackets: Vec<EmissionsBracket>,
}

impl EmissionsTable {
    /// Parses every row of the table, keeping their order.
    /// # Error
    /// Errors with [`Error::MalformedRangeSpec`] or [`Error::InvalidFactor`] on the first
    /// row that can't be parsed; no table is returned in that case.
    pub fn new(rows: impl IntoIterator<Item = RawBracket>) -> Result<Self> {
        let brackets = rows
            .into_iter()
            .map(EmissionsBracket::try_new)
            .collect::<Result<Vec<_>>>()?;

        let mut classes: Vec<Arc<str>> = vec![];
        for bracket in &brackets {
            for class in bracket.factors.keys() {
                if !classes.contains(class) {
                    classes.push(class.clone());
                }
            }
        }
        classes.sort();

        log::info!(
            "Emissions table loaded: {} brackets, classes {:?}",
            brackets.len(),
            classes
        );
        Ok(Self { classes, brackets })
    }

    /// Parses an emissions table from a CSV whose column [`RANGE_COLUMN`] holds the
    /// range specs and every other column is a travel class.
    pub fn from_csv(data: &[u8]) -> Result<Self> {
        Self::new(super::csv::raw_brackets(data)?)
    }

    /// Loads an emissions table from a CSV file on disk (see [`EmissionsTable::from_csv`]).
    /// # Error
    /// Errors if the file cannot be read or is not a valid table
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::from_csv(&std::fs::read(path)?)
    }

    /// The table bundled with this crate (`src/emissions.csv`)
    pub fn bundled() -> Result<Self> {
        Self::from_csv(EMISSIONS)
    }

    pub fn brackets(&self) -> &[EmissionsBracket] {
        &self.brackets
    }

    /// All travel classes with a factor in at least one bracket, sorted
    pub fn classes(&self) -> &[Arc<str>] {
        &self.classes
    }

    /// Returns the first bracket (and its position) containing `distance`.
    /// `O(N)` over the brackets in table order; earlier brackets win over later ones.
    pub fn bracket(&self, distance: f64) -> Option<(usize, &EmissionsBracket)> {
        self.brackets
            .iter()
            .enumerate()
            .find(|(_, bracket)| bracket.range.contains(distance))
    }
}

/// The outcome of [`estimate_emissions`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimate {
    /// The bracket at `index` of the table contains the distance
    Bracket {
        index: usize,
        factor: f64,
        emissions_kg: f64,
    },
    /// No bracket contains the distance
    NoBracket,
}

impl Estimate {
    /// Emissions in kg; 0 when no bracket matched
    pub fn emissions_kg(&self) -> f64 {
        match self {
            Estimate::Bracket { emissions_kg, .. } => *emissions_kg,
            Estimate::NoBracket => 0.0,
        }
    }

    pub fn matched(&self) -> bool {
        matches!(self, Estimate::Bracket { .. })
    }
}

/// Returns the emissions of flying `total_distance_km` (already multiplied by the number of
/// travelers) in `travel_class`, using the factor of the first bracket of `table`
/// containing the distance.
/// # Error
/// Errors with [`Error::UnknownTravelClass`] if the matched bracket has no factor for
/// `travel_class`
pub fn estimate_emissions(
    total_distance_km: f64,
    travel_class: &str,
    table: &EmissionsTable,
) -> Result<Estimate> {
    let Some((index, bracket)) = table.bracket(total_distance_km) else {
        log::debug!("No bracket contains {total_distance_km} km");
        return Ok(Estimate::NoBracket);
    };
    let factor = bracket
        .factor(travel_class)
        .ok_or_else(|| Error::UnknownTravelClass(travel_class.to_string()))?;
    log::debug!(
        "{total_distance_km} km in bracket {:?} with {travel_class} factor {factor}",
        bracket.spec
    );

    Ok(Estimate::Bracket {
        index,
        factor,
        emissions_kg: total_distance_km * factor,
    })
}
