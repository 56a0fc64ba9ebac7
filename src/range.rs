use std::ops::{Bound, RangeBounds};
use std::str::FromStr;

use crate::{Error, Result};

/// A distance range of the emissions table, parsed from one of
/// * `<X`: distances below `X`
/// * `>=X - <Y`: distances from `X` (inclusive) to `Y` (exclusive)
/// * `>=X`: distances from `X` onwards
///
/// Whitespace around numbers and the `-` separator is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRange {
    lower: Bound<f64>,
    upper: Bound<f64>,
}

impl DistanceRange {
    /// The lower bound; `Included` or `Unbounded`
    pub fn lower(&self) -> Bound<f64> {
        self.lower
    }

    /// The upper bound; `Excluded` or `Unbounded`
    pub fn upper(&self) -> Bound<f64> {
        self.upper
    }

    /// Whether `distance` (in km) is inside this range. NaN is never inside.
    pub fn contains(&self, distance: f64) -> bool {
        RangeBounds::contains(&(self.lower, self.upper), &distance)
    }
}

fn number(spec: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::MalformedRangeSpec(spec.to_string()))
}

impl FromStr for DistanceRange {
    type Err = Error;

    fn from_str(spec: &str) -> Result<Self> {
        let malformed = || Error::MalformedRangeSpec(spec.to_string());
        let trimmed = spec.trim();

        let range = if let Some(rest) = trimmed.strip_prefix(">=") {
            match rest.split_once('-') {
                Some((lower, upper)) => {
                    let upper = upper.trim_start().strip_prefix('<').ok_or_else(malformed)?;
                    if upper.starts_with('=') {
                        return Err(malformed());
                    }
                    Self {
                        lower: Bound::Included(number(spec, lower)?),
                        upper: Bound::Excluded(number(spec, upper)?),
                    }
                }
                None => Self {
                    lower: Bound::Included(number(spec, rest)?),
                    upper: Bound::Unbounded,
                },
            }
        } else if let Some(rest) = trimmed.strip_prefix('<') {
            if rest.starts_with('=') {
                return Err(malformed());
            }
            Self {
                lower: Bound::Unbounded,
                upper: Bound::Excluded(number(spec, rest)?),
            }
        } else {
            return Err(malformed());
        };

        // an empty interval can never match
        if let (Bound::Included(lower), Bound::Excluded(upper)) = (range.lower, range.upper) {
            if lower >= upper {
                return Err(malformed());
            }
        }
        Ok(range)
    }
}
