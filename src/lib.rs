#![forbid(unsafe_code)]
//! Estimates the carbon emissions of air travel: the great-circle distance between two
//! airports, scaled by the number of travelers, is mapped to emissions through a table of
//! per-class factors by distance range.
mod airports;
pub mod csv;
mod distance;
mod emissions;
mod error;
mod range;
mod trip;

pub use airports::*;
pub use distance::*;
pub use emissions::*;
pub use error::{Error, Result};
pub use range::DistanceRange;
pub use trip::*;
