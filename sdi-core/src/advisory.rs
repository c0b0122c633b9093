//! Non-fatal findings recorded while cleaning a survey.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coordinate pair a position advisory refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoordinatePair {
    /// Longitude / latitude.
    Geographic,
    /// Easting / northing.
    Projected,
}

impl fmt::Display for CoordinatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinatePair::Geographic => write!(f, "longitude/latitude"),
            CoordinatePair::Projected => write!(f, "easting/northing"),
        }
    }
}

/// A locally repaired condition that did not make the file untrustworthy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Advisory {
    /// Out-of-range unit codes replaced by the first valid code in the column.
    RepairedUnits {
        field: String,
        records: Vec<usize>,
        replacement: u8,
    },
    /// The outlier loop hit its iteration cap with outliers still detected.
    OutlierCapReached {
        pair: CoordinatePair,
        iterations: usize,
        residual: usize,
    },
    /// A record's clock fields do not form a valid time of day.
    InvalidTimestamp { record: usize },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::RepairedUnits {
                field,
                records,
                replacement,
            } => write!(
                f,
                "replaced unknown `{field}` code in {} record(s) {records:?} with {replacement}",
                records.len()
            ),
            Advisory::OutlierCapReached {
                pair,
                iterations,
                residual,
            } => write!(
                f,
                "{pair} outlier removal stopped after {iterations} passes with {residual} outlier(s) left"
            ),
            Advisory::InvalidTimestamp { record } => {
                write!(f, "record {record} has an invalid time of day")
            }
        }
    }
}
