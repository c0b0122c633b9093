//! Error types for sdi-core.

use thiserror::Error;

/// Result type alias for sdi operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for trace normalization and grouping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Too many records carry a unit code outside the known set.
    #[error(
        "unsupported units in `{field}`: {count} records carry an unknown unit code \
         (at most {tolerance} can be repaired)"
    )]
    UnsupportedUnits {
        field: &'static str,
        count: usize,
        tolerance: usize,
    },

    /// No record carries a usable unit code, so nothing can be used for repair.
    #[error("no record carries a valid unit code in `{field}`")]
    NoValidUnits { field: &'static str },

    /// A transducer group reports more than one frequency.
    #[error(
        "transducer {transducer} reports {} distinct frequencies ({frequencies:?} kHz); \
         the file is corrupt or was decoded incorrectly",
        .frequencies.len()
    )]
    InconsistentFrequency {
        transducer: u8,
        frequencies: Vec<f32>,
    },

    /// A column does not match the number of traces in its batch.
    #[error("column `{column}` has {actual} entries, expected {expected}")]
    ColumnLength {
        column: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A row selection names a trace the batch does not hold.
    #[error("row {index} is out of range for a batch of {len} traces")]
    RowIndex { index: usize, len: usize },
}
