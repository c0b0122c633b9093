//! sdi-core: Core types for SDI depth sounder survey data.
//!
//! This crate provides the shared data model used by the decoder, the
//! cleanup algorithms and the file readers: format versions, length units,
//! the survey header, typed trace records and the columnar [`TraceBatch`].
//!

pub mod advisory;
pub mod error;
pub mod header;
pub mod soa;
pub mod trace;
pub mod units;
pub mod version;

pub use advisory::{Advisory, CoordinatePair};
pub use error::{Error, Result};
pub use header::{GlobalSettings, SurveyHeader};
pub use soa::{ProjectedColumns, TraceBatch};
pub use trace::{
    AntennaOffsets, GpsQuality, ProjectedPosition, RawTrace, TraceRecord, TransmitSettings,
};
pub use units::LengthUnit;
pub use version::FormatVersion;
