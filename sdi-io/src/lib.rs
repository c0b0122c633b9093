//! sdi-io: Survey file reading for SDI depth sounder data.
//!
//! This crate memory-maps survey files via memmap2, runs them through the
//! decoder and the cleanup pipeline, and assembles a [`Survey`]. It also
//! reads the companion text formats and exports trace metadata as CSV.
//!

pub mod config;
pub mod corestick;
mod error;
pub mod pickfile;
mod reader;
mod survey;
pub mod writer;

pub use config::{OutputLayout, ReadConfig};
pub use corestick::{read_cores, Core};
pub use error::{Error, Result};
pub use pickfile::{read_picks, PickFile};
pub use reader::{read_survey, read_surveys, MappedFileReader, SurveyReader};
pub use sdi_binary::ContainerFormat;
pub use survey::{GroupSummary, Survey, SurveyData, SurveySummary};
pub use writer::TraceCsvWriter;
