//! sdi-binary: SDI binary header reader, schema table and record decoder.
//!
//! This crate turns the raw bytes of an SDI depth sounder file into a
//! [`SurveyHeader`] and a sequence of [`RawTrace`] records.
//!
//! # Key Components
//!
//! - [`read_header`] / [`read_alternate_header`] - file preambles
//! - [`schema_for`] - version-dependent record layout, the single source of
//!   truth for record framing
//! - [`RecordStream`] - offset-driven walk over primary container records
//! - [`decode_alternate_records`] - flat-layout records of the alternate container
//!
//! # Decoding
//!
//! 1. Read the preamble for the selected [`ContainerFormat`]
//! 2. Walk the records sequentially; each record locates the next one
//!
//! Every error is terminal for the file.

mod alternate;
mod cursor;
mod decoder;
mod error;
mod header;
mod record;
pub mod schema;

pub use alternate::{decode_alternate_records, shift_sample, FRAMING_GAP};
pub use cursor::ByteCursor;
pub use decoder::{decode_records, RecordStream};
pub use error::{Error, Result};
pub use header::{alternate_layout, read_alternate_header, read_header, survey_date, HEADER_LEN};
pub use schema::{schema_for, Field, Schema, WireType};

use sdi_core::{RawTrace, SurveyHeader};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical file layout. The two forms are mutually exclusive per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ContainerFormat {
    /// 12-byte preamble, versioned offset-framed records.
    #[default]
    Sdi,
    /// 172-byte header with global settings, flat records.
    Alternate,
}

/// Header and records of one decoded file.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFile {
    pub header: SurveyHeader,
    pub format: ContainerFormat,
    pub traces: Vec<RawTrace>,
}

/// Decodes a complete file buffer.
///
/// # Errors
/// Returns the first header or record error; no partial result is produced.
pub fn decode(data: &[u8], format: ContainerFormat) -> Result<DecodedFile> {
    let (header, traces) = match format {
        ContainerFormat::Sdi => {
            let header = read_header(data)?;
            let traces = decode_records(data, header.version)?;
            (header, traces)
        }
        ContainerFormat::Alternate => {
            let header = read_alternate_header(data)?;
            let globals = header
                .globals
                .ok_or_else(|| Error::InvalidHeader("missing global settings".to_string()))?;
            let traces = decode_alternate_records(data, &globals)?;
            (header, traces)
        }
    };
    Ok(DecodedFile {
        header,
        format,
        traces,
    })
}
