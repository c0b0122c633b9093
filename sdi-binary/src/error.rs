//! Decoder error types.

use sdi_core::FormatVersion;
use thiserror::Error;

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Structural decoding errors. All of them are terminal for the file.
#[derive(Error, Debug)]
pub enum Error {
    /// File revision at or below the last unsupported version.
    #[error(
        "reading of file formats <= {last} is not supported (file version {0})",
        last = FormatVersion::LAST_UNSUPPORTED
    )]
    UnsupportedVersion(FormatVersion),

    /// The filename does not start with a `YYMMDD` date.
    #[error("cannot derive a survey date from filename {filename:?}")]
    InvalidDate { filename: String },

    /// A read would run past the end of the buffer.
    #[error("truncated record at byte {position}: needed {needed} bytes, {available} available")]
    TruncatedRecord {
        position: usize,
        needed: usize,
        available: usize,
    },

    /// The offset field points back into bytes already decoded.
    #[error(
        "malformed offset {offset} in record at byte {record_start}: \
         intensity block would start inside the {consumed} metadata bytes already read"
    )]
    MalformedOffset {
        record_start: usize,
        offset: u16,
        consumed: usize,
    },

    /// Negative sample count.
    #[error("record at byte {record_start} declares {num_pnts} intensity samples")]
    InvalidSampleCount { record_start: usize, num_pnts: i16 },

    /// A field was decoded with a wire type its record slot cannot hold.
    #[error("field `{field}` cannot hold a {wire} value")]
    FieldType { field: &'static str, wire: &'static str },

    /// Header bytes are missing or unusable.
    #[error("invalid header: {0}")]
    InvalidHeader(String),
}
