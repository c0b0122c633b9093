//! File preamble readers.
//!
//! Primary container layout (12 bytes at offset 0):
//!
//! | offset | size | field                                         |
//! |--------|------|-----------------------------------------------|
//! | 0      | 8    | filename, `YYMMDDFF`                          |
//! | 8      | 2    | constant CR LF                                |
//! | 10     | 1    | version, high nibble major / low nibble minor |
//! | 11     | 1    | legacy sample resolution (cm)                 |

use crate::cursor::ByteCursor;
use crate::{Error, Result};
use chrono::NaiveDate;
use sdi_core::{FormatVersion, GlobalSettings, SurveyHeader};

/// Size of the primary container preamble.
pub const HEADER_LEN: usize = 12;

/// Offsets of the alternate container header.
pub mod alternate_layout {
    pub const FILENAME: usize = 66;
    pub const FILENAME_LEN: usize = 64;
    pub const VERSION: usize = 130;
    pub const FILE_NUMBER: usize = 132;
    pub const SPEED_OF_SOUND: usize = 146;
    pub const UNIT_CODE: usize = 170;
    /// First record byte.
    pub const HEADER_LEN: usize = 172;
}

/// Reads the primary container preamble.
///
/// # Errors
/// - [`Error::TruncatedRecord`] if the buffer is shorter than the preamble.
/// - [`Error::UnsupportedVersion`] for versions at or below 3.2.
/// - [`Error::InvalidDate`] if the filename does not start with `YYMMDD`.
pub fn read_header(data: &[u8]) -> Result<SurveyHeader> {
    let mut cursor = ByteCursor::new(data, 0);
    let filename = cursor.read_text(8)?;
    cursor.take(2)?;
    let version = FormatVersion::from_byte(cursor.read_u8()?);
    let legacy_resolution_cm = cursor.read_u8()?;

    if !version.is_supported() {
        return Err(Error::UnsupportedVersion(version));
    }

    let survey_date = survey_date(&filename)?;
    log::debug!("read header of {filename}: version {version}, date {survey_date}");

    Ok(SurveyHeader {
        filename,
        version,
        legacy_resolution_cm,
        survey_date,
        globals: None,
    })
}

/// Reads the alternate container header.
///
/// # Errors
/// - [`Error::TruncatedRecord`] if the buffer ends inside the header.
/// - [`Error::InvalidDate`] if the filename does not start with `YYMMDD`.
pub fn read_alternate_header(data: &[u8]) -> Result<SurveyHeader> {
    use alternate_layout as layout;

    if data.len() < layout::HEADER_LEN {
        return Err(Error::TruncatedRecord {
            position: 0,
            needed: layout::HEADER_LEN,
            available: data.len(),
        });
    }

    let filename = ByteCursor::new(data, layout::FILENAME).read_text(layout::FILENAME_LEN)?;

    let mut cursor = ByteCursor::new(data, layout::VERSION);
    let version = FormatVersion::new(cursor.read_u8()?, cursor.read_u8()?);
    let file_number = ByteCursor::new(data, layout::FILE_NUMBER).read_u16()?;
    let speed_of_sound = ByteCursor::new(data, layout::SPEED_OF_SOUND).read_f32()?;
    let unit_code = ByteCursor::new(data, layout::UNIT_CODE).read_u8()?;

    let survey_date = survey_date(&filename)?;
    log::debug!(
        "read alternate header of {filename}: version {version}, file {file_number}, date {survey_date}"
    );

    Ok(SurveyHeader {
        filename,
        version,
        legacy_resolution_cm: 0,
        survey_date,
        globals: Some(GlobalSettings {
            file_number,
            speed_of_sound,
            unit_code,
        }),
    })
}

/// Parses the survey date from the first six filename characters (`YYMMDD`).
///
/// # Errors
/// Returns [`Error::InvalidDate`] if the prefix is missing or not a calendar date.
pub fn survey_date(filename: &str) -> Result<NaiveDate> {
    filename
        .get(..6)
        .filter(|prefix| prefix.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%y%m%d").ok())
        .ok_or_else(|| Error::InvalidDate {
            filename: filename.to_string(),
        })
}
