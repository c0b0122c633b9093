//! Survey file header.

use crate::units::LengthUnit;
use crate::version::FormatVersion;
use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Values shared by every record in a file, present only in the alternate container.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlobalSettings {
    /// Sequence number of the file within the survey.
    pub file_number: u16,
    /// Speed of sound, expressed in `units`.
    pub speed_of_sound: f32,
    /// Raw unit code applied to every record.
    pub unit_code: u8,
}

impl GlobalSettings {
    /// Decoded unit, if the code is known.
    #[must_use]
    pub fn units(&self) -> Option<LengthUnit> {
        LengthUnit::from_code(self.unit_code)
    }
}

/// File preamble, read once per file and never modified.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurveyHeader {
    /// Original base filename (`YYMMDDFF`).
    pub filename: String,
    /// Format revision.
    pub version: FormatVersion,
    /// Sample resolution in centimeters. Only meaningful before 1.6, zero since.
    pub legacy_resolution_cm: u8,
    /// Survey date parsed from the first six filename characters.
    pub survey_date: NaiveDate,
    /// Global settings of the alternate container.
    pub globals: Option<GlobalSettings>,
}

impl SurveyHeader {
    /// Survey line number; the filename doubles as the line identifier.
    #[must_use]
    pub fn survey_line_number(&self) -> &str {
        &self.filename
    }
}
