//! Result of reading one survey file.

use chrono::NaiveDate;
use sdi_algorithms::FrequencyGroup;
use sdi_core::{Advisory, FormatVersion, TraceBatch};
use serde::Serialize;
use std::path::PathBuf;

/// Traces of a survey, in the layout requested by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SurveyData {
    /// One group per frequency, ascending by kHz.
    ByFrequency(Vec<FrequencyGroup>),
    /// Every trace in file order.
    Interleaved(TraceBatch),
}

/// A fully decoded and cleaned survey file.
#[derive(Debug, Clone, PartialEq)]
pub struct Survey {
    pub date: NaiveDate,
    pub filepath: PathBuf,
    pub file_version: FormatVersion,
    pub survey_line_number: String,
    /// Sequence number within the survey (alternate container only).
    pub file_number: Option<u16>,
    /// Repairs applied while cleaning; empty for a clean file.
    pub advisories: Vec<Advisory>,
    pub data: SurveyData,
}

impl Survey {
    /// Group recorded at `khz`, if the survey is grouped by frequency.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn frequency(&self, khz: f32) -> Option<&FrequencyGroup> {
        match &self.data {
            SurveyData::ByFrequency(groups) => groups.iter().find(|g| g.khz == khz),
            SurveyData::Interleaved(_) => None,
        }
    }

    /// Frequencies present in the survey, ascending.
    #[must_use]
    pub fn frequencies(&self) -> Vec<f32> {
        match &self.data {
            SurveyData::ByFrequency(groups) => groups.iter().map(|g| g.khz).collect(),
            SurveyData::Interleaved(batch) => {
                let mut khz = batch.khz.clone();
                khz.sort_by(f32::total_cmp);
                khz.dedup_by(|a, b| a.to_bits() == b.to_bits());
                khz
            }
        }
    }

    /// Total number of traces.
    #[must_use]
    pub fn trace_count(&self) -> usize {
        match &self.data {
            SurveyData::ByFrequency(groups) => groups.iter().map(|g| g.traces.len()).sum(),
            SurveyData::Interleaved(batch) => batch.len(),
        }
    }

    /// Compact, serializable overview of the survey.
    #[must_use]
    pub fn summary(&self) -> SurveySummary {
        let groups = match &self.data {
            SurveyData::ByFrequency(groups) => groups
                .iter()
                .map(|g| GroupSummary::new(Some(g.transducer), g.khz, &g.traces))
                .collect(),
            SurveyData::Interleaved(batch) => vec![GroupSummary::new(None, f32::NAN, batch)],
        };
        SurveySummary {
            filepath: self.filepath.display().to_string(),
            date: self.date.to_string(),
            file_version: self.file_version.to_string(),
            survey_line_number: self.survey_line_number.clone(),
            file_number: self.file_number,
            trace_count: self.trace_count(),
            advisories: self.advisories.iter().map(ToString::to_string).collect(),
            groups,
        }
    }
}

/// Per-group part of a [`SurveySummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    /// `None` for an interleaved batch.
    pub transducer: Option<u8>,
    /// NaN for an interleaved batch.
    pub khz: f32,
    pub traces: usize,
    /// Intensity matrix shape, `(traces, samples)`.
    pub intensity_shape: (usize, usize),
    pub first_trace: Option<i32>,
    pub last_trace: Option<i32>,
}

impl GroupSummary {
    fn new(transducer: Option<u8>, khz: f32, batch: &TraceBatch) -> Self {
        Self {
            transducer,
            khz,
            traces: batch.len(),
            intensity_shape: batch.intensity.dim(),
            first_trace: batch.trace_num.first().copied(),
            last_trace: batch.trace_num.last().copied(),
        }
    }
}

/// Header facts and trace counts of a survey, for display and JSON export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveySummary {
    pub filepath: String,
    pub date: String,
    pub file_version: String,
    pub survey_line_number: String,
    pub file_number: Option<u16>,
    pub trace_count: usize,
    pub advisories: Vec<String>,
    pub groups: Vec<GroupSummary>,
}
