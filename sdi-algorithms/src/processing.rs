//! High-level pipeline that turns decoded records into a cleaned batch.
//!
//! Each stage takes its input by value or reference and returns a new
//! value; the format version is passed in explicitly.

use crate::intensity::{normalize_intensity, SampleEncoding, SamplingScheme};
use crate::matrix::build_intensity_matrix;
use crate::partition::transducer_groups;
use crate::position::{PositionCleaner, PositionCleaningConfig};
use crate::units::{UnitConfig, UnitNormalizer};
use chrono::NaiveDate;
use sdi_core::error::Result;
use sdi_core::{Advisory, CoordinatePair, ProjectedColumns, RawTrace, TraceBatch, TraceRecord};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters of every cleanup stage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProcessingConfig {
    pub units: UnitConfig,
    pub positions: PositionCleaningConfig,
}

/// Cleaned traces of one file with the advisories raised along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedTraces {
    pub batch: TraceBatch,
    pub advisories: Vec<Advisory>,
}

fn clean_pair(
    cleaner: &PositionCleaner,
    pair: CoordinatePair,
    x: &[f64],
    y: &[f64],
    advisories: &mut Vec<Advisory>,
) -> [Vec<f64>; 4] {
    let cleaned = cleaner.clean(x, y);
    if let Some(advisory) = cleaned.advisory(pair) {
        log::warn!("{advisory}");
        advisories.push(advisory);
    }
    [
        cleaned.x,
        cleaned.y,
        cleaned.interpolated_x,
        cleaned.interpolated_y,
    ]
}

/// Cleans the geographic pair and, when present, the projected pair of a batch.
pub fn clean_positions(
    mut batch: TraceBatch,
    config: &PositionCleaningConfig,
    advisories: &mut Vec<Advisory>,
) -> TraceBatch {
    let cleaner = PositionCleaner::new(*config);

    let [lon, lat, ilon, ilat] = clean_pair(
        &cleaner,
        CoordinatePair::Geographic,
        &batch.longitude,
        &batch.latitude,
        advisories,
    );
    batch.longitude = lon;
    batch.latitude = lat;
    batch.interpolated_longitude = ilon;
    batch.interpolated_latitude = ilat;

    if let Some(projected) = batch.projected.take() {
        let [easting, northing, interpolated_easting, interpolated_northing] = clean_pair(
            &cleaner,
            CoordinatePair::Projected,
            &projected.easting,
            &projected.northing,
            advisories,
        );
        batch.projected = Some(ProjectedColumns {
            easting,
            northing,
            interpolated_easting,
            interpolated_northing,
        });
    }
    batch
}

/// Runs unit normalization, matrix construction, intensity normalization
/// and position cleaning over the records of one file, then checks that
/// every transducer reports a single frequency.
///
/// # Errors
/// Returns the first unit or frequency error; no partial batch is produced.
pub fn process_traces(
    traces: Vec<RawTrace>,
    survey_date: NaiveDate,
    scheme: SamplingScheme,
    config: &ProcessingConfig,
) -> Result<ProcessedTraces> {
    let mut advisories = Vec::new();
    let (records, samples): (Vec<TraceRecord>, Vec<Vec<u16>>) = traces
        .into_iter()
        .map(|trace| (trace.record, trace.samples))
        .unzip();

    let mut batch =
        UnitNormalizer::new(config.units).normalize(&records, survey_date, &mut advisories)?;

    let mut intensity = build_intensity_matrix(&samples);
    let encodings: Vec<SampleEncoding> = batch
        .transducer
        .iter()
        .map(|&transducer| scheme.encoding(transducer))
        .collect();
    normalize_intensity(&mut intensity, &encodings);
    batch.intensity = intensity;

    let batch = clean_positions(batch, &config.positions, &mut advisories);

    transducer_groups(&batch)?;
    batch.validate()?;
    log::debug!(
        "processed {} traces, intensity {:?}, {} advisories",
        batch.len(),
        batch.intensity.dim(),
        advisories.len()
    );
    Ok(ProcessedTraces { batch, advisories })
}
