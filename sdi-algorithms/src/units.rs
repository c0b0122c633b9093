//! Unit normalization: raw records to a columnar batch in meters.
//!
//! Conversion factors come from each record's own unit code, so a file that
//! switches units mid-survey is still converted correctly row by row.

use chrono::{NaiveDate, NaiveDateTime};
use ndarray::Array2;
use sdi_core::{Advisory, Error, LengthUnit, ProjectedColumns, Result, TraceBatch, TraceRecord};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance for out-of-range unit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitConfig {
    /// Largest number of bad codes per column that is repaired instead of rejected.
    pub max_repairable: usize,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self { max_repairable: 3 }
    }
}

/// Replaces a handful of unknown unit codes with the first valid code in the column.
///
/// Returns an advisory listing the repaired records, or `None` if every code was valid.
///
/// # Errors
/// - [`Error::NoValidUnits`] if the column has bad codes and no valid one.
/// - [`Error::UnsupportedUnits`] if more than `max_repairable` codes are bad.
pub fn repair_unit_codes(
    codes: &mut [u8],
    field: &'static str,
    max_repairable: usize,
) -> Result<Option<Advisory>> {
    let bad: Vec<usize> = codes
        .iter()
        .enumerate()
        .filter(|&(_, &code)| LengthUnit::from_code(code).is_none())
        .map(|(i, _)| i)
        .collect();
    if bad.is_empty() {
        return Ok(None);
    }

    let Some(replacement) = codes
        .iter()
        .copied()
        .find(|&code| LengthUnit::from_code(code).is_some())
    else {
        return Err(Error::NoValidUnits { field });
    };
    if bad.len() > max_repairable {
        return Err(Error::UnsupportedUnits {
            field,
            count: bad.len(),
            tolerance: max_repairable,
        });
    }

    for &i in &bad {
        codes[i] = replacement;
    }
    let advisory = Advisory::RepairedUnits {
        field: field.to_string(),
        records: bad,
        replacement,
    };
    log::warn!("{advisory}");
    Ok(Some(advisory))
}

/// Combines the survey date with a record's clock fields.
///
/// Returns `None` if the fields do not form a valid time of day.
#[must_use]
pub fn trace_timestamp(date: NaiveDate, record: &TraceRecord) -> Option<NaiveDateTime> {
    if record.centisecond >= 100 {
        return None;
    }
    date.and_hms_milli_opt(
        u32::from(record.hour),
        u32::from(record.minute),
        u32::from(record.second),
        u32::from(record.centisecond) * 10,
    )
}

fn factor(code: u8) -> f64 {
    LengthUnit::from_code(code).map_or(f64::NAN, LengthUnit::meters_per_unit)
}

fn optional_column<T: Copy>(
    records: &[TraceRecord],
    get: impl Fn(&TraceRecord) -> Option<T>,
) -> Option<Vec<T>> {
    if records.is_empty() {
        return None;
    }
    records.iter().map(get).collect()
}

/// Converts decoded records into a [`TraceBatch`] in SI units.
#[derive(Debug, Clone, Default)]
pub struct UnitNormalizer {
    config: UnitConfig,
}

impl UnitNormalizer {
    #[must_use]
    pub fn new(config: UnitConfig) -> Self {
        Self { config }
    }

    /// Builds the columnar batch. The intensity matrix is left with zero columns.
    ///
    /// Lengths are converted with the record's `units` code, the speed of sound
    /// with `spdos_units`. When records carry floating-point draft and tide
    /// (format 4.2 and later) those are used as-is and the hundredths fields
    /// are dropped.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedUnits`] or [`Error::NoValidUnits`] for
    /// unit columns beyond repair.
    pub fn normalize(
        &self,
        records: &[TraceRecord],
        survey_date: NaiveDate,
        advisories: &mut Vec<Advisory>,
    ) -> Result<TraceBatch> {
        let tolerance = self.config.max_repairable;
        let mut units: Vec<u8> = records.iter().map(|r| r.units).collect();
        let mut spdos_units: Vec<u8> = records.iter().map(|r| r.spdos_units).collect();
        advisories.extend(repair_unit_codes(&mut units, "units", tolerance)?);
        advisories.extend(repair_unit_codes(&mut spdos_units, "spdos_units", tolerance)?);

        let length_factor: Vec<f64> = units.iter().map(|&u| factor(u)).collect();
        let scaled = |get: fn(&TraceRecord) -> f64, divisor: f64| -> Vec<f64> {
            records
                .iter()
                .zip(&length_factor)
                .map(|(r, f)| get(r) / divisor * f)
                .collect()
        };

        let antenna = optional_column(records, |r| r.antenna);
        let (draft, tide) = match &antenna {
            Some(offsets) => (
                offsets.iter().map(|a| f64::from(a.draft)).collect(),
                offsets.iter().map(|a| f64::from(a.tide)).collect(),
            ),
            None => (
                scaled(|r| f64::from(r.draft100), 100.0),
                scaled(|r| f64::from(r.tide100), 100.0),
            ),
        };

        let spdos: Vec<f64> = records
            .iter()
            .zip(&spdos_units)
            .map(|(r, &u)| f64::from(r.spdos) * factor(u))
            .collect();
        let pixel_resolution = records
            .iter()
            .zip(&spdos)
            .map(|(r, s)| s / (2.0 * f64::from(r.rate)))
            .collect();

        let timestamp = records
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let ts = trace_timestamp(survey_date, r);
                if ts.is_none() {
                    let advisory = Advisory::InvalidTimestamp { record: i };
                    log::warn!("{advisory}");
                    advisories.push(advisory);
                }
                ts
            })
            .collect();

        let longitude: Vec<f64> = records.iter().map(|r| r.longitude).collect();
        let latitude: Vec<f64> = records.iter().map(|r| r.latitude).collect();
        let projected = optional_column(records, |r| r.projected).map(|positions| {
            let easting: Vec<f64> = positions.iter().map(|p| p.easting).collect();
            let northing: Vec<f64> = positions.iter().map(|p| p.northing).collect();
            ProjectedColumns {
                interpolated_easting: easting.clone(),
                interpolated_northing: northing.clone(),
                easting,
                northing,
            }
        });

        let batch = TraceBatch {
            trace_num: records.iter().map(|r| r.trace_num).collect(),
            timestamp,
            clock: records.iter().map(|r| r.clock).collect(),
            transducer: records.iter().map(|r| r.transducer).collect(),
            khz: records.iter().map(|r| r.khz).collect(),
            min_window: scaled(|r| f64::from(r.min_window10), 10.0),
            max_window: scaled(|r| f64::from(r.max_window10), 10.0),
            display_range: scaled(|r| f64::from(r.display_range), 1.0),
            draft,
            tide,
            heave: records
                .iter()
                .map(|r| f64::from(r.heave_cm) / 100.0)
                .collect(),
            units,
            spdos,
            pixel_resolution,
            rate: records.iter().map(|r| r.rate).collect(),
            num_pnts: records.iter().map(|r| r.num_pnts).collect(),
            depth_r1: records.iter().map(|r| r.depth_r1).collect(),
            min_pnt_r1: records.iter().map(|r| r.min_pnt_r1).collect(),
            num_pnt_r1: records.iter().map(|r| r.num_pnt_r1).collect(),
            blanking_pnt: records.iter().map(|r| r.blanking_pnt).collect(),
            depth_pnt: records.iter().map(|r| r.depth_pnt).collect(),
            range_pnt: records.iter().map(|r| r.range_pnt).collect(),
            options: records.iter().map(|r| r.options).collect(),
            data_offset: records.iter().map(|r| r.data_offset).collect(),
            event: records.iter().map(|r| r.event.clone()).collect(),
            interpolated_longitude: longitude.clone(),
            interpolated_latitude: latitude.clone(),
            longitude,
            latitude,
            projected,
            transmit: optional_column(records, |r| r.transmit),
            antenna,
            gps_quality: optional_column(records, |r| r.gps_quality),
            intensity: Array2::zeros((records.len(), 0)),
        };
        log::debug!("normalized {} records to meters", batch.len());
        Ok(batch)
    }
}
