//! Structure of Arrays (`SoA`) bundle of normalized traces.
//!
//! A [`TraceBatch`] stores every metadata field as its own column, all of
//! equal length, plus the intensity matrix whose rows line up with the
//! columns. Lengths are meters, speeds are meters per second.

use crate::error::{Error, Result};
use crate::trace::{AntennaOffsets, GpsQuality, TransmitSettings};
use chrono::NaiveDateTime;
use ndarray::{Array2, Axis};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Projected position columns, present for format 3.3 and later.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectedColumns {
    /// Cleaned easting, still holding repeated fixes.
    pub easting: Vec<f64>,
    /// Cleaned northing, still holding repeated fixes.
    pub northing: Vec<f64>,
    /// Easting interpolated between fixes.
    pub interpolated_easting: Vec<f64>,
    /// Northing interpolated between fixes.
    pub interpolated_northing: Vec<f64>,
}

impl ProjectedColumns {
    fn select(&self, indices: &[usize]) -> Self {
        Self {
            easting: pick(&self.easting, indices),
            northing: pick(&self.northing, indices),
            interpolated_easting: pick(&self.interpolated_easting, indices),
            interpolated_northing: pick(&self.interpolated_northing, indices),
        }
    }
}

/// A batch of traces stored in Structure of Arrays (`SoA`) format.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceBatch {
    pub trace_num: Vec<i32>,
    /// Survey date combined with the record clock; `None` if the clock is invalid.
    pub timestamp: Vec<Option<NaiveDateTime>>,
    pub clock: Vec<i32>,
    pub transducer: Vec<u8>,
    pub khz: Vec<f32>,
    /// Length unit codes after repair.
    pub units: Vec<u8>,
    /// Speed of sound (m/s).
    pub spdos: Vec<f64>,
    pub min_window: Vec<f64>,
    pub max_window: Vec<f64>,
    pub draft: Vec<f64>,
    pub tide: Vec<f64>,
    pub heave: Vec<f64>,
    pub display_range: Vec<f64>,
    /// Vertical size of one sample (m).
    pub pixel_resolution: Vec<f64>,
    /// Sample rate (Hz).
    pub rate: Vec<i32>,
    pub num_pnts: Vec<u16>,
    pub depth_r1: Vec<f32>,
    pub min_pnt_r1: Vec<f32>,
    pub num_pnt_r1: Vec<f32>,
    pub blanking_pnt: Vec<i16>,
    pub depth_pnt: Vec<i16>,
    pub range_pnt: Vec<i16>,
    pub options: Vec<u8>,
    pub data_offset: Vec<u8>,
    pub event: Vec<String>,
    pub longitude: Vec<f64>,
    pub latitude: Vec<f64>,
    pub interpolated_longitude: Vec<f64>,
    pub interpolated_latitude: Vec<f64>,
    pub projected: Option<ProjectedColumns>,
    pub transmit: Option<Vec<TransmitSettings>>,
    pub antenna: Option<Vec<AntennaOffsets>>,
    pub gps_quality: Option<Vec<GpsQuality>>,
    /// Intensity image, one row per trace, NaN-padded to a common width.
    pub intensity: Array2<f64>,
}

impl TraceBatch {
    /// Returns the number of traces in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trace_num.len()
    }

    /// Returns true if the batch holds no traces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trace_num.is_empty()
    }

    /// Copies the given rows (in the given order) into a new batch.
    ///
    /// # Errors
    /// Returns [`Error::ColumnLength`] if the batch itself is malformed and
    /// [`Error::RowIndex`] for an index past the last trace.
    pub fn select(&self, indices: &[usize]) -> Result<Self> {
        self.validate()?;
        let len = self.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(Error::RowIndex { index, len });
        }
        Ok(Self {
            trace_num: pick(&self.trace_num, indices),
            timestamp: pick(&self.timestamp, indices),
            clock: pick(&self.clock, indices),
            transducer: pick(&self.transducer, indices),
            khz: pick(&self.khz, indices),
            units: pick(&self.units, indices),
            spdos: pick(&self.spdos, indices),
            min_window: pick(&self.min_window, indices),
            max_window: pick(&self.max_window, indices),
            draft: pick(&self.draft, indices),
            tide: pick(&self.tide, indices),
            heave: pick(&self.heave, indices),
            display_range: pick(&self.display_range, indices),
            pixel_resolution: pick(&self.pixel_resolution, indices),
            rate: pick(&self.rate, indices),
            num_pnts: pick(&self.num_pnts, indices),
            depth_r1: pick(&self.depth_r1, indices),
            min_pnt_r1: pick(&self.min_pnt_r1, indices),
            num_pnt_r1: pick(&self.num_pnt_r1, indices),
            blanking_pnt: pick(&self.blanking_pnt, indices),
            depth_pnt: pick(&self.depth_pnt, indices),
            range_pnt: pick(&self.range_pnt, indices),
            options: pick(&self.options, indices),
            data_offset: pick(&self.data_offset, indices),
            event: pick(&self.event, indices),
            longitude: pick(&self.longitude, indices),
            latitude: pick(&self.latitude, indices),
            interpolated_longitude: pick(&self.interpolated_longitude, indices),
            interpolated_latitude: pick(&self.interpolated_latitude, indices),
            projected: self.projected.as_ref().map(|p| p.select(indices)),
            transmit: self.transmit.as_ref().map(|t| pick(t, indices)),
            antenna: self.antenna.as_ref().map(|a| pick(a, indices)),
            gps_quality: self.gps_quality.as_ref().map(|g| pick(g, indices)),
            intensity: self.intensity.select(Axis(0), indices),
        })
    }

    /// Checks that every column and the intensity matrix have one entry per trace.
    ///
    /// # Errors
    /// Returns [`Error::ColumnLength`] naming the first mismatched column.
    pub fn validate(&self) -> Result<()> {
        let expected = self.len();
        let mut lengths = vec![
            ("timestamp", self.timestamp.len()),
            ("clock", self.clock.len()),
            ("transducer", self.transducer.len()),
            ("khz", self.khz.len()),
            ("units", self.units.len()),
            ("spdos", self.spdos.len()),
            ("min_window", self.min_window.len()),
            ("max_window", self.max_window.len()),
            ("draft", self.draft.len()),
            ("tide", self.tide.len()),
            ("heave", self.heave.len()),
            ("display_range", self.display_range.len()),
            ("pixel_resolution", self.pixel_resolution.len()),
            ("rate", self.rate.len()),
            ("num_pnts", self.num_pnts.len()),
            ("event", self.event.len()),
            ("longitude", self.longitude.len()),
            ("latitude", self.latitude.len()),
            ("interpolated_longitude", self.interpolated_longitude.len()),
            ("interpolated_latitude", self.interpolated_latitude.len()),
            ("intensity", self.intensity.nrows()),
        ];
        if let Some(projected) = &self.projected {
            lengths.push(("easting", projected.easting.len()));
            lengths.push(("northing", projected.northing.len()));
            lengths.push(("interpolated_easting", projected.interpolated_easting.len()));
            lengths.push((
                "interpolated_northing",
                projected.interpolated_northing.len(),
            ));
        }
        if let Some(transmit) = &self.transmit {
            lengths.push(("transmit", transmit.len()));
        }
        if let Some(antenna) = &self.antenna {
            lengths.push(("antenna", antenna.len()));
        }
        if let Some(gps_quality) = &self.gps_quality {
            lengths.push(("gps_quality", gps_quality.len()));
        }

        match lengths.into_iter().find(|&(_, actual)| actual != expected) {
            Some((column, actual)) => Err(Error::ColumnLength {
                column,
                expected,
                actual,
            }),
            None => Ok(()),
        }
    }
}

fn pick<T: Clone>(column: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| column[i].clone()).collect()
}
