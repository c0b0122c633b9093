//! Decoded trace records.
//!
//! A [`TraceRecord`] holds the metadata of one sonar ping exactly as it was
//! stored on the wire. Field groups introduced by later format revisions are
//! optional and populated only when the file version carries them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Projected easting/northing (format 3.3 and later).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectedPosition {
    pub easting: f64,
    pub northing: f64,
}

/// Transmitter settings (format 4.0 and later).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransmitSettings {
    pub cycles: u8,
    pub volts: u8,
    pub power: u8,
    pub gain: u8,
    /// Offset field of the preceding record.
    pub previous_offset: u16,
}

/// Antenna geometry and vertical corrections (format 4.2 and later).
///
/// `draft` and `tide` are stored in meters and supersede the hundredths fields.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AntennaOffsets {
    pub antenna_elevation: f32,
    pub antenna_height: f32,
    pub draft: f32,
    pub tide: f32,
}

/// GPS fix quality (format 4.3 and later).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpsQuality {
    pub gps_mode: i8,
    pub hdop: f32,
}

/// Metadata of a single decoded trace, in wire units.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceRecord {
    /// Bytes from the end of this field to the intensity block.
    pub offset: u16,
    pub trace_num: i32,
    /// Unit code for length fields (0 = feet, 1 = meters, 2 = fathoms).
    pub units: u8,
    /// Unit code for the speed of sound.
    pub spdos_units: u8,
    /// Speed of sound in `spdos_units` per second.
    pub spdos: f32,
    pub min_window10: i16,
    pub max_window10: i16,
    pub draft100: i16,
    pub tide100: i16,
    pub heave_cm: i16,
    pub display_range: i16,
    pub depth_r1: f32,
    pub min_pnt_r1: f32,
    pub num_pnt_r1: f32,
    pub blanking_pnt: i16,
    pub depth_pnt: i16,
    pub range_pnt: i16,
    /// Number of intensity samples that follow the metadata.
    pub num_pnts: u16,
    pub clock: i32,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub centisecond: u8,
    /// Sample rate in Hz.
    pub rate: i32,
    /// Transducer frequency in kHz.
    pub khz: f32,
    pub event: String,
    pub longitude: f64,
    pub latitude: f64,
    pub transducer: u8,
    pub options: u8,
    pub data_offset: u8,
    pub projected: Option<ProjectedPosition>,
    pub transmit: Option<TransmitSettings>,
    pub antenna: Option<AntennaOffsets>,
    pub gps_quality: Option<GpsQuality>,
}

/// A decoded record paired with its raw intensity samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTrace {
    pub record: TraceRecord,
    /// Unsigned 16-bit samples, `record.num_pnts` of them.
    pub samples: Vec<u16>,
}
