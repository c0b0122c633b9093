//! Record decoder for the alternate container.
//!
//! Every record uses one flat layout followed by a constant framing gap and
//! signed 16-bit samples:
//!
//! | size | field                       |
//! |------|-----------------------------|
//! | 4    | trace number (i32)          |
//! | 4    | hour, minute, second, cs    |
//! | 1    | transducer                  |
//! | 4    | frequency, kHz (f32)        |
//! | 4    | sample rate, Hz (i32)       |
//! | 2    | sample count (u16)          |
//! | 32   | lon, lat, easting, northing |
//! | 8    | draft, tide, meters (f32)   |
//! | 4    | framing gap                 |

use crate::cursor::ByteCursor;
use crate::header::alternate_layout::HEADER_LEN;
use crate::Result;
use sdi_core::{AntennaOffsets, GlobalSettings, ProjectedPosition, RawTrace, TraceRecord};

/// Bytes between the fixed fields and the first sample.
pub const FRAMING_GAP: usize = 4;

/// Size of the fixed part of a record, framing gap included.
#[cfg(test)]
const RECORD_FIXED_LEN: usize = 59 + FRAMING_GAP;

/// Shifts a signed sample into the unsigned domain (`s + 32768`).
#[must_use]
pub fn shift_sample(sample: i16) -> u16 {
    u16::try_from(i32::from(sample) + 32_768).unwrap_or_default()
}

/// Decodes every record of an alternate container file.
///
/// The global unit code and speed of sound are copied into each record.
///
/// # Errors
/// Returns [`crate::Error::TruncatedRecord`] if a record runs past the buffer.
pub fn decode_alternate_records(data: &[u8], globals: &GlobalSettings) -> Result<Vec<RawTrace>> {
    let mut cursor = ByteCursor::new(data, HEADER_LEN);
    let mut traces = Vec::new();

    while !cursor.is_at_end() {
        let mut record = TraceRecord {
            units: globals.unit_code,
            spdos_units: globals.unit_code,
            spdos: globals.speed_of_sound,
            ..TraceRecord::default()
        };
        record.trace_num = cursor.read_i32()?;
        record.hour = cursor.read_u8()?;
        record.minute = cursor.read_u8()?;
        record.second = cursor.read_u8()?;
        record.centisecond = cursor.read_u8()?;
        record.transducer = cursor.read_u8()?;
        record.khz = cursor.read_f32()?;
        record.rate = cursor.read_i32()?;
        record.num_pnts = cursor.read_u16()?;
        record.longitude = cursor.read_f64()?;
        record.latitude = cursor.read_f64()?;
        record.projected = Some(ProjectedPosition {
            easting: cursor.read_f64()?,
            northing: cursor.read_f64()?,
        });
        record.antenna = Some(AntennaOffsets {
            draft: cursor.read_f32()?,
            tide: cursor.read_f32()?,
            ..AntennaOffsets::default()
        });
        cursor.take(FRAMING_GAP)?;

        let samples = cursor
            .read_i16_samples(usize::from(record.num_pnts))?
            .into_iter()
            .map(shift_sample)
            .collect();
        traces.push(RawTrace { record, samples });
    }

    log::debug!("decoded {} alternate records", traces.len());
    Ok(traces)
}
