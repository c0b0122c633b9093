//! Record schema table.
//!
//! Every record is framed as `pre-event | event | post-event | intensity`.
//! The pre-event segment is identical in all supported revisions; the
//! post-event segment only ever grows, one block per schema boundary:
//!
//! | version | appended post-event fields                              |
//! |---------|---------------------------------------------------------|
//! | base    | longitude, latitude, transducer, options, data offset   |
//! | 3.3     | easting, northing                                       |
//! | 4.0     | cycles, volts, power, gain, previous offset             |
//! | 4.2     | antenna elevation, antenna height, draft, tide          |
//! | 4.3     | GPS mode, HDOP                                          |
//!
//! The event string sits between the two segments and is sized by the
//! `event_len` pre-event field. Anything after the last known post-event
//! field is skipped through the record's offset field.

use crate::cursor::ByteCursor;
use crate::Result;
use sdi_core::FormatVersion;
use std::fmt;

/// Wire encoding of a field (all little-endian).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    U8,
    I8,
    U16,
    I16,
    I32,
    F32,
    F64,
}

impl WireType {
    /// Encoded width in bytes.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            WireType::U8 | WireType::I8 => 1,
            WireType::U16 | WireType::I16 => 2,
            WireType::I32 | WireType::F32 => 4,
            WireType::F64 => 8,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            WireType::U8 => "u8",
            WireType::I8 => "i8",
            WireType::U16 => "u16",
            WireType::I16 => "i16",
            WireType::I32 => "i32",
            WireType::F32 => "f32",
            WireType::F64 => "f64",
        }
    }

    /// Reads one value of this type.
    ///
    /// # Errors
    /// Returns [`crate::Error::TruncatedRecord`] past the end of the buffer.
    pub fn read(self, cursor: &mut ByteCursor<'_>) -> Result<Value> {
        Ok(match self {
            WireType::U8 => Value::U8(cursor.read_u8()?),
            WireType::I8 => Value::I8(cursor.read_i8()?),
            WireType::U16 => Value::U16(cursor.read_u16()?),
            WireType::I16 => Value::I16(cursor.read_i16()?),
            WireType::I32 => Value::I32(cursor.read_i32()?),
            WireType::F32 => Value::F32(cursor.read_f32()?),
            WireType::F64 => Value::F64(cursor.read_f64()?),
        })
    }
}

/// A decoded field value, tagged with its wire type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    I32(i32),
    F32(f32),
    F64(f64),
}

impl Value {
    /// Wire type this value was read as.
    #[must_use]
    pub fn wire_type(&self) -> WireType {
        match self {
            Value::U8(_) => WireType::U8,
            Value::I8(_) => WireType::I8,
            Value::U16(_) => WireType::U16,
            Value::I16(_) => WireType::I16,
            Value::I32(_) => WireType::I32,
            Value::F32(_) => WireType::F32,
            Value::F64(_) => WireType::F64,
        }
    }
}

/// Every fixed-width field known to any supported revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    // pre-event
    Offset,
    TraceNum,
    Units,
    SpdosUnits,
    Spdos,
    MinWindow10,
    MaxWindow10,
    Draft100,
    Tide100,
    HeaveCm,
    DisplayRange,
    DepthR1,
    MinPntR1,
    NumPntR1,
    BlankingPnt,
    DepthPnt,
    RangePnt,
    NumPnts,
    Clock,
    Hour,
    Minute,
    Second,
    Centisecond,
    Rate,
    Khz,
    EventLen,
    // post-event
    Longitude,
    Latitude,
    Transducer,
    Options,
    DataOffset,
    Easting,
    Northing,
    Cycles,
    Volts,
    Power,
    Gain,
    PreviousOffset,
    AntennaElevation,
    AntennaHeight,
    Draft,
    Tide,
    GpsMode,
    Hdop,
}

impl Field {
    /// Wire encoding of the field.
    #[must_use]
    pub const fn wire(self) -> WireType {
        match self {
            Offset | PreviousOffset => WireType::U16,
            TraceNum | Clock | Rate => WireType::I32,
            Units | SpdosUnits | Hour | Minute | Second | Centisecond | EventLen | Transducer
            | Options | DataOffset | Cycles | Volts | Power | Gain => WireType::U8,
            Spdos | MinWindow10 | MaxWindow10 | Draft100 | Tide100 | HeaveCm | DisplayRange
            | BlankingPnt | DepthPnt | RangePnt | NumPnts => WireType::I16,
            DepthR1 | MinPntR1 | NumPntR1 | Khz | AntennaElevation | AntennaHeight | Draft
            | Tide | Hdop => WireType::F32,
            Longitude | Latitude | Easting | Northing => WireType::F64,
            GpsMode => WireType::I8,
        }
    }

    /// Field name as used in the format documentation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Offset => "offset",
            TraceNum => "trace_num",
            Units => "units",
            SpdosUnits => "spdos_units",
            Spdos => "spdos",
            MinWindow10 => "min_window10",
            MaxWindow10 => "max_window10",
            Draft100 => "draft100",
            Tide100 => "tide100",
            HeaveCm => "heave_cm",
            DisplayRange => "display_range",
            DepthR1 => "depth_r1",
            MinPntR1 => "min_pnt_r1",
            NumPntR1 => "num_pnt_r1",
            BlankingPnt => "blanking_pnt",
            DepthPnt => "depth_pnt",
            RangePnt => "range_pnt",
            NumPnts => "num_pnts",
            Clock => "clock",
            Hour => "hour",
            Minute => "minute",
            Second => "second",
            Centisecond => "centisecond",
            Rate => "rate",
            Khz => "kHz",
            EventLen => "event_len",
            Longitude => "longitude",
            Latitude => "latitude",
            Transducer => "transducer",
            Options => "options",
            DataOffset => "data_offset",
            Easting => "easting",
            Northing => "northing",
            Cycles => "cycles",
            Volts => "volts",
            Power => "power",
            Gain => "gain",
            PreviousOffset => "previous_offset",
            AntennaElevation => "antenna_e1",
            AntennaHeight => "antenna_ht",
            Draft => "draft",
            Tide => "tide",
            GpsMode => "gps_mode",
            Hdop => "hdop",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[allow(clippy::enum_glob_use)]
use Field::*;

const PRE_EVENT: &[Field] = &[
    Offset,
    TraceNum,
    Units,
    SpdosUnits,
    Spdos,
    MinWindow10,
    MaxWindow10,
    Draft100,
    Tide100,
    HeaveCm,
    DisplayRange,
    DepthR1,
    MinPntR1,
    NumPntR1,
    BlankingPnt,
    DepthPnt,
    RangePnt,
    NumPnts,
    Clock,
    Hour,
    Minute,
    Second,
    Centisecond,
    Rate,
    Khz,
    EventLen,
];

const POST_BASE: &[Field] = &[Longitude, Latitude, Transducer, Options, DataOffset];

const POST_3_3: &[Field] = &[
    Longitude, Latitude, Transducer, Options, DataOffset, Easting, Northing,
];

const POST_4_0: &[Field] = &[
    Longitude,
    Latitude,
    Transducer,
    Options,
    DataOffset,
    Easting,
    Northing,
    Cycles,
    Volts,
    Power,
    Gain,
    PreviousOffset,
];

const POST_4_2: &[Field] = &[
    Longitude,
    Latitude,
    Transducer,
    Options,
    DataOffset,
    Easting,
    Northing,
    Cycles,
    Volts,
    Power,
    Gain,
    PreviousOffset,
    AntennaElevation,
    AntennaHeight,
    Draft,
    Tide,
];

const POST_4_3: &[Field] = &[
    Longitude,
    Latitude,
    Transducer,
    Options,
    DataOffset,
    Easting,
    Northing,
    Cycles,
    Volts,
    Power,
    Gain,
    PreviousOffset,
    AntennaElevation,
    AntennaHeight,
    Draft,
    Tide,
    GpsMode,
    Hdop,
];

/// Field layout of the fixed segments of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Fields before the event string.
    pub pre: &'static [Field],
    /// Fields after the event string.
    pub post: &'static [Field],
}

impl Schema {
    /// Encoded size of the pre-event segment.
    #[must_use]
    pub fn pre_len(&self) -> usize {
        segment_len(self.pre)
    }

    /// Encoded size of the post-event segment.
    #[must_use]
    pub fn post_len(&self) -> usize {
        segment_len(self.post)
    }

    /// Returns true if either segment carries `field`.
    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.pre.contains(&field) || self.post.contains(&field)
    }
}

/// Selects the record layout for a format revision.
#[must_use]
pub fn schema_for(version: FormatVersion) -> Schema {
    let post = if version >= FormatVersion::GPS_QUALITY {
        POST_4_3
    } else if version >= FormatVersion::ANTENNA_OFFSETS {
        POST_4_2
    } else if version >= FormatVersion::TRANSMIT_SETTINGS {
        POST_4_0
    } else if version >= FormatVersion::PROJECTED_POSITION {
        POST_3_3
    } else {
        POST_BASE
    };
    Schema {
        pre: PRE_EVENT,
        post,
    }
}

/// Sum of the wire widths of `fields`.
#[must_use]
pub fn segment_len(fields: &[Field]) -> usize {
    fields.iter().map(|field| field.wire().width()).sum()
}

/// Reads one segment, returning each field with its value in schema order.
///
/// # Errors
/// Returns [`crate::Error::TruncatedRecord`] if the segment runs past the buffer.
pub fn read_segment(
    cursor: &mut ByteCursor<'_>,
    fields: &'static [Field],
) -> Result<Vec<(Field, Value)>> {
    fields
        .iter()
        .map(|&field| Ok((field, field.wire().read(cursor)?)))
        .collect()
}
