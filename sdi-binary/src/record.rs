//! Assembly of typed trace records from schema-ordered field values.

use crate::schema::{Field, Value};
use crate::{Error, Result};
use sdi_core::TraceRecord;

/// Accumulates decoded fields into a [`TraceRecord`].
///
/// Optional field groups are created the first time one of their fields is
/// applied, so the presence of a group follows the schema that was used.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    record: TraceRecord,
    event_len: u8,
    num_pnts: i16,
}

impl RecordBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Length of the event string announced by the pre-event segment.
    #[must_use]
    pub fn event_len(&self) -> usize {
        usize::from(self.event_len)
    }

    /// Offset field of the record.
    #[must_use]
    pub fn offset(&self) -> u16 {
        self.record.offset
    }

    /// Raw (signed) sample count of the record.
    #[must_use]
    pub fn num_pnts(&self) -> i16 {
        self.num_pnts
    }

    pub fn set_event(&mut self, event: String) {
        self.record.event = event;
    }

    /// Applies every value of a decoded segment.
    ///
    /// # Errors
    /// Returns [`Error::FieldType`] if a value does not fit its field.
    pub fn apply_all(&mut self, values: Vec<(Field, Value)>) -> Result<()> {
        values
            .into_iter()
            .try_for_each(|(field, value)| self.apply(field, value))
    }

    /// Stores one decoded value.
    ///
    /// # Errors
    /// Returns [`Error::FieldType`] if the value's wire type does not match the field.
    pub fn apply(&mut self, field: Field, value: Value) -> Result<()> {
        let r = &mut self.record;
        match (field, value) {
            (Field::Offset, Value::U16(v)) => r.offset = v,
            (Field::TraceNum, Value::I32(v)) => r.trace_num = v,
            (Field::Units, Value::U8(v)) => r.units = v,
            (Field::SpdosUnits, Value::U8(v)) => r.spdos_units = v,
            (Field::Spdos, Value::I16(v)) => r.spdos = f32::from(v),
            (Field::MinWindow10, Value::I16(v)) => r.min_window10 = v,
            (Field::MaxWindow10, Value::I16(v)) => r.max_window10 = v,
            (Field::Draft100, Value::I16(v)) => r.draft100 = v,
            (Field::Tide100, Value::I16(v)) => r.tide100 = v,
            (Field::HeaveCm, Value::I16(v)) => r.heave_cm = v,
            (Field::DisplayRange, Value::I16(v)) => r.display_range = v,
            (Field::DepthR1, Value::F32(v)) => r.depth_r1 = v,
            (Field::MinPntR1, Value::F32(v)) => r.min_pnt_r1 = v,
            (Field::NumPntR1, Value::F32(v)) => r.num_pnt_r1 = v,
            (Field::BlankingPnt, Value::I16(v)) => r.blanking_pnt = v,
            (Field::DepthPnt, Value::I16(v)) => r.depth_pnt = v,
            (Field::RangePnt, Value::I16(v)) => r.range_pnt = v,
            (Field::NumPnts, Value::I16(v)) => {
                self.num_pnts = v;
                r.num_pnts = u16::try_from(v).unwrap_or(0);
            }
            (Field::Clock, Value::I32(v)) => r.clock = v,
            (Field::Hour, Value::U8(v)) => r.hour = v,
            (Field::Minute, Value::U8(v)) => r.minute = v,
            (Field::Second, Value::U8(v)) => r.second = v,
            (Field::Centisecond, Value::U8(v)) => r.centisecond = v,
            (Field::Rate, Value::I32(v)) => r.rate = v,
            (Field::Khz, Value::F32(v)) => r.khz = v,
            (Field::EventLen, Value::U8(v)) => self.event_len = v,
            (Field::Longitude, Value::F64(v)) => r.longitude = v,
            (Field::Latitude, Value::F64(v)) => r.latitude = v,
            (Field::Transducer, Value::U8(v)) => r.transducer = v,
            (Field::Options, Value::U8(v)) => r.options = v,
            (Field::DataOffset, Value::U8(v)) => r.data_offset = v,
            (Field::Easting, Value::F64(v)) => r.projected.get_or_insert_with(Default::default).easting = v,
            (Field::Northing, Value::F64(v)) => r.projected.get_or_insert_with(Default::default).northing = v,
            (Field::Cycles, Value::U8(v)) => r.transmit.get_or_insert_with(Default::default).cycles = v,
            (Field::Volts, Value::U8(v)) => r.transmit.get_or_insert_with(Default::default).volts = v,
            (Field::Power, Value::U8(v)) => r.transmit.get_or_insert_with(Default::default).power = v,
            (Field::Gain, Value::U8(v)) => r.transmit.get_or_insert_with(Default::default).gain = v,
            (Field::PreviousOffset, Value::U16(v)) => {
                r.transmit.get_or_insert_with(Default::default).previous_offset = v;
            }
            (Field::AntennaElevation, Value::F32(v)) => {
                r.antenna.get_or_insert_with(Default::default).antenna_elevation = v;
            }
            (Field::AntennaHeight, Value::F32(v)) => {
                r.antenna.get_or_insert_with(Default::default).antenna_height = v;
            }
            (Field::Draft, Value::F32(v)) => r.antenna.get_or_insert_with(Default::default).draft = v,
            (Field::Tide, Value::F32(v)) => r.antenna.get_or_insert_with(Default::default).tide = v,
            (Field::GpsMode, Value::I8(v)) => r.gps_quality.get_or_insert_with(Default::default).gps_mode = v,
            (Field::Hdop, Value::F32(v)) => r.gps_quality.get_or_insert_with(Default::default).hdop = v,
            (field, value) => {
                return Err(Error::FieldType {
                    field: field.name(),
                    wire: value.wire_type().name(),
                })
            }
        }
        Ok(())
    }

    /// Finishes the record.
    #[must_use]
    pub fn build(self) -> TraceRecord {
        self.record
    }
}
