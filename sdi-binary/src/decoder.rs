//! Record stream decoder for the primary container.
//!
//! Records are strictly sequential: the position of record N+1 is only
//! known once record N's intensity block has been located through its
//! offset field, so the walk cannot be split across threads.

use crate::cursor::ByteCursor;
use crate::header::HEADER_LEN;
use crate::record::RecordBuilder;
use crate::schema::{read_segment, schema_for, Schema};
use crate::{Error, Result};
use sdi_core::{FormatVersion, RawTrace};

/// Width of the offset field; the offset counts from the byte after it.
const OFFSET_FIELD_LEN: usize = 2;

/// Iterator over the records of a primary container file.
///
/// Yields at most one error, after which iteration stops.
#[derive(Debug, Clone)]
pub struct RecordStream<'a> {
    cursor: ByteCursor<'a>,
    schema: Schema,
    failed: bool,
}

impl<'a> RecordStream<'a> {
    /// Starts a walk at the first record after the preamble.
    #[must_use]
    pub fn new(data: &'a [u8], version: FormatVersion) -> Self {
        Self::starting_at(data, version, HEADER_LEN)
    }

    /// Starts a walk at an arbitrary record boundary.
    #[must_use]
    pub fn starting_at(data: &'a [u8], version: FormatVersion, position: usize) -> Self {
        let schema = schema_for(version);
        log::debug!(
            "version {version}: pre-event {} bytes, post-event {} bytes",
            schema.pre_len(),
            schema.post_len()
        );
        Self {
            cursor: ByteCursor::new(data, position),
            schema,
            failed: false,
        }
    }

    fn next_record(&mut self) -> Result<RawTrace> {
        let record_start = self.cursor.position();
        let mut builder = RecordBuilder::new();

        builder.apply_all(read_segment(&mut self.cursor, self.schema.pre)?)?;
        if builder.num_pnts() < 0 {
            return Err(Error::InvalidSampleCount {
                record_start,
                num_pnts: builder.num_pnts(),
            });
        }

        let event = self.cursor.read_text(builder.event_len())?;
        builder.set_event(event);
        builder.apply_all(read_segment(&mut self.cursor, self.schema.post)?)?;

        let offset = builder.offset();
        let intensity_start = record_start + OFFSET_FIELD_LEN + usize::from(offset);
        let consumed = self.cursor.position() - record_start;
        if intensity_start < self.cursor.position() {
            return Err(Error::MalformedOffset {
                record_start,
                offset,
                consumed,
            });
        }

        // Unknown trailing fields between the post-event segment and the
        // intensity block are skipped here.
        self.cursor.seek(intensity_start);
        let record = builder.build();
        let samples = self
            .cursor
            .read_u16_samples(usize::from(record.num_pnts))?;

        Ok(RawTrace { record, samples })
    }
}

impl Iterator for RecordStream<'_> {
    type Item = Result<RawTrace>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor.is_at_end() {
            return None;
        }
        let result = self.next_record();
        self.failed = result.is_err();
        Some(result)
    }
}

/// Decodes every record of a primary container file.
///
/// # Errors
/// Returns the first structural error; a corrupt file yields no records.
pub fn decode_records(data: &[u8], version: FormatVersion) -> Result<Vec<RawTrace>> {
    let traces = RecordStream::new(data, version).collect::<Result<Vec<_>>>()?;
    log::debug!("decoded {} records from {} bytes", traces.len(), data.len());
    Ok(traces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, WireType};

    /// Encodes one record with every schema field zeroed except the framing ones.
    fn record(version: FormatVersion, event: &str, samples: &[u16], extra: usize) -> Vec<u8> {
        let schema = schema_for(version);
        let mut body = Vec::new();
        let push = |field: Field, bytes: &mut Vec<u8>| match field {
            Field::NumPnts => {
                bytes.extend_from_slice(&i16::try_from(samples.len()).unwrap().to_le_bytes());
            }
            Field::EventLen => bytes.push(u8::try_from(event.len()).unwrap()),
            Field::Offset => bytes.extend_from_slice(&[0, 0]),
            other => bytes.extend_from_slice(&vec![0u8; other.wire().width()]),
        };
        for &field in schema.pre {
            push(field, &mut body);
        }
        body.extend_from_slice(event.as_bytes());
        for &field in schema.post {
            push(field, &mut body);
        }
        body.extend_from_slice(&vec![0xAAu8; extra]);
        let offset = u16::try_from(body.len() - 2).unwrap();
        body[..2].copy_from_slice(&offset.to_le_bytes());
        for sample in samples {
            body.extend_from_slice(&sample.to_le_bytes());
        }
        body
    }

    fn file(records: &[Vec<u8>]) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        for r in records {
            data.extend_from_slice(r);
        }
        data
    }

    #[test]
    fn test_decodes_sequential_records() {
        let v = FormatVersion::new(4, 3);
        let data = file(&[record(v, "EVT", &[1, 2, 3], 0), record(v, "", &[9], 0)]);
        let traces = decode_records(&data, v).unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].record.event, "EVT");
        assert_eq!(traces[0].samples, vec![1, 2, 3]);
        assert_eq!(traces[1].samples, vec![9]);
        assert!(traces[0].record.gps_quality.is_some());
    }

    #[test]
    fn test_offset_skips_unknown_trailing_fields() {
        let v = FormatVersion::new(4, 3);
        let data = file(&[record(v, "", &[7, 8], 11), record(v, "", &[5], 3)]);
        let traces = decode_records(&data, v).unwrap();
        assert_eq!(traces[0].samples, vec![7, 8]);
        assert_eq!(traces[1].samples, vec![5]);
    }

    #[test]
    fn test_zero_samples() {
        let v = FormatVersion::new(3, 3);
        let data = file(&[record(v, "", &[], 0)]);
        let traces = decode_records(&data, v).unwrap();
        assert!(traces[0].samples.is_empty());
        assert!(traces[0].record.transmit.is_none());
    }

    #[test]
    fn test_truncated_intensity_block() {
        let v = FormatVersion::new(4, 0);
        let mut data = file(&[record(v, "", &[1, 2, 3], 0)]);
        data.pop();
        assert!(matches!(
            decode_records(&data, v),
            Err(Error::TruncatedRecord { .. })
        ));
    }

    #[test]
    fn test_backward_offset_is_malformed() {
        let v = FormatVersion::new(4, 2);
        let mut data = file(&[record(v, "", &[1], 0)]);
        data[HEADER_LEN..HEADER_LEN + 2].copy_from_slice(&10u16.to_le_bytes());
        assert!(matches!(
            decode_records(&data, v),
            Err(Error::MalformedOffset {
                record_start: HEADER_LEN,
                offset: 10,
                ..
            })
        ));
    }

    #[test]
    fn test_negative_sample_count() {
        let v = FormatVersion::new(4, 3);
        let mut data = file(&[record(v, "", &[], 0)]);
        let schema = schema_for(v);
        let at = HEADER_LEN
            + schema
                .pre
                .iter()
                .take_while(|&&f| f != Field::NumPnts)
                .map(|f| f.wire().width())
                .sum::<usize>();
        assert_eq!(Field::NumPnts.wire(), WireType::I16);
        data[at..at + 2].copy_from_slice(&(-4i16).to_le_bytes());
        assert!(matches!(
            decode_records(&data, v),
            Err(Error::InvalidSampleCount { num_pnts: -4, .. })
        ));
    }

    #[test]
    fn test_stream_stops_after_error() {
        let v = FormatVersion::new(4, 3);
        let mut data = file(&[record(v, "", &[1], 0)]);
        data.extend_from_slice(&[1, 2, 3]);
        let mut stream = RecordStream::new(&data, v);
        assert!(stream.next().unwrap().is_ok());
        assert!(stream.next().unwrap().is_err());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_offset_past_end_of_file() {
        let v = FormatVersion::new(4, 3);
        let mut data = file(&[record(v, "", &[], 0)]);
        data[HEADER_LEN..HEADER_LEN + 2].copy_from_slice(&1000u16.to_le_bytes());
        assert!(matches!(
            decode_records(&data, v),
            Err(Error::TruncatedRecord {
                position: 1014,
                needed: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_unsupported_version_message() {
        let err = Error::UnsupportedVersion(FormatVersion::new(3, 1));
        assert_eq!(
            err.to_string(),
            "reading of file formats <= 3.2 is not supported (file version 3.1)"
        );
    }
}
