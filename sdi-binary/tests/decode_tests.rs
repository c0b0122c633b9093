//! Whole-file decoding of synthetic primary and alternate containers.

use approx::assert_relative_eq;
use sdi_binary::{
    alternate_layout, decode, schema_for, ContainerFormat, Error, Field, HEADER_LEN,
};
use sdi_core::FormatVersion;

/// Minimal primary-container writer driven by the schema table.
struct SdiFileBuilder {
    version: FormatVersion,
    data: Vec<u8>,
}

impl SdiFileBuilder {
    fn new(name: &[u8; 8], version_byte: u8) -> Self {
        let mut data = name.to_vec();
        data.extend_from_slice(b"\r\n");
        data.push(version_byte);
        data.push(0);
        assert_eq!(data.len(), HEADER_LEN);
        Self {
            version: FormatVersion::from_byte(version_byte),
            data,
        }
    }

    fn record(mut self, transducer: u8, khz: f32, samples: &[u16], trailing: usize) -> Self {
        let schema = schema_for(self.version);
        let start = self.data.len();
        let encode = |field: Field, out: &mut Vec<u8>| match field {
            Field::NumPnts => {
                out.extend_from_slice(&i16::try_from(samples.len()).unwrap().to_le_bytes());
            }
            Field::Khz => out.extend_from_slice(&khz.to_le_bytes()),
            Field::Transducer => out.push(transducer),
            Field::Units => out.push(1),
            other => out.extend_from_slice(&vec![0u8; other.wire().width()]),
        };
        for &field in schema.pre {
            encode(field, &mut self.data);
        }
        for &field in schema.post {
            encode(field, &mut self.data);
        }
        self.data.extend_from_slice(&vec![0xEE; trailing]);
        let offset = u16::try_from(self.data.len() - start - 2).unwrap();
        self.data[start..start + 2].copy_from_slice(&offset.to_le_bytes());
        for s in samples {
            self.data.extend_from_slice(&s.to_le_bytes());
        }
        self
    }

    fn build(self) -> Vec<u8> {
        self.data
    }
}

#[test]
fn test_decode_primary_container() {
    let data = SdiFileBuilder::new(b"10031502", 0x43)
        .record(1, 200.0, &[10, 20, 30], 0)
        .record(2, 50.0, &[40, 50], 0)
        .build();

    let file = decode(&data, ContainerFormat::Sdi).unwrap();
    assert_eq!(file.header.version, FormatVersion::new(4, 3));
    assert_eq!(file.header.survey_line_number(), "10031502");
    assert_eq!(file.traces.len(), 2);
    assert_eq!(file.traces[0].record.transducer, 1);
    assert_relative_eq!(file.traces[1].record.khz, 50.0);
    assert_eq!(file.traces[1].samples, vec![40, 50]);
}

#[test]
fn test_future_version_trailing_fields_are_skipped() {
    // 5.1 decodes with the 4.3 table; its extra fields sit before the samples.
    let data = SdiFileBuilder::new(b"10031502", 0x51)
        .record(1, 200.0, &[1, 2], 9)
        .record(1, 200.0, &[3, 4], 9)
        .build();

    let file = decode(&data, ContainerFormat::Sdi).unwrap();
    assert_eq!(file.traces[0].samples, vec![1, 2]);
    assert_eq!(file.traces[1].samples, vec![3, 4]);
}

#[test]
fn test_unsupported_version() {
    let data = SdiFileBuilder::new(b"10031502", 0x31).build();
    assert!(matches!(
        decode(&data, ContainerFormat::Sdi),
        Err(Error::UnsupportedVersion(_))
    ));
}

#[test]
fn test_corrupt_file_yields_no_partial_result() {
    let mut data = SdiFileBuilder::new(b"10031502", 0x40)
        .record(1, 200.0, &[1, 2], 0)
        .record(1, 200.0, &[3, 4], 0)
        .build();
    data.truncate(data.len() - 3);
    assert!(matches!(
        decode(&data, ContainerFormat::Sdi),
        Err(Error::TruncatedRecord { .. })
    ));
}

#[test]
fn test_decode_alternate_container() {
    use alternate_layout as layout;

    let mut data = vec![0u8; layout::HEADER_LEN];
    data[layout::FILENAME..layout::FILENAME + 8].copy_from_slice(b"08061101");
    data[layout::VERSION] = 1;
    data[layout::VERSION + 1] = 0;
    data[layout::FILE_NUMBER..layout::FILE_NUMBER + 2].copy_from_slice(&12u16.to_le_bytes());
    data[layout::SPEED_OF_SOUND..layout::SPEED_OF_SOUND + 4]
        .copy_from_slice(&4921.0f32.to_le_bytes());
    data[layout::UNIT_CODE] = 0;

    data.extend_from_slice(&5i32.to_le_bytes());
    data.extend_from_slice(&[8, 0, 0, 0, 1]);
    data.extend_from_slice(&200.0f32.to_le_bytes());
    data.extend_from_slice(&24_000i32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&[0u8; 32]);
    data.extend_from_slice(&[0u8; 8]);
    data.extend_from_slice(&[0u8; 4]);
    data.extend_from_slice(&(-1i16).to_le_bytes());

    let file = decode(&data, ContainerFormat::Alternate).unwrap();
    assert_eq!(file.format, ContainerFormat::Alternate);
    assert_eq!(file.header.globals.unwrap().file_number, 12);
    assert_eq!(file.traces.len(), 1);
    assert_eq!(file.traces[0].record.trace_num, 5);
    assert_eq!(file.traces[0].samples, vec![32_767]);
}
