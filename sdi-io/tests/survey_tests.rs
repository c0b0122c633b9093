//! End-to-end reading of synthetic survey files from disk.

use approx::assert_relative_eq;
use sdi_binary::{schema_for, Field, HEADER_LEN};
use sdi_core::FormatVersion;
use sdi_io::{
    read_survey, read_surveys, Error, OutputLayout, ReadConfig, SurveyData, SurveyReader,
    TraceCsvWriter,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Ping {
    trace_num: i32,
    transducer: u8,
    khz: f32,
    samples: Vec<u16>,
}

fn write_i16(out: &mut Vec<u8>, value: i16) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Writes a primary-container file with the given pings.
fn write_survey(dir: &Path, name: &str, version_byte: u8, pings: &[Ping]) -> PathBuf {
    let mut data = name.as_bytes().to_vec();
    data.extend_from_slice(b"\r\n");
    data.push(version_byte);
    data.push(0);
    assert_eq!(data.len(), HEADER_LEN);

    let schema = schema_for(FormatVersion::from_byte(version_byte));
    for ping in pings {
        let start = data.len();
        let encode = |field: Field, out: &mut Vec<u8>| match field {
            Field::TraceNum => out.extend_from_slice(&ping.trace_num.to_le_bytes()),
            Field::Units => out.push(1),
            Field::Spdos => write_i16(out, 1500),
            Field::Draft100 => write_i16(out, 50),
            Field::Draft => out.extend_from_slice(&0.5f32.to_le_bytes()),
            Field::NumPnts => write_i16(out, i16::try_from(ping.samples.len()).unwrap()),
            Field::Hour => out.push(10),
            Field::Minute => out.push(30),
            Field::Second => out.push(u8::try_from(ping.trace_num % 60).unwrap()),
            Field::Rate => out.extend_from_slice(&25_000i32.to_le_bytes()),
            Field::Khz => out.extend_from_slice(&ping.khz.to_le_bytes()),
            Field::Longitude => out.extend_from_slice(&(-97.5f64).to_le_bytes()),
            Field::Latitude => out.extend_from_slice(&30.25f64.to_le_bytes()),
            Field::Transducer => out.push(ping.transducer),
            other => out.extend_from_slice(&vec![0u8; other.wire().width()]),
        };
        for &field in schema.pre {
            encode(field, &mut data);
        }
        for &field in schema.post {
            encode(field, &mut data);
        }
        let offset = u16::try_from(data.len() - start - 2).unwrap();
        data[start..start + 2].copy_from_slice(&offset.to_le_bytes());
        for s in &ping.samples {
            data.extend_from_slice(&s.to_le_bytes());
        }
    }

    let path = dir.join(format!("{name}.bin"));
    std::fs::write(&path, data).unwrap();
    path
}

fn dual_frequency(dir: &Path) -> PathBuf {
    write_survey(
        dir,
        "10031502",
        0x43,
        &[
            Ping {
                trace_num: 1,
                transducer: 1,
                khz: 200.0,
                samples: vec![0, 32_768, 65_535],
            },
            Ping {
                trace_num: 2,
                transducer: 2,
                khz: 50.0,
                samples: vec![32_768, 0, 65_535],
            },
        ],
    )
}

#[test]
fn test_read_dual_frequency_survey() {
    let dir = TempDir::new().unwrap();
    let path = dual_frequency(dir.path());

    let survey = read_survey(&path, &ReadConfig::default()).unwrap();
    assert_eq!(survey.file_version, FormatVersion::new(4, 3));
    assert_eq!(survey.survey_line_number, "10031502");
    assert_eq!(survey.date.to_string(), "2010-03-15");
    assert_eq!(survey.filepath, path);
    assert!(survey.advisories.is_empty());
    assert_eq!(survey.trace_count(), 2);
    assert_eq!(survey.frequencies(), vec![50.0, 200.0]);

    let high = survey.frequency(200.0).unwrap();
    assert_eq!(high.transducer, 1);
    assert_eq!(high.traces.intensity.dim(), (1, 3));
    assert_eq!(high.traces.trace_num, vec![1]);
    // Transducer 1 before 5.0 is unipolar.
    assert_relative_eq!(high.traces.intensity[[0, 0]], 0.0);
    assert_relative_eq!(high.traces.intensity[[0, 2]], 1.0);

    let low = survey.frequency(50.0).unwrap();
    assert_eq!(low.transducer, 2);
    assert_eq!(low.traces.intensity.dim(), (1, 3));
    assert_relative_eq!(low.traces.intensity[[0, 0]], 0.0);
    assert_relative_eq!(low.traces.intensity[[0, 1]], 1.0);

    for group in [high, low] {
        assert!(group
            .traces
            .intensity
            .iter()
            .all(|v| (0.0..=1.0).contains(v)));
        assert_relative_eq!(group.traces.draft[0], 0.5);
        assert_relative_eq!(group.traces.interpolated_longitude[0], -97.5);
        assert!(group.traces.timestamp[0].is_some());
    }
}

#[test]
fn test_interleaved_layout_keeps_file_order() {
    let dir = TempDir::new().unwrap();
    let path = dual_frequency(dir.path());
    let config = ReadConfig::default().with_layout(OutputLayout::Interleaved);

    let survey = SurveyReader::open(&path)
        .unwrap()
        .with_config(config)
        .read()
        .unwrap();
    let SurveyData::Interleaved(batch) = &survey.data else {
        panic!("expected interleaved traces");
    };
    assert_eq!(batch.trace_num, vec![1, 2]);
    assert_eq!(batch.transducer, vec![1, 2]);
    assert_eq!(batch.intensity.dim(), (2, 3));
    assert!(survey.frequency(200.0).is_none());
    assert_eq!(survey.frequencies(), vec![50.0, 200.0]);
}

#[test]
fn test_ragged_lengths_are_padded() {
    let dir = TempDir::new().unwrap();
    let path = write_survey(
        dir.path(),
        "10031503",
        0x40,
        &[
            Ping {
                trace_num: 1,
                transducer: 1,
                khz: 200.0,
                samples: vec![100, 200],
            },
            Ping {
                trace_num: 2,
                transducer: 1,
                khz: 200.0,
                samples: vec![100, 200, 300, 400],
            },
        ],
    );

    let survey = read_survey(&path, &ReadConfig::default()).unwrap();
    let group = survey.frequency(200.0).unwrap();
    assert_eq!(group.traces.intensity.dim(), (2, 4));
    assert!(group.traces.intensity[[0, 3]].is_nan());
    assert!(group.traces.intensity[[1, 3]].is_finite());
}

#[test]
fn test_read_surveys_independent_results() {
    let dir = TempDir::new().unwrap();
    let good = dual_frequency(dir.path());
    let bad = dir.path().join("broken.bin");
    std::fs::write(&bad, b"10031502\r\n\x31\x00").unwrap();
    let missing = dir.path().join("missing.bin");

    let results = read_surveys(&[good, bad, missing], &ReadConfig::default());
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().trace_count(), 2);
    assert!(matches!(results[1], Err(Error::Binary(_))));
    assert!(matches!(results[2], Err(Error::Io(_))));
}

#[test]
fn test_empty_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.bin");
    std::fs::write(&path, b"").unwrap();
    let reader = SurveyReader::open(&path).unwrap();
    assert_eq!(reader.file_size(), 0);
    assert!(matches!(reader.read(), Err(Error::Binary(_))));
}

#[test]
fn test_export_csv_and_summary() {
    let dir = TempDir::new().unwrap();
    let survey = read_survey(dual_frequency(dir.path()), &ReadConfig::default()).unwrap();

    let out = dir.path().join("traces.csv");
    let mut writer = TraceCsvWriter::create(&out).unwrap();
    writer.write_survey(&survey).unwrap();
    drop(writer);
    let csv = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("50,2,2,"));
    assert!(lines[2].starts_with("200,1,1,"));

    let summary = survey.summary();
    assert_eq!(summary.trace_count, 2);
    assert_eq!(summary.groups.len(), 2);
    assert_eq!(summary.groups[0].intensity_shape, (1, 3));
    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"file_version\":\"4.3\""));
}
