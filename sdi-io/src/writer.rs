//! CSV export of per-trace metadata.

use crate::survey::{Survey, SurveyData};
use crate::Result;
use sdi_core::TraceBatch;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADER: &str = "khz,transducer,trace_num,timestamp,longitude,latitude,\
interpolated_longitude,interpolated_latitude,easting,northing,draft,tide,heave,\
spdos,pixel_resolution,num_pnts,event";

/// Writer for per-trace metadata, one CSV row per trace. Intensities are not exported.
pub struct TraceCsvWriter<W: Write> {
    writer: W,
    header_written: bool,
}

impl TraceCsvWriter<BufWriter<File>> {
    /// Creates a new file writer.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TraceCsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    /// Writes every trace of a survey, grouped frequencies first to last.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_survey(&mut self, survey: &Survey) -> Result<()> {
        match &survey.data {
            SurveyData::ByFrequency(groups) => {
                for group in groups {
                    self.write_batch(&group.traces)?;
                }
            }
            SurveyData::Interleaved(batch) => self.write_batch(batch)?,
        }
        self.flush()
    }

    /// Writes the rows of one batch, preceded by the header on first use.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_batch(&mut self, batch: &TraceBatch) -> Result<()> {
        if !self.header_written {
            writeln!(self.writer, "{HEADER}")?;
            self.header_written = true;
        }

        for i in 0..batch.len() {
            let timestamp = batch.timestamp[i]
                .map(|t| t.format("%Y-%m-%dT%H:%M:%S%.3f").to_string())
                .unwrap_or_default();
            let (easting, northing) = batch
                .projected
                .as_ref()
                .map(|p| (p.easting[i].to_string(), p.northing[i].to_string()))
                .unwrap_or_default();
            writeln!(
                self.writer,
                "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
                batch.khz[i],
                batch.transducer[i],
                batch.trace_num[i],
                timestamp,
                batch.longitude[i],
                batch.latitude[i],
                batch.interpolated_longitude[i],
                batch.interpolated_latitude[i],
                easting,
                northing,
                batch.draft[i],
                batch.tide[i],
                batch.heave[i],
                batch.spdos[i],
                batch.pixel_resolution[i],
                batch.num_pnts[i],
                escape(&batch.event[i]),
            )?;
        }
        Ok(())
    }

    /// Flushes the writer.
    ///
    /// # Errors
    /// Returns an error if flushing fails.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Quotes a text field if it contains a separator, quote or line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use tempfile::NamedTempFile;

    fn batch() -> TraceBatch {
        TraceBatch {
            trace_num: vec![1, 2],
            timestamp: vec![None, None],
            transducer: vec![1, 1],
            khz: vec![200.0, 200.0],
            spdos: vec![1500.0; 2],
            draft: vec![0.5; 2],
            tide: vec![0.0; 2],
            heave: vec![0.0; 2],
            pixel_resolution: vec![0.03; 2],
            num_pnts: vec![4, 4],
            event: vec![String::new(), "MARK, 2".to_string()],
            longitude: vec![-97.5, -97.5],
            latitude: vec![30.25, 30.25],
            interpolated_longitude: vec![-97.5, -97.4],
            interpolated_latitude: vec![30.25, 30.25],
            intensity: Array2::zeros((2, 4)),
            ..TraceBatch::default()
        }
    }

    #[test]
    fn test_write_batch_csv() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = TraceCsvWriter::create(file.path()).unwrap();
        writer.write_batch(&batch()).unwrap();
        writer.flush().unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert!(lines[1].starts_with("200,1,1,,-97.5,30.25,-97.5,30.25,,,0.5,"));
        assert!(lines[2].ends_with(",4,\"MARK, 2\""));
    }

    #[test]
    fn test_header_written_once() {
        let mut writer = TraceCsvWriter::new(Vec::new());
        writer.write_batch(&batch()).unwrap();
        writer.write_batch(&batch()).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text.matches("trace_num").count(), 1);
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a\"b"), "\"a\"\"b\"");
    }
}
