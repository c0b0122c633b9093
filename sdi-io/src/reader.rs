//! Memory-mapped survey file readers.
//!

use crate::config::{OutputLayout, ReadConfig};
use crate::survey::{Survey, SurveyData};
use crate::Result;
use memmap2::Mmap;
use rayon::prelude::*;
use sdi_algorithms::{partition_by_frequency, process_traces, SamplingScheme};
use sdi_binary::{decode, ContainerFormat};
use std::fs::File;
use std::path::{Path, PathBuf};

/// A memory-mapped file reader.
///
/// Uses memmap2 to access file contents without copying the whole file
/// into memory first.
pub struct MappedFileReader {
    mmap: Option<Mmap>,
    path: PathBuf,
}

impl MappedFileReader {
    /// Opens a file for memory-mapped reading.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or memory-mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)?;
        // Zero-length files cannot be mapped on every platform.
        let mmap = if file.metadata()?.len() == 0 {
            None
        } else {
            // SAFETY: The file is opened read-only and we assume it is not modified concurrently.
            // This is the standard safety contract for memory mapping.
            #[allow(unsafe_code)]
            let mmap = unsafe { Mmap::map(&file)? };
            Some(mmap)
        };
        Ok(Self {
            mmap,
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Returns the file contents as a byte slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or_default()
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns true if the file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reader producing a [`Survey`] from one SDI file.
pub struct SurveyReader {
    reader: MappedFileReader,
    config: ReadConfig,
}

impl SurveyReader {
    /// Opens a survey file for reading with default configuration.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or memory-mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            reader: MappedFileReader::open(path)?,
            config: ReadConfig::default(),
        })
    }

    /// Sets the read configuration.
    #[must_use]
    pub fn with_config(mut self, config: ReadConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub fn file_size(&self) -> usize {
        self.reader.len()
    }

    /// Decodes, cleans and assembles the whole file.
    ///
    /// Any error is terminal; a corrupt file never yields a partial survey.
    ///
    /// # Errors
    /// Returns the decoding, normalization or frequency error of the file.
    pub fn read(&self) -> Result<Survey> {
        let path = self.reader.path();
        let decoded = decode(self.reader.as_bytes(), self.config.container)?;
        let header = decoded.header;
        log::debug!(
            "{}: {} records, version {}",
            path.display(),
            decoded.traces.len(),
            header.version
        );

        let scheme = match decoded.format {
            ContainerFormat::Sdi => SamplingScheme::ByTransducer(header.version),
            ContainerFormat::Alternate => SamplingScheme::AllBipolar,
        };
        let processed = process_traces(
            decoded.traces,
            header.survey_date,
            scheme,
            &self.config.processing(),
        )?;
        for advisory in &processed.advisories {
            log::warn!("{}: {advisory}", path.display());
        }

        let data = match self.config.layout {
            OutputLayout::ByFrequency => {
                SurveyData::ByFrequency(partition_by_frequency(&processed.batch)?)
            }
            OutputLayout::Interleaved => SurveyData::Interleaved(processed.batch),
        };

        Ok(Survey {
            date: header.survey_date,
            filepath: path.to_path_buf(),
            file_version: header.version,
            survey_line_number: header.survey_line_number().to_string(),
            file_number: header.globals.map(|g| g.file_number),
            advisories: processed.advisories,
            data,
        })
    }
}

/// Reads one survey file.
///
/// # Errors
/// Returns an error if the file cannot be opened or is not a trustworthy survey.
pub fn read_survey<P: AsRef<Path>>(path: P, config: &ReadConfig) -> Result<Survey> {
    SurveyReader::open(path)?.with_config(*config).read()
}

/// Reads many survey files in parallel, one independent result per path.
///
/// Results are returned in input order. Each file is decoded sequentially;
/// only distinct files run concurrently.
pub fn read_surveys<P>(paths: &[P], config: &ReadConfig) -> Vec<Result<Survey>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| read_survey(path, config))
        .collect()
}
