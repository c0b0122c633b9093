//! Read configuration, loadable from JSON.
//!
//! Every section is optional; missing keys keep their defaults:
//!
//! ```json
//! {
//!   "container": "sdi",
//!   "layout": "by_frequency",
//!   "positions": { "enabled": true, "outlier_sigma": 5.0, "max_iterations": 10 },
//!   "units": { "max_repairable": 3 }
//! }
//! ```

use crate::{Error, Result};
use sdi_algorithms::{PositionCleaningConfig, ProcessingConfig, UnitConfig};
use sdi_binary::ContainerFormat;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Shape of the traces in a [`crate::Survey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputLayout {
    /// One group per transducer frequency.
    #[default]
    ByFrequency,
    /// All traces in file order.
    Interleaved,
}

/// Options controlling how survey files are read and cleaned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadConfig {
    pub container: ContainerFormat,
    pub layout: OutputLayout,
    pub positions: PositionCleaningConfig,
    pub units: UnitConfig,
}

impl ReadConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON string.
    ///
    /// # Errors
    /// Returns an error if the string cannot be parsed or validated.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the cleaning parameters once, at load time.
    ///
    /// # Errors
    /// Returns [`Error::Config`] for a non-positive sigma or a zero pass limit.
    pub fn validate(&self) -> Result<()> {
        let sigma = self.positions.outlier_sigma;
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(Error::Config(format!(
                "outlier_sigma must be positive and finite, got {sigma}"
            )));
        }
        if self.positions.max_iterations == 0 {
            return Err(Error::Config("max_iterations must be at least 1".into()));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_container(mut self, container: ContainerFormat) -> Self {
        self.container = container;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: OutputLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_position_cleaning(mut self, positions: PositionCleaningConfig) -> Self {
        self.positions = positions;
        self
    }

    /// Parameters handed to the cleanup pipeline.
    #[must_use]
    pub fn processing(&self) -> ProcessingConfig {
        ProcessingConfig {
            units: self.units,
            positions: self.positions,
        }
    }
}
