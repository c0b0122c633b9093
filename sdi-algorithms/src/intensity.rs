//! Raw sample to [0, 1] amplitude mapping.

use ndarray::Array2;
use sdi_core::FormatVersion;

/// How a transducer's samples were digitized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEncoding {
    /// Full-scale unsigned samples, `s / 65535`.
    Unipolar,
    /// Samples centered on 32768, `|s - 32768| / 32768`.
    Bipolar,
}

impl SampleEncoding {
    /// Encoding used by a transducer in a given format revision.
    ///
    /// Before 5.0, transducer 1 is sampled unipolar and every other
    /// transducer bipolar. The record carries no flag for this; it follows
    /// from the hardware.
    #[must_use]
    pub fn for_transducer(version: FormatVersion, transducer: u8) -> Self {
        if version >= FormatVersion::BIPOLAR_SAMPLING || transducer != 1 {
            Self::Bipolar
        } else {
            Self::Unipolar
        }
    }

    /// Maps one raw sample. NaN padding passes through unchanged.
    #[must_use]
    pub fn normalize(self, sample: f64) -> f64 {
        match self {
            Self::Unipolar => sample / 65535.0,
            Self::Bipolar => (sample - 32768.0).abs() / 32768.0,
        }
    }
}

/// Rule assigning a [`SampleEncoding`] to each trace of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingScheme {
    /// Primary container: depends on format revision and transducer.
    ByTransducer(FormatVersion),
    /// Alternate container: signed samples, always bipolar once shifted.
    AllBipolar,
}

impl SamplingScheme {
    #[must_use]
    pub fn encoding(self, transducer: u8) -> SampleEncoding {
        match self {
            Self::ByTransducer(version) => SampleEncoding::for_transducer(version, transducer),
            Self::AllBipolar => SampleEncoding::Bipolar,
        }
    }
}

/// Normalizes every row of the intensity matrix with that row's encoding.
///
/// # Panics
/// Panics if `encodings` does not have one entry per matrix row.
pub fn normalize_intensity(matrix: &mut Array2<f64>, encodings: &[SampleEncoding]) {
    assert_eq!(matrix.nrows(), encodings.len(), "one encoding per trace");
    for (mut row, &encoding) in matrix.outer_iter_mut().zip(encodings) {
        row.mapv_inplace(|s| encoding.normalize(s));
    }
}
