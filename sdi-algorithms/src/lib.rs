//! sdi-algorithms: Signal cleanup for decoded SDI traces.
//!
//! This crate provides the stages between raw records and a usable survey:
//! - **Matrix** - NaN-padded intensity image built from equal-length runs
//! - **Units** - conversion to meters with bounded repair of bad unit codes
//! - **Intensity** - unipolar/bipolar sample normalization to [0, 1]
//! - **Position** - bounded iterative GPS outlier removal
//! - **Interpolate** - linear interpolation between held fixes
//! - **Partition** - per-transducer frequency grouping
//!

mod intensity;
mod interpolate;
mod matrix;
mod partition;
mod position;
mod processing;
mod units;

pub use intensity::{normalize_intensity, SampleEncoding, SamplingScheme};
pub use interpolate::{change_points, interpolate_repeats};
pub use matrix::build_intensity_matrix;
pub use partition::{partition_by_frequency, transducer_groups, FrequencyGroup};
pub use position::{forward_fill, CleanedPair, PositionCleaner, PositionCleaningConfig};
pub use processing::{clean_positions, process_traces, ProcessedTraces, ProcessingConfig};
pub use units::{repair_unit_codes, trace_timestamp, UnitConfig, UnitNormalizer};
