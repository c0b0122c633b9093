//! File format version handling.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Format revision of an SDI binary file, `major.minor`.
///
/// Ordering is lexicographic on `(major, minor)`, so `4.10` sorts after `4.3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FormatVersion {
    /// Major revision (high nibble of the version byte).
    pub major: u8,
    /// Minor revision (low nibble of the version byte).
    pub minor: u8,
}

impl FormatVersion {
    /// Newest revision that is no longer supported. Files at or below it are rejected.
    pub const LAST_UNSUPPORTED: Self = Self::new(3, 2);

    /// Geographic easting/northing appear in the post-event segment.
    pub const PROJECTED_POSITION: Self = Self::new(3, 3);
    /// Transmit settings and the previous-record offset appear.
    pub const TRANSMIT_SETTINGS: Self = Self::new(4, 0);
    /// Floating-point antenna, draft and tide fields appear.
    pub const ANTENNA_OFFSETS: Self = Self::new(4, 2);
    /// GPS mode and HDOP appear.
    pub const GPS_QUALITY: Self = Self::new(4, 3);
    /// All transducers are sampled bipolar from this revision on.
    pub const BIPOLAR_SAMPLING: Self = Self::new(5, 0);

    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Decodes the header version byte: high nibble = major, low nibble = minor.
    ///
    /// `0x43` decodes to `4.3`.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        Self::new(byte >> 4, byte & 0x0F)
    }

    /// Returns true if this revision can be decoded.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        *self > Self::LAST_UNSUPPORTED
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_byte_round_trips_to_string() {
        assert_eq!(FormatVersion::from_byte(0x43).to_string(), "4.3");
        assert_eq!(FormatVersion::from_byte(0x33).to_string(), "3.3");
        assert_eq!(FormatVersion::from_byte(0x50).to_string(), "5.0");
    }

    #[test]
    fn test_ordering_is_numeric() {
        assert!(FormatVersion::new(4, 10) > FormatVersion::new(4, 3));
        assert!(FormatVersion::new(5, 0) > FormatVersion::new(4, 15));
        assert!(FormatVersion::new(3, 3) > FormatVersion::LAST_UNSUPPORTED);
    }

    #[test]
    fn test_supported_boundary() {
        assert!(!FormatVersion::new(3, 2).is_supported());
        assert!(!FormatVersion::new(2, 9).is_supported());
        assert!(FormatVersion::new(3, 3).is_supported());
    }
}
