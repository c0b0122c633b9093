//! Length units used by the survey formats.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical length unit selected by a per-record unit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum LengthUnit {
    /// Code 0.
    Feet = 0,
    /// Code 1.
    Meters = 1,
    /// Code 2.
    Fathoms = 2,
}

impl LengthUnit {
    /// Looks up a binary unit code. Unknown codes return `None`.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Feet),
            1 => Some(Self::Meters),
            2 => Some(Self::Fathoms),
            _ => None,
        }
    }

    /// Parses the pick-file unit names `feet`, `meters` and `fathoms`
    /// (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "feet" => Some(Self::Feet),
            "meters" => Some(Self::Meters),
            "fathoms" => Some(Self::Fathoms),
            _ => None,
        }
    }

    /// The binary code for this unit.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Multiplier converting a value in this unit to meters.
    #[must_use]
    pub fn meters_per_unit(self) -> f64 {
        match self {
            Self::Feet => 0.3048,
            Self::Meters => 1.0,
            Self::Fathoms => 1.8288,
        }
    }
}
