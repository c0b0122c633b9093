//! Reader for depth-pick files.
//!
//! A pick file starts with eight header values and three further lines
//! that carry no values for this reader, followed by one pick per line:
//!
//! ```text
//! Depth
//! 2                        surface number (1 = current, 2+ = pre-impoundment)
//! FEET                     depth unit
//! 1.48498560000000E+0003   speed of sound, m/s
//! 4.57200000000000E-0001   draft, m
//! 0.00000000000000E+0000   tide, m
//! TRUE                     flag
//! 2                        position type
//! ...                      three skipped lines
//! -97.90635230   28.06836280     4.33 1
//! ```
//!
//! Position type 3 lines are `distance depth trace`; every other type is
//! `x y depth trace`.

use crate::{Error, Result};
use sdi_core::LengthUnit;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::str::FromStr;

const HEADER_LINES: usize = 8;
const SKIPPED_LINES: usize = 3;
const DISTANCE_POSITION_TYPE: u8 = 3;

/// Contents of a pick file. Depths are in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickFile {
    pub surface_number: i32,
    pub units: LengthUnit,
    /// Meters per second.
    pub speed_of_sound: f64,
    /// Meters.
    pub draft: f64,
    /// Meters.
    pub tide: f64,
    pub flag: String,
    pub position_type: u8,
    pub trace_numbers: Vec<i32>,
    pub depths: Vec<f64>,
}

impl PickFile {
    /// Depth picked at a 1-based trace number, if present.
    #[must_use]
    pub fn depth_at(&self, trace_number: i32) -> Option<f64> {
        self.trace_numbers
            .iter()
            .position(|&t| t == trace_number)
            .map(|i| self.depths[i])
    }
}

fn parse<T: FromStr>(value: &str, line: usize, what: &str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::TextFormat {
        line,
        message: format!("invalid {what} {:?}", value.trim()),
    })
}

/// Reads a pick file.
///
/// The three lines after the eight header values are skipped unread, as
/// are blank lines among the picks.
///
/// # Errors
/// Returns [`Error::TextFormat`] for a truncated header or an unparsable
/// line, and [`Error::UnsupportedUnitName`] for an unknown depth unit.
pub fn read_picks<R: BufRead>(reader: R) -> Result<PickFile> {
    let mut lines = reader.lines();
    let mut header = Vec::with_capacity(HEADER_LINES);
    for number in 1..=HEADER_LINES {
        match lines.next() {
            Some(line) => header.push(line?),
            None => {
                return Err(Error::TextFormat {
                    line: number,
                    message: "truncated header".into(),
                })
            }
        }
    }

    let units = LengthUnit::from_name(&header[2])
        .ok_or_else(|| Error::UnsupportedUnitName(header[2].trim().to_string()))?;
    let position_type: u8 = parse(&header[7], 8, "position type")?;
    let (depth_col, trace_col) = if position_type == DISTANCE_POSITION_TYPE {
        (1, 2)
    } else {
        (2, 3)
    };
    let factor = units.meters_per_unit();

    for number in HEADER_LINES + 1..=HEADER_LINES + SKIPPED_LINES {
        match lines.next() {
            Some(line) => {
                line?;
            }
            None => {
                return Err(Error::TextFormat {
                    line: number,
                    message: "truncated header".into(),
                })
            }
        }
    }

    let mut trace_numbers = Vec::new();
    let mut depths = Vec::new();
    for (index, line) in lines.enumerate() {
        let line = line?;
        let number = index + HEADER_LINES + SKIPPED_LINES + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() <= trace_col {
            return Err(Error::TextFormat {
                line: number,
                message: format!(
                    "expected at least {} fields, found {}",
                    trace_col + 1,
                    fields.len()
                ),
            });
        }
        let depth: f64 = parse(fields[depth_col], number, "depth")?;
        depths.push(depth * factor);
        trace_numbers.push(parse(fields[trace_col], number, "trace number")?);
    }

    Ok(PickFile {
        surface_number: parse(&header[1], 2, "surface number")?,
        units,
        speed_of_sound: parse(&header[3], 4, "speed of sound")?,
        draft: parse(&header[4], 5, "draft")?,
        tide: parse(&header[5], 6, "tide")?,
        flag: header[6].trim().to_string(),
        position_type,
        trace_numbers,
        depths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    const HEADER: &str = "Depth\n2\nFEET\n1.48498560000000E+0003\n\
        4.57200000000000E-0001\n0.00000000000000E+0000\nTRUE\n";

    const SKIPPED: &str = "1 2 3\nnot a pick\n\n";

    fn picks(position_type: &str, body: &str) -> Result<PickFile> {
        read_picks(Cursor::new(format!(
            "{HEADER}{position_type}\n{SKIPPED}{body}"
        )))
    }

    #[test]
    fn test_read_lat_lon_picks() {
        let picks = picks(
            "2",
            "-97.90635230   28.06836280     4.33 1\n\
             -97.90635000   28.06836000     5.00 2\n\
             \n",
        )
        .unwrap();
        assert_eq!(picks.surface_number, 2);
        assert_eq!(picks.units, LengthUnit::Feet);
        assert_relative_eq!(picks.speed_of_sound, 1484.9856);
        assert_relative_eq!(picks.draft, 0.4572);
        assert_relative_eq!(picks.tide, 0.0);
        assert_eq!(picks.flag, "TRUE");
        assert_eq!(picks.position_type, 2);
        assert_eq!(picks.trace_numbers, vec![1, 2]);
        assert_relative_eq!(picks.depths[0], 4.33 * 0.3048);
        assert_relative_eq!(picks.depth_at(2).unwrap(), 5.0 * 0.3048);
        assert!(picks.depth_at(3).is_none());
    }

    #[test]
    fn test_distance_position_type() {
        let picks = picks("3", "0.0 7.5 10\n12.5 8.0 11\n").unwrap();
        assert_eq!(picks.trace_numbers, vec![10, 11]);
        assert_relative_eq!(picks.depths[1], 8.0 * 0.3048);
    }

    #[test]
    fn test_header_only() {
        let picks = picks("1", "").unwrap();
        assert!(picks.depths.is_empty());
        assert!(picks.trace_numbers.is_empty());
    }

    #[test]
    fn test_first_pick_follows_skipped_lines() {
        // Well-formed rows in the skipped lines are not picks.
        let picks = read_picks(Cursor::new(format!(
            "{HEADER}2\n0 0 1.0 0\n0 0 2.0 0\n0 0 3.0 0\n0 0 7.47 1\n"
        )))
        .unwrap();
        assert_eq!(picks.trace_numbers, vec![1]);
        assert_relative_eq!(picks.depth_at(1).unwrap(), 7.47 * 0.3048);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            read_picks(Cursor::new("Depth\n1\n")),
            Err(Error::TextFormat { line: 3, .. })
        ));

        let err = read_picks(Cursor::new(HEADER.replace("FEET", "yards") + "2\n")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedUnitName(name) if name == "yards"));

        assert!(matches!(
            read_picks(Cursor::new(format!("{HEADER}2\nonly one\n"))),
            Err(Error::TextFormat { line: 10, .. })
        ));
        assert!(matches!(
            picks("2", "1.0 2.0 3.0\n"),
            Err(Error::TextFormat { line: 12, .. })
        ));
        assert!(matches!(
            picks("2", "1.0 2.0 deep 4\n"),
            Err(Error::TextFormat { line: 12, .. })
        ));
    }
}
