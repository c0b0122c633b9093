//! Reader for interpretive core ("corestick") layer-depth files.
//!
//! The first line names the depth unit, the second is ignored, and each
//! further line describes one core:
//!
//! ```text
//! easting northing core_id <display> <display> depth <display> <display> <display> depth ...
//! ```
//!
//! Layer interface depths start at the sixth field and repeat every four
//! fields. The display fields in between are skipped.

use crate::{Error, Result};
use sdi_core::LengthUnit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::BufRead;

const FIRST_DEPTH_FIELD: usize = 5;
const DEPTH_STRIDE: usize = 4;

/// One core from a corestick file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Core {
    pub easting: f64,
    pub northing: f64,
    /// Positive depths below the lake bottom, in meters.
    pub layer_interface_depths: Vec<f64>,
}

fn unit_from_line(line: &str) -> Result<LengthUnit> {
    let name = line.trim().to_ascii_lowercase();
    match name.as_str() {
        "feet" => Ok(LengthUnit::Feet),
        "meters" | "meter" => Ok(LengthUnit::Meters),
        _ => Err(Error::UnsupportedUnitName(name)),
    }
}

fn parse_field(value: &str, line: usize, what: &str) -> Result<f64> {
    value.parse().map_err(|_| Error::TextFormat {
        line,
        message: format!("invalid {what} {value:?}"),
    })
}

/// Reads a corestick file into a map keyed by core id.
///
/// A repeated core id keeps the last definition. Blank lines are skipped.
///
/// # Errors
/// Returns [`Error::UnsupportedUnitName`] for a unit other than feet or
/// meters, and [`Error::TextFormat`] for a short or non-numeric line.
pub fn read_cores<R: BufRead>(reader: R) -> Result<BTreeMap<String, Core>> {
    let mut lines = reader.lines();
    let unit = match lines.next() {
        Some(line) => unit_from_line(&line?)?,
        None => {
            return Err(Error::TextFormat {
                line: 1,
                message: "missing unit line".into(),
            })
        }
    };
    let factor = unit.meters_per_unit();
    if let Some(line) = lines.next() {
        line?;
    }

    let mut cores = BTreeMap::new();
    for (index, line) in lines.enumerate() {
        let line = line?;
        let number = index + 3;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < 3 {
            return Err(Error::TextFormat {
                line: number,
                message: format!("expected at least 3 fields, found {}", fields.len()),
            });
        }

        let layer_interface_depths = fields
            .iter()
            .skip(FIRST_DEPTH_FIELD)
            .step_by(DEPTH_STRIDE)
            .map(|value| parse_field(value, number, "depth").map(|d| d * factor))
            .collect::<Result<Vec<_>>>()?;

        cores.insert(
            fields[2].to_string(),
            Core {
                easting: parse_field(fields[0], number, "easting")?,
                northing: parse_field(fields[1], number, "northing")?,
                layer_interface_depths,
            },
        );
    }
    log::debug!("read {} cores in {unit:?}", cores.len());
    Ok(cores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    const CORES: &str = "FEET\n\
        ignored header\n\
        3085123.5 13754321.25 C01 255 2 1.0 255 2 0 2.5\n\
        \n\
        3085200 13754400 C02 0 1 10\n";

    #[test]
    fn test_read_cores_feet() {
        let cores = read_cores(Cursor::new(CORES)).unwrap();
        assert_eq!(cores.len(), 2);

        let c01 = &cores["C01"];
        assert_relative_eq!(c01.easting, 3_085_123.5);
        assert_relative_eq!(c01.northing, 13_754_321.25);
        assert_eq!(c01.layer_interface_depths.len(), 2);
        assert_relative_eq!(c01.layer_interface_depths[0], 0.3048);
        assert_relative_eq!(c01.layer_interface_depths[1], 0.762, epsilon = 1e-12);

        let c02 = &cores["C02"];
        assert_eq!(c02.layer_interface_depths.len(), 1);
        assert_relative_eq!(c02.layer_interface_depths[0], 3.048, epsilon = 1e-12);
    }

    #[test]
    fn test_meter_units_and_no_layers() {
        let cores = read_cores(Cursor::new("Meter\n\n1 2 X 0 0\n")).unwrap();
        assert!(cores["X"].layer_interface_depths.is_empty());

        let cores = read_cores(Cursor::new("meters\n\n1 2 X 0 0 4.5\n")).unwrap();
        assert_relative_eq!(cores["X"].layer_interface_depths[0], 4.5);
    }

    #[test]
    fn test_unsupported_unit() {
        let err = read_cores(Cursor::new("fathoms\n\n")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedUnitName(name) if name == "fathoms"));
    }

    #[test]
    fn test_bad_lines() {
        let err = read_cores(Cursor::new("feet\n\n1 2\n")).unwrap_err();
        assert!(matches!(err, Error::TextFormat { line: 3, .. }));

        let err = read_cores(Cursor::new("feet\n\n1 north C1\n")).unwrap_err();
        assert!(err.to_string().contains("northing"));

        assert!(matches!(
            read_cores(Cursor::new("")),
            Err(Error::TextFormat { line: 1, .. })
        ));
    }
}
