//! A module for exporting a calculation request as a CSV snapshot.
//!
//! One header row of field names with units, one data row. The same format
//! can be parsed back, so export followed by parse is value-identical.

use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::input::{InputRecord, ShaftInputs};

/// Fixed filename of the exported input snapshot.
pub const CSV_FILENAME: &str = "shaft_input.csv";

const HEADER: [&str; 12] = [
    "Da (mm)",
    "Db (mm)",
    "L (mm)",
    "r (mm)",
    "Lfa (mm)",
    "Lfb (mm)",
    "Fa (N)",
    "Fb (N)",
    "UTS (MPa)",
    "Sy (MPa)",
    "a (-)",
    "b (-)",
];

/// Renders the raw fields of an `InputRecord` as a UTF-8 CSV document.
pub fn to_csv(input: &InputRecord) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(HEADER)?;
    wtr.write_record([
        input.da.to_string(),
        input.db.to_string(),
        input.l.to_string(),
        input.r.to_string(),
        input.lfa.to_string(),
        input.lfb.to_string(),
        input.fa.to_string(),
        input.fb.to_string(),
        input.uts.to_string(),
        input.sy.to_string(),
        input.a.to_string(),
        input.b.to_string(),
    ])?;
    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow!("failed to finish CSV writer: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

/// Writes the snapshot under its fixed filename inside `dir`.
///
/// # Returns
///
/// Returns the full path of the written file.
pub fn write_csv<P: AsRef<Path>>(input: &InputRecord, dir: P) -> Result<PathBuf> {
    let path = dir.as_ref().join(CSV_FILENAME);
    fs::write(&path, to_csv(input)?)?;
    Ok(path)
}

/// Parses a snapshot previously rendered by [`to_csv`] back into raw fields.
pub fn parse_csv(content: &str) -> Result<ShaftInputs> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    {
        let headers = rdr.headers()?;
        if headers.len() != HEADER.len() {
            return Err(anyhow!(
                "expected {} columns, got {}",
                HEADER.len(),
                headers.len()
            ));
        }
    }
    let record = rdr
        .records()
        .next()
        .ok_or_else(|| anyhow!("CSV snapshot has no data row"))??;
    let mut values = [0.0_f64; 12];
    for (i, field) in record.iter().enumerate().take(values.len()) {
        values[i] = field
            .trim()
            .parse()
            .map_err(|e| anyhow!("column '{}' is not a number: {}", HEADER[i], e))?;
    }
    Ok(ShaftInputs {
        da: values[0],
        db: values[1],
        l: values[2],
        r: values[3],
        lfa: values[4],
        lfb: values[5],
        fa: values[6],
        fb: values[7],
        uts: values[8],
        sy: values[9],
        a: values[10],
        b: values[11],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_round_trip() {
        let raw = ShaftInputs::default();
        let record = InputRecord::build(&raw).unwrap();
        let csv = to_csv(&record).expect("export should succeed");
        let parsed = parse_csv(&csv).expect("re-parsing our own export should succeed");
        assert_eq!(parsed, raw);
    }

    #[test]
    fn test_csv_round_trip_awkward_values() {
        // Values with no short decimal representation still round-trip exactly,
        // since f64 formatting in Rust is shortest-roundtrip.
        let raw = ShaftInputs {
            da: 38.000000001,
            b: -0.26500000000000001,
            fa: -0.1,
            ..ShaftInputs::default()
        };
        let record = InputRecord::build(&raw).unwrap();
        let parsed = parse_csv(&to_csv(&record).unwrap()).unwrap();
        assert_eq!(parsed, raw);
    }

    #[test]
    fn test_csv_header_row() {
        let record = InputRecord::build(&ShaftInputs::default()).unwrap();
        let csv = to_csv(&record).unwrap();
        let first_line = csv.lines().next().unwrap();
        assert_eq!(first_line, HEADER.join(","));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(parse_csv("Da (mm),Db (mm)\n1.0,2.0\n").is_err());
        let record = InputRecord::build(&ShaftInputs::default()).unwrap();
        let header_only: String = to_csv(&record)
            .unwrap()
            .lines()
            .take(1)
            .collect::<Vec<_>>()
            .join("\n");
        assert!(parse_csv(&header_only).is_err());
        assert!(parse_csv("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric_cell() {
        let record = InputRecord::build(&ShaftInputs::default()).unwrap();
        let csv = to_csv(&record).unwrap().replace("38", "not-a-number");
        assert!(parse_csv(&csv).is_err());
    }
}
