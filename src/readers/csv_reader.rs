use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use tracing::debug;

use crate::error::{Result, WeatherError};
use crate::models::{ColumnKind, ObservationRecord, ObservationTable};

const DATE_COLUMN: &str = "Date";
const LOCATION_COLUMN: &str = "Location";

/// Accepted `Date` cell formats. A time component, when present, is parsed
/// and then discarded: only the calendar date matters downstream.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Reads uploaded CSV text into a typed [`ObservationTable`].
///
/// The header row must name `Date` and `Location` columns; every other
/// column is classified exactly once as numeric or ignored by inspecting
/// its values.
pub struct ObservationReader;

impl ObservationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read observations from a CSV file on disk.
    pub fn read_path(&self, path: &Path) -> Result<ObservationTable> {
        let file = File::open(path)?;
        self.read_from(file)
    }

    /// Read observations from any CSV source.
    pub fn read_from<R: Read>(&self, input: R) -> Result<ObservationTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        let date_idx = find_column(&headers, DATE_COLUMN)?;
        let location_idx = find_column(&headers, LOCATION_COLUMN)?;

        let mut rows = Vec::new();
        for row in reader.records() {
            rows.push(row?);
        }

        let kinds = classify_columns(&headers, &rows, date_idx, location_idx);

        let measurement_names: Vec<String> = column_names(&headers, &kinds, ColumnKind::Numeric);
        let ignored_names: Vec<String> = column_names(&headers, &kinds, ColumnKind::Ignored);
        debug!(
            rows = rows.len(),
            measurements = ?measurement_names,
            ignored = ?ignored_names,
            "classified CSV columns"
        );

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(parse_record(row, &kinds, date_idx, location_idx)?);
        }

        Ok(ObservationTable::new(
            measurement_names,
            ignored_names,
            records,
        ))
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

fn find_column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| WeatherError::Schema {
            column: name.to_string(),
        })
}

/// Classify every column. A column is numeric iff it has at least one
/// non-blank value and all its non-blank values parse as floats.
fn classify_columns(
    headers: &StringRecord,
    rows: &[StringRecord],
    date_idx: usize,
    location_idx: usize,
) -> Vec<ColumnKind> {
    (0..headers.len())
        .map(|idx| {
            if idx == date_idx {
                ColumnKind::Date
            } else if idx == location_idx {
                ColumnKind::Location
            } else if is_numeric_column(rows, idx) {
                ColumnKind::Numeric
            } else {
                ColumnKind::Ignored
            }
        })
        .collect()
}

fn is_numeric_column(rows: &[StringRecord], idx: usize) -> bool {
    let mut non_blank = 0;
    for row in rows {
        match row.get(idx) {
            Some("") | None => continue,
            Some(value) => {
                if value.parse::<f64>().is_err() {
                    return false;
                }
                non_blank += 1;
            }
        }
    }
    non_blank > 0
}

fn column_names(headers: &StringRecord, kinds: &[ColumnKind], wanted: ColumnKind) -> Vec<String> {
    headers
        .iter()
        .zip(kinds)
        .filter(|(_, kind)| **kind == wanted)
        .map(|(name, _)| name.to_string())
        .collect()
}

fn parse_record(
    row: &StringRecord,
    kinds: &[ColumnKind],
    date_idx: usize,
    location_idx: usize,
) -> Result<ObservationRecord> {
    let date_cell = row.get(date_idx).unwrap_or("");
    let date = parse_date_cell(date_cell)?;
    let location = row.get(location_idx).unwrap_or("").to_string();

    let mut measurements = Vec::new();
    let mut extras = Vec::new();
    for (idx, kind) in kinds.iter().enumerate() {
        let cell = row.get(idx).unwrap_or("");
        match kind {
            ColumnKind::Numeric => {
                // Blank cells stay absent and are excluded from daily means
                measurements.push(if cell.is_empty() {
                    None
                } else {
                    Some(cell.parse::<f64>().map_err(|_| {
                        WeatherError::InvalidFormat(format!("Invalid numeric value: '{}'", cell))
                    })?)
                });
            }
            ColumnKind::Ignored => extras.push(cell.to_string()),
            ColumnKind::Date | ColumnKind::Location => {}
        }
    }

    Ok(ObservationRecord {
        date,
        location,
        measurements,
        extras,
    })
}

/// Parse a `Date` cell, keeping only the calendar date component.
fn parse_date_cell(cell: &str) -> Result<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cell, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(cell, format) {
            return Ok(datetime.date());
        }
    }
    Err(WeatherError::InvalidFormat(format!(
        "Invalid date: '{}'",
        cell
    )))
}
