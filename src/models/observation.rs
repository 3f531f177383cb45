use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a CSV column is treated after ingestion.
///
/// Classification happens once, while reading: downstream code never
/// re-inspects cell values to decide whether a column is numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Date,
    Location,
    Numeric,
    Ignored,
}

/// One weather observation: a calendar date, a location and the values of
/// every measurement column, in table column order.
///
/// `measurements` parallels [`ObservationTable::measurement_names`]; a
/// `None` entry is a blank cell in the source file. `extras` holds the raw
/// text of non-numeric columns so the uploaded data can be echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub date: NaiveDate,
    pub location: String,
    pub measurements: Vec<Option<f64>>,
    pub extras: Vec<String>,
}

/// An ordered, typed table of observation records sharing one schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationTable {
    measurement_names: Vec<String>,
    ignored_names: Vec<String>,
    records: Vec<ObservationRecord>,
}

impl ObservationTable {
    pub fn new(
        measurement_names: Vec<String>,
        ignored_names: Vec<String>,
        records: Vec<ObservationRecord>,
    ) -> Self {
        Self {
            measurement_names,
            ignored_names,
            records,
        }
    }

    /// Names of the columns classified [`ColumnKind::Numeric`].
    pub fn measurement_names(&self) -> &[String] {
        &self.measurement_names
    }

    /// Names of the columns classified [`ColumnKind::Ignored`].
    pub fn ignored_names(&self) -> &[String] {
        &self.ignored_names
    }

    pub fn records(&self) -> &[ObservationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct location values in first-seen order.
    pub fn locations(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.location.as_str()) {
                seen.push(record.location.as_str());
            }
        }
        seen
    }

    /// Earliest and latest observation dates, used as the default range.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().map(|r| r.date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(min, max), d| {
            (min.min(d), max.max(d))
        }))
    }
}
