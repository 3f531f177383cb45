use chrono::NaiveDate;
use serde::Serialize;

/// Per-day means of every measurement column for one location.
///
/// `means` parallels [`DailyAggregateTable::measurement_names`]. A `None`
/// entry means the field had no present values on that date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub means: Vec<Option<f64>>,
}

/// The result of one filter-and-aggregate request: one row per distinct
/// date in the selected range, ascending by date.
///
/// Derived fresh on every request and discarded after rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyAggregateTable {
    measurement_names: Vec<String>,
    rows: Vec<DailyAggregate>,
}

impl DailyAggregateTable {
    pub fn new(measurement_names: Vec<String>, rows: Vec<DailyAggregate>) -> Self {
        Self {
            measurement_names,
            rows,
        }
    }

    pub fn measurement_names(&self) -> &[String] {
        &self.measurement_names
    }

    pub fn rows(&self) -> &[DailyAggregate] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when there is at least one row and one measurement to plot.
    pub fn has_series(&self) -> bool {
        !self.rows.is_empty() && !self.measurement_names.is_empty()
    }

    /// Rows as JSON objects keyed by column name, for `--json` output.
    pub fn to_json_rows(&self) -> Vec<serde_json::Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut object = serde_json::Map::new();
                object.insert(
                    "Date".to_string(),
                    serde_json::Value::String(row.date.to_string()),
                );
                for (name, mean) in self.measurement_names.iter().zip(&row.means) {
                    let value = match mean {
                        Some(v) => serde_json::json!(v),
                        None => serde_json::Value::Null,
                    };
                    object.insert(name.clone(), value);
                }
                serde_json::Value::Object(object)
            })
            .collect()
    }
}
