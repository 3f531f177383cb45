use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{DailyAggregate, DailyAggregateTable, DateRange, ObservationTable};

/// Running sum and count for one measurement field on one date.
#[derive(Debug, Clone, Copy, Default)]
struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Filters observations by date range and location and reduces them to one
/// row of per-field means per calendar date.
///
/// Pure and stateless: identical inputs always produce identical output.
/// The range is assumed already validated by [`DateRange::new`].
pub struct DailyAggregator;

impl DailyAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate records at `location` with dates inside `range`.
    ///
    /// Output rows are ascending by date with no duplicates. A location or
    /// range that matches nothing yields an empty table, not an error.
    pub fn aggregate(
        &self,
        table: &ObservationTable,
        range: &DateRange,
        location: &str,
    ) -> DailyAggregateTable {
        let field_count = table.measurement_names().len();

        // BTreeMap keeps the grouping keys in ascending date order
        let mut groups: BTreeMap<NaiveDate, Vec<MeanAccumulator>> = BTreeMap::new();

        for record in table.records() {
            if record.location != location || !range.contains(record.date) {
                continue;
            }

            let accumulators = groups
                .entry(record.date)
                .or_insert_with(|| vec![MeanAccumulator::default(); field_count]);

            for (accumulator, value) in accumulators.iter_mut().zip(&record.measurements) {
                if let Some(value) = value {
                    accumulator.push(*value);
                }
            }
        }

        let rows: Vec<DailyAggregate> = groups
            .into_iter()
            .map(|(date, accumulators)| DailyAggregate {
                date,
                means: accumulators.iter().map(MeanAccumulator::mean).collect(),
            })
            .collect();

        debug!(
            location,
            start = %range.start(),
            end = %range.end(),
            days = rows.len(),
            "aggregated observations"
        );

        DailyAggregateTable::new(table.measurement_names().to_vec(), rows)
    }
}

impl Default for DailyAggregator {
    fn default() -> Self {
        Self::new()
    }
}
