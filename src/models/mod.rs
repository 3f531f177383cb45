pub mod aggregate;
pub mod date_range;
pub mod observation;

pub use aggregate::{DailyAggregate, DailyAggregateTable};
pub use date_range::DateRange;
pub use observation::{ColumnKind, ObservationRecord, ObservationTable};
