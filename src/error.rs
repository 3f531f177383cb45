use thiserror::Error;

pub type Result<T> = std::result::Result<T, WeatherError>;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV file must contain a '{column}' column")]
    Schema { column: String },

    #[error("End date {end} must fall after start date {start}")]
    InvalidRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("The date range cannot exceed 7 days (selected range spans {days} days)")]
    RangeTooWide { days: i64 },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Chart rendering error: {0}")]
    Chart(String),
}
