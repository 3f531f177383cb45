use chrono::NaiveDate;

use crate::error::{Result, WeatherError};
use crate::utils::constants::MAX_RANGE_DAYS;

/// An inclusive pair of calendar dates, validated at construction.
///
/// Range validation is a caller-side precondition of aggregation: the
/// aggregator itself assumes it holds and does not re-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting inverted ranges and spans wider than
    /// [`MAX_RANGE_DAYS`].
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(WeatherError::InvalidRange { start, end });
        }

        let days = end.signed_duration_since(start).num_days();
        if days > MAX_RANGE_DAYS {
            return Err(WeatherError::RangeTooWide { days });
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive membership test on both endpoints.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_range() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 5)).unwrap();
        assert_eq!(range.start(), date(2024, 1, 1));
        assert_eq!(range.end(), date(2024, 1, 5));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 1)).unwrap();
        assert!(range.contains(date(2024, 1, 1)));
        assert!(!range.contains(date(2024, 1, 2)));
    }

    #[test]
    fn test_seven_day_span_is_allowed() {
        assert!(DateRange::new(date(2024, 1, 1), date(2024, 1, 8)).is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DateRange::new(date(2024, 1, 5), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, WeatherError::InvalidRange { .. }));
    }

    #[test]
    fn test_too_wide_range_rejected() {
        // 2024-01-01 to 2024-01-10 spans 9 days, over the 7-day cap
        let err = DateRange::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap_err();
        assert!(matches!(err, WeatherError::RangeTooWide { days: 9 }));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(date(2024, 1, 2), date(2024, 1, 6)).unwrap();
        assert!(range.contains(date(2024, 1, 2)));
        assert!(range.contains(date(2024, 1, 6)));
        assert!(!range.contains(date(2024, 1, 1)));
        assert!(!range.contains(date(2024, 1, 7)));
    }
}
