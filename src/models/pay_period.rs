//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type, the closed date range a payroll
//! run covers.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents the date range a payroll run covers (typically one calendar month).
///
/// Both ends are inclusive.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
/// )
/// .unwrap();
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// assert_eq!(period.days(), 31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a pay period, rejecting an end date before the start date.
    ///
    /// A single-day period (`start == end`) is valid.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        if end_date < start_date {
            return Err(EngineError::InvalidPayPeriod {
                start_date,
                end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let period = PayPeriod::new(
    ///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
    /// )
    /// .unwrap();
    ///
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())); // start date
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap())); // end date
    /// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap())); // after
    /// ```
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if the two periods share at least one day.
    pub fn overlaps(&self, other: &PayPeriod) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }

    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> PayPeriod {
        PayPeriod::new(date(2026, 1, 1), date(2026, 1, 31)).unwrap()
    }

    #[test]
    fn test_new_rejects_end_before_start() {
        let result = PayPeriod::new(date(2026, 2, 1), date(2026, 1, 31));
        match result {
            Err(EngineError::InvalidPayPeriod {
                start_date,
                end_date,
            }) => {
                assert_eq!(start_date, date(2026, 2, 1));
                assert_eq!(end_date, date(2026, 1, 31));
            }
            _ => panic!("Expected InvalidPayPeriod error"),
        }
    }

    #[test]
    fn test_single_day_period_is_valid() {
        let period = PayPeriod::new(date(2026, 1, 15), date(2026, 1, 15)).unwrap();
        assert_eq!(period.days(), 1);
        assert!(period.contains_date(date(2026, 1, 15)));
    }

    #[test]
    fn test_contains_date_on_boundaries() {
        let period = january();
        assert!(period.contains_date(period.start_date));
        assert!(period.contains_date(period.end_date));
        assert!(!period.contains_date(date(2025, 12, 31)));
    }

    #[test]
    fn test_overlapping_periods() {
        let period = january();
        let mid_month = PayPeriod::new(date(2026, 1, 16), date(2026, 2, 15)).unwrap();
        let february = PayPeriod::new(date(2026, 2, 1), date(2026, 2, 28)).unwrap();
        let touching = PayPeriod::new(date(2026, 1, 31), date(2026, 2, 27)).unwrap();

        assert!(period.overlaps(&mid_month));
        assert!(mid_month.overlaps(&period));
        assert!(!period.overlaps(&february));
        assert!(period.overlaps(&touching));
        assert!(period.overlaps(&period));
    }

    #[test]
    fn test_display() {
        assert_eq!(january().to_string(), "2026-01-01 to 2026-01-31");
    }

    #[test]
    fn test_deserialize_pay_period() {
        let json = r#"{"start_date": "2026-01-01", "end_date": "2026-01-31"}"#;
        let period: PayPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period, january());
    }
}
