//! Calendar month periods
//!
//! A `MonthPeriod` scopes ledger queries and reports to one calendar month.
//! "All time" is represented by the absence of a period (`Option::None`).

use chrono::{Duration, NaiveDate};
use std::fmt;

use crate::error::{TallyError, TallyResult};

/// A single calendar month, e.g. "2024-11"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
    start: NaiveDate,
    end: NaiveDate,
}

impl MonthPeriod {
    /// Create a monthly period
    ///
    /// # Errors
    ///
    /// Returns a validation error if the month is outside 1-12 or the year
    /// cannot be represented as a calendar date.
    pub fn new(year: i32, month: u32) -> TallyResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(TallyError::Validation(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }

        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| TallyError::Validation(format!("Year out of range: {}", year)))?;

        let next_start = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| TallyError::Validation(format!("Year out of range: {}", year)))?;

        Ok(Self {
            year,
            month,
            start,
            end: next_start - Duration::days(1),
        })
    }

    /// Parse a period string in the form "YYYY-MM"
    pub fn parse(s: &str) -> TallyResult<Self> {
        let s = s.trim();
        let invalid = || {
            TallyError::Validation(format!("Invalid month format: '{}'. Use YYYY-MM", s))
        };

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.end
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// File stem for report artifacts, e.g. "report_2024_11"
    pub fn report_stem(&self) -> String {
        format!("report_{}_{:02}", self.year, self.month)
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Human-readable label for an optional period
pub fn period_label(period: Option<&MonthPeriod>) -> String {
    match period {
        Some(p) => p.to_string(),
        None => "All Time".to_string(),
    }
}
