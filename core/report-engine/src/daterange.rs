//! FILENAME: core/report-engine/src/daterange.rs
//! Inclusive calendar date ranges.
//!
//! A report covers every calendar day between a start and end date,
//! weekends and holidays included. The expanded day list is what the
//! column planner repeats its per-date groups over, so it is computed
//! once here and borrowed everywhere else.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// An inclusive range of calendar days, expanded eagerly.
///
/// Construction validates `start <= end`; an inverted range is the only
/// fatal input error in this crate. Month and year boundaries are
/// handled by chrono's calendar arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
    dates: Vec<NaiveDate>,
}

impl DateRange {
    /// Creates a range and expands it to its ordered day list.
    ///
    /// Returns `ReportError::InvalidRange` when `start` is after `end`.
    /// A single-day report (`start == end`) is valid and expands to one
    /// date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidRange { start, end });
        }

        let mut dates = Vec::new();
        let mut day = start;
        loop {
            dates.push(day);
            if day == end {
                break;
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }

        Ok(DateRange { start, end, dates })
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// The expanded day list, oldest first.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of days covered.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// A non-empty guarantee holds by construction, but the accessor
    /// keeps call sites honest.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// True if `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Suggested output file stem: `report_YYYYMMDD_YYYYMMDD`.
    pub fn file_stem(&self) -> String {
        format!(
            "report_{}_{}",
            self.start.format("%Y%m%d"),
            self.end.format("%Y%m%d")
        )
    }
}
