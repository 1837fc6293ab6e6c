//! FILENAME: core/report-engine/src/error.rs
//! Error and diagnostics vocabulary for report composition.
//!
//! Only an invalid date range aborts a report. Everything else is
//! recorded here and the build keeps going: a missing ordering table
//! degrades sorting, a failed observation source degrades one sheet,
//! and malformed observations are dropped and tallied.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// FATAL ERRORS
// ============================================================================

/// Errors that abort report composition entirely.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

/// Failure reported by an observation source for one sheet.
///
/// Sources are external to this crate (database queries, API calls).
/// The composer turns one of these into a degraded sheet instead of
/// failing the whole report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Observation source unavailable: {0}")]
pub struct SourceError(pub String);

// ============================================================================
// WARNINGS
// ============================================================================

/// Non-fatal conditions surfaced alongside the finished report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportWarning {
    /// The canonical ordering table was empty; entities were sorted
    /// alphabetically instead.
    MissingCanonicalOrder,
    /// One sheet's observation source failed; the sheet was emitted
    /// with headers and a zero subtotal row only.
    SheetDataFetchFailure { sheet: String, reason: String },
}

// ============================================================================
// DROPPED OBSERVATION TALLY
// ============================================================================

/// Counts of observations discarded while building a record index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedObservations {
    /// Observations whose entity id matched no known entity.
    pub unknown_entity: usize,

    /// Observations dated outside the requested range.
    pub out_of_range: usize,
}

impl DroppedObservations {
    /// Total number of discarded observations.
    pub fn total(&self) -> usize {
        self.unknown_entity + self.out_of_range
    }

    /// True if anything was discarded.
    pub fn any(&self) -> bool {
        self.total() > 0
    }

    /// Folds another tally into this one.
    pub fn absorb(&mut self, other: &DroppedObservations) {
        self.unknown_entity += other.unknown_entity;
        self.out_of_range += other.out_of_range;
    }
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Everything non-fatal that happened during one report build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Warnings in the order they were raised.
    pub warnings: Vec<ReportWarning>,

    /// Dropped-observation counts summed across all sheets.
    pub dropped: DroppedObservations,
}

impl Diagnostics {
    /// True if the build completed without warnings or drops.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && !self.dropped.any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_message() {
        let err = ReportError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2024-03-10"));
        assert!(msg.contains("2024-03-01"));
    }

    #[test]
    fn test_dropped_absorb() {
        let mut total = DroppedObservations::default();
        assert!(!total.any());

        total.absorb(&DroppedObservations {
            unknown_entity: 2,
            out_of_range: 1,
        });
        total.absorb(&DroppedObservations {
            unknown_entity: 0,
            out_of_range: 3,
        });

        assert_eq!(total.unknown_entity, 2);
        assert_eq!(total.out_of_range, 4);
        assert_eq!(total.total(), 6);
        assert!(total.any());
    }

    #[test]
    fn test_diagnostics_clean() {
        let mut diag = Diagnostics::default();
        assert!(diag.is_clean());

        diag.warnings.push(ReportWarning::MissingCanonicalOrder);
        assert!(!diag.is_clean());
    }
}
