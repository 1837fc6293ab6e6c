//! FILENAME: core/report-engine/src/plan.rs
//! Column Plan - Absolute column layout for one sheet.
//!
//! The planner expands a sheet definition over a date range into an
//! ordered list of absolute columns: leading fixed columns, then every
//! date group repeated per day (all sub-columns of day 1, then day 2,
//! and so on), then trailing fixed columns. Everything downstream
//! (merges, headers, subtotal formulas, data rows) walks this plan
//! instead of re-deriving positions.

use crate::daterange::DateRange;
use crate::definition::SheetDefinition;

/// Rows in the merged header band.
pub const HEADER_ROWS: u32 = 3;

/// 1-indexed row of the subtotal row, directly under the header band.
pub const SUBTOTAL_ROW: u32 = HEADER_ROWS + 1;

/// 1-indexed row of the first entity data row.
pub const FIRST_DATA_ROW: u32 = HEADER_ROWS + 2;

// ============================================================================
// COLUMN ROLES
// ============================================================================

/// What one absolute column shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// Leading fixed column; index into `fixed_before`.
    FixedBefore(usize),
    /// Sub-column of a repeating group.
    PerDate {
        /// Index into `date_groups`.
        group: usize,
        /// Index into the expanded date list.
        date: usize,
        /// Index into the group's `sub_columns`.
        sub: usize,
    },
    /// Trailing fixed column; index into `fixed_after`.
    FixedAfter(usize),
}

/// One absolute column of the sheet.
#[derive(Debug, Clone, Copy)]
pub struct PlannedColumn {
    /// Absolute 1-indexed column number.
    pub col: u32,

    pub role: ColumnRole,

    /// Width hint in Excel character units.
    pub width: f64,
}

// ============================================================================
// COLUMN PLAN
// ============================================================================

/// The complete column layout of one sheet over one date range.
#[derive(Debug, Clone)]
pub struct ColumnPlan {
    /// All columns in absolute order.
    pub columns: Vec<PlannedColumn>,

    /// Days in the report range.
    pub date_count: usize,

    /// Absolute 1-indexed position of the identity column.
    pub identity_col: u32,

    /// Absolute (first, last) column of each date group.
    group_spans: Vec<(u32, u32)>,

    /// Sub-columns per date for each group.
    group_widths: Vec<usize>,
}

impl ColumnPlan {
    /// Column-count arithmetic on its own: fixed columns plus every
    /// group's width times the day count.
    pub fn total_columns(
        fixed_before: usize,
        group_widths: &[usize],
        date_count: usize,
        fixed_after: usize,
    ) -> usize {
        let repeated: usize = group_widths.iter().map(|k| k * date_count).sum();
        fixed_before + repeated + fixed_after
    }

    /// Expands `def` over `range` into an absolute column plan.
    pub fn build(def: &SheetDefinition, range: &DateRange) -> ColumnPlan {
        debug_assert!(
            def.identity_col < def.fixed_before.len(),
            "identity column must be a leading fixed column"
        );

        let date_count = range.len();
        let mut columns = Vec::new();
        let mut group_spans = Vec::with_capacity(def.date_groups.len());
        let mut group_widths = Vec::with_capacity(def.date_groups.len());
        let mut col: u32 = 1;

        for (i, fixed) in def.fixed_before.iter().enumerate() {
            columns.push(PlannedColumn {
                col,
                role: ColumnRole::FixedBefore(i),
                width: fixed.width,
            });
            col += 1;
        }

        for (group, group_def) in def.date_groups.iter().enumerate() {
            debug_assert!(!group_def.sub_columns.is_empty(), "date group has no sub-columns");
            let first = col;
            for date in 0..date_count {
                for (sub, sub_def) in group_def.sub_columns.iter().enumerate() {
                    columns.push(PlannedColumn {
                        col,
                        role: ColumnRole::PerDate { group, date, sub },
                        width: sub_def.width,
                    });
                    col += 1;
                }
            }
            group_spans.push((first, col - 1));
            group_widths.push(group_def.sub_columns.len());
        }

        for (i, fixed) in def.fixed_after.iter().enumerate() {
            columns.push(PlannedColumn {
                col,
                role: ColumnRole::FixedAfter(i),
                width: fixed.width,
            });
            col += 1;
        }

        ColumnPlan {
            columns,
            date_count,
            identity_col: def.identity_col as u32 + 1,
            group_spans,
            group_widths,
        }
    }

    /// Total number of columns.
    pub fn total(&self) -> usize {
        self.columns.len()
    }

    /// Width hints in absolute column order.
    pub fn widths(&self) -> Vec<f64> {
        self.columns.iter().map(|c| c.width).collect()
    }

    /// Number of date groups.
    pub fn group_count(&self) -> usize {
        self.group_spans.len()
    }

    /// Absolute (first, last) column of one date group's full span.
    pub fn group_span(&self, group: usize) -> (u32, u32) {
        self.group_spans[group]
    }

    /// Absolute (first, last) column of one date's sub-columns within a
    /// group.
    pub fn date_span(&self, group: usize, date: usize) -> (u32, u32) {
        let (group_first, _) = self.group_spans[group];
        let width = self.group_widths[group] as u32;
        let first = group_first + date as u32 * width;
        (first, first + width - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range(days: u32) -> DateRange {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = start + chrono::Days::new(days as u64 - 1);
        DateRange::new(start, end).unwrap()
    }

    #[test]
    fn test_total_columns_arithmetic() {
        assert_eq!(ColumnPlan::total_columns(3, &[2], 7, 1), 18);
        assert_eq!(ColumnPlan::total_columns(4, &[1], 7, 1), 12);
        assert_eq!(ColumnPlan::total_columns(2, &[2, 1], 5, 0), 17);
        assert_eq!(ColumnPlan::total_columns(3, &[2], 1, 1), 6);
    }

    #[test]
    fn test_stock_inspections_layout() {
        let def = SheetDefinition::inspections();
        let plan = ColumnPlan::build(&def, &range(7));

        assert_eq!(plan.total(), 18);
        assert_eq!(plan.identity_col, 3);
        assert_eq!(plan.group_count(), 1);
        assert_eq!(plan.group_span(0), (4, 17));
        assert_eq!(plan.columns[0].role, ColumnRole::FixedBefore(0));
        assert_eq!(plan.columns[17].role, ColumnRole::FixedAfter(0));
    }

    #[test]
    fn test_per_date_columns_ordered_by_day_then_sub() {
        let def = SheetDefinition::inspections();
        let plan = ColumnPlan::build(&def, &range(3));

        // 3 fixed, then (day, sub) pairs: (0,0) (0,1) (1,0) (1,1) (2,0) (2,1)
        let roles: Vec<_> = plan.columns[3..9].iter().map(|c| c.role).collect();
        let expected: Vec<_> = (0..3)
            .flat_map(|date| {
                (0..2).map(move |sub| ColumnRole::PerDate {
                    group: 0,
                    date,
                    sub,
                })
            })
            .collect();
        assert_eq!(roles, expected);
    }

    #[test]
    fn test_date_span() {
        let def = SheetDefinition::inspections();
        let plan = ColumnPlan::build(&def, &range(7));

        assert_eq!(plan.date_span(0, 0), (4, 5));
        assert_eq!(plan.date_span(0, 1), (6, 7));
        assert_eq!(plan.date_span(0, 6), (16, 17));
    }

    #[test]
    fn test_single_sub_column_group() {
        let def = SheetDefinition::work_logs();
        let plan = ColumnPlan::build(&def, &range(7));

        assert_eq!(plan.total(), 12);
        assert_eq!(plan.group_span(0), (5, 11));
        assert_eq!(plan.date_span(0, 0), (5, 5));
        assert_eq!(plan.date_span(0, 6), (11, 11));
    }

    #[test]
    fn test_single_day_range() {
        let def = SheetDefinition::inspections();
        let plan = ColumnPlan::build(&def, &range(1));

        assert_eq!(plan.total(), 6);
        assert_eq!(plan.group_span(0), (4, 5));
        assert_eq!(plan.date_span(0, 0), (4, 5));
    }

    #[test]
    fn test_widths_follow_column_order() {
        let def = SheetDefinition::work_logs();
        let plan = ColumnPlan::build(&def, &range(2));
        let widths = plan.widths();

        assert_eq!(widths.len(), 7);
        assert_eq!(widths[0], 10.0);
        assert_eq!(widths[3], 18.0);
        assert_eq!(widths[4], 6.0);
        assert_eq!(widths[6], 14.0);
    }
}
