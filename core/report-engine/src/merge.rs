//! FILENAME: core/report-engine/src/merge.rs
//! Merge Plan - Merged regions for the header band.
//!
//! Three families of merges tile the header band. Fixed columns merge
//! vertically through all three header rows. Each date group's title
//! merges horizontally across the group's full span in row 1. Each
//! date's sub-columns merge horizontally in row 2 when the group has
//! several sub-columns; a single-sub-column date instead merges rows 2
//! and 3 vertically so the date label fills the leftover height.
//!
//! Regions that would cover a single cell are not emitted; the cell
//! simply stands alone.

use crate::plan::{ColumnPlan, ColumnRole, HEADER_ROWS};
use crate::view::MergeRegion;

/// Computes the header-band merge regions for a column plan.
///
/// The result is pairwise non-overlapping and lies entirely within
/// rows 1 through `HEADER_ROWS`.
pub fn plan_merges(plan: &ColumnPlan) -> Vec<MergeRegion> {
    let mut merges = Vec::new();

    // Fixed columns span the whole band vertically.
    for planned in &plan.columns {
        match planned.role {
            ColumnRole::FixedBefore(_) | ColumnRole::FixedAfter(_) => {
                merges.push(MergeRegion::new(1, planned.col, HEADER_ROWS, planned.col));
            }
            ColumnRole::PerDate { .. } => {}
        }
    }

    // Group titles across each group's full span in row 1.
    for group in 0..plan.group_count() {
        let (first, last) = plan.group_span(group);
        if last > first {
            merges.push(MergeRegion::new(1, first, 1, last));
        }
    }

    // Per-date merges in rows 2 and 3.
    for group in 0..plan.group_count() {
        for date in 0..plan.date_count {
            let (first, last) = plan.date_span(group, date);
            if last > first {
                merges.push(MergeRegion::new(2, first, 2, last));
            } else {
                merges.push(MergeRegion::new(2, first, HEADER_ROWS, first));
            }
        }
    }

    merges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daterange::DateRange;
    use crate::definition::SheetDefinition;
    use chrono::NaiveDate;

    fn range(days: u32) -> DateRange {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = start + chrono::Days::new(days as u64 - 1);
        DateRange::new(start, end).unwrap()
    }

    fn coverage(merges: &[MergeRegion], total_cols: usize) -> Vec<Vec<u32>> {
        let mut grid = vec![vec![0u32; total_cols + 1]; HEADER_ROWS as usize + 1];
        for merge in merges {
            for row in merge.start_row..=merge.end_row {
                for col in merge.start_col..=merge.end_col {
                    grid[row as usize][col as usize] += 1;
                }
            }
        }
        grid
    }

    #[test]
    fn test_inspections_merge_families() {
        let def = SheetDefinition::inspections();
        let plan = ColumnPlan::build(&def, &range(7));
        let merges = plan_merges(&plan);

        // 4 fixed verticals, 1 group title, 7 date merges
        assert_eq!(merges.len(), 12);

        assert!(merges.contains(&MergeRegion::new(1, 1, 3, 1)));
        assert!(merges.contains(&MergeRegion::new(1, 18, 3, 18)));
        assert!(merges.contains(&MergeRegion::new(1, 4, 1, 17)));
        assert!(merges.contains(&MergeRegion::new(2, 4, 2, 5)));
        assert!(merges.contains(&MergeRegion::new(2, 16, 2, 17)));
    }

    #[test]
    fn test_single_sub_column_dates_merge_vertically() {
        let def = SheetDefinition::work_logs();
        let plan = ColumnPlan::build(&def, &range(7));
        let merges = plan_merges(&plan);

        // 5 fixed verticals, 1 group title, 7 vertical date merges
        assert_eq!(merges.len(), 13);
        assert!(merges.contains(&MergeRegion::new(2, 5, 3, 5)));
        assert!(merges.contains(&MergeRegion::new(2, 11, 3, 11)));
    }

    #[test]
    fn test_no_pairwise_overlap() {
        for def in [SheetDefinition::inspections(), SheetDefinition::work_logs()] {
            let plan = ColumnPlan::build(&def, &range(9));
            let merges = plan_merges(&plan);
            for (i, a) in merges.iter().enumerate() {
                for b in merges.iter().skip(i + 1) {
                    assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_no_single_cell_regions() {
        let def = SheetDefinition::work_logs();
        let plan = ColumnPlan::build(&def, &range(1));
        let merges = plan_merges(&plan);

        for merge in &merges {
            assert!(merge.is_spanning(), "degenerate region {merge:?}");
        }
        // The one-column group gets no title merge at all.
        assert!(!merges.iter().any(|m| m.start_row == 1 && m.start_col == 5));
    }

    #[test]
    fn test_header_band_tiling() {
        let def = SheetDefinition::inspections();
        let plan = ColumnPlan::build(&def, &range(7));
        let merges = plan_merges(&plan);
        let grid = coverage(&merges, plan.total());

        // No cell is claimed twice.
        for row in 1..=HEADER_ROWS as usize {
            for col in 1..=plan.total() {
                assert!(grid[row][col] <= 1, "cell ({row},{col}) covered twice");
            }
        }

        // The only standalone header cells are the row-3 sub-labels.
        for col in 1..=plan.total() {
            let in_group = (4..=17).contains(&col);
            assert_eq!(grid[1][col], 1);
            assert_eq!(grid[2][col], 1);
            assert_eq!(grid[3][col], u32::from(!in_group));
        }
    }

    #[test]
    fn test_merges_stay_inside_the_band() {
        let def = SheetDefinition::work_logs();
        let plan = ColumnPlan::build(&def, &range(14));
        for merge in plan_merges(&plan) {
            assert!(merge.start_row >= 1);
            assert!(merge.end_row <= HEADER_ROWS);
            assert!(merge.end_col as usize <= plan.total());
        }
    }
}
