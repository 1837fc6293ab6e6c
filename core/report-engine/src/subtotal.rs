//! FILENAME: core/report-engine/src/subtotal.rs
//! Subtotal Row - Gated non-blank counts per column.
//!
//! The subtotal row sits between the header band and the data rows.
//! Every column except the identity column gets a COUNTIFS formula
//! counting rows where both the identity cell and that column's cell
//! are non-blank. Gating on the identity column keeps padding rows
//! (created when branches hand-extend the sheet) out of the counts.
//! Formulas recompute live in the spreadsheet after manual edits,
//! which a precomputed number would not.

use crate::coord::range_ref;
use crate::plan::{ColumnPlan, FIRST_DATA_ROW};
use crate::view::{CellValue, SheetCell};

/// Builds the subtotal-row cells for a column plan.
///
/// `data_row_count` is the number of entity rows below the subtotal
/// row. With zero data rows there is no range to count over, so the
/// non-identity cells carry a literal 0 instead of a formula.
pub fn subtotal_row(plan: &ColumnPlan, label: &str, data_row_count: u32) -> Vec<SheetCell> {
    if data_row_count == 0 {
        return plan
            .columns
            .iter()
            .map(|planned| {
                if planned.col == plan.identity_col {
                    SheetCell::subtotal(CellValue::text(label))
                } else {
                    SheetCell::subtotal(CellValue::Number(0.0))
                }
            })
            .collect();
    }

    let first = FIRST_DATA_ROW;
    let last = FIRST_DATA_ROW + data_row_count - 1;
    let identity_range = range_ref(plan.identity_col, first, last, true);

    plan.columns
        .iter()
        .map(|planned| {
            if planned.col == plan.identity_col {
                SheetCell::subtotal(CellValue::text(label))
            } else {
                let column_range = range_ref(planned.col, first, last, false);
                SheetCell::subtotal(CellValue::Formula(format!(
                    "COUNTIFS({identity_range},\"<>\",{column_range},\"<>\")"
                )))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daterange::DateRange;
    use crate::definition::SheetDefinition;
    use crate::view::CellKind;
    use chrono::NaiveDate;

    fn plan(days: u32) -> ColumnPlan {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = start + chrono::Days::new(days as u64 - 1);
        let range = DateRange::new(start, end).unwrap();
        ColumnPlan::build(&SheetDefinition::inspections(), &range)
    }

    #[test]
    fn test_identity_cell_carries_the_label() {
        let plan = plan(2);
        let row = subtotal_row(&plan, "Subtotal", 3);

        assert_eq!(row.len(), plan.total());
        assert_eq!(row[2].value, CellValue::text("Subtotal"));
    }

    #[test]
    fn test_formula_text() {
        let plan = plan(2);
        let row = subtotal_row(&plan, "Subtotal", 3);

        // Data rows 5..7; identity column C is fully anchored.
        assert_eq!(
            row[0].value,
            CellValue::Formula("COUNTIFS($C$5:$C$7,\"<>\",A$5:A$7,\"<>\")".to_string())
        );
        assert_eq!(
            row[3].value,
            CellValue::Formula("COUNTIFS($C$5:$C$7,\"<>\",D$5:D$7,\"<>\")".to_string())
        );
    }

    #[test]
    fn test_every_non_identity_column_gets_a_formula() {
        let plan = plan(4);
        let row = subtotal_row(&plan, "Subtotal", 6);

        for (i, cell) in row.iter().enumerate() {
            assert_eq!(cell.kind, CellKind::Subtotal);
            if i == 2 {
                assert!(matches!(cell.value, CellValue::Text(_)));
            } else {
                assert!(matches!(cell.value, CellValue::Formula(_)), "column {i}");
            }
        }
    }

    #[test]
    fn test_zero_data_rows_emit_literal_zeros() {
        let plan = plan(2);
        let row = subtotal_row(&plan, "Subtotal", 0);

        assert_eq!(row[2].value, CellValue::text("Subtotal"));
        for (i, cell) in row.iter().enumerate() {
            if i != 2 {
                assert_eq!(cell.value, CellValue::Number(0.0), "column {i}");
            }
        }
    }

    #[test]
    fn test_single_data_row_range() {
        let plan = plan(1);
        let row = subtotal_row(&plan, "Subtotal", 1);

        assert_eq!(
            row[0].value,
            CellValue::Formula("COUNTIFS($C$5:$C$5,\"<>\",A$5:A$5,\"<>\")".to_string())
        );
    }
}
