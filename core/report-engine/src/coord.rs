//! FILENAME: core/report-engine/src/coord.rs
//! Column-letter and range-reference helpers.
//!
//! Grid positions in this crate are 1-indexed, matching the A1 notation
//! the subtotal formulas are written in. Renderers convert to whatever
//! indexing their backend wants.

// ============================================================================
// COLUMN LETTERS
// ============================================================================

/// Converts a 1-indexed column number to its letter form.
/// 1 -> "A", 26 -> "Z", 27 -> "AA", 703 -> "AAA".
pub fn col_letter(col: u32) -> String {
    debug_assert!(col >= 1, "column numbers start at 1");
    let mut index = col - 1;
    let mut result = String::new();

    loop {
        let remainder = (index % 26) as u8;
        result.insert(0, (b'A' + remainder) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }

    result
}

// ============================================================================
// RANGE REFERENCES
// ============================================================================

/// Builds a single-column range reference like `D$5:D$12`.
///
/// Rows are always anchored with `$` so the formula survives row
/// insertion below the band. `anchor_col` additionally anchors the
/// column, producing `$D$5:$D$12`, which is what the shared identity
/// range in a subtotal formula uses.
pub fn range_ref(col: u32, first_row: u32, last_row: u32, anchor_col: bool) -> String {
    let letters = col_letter(col);
    if anchor_col {
        format!("${letters}${first_row}:${letters}${last_row}")
    } else {
        format!("{letters}${first_row}:{letters}${last_row}")
    }
}
