//! FILENAME: core/report-engine/src/view.rs
//! Sheet View - Render-ready output.
//!
//! A `SheetView` is the finished description of one worksheet: a dense
//! 2D cell grid, the merge regions laid over it, and per-column width
//! hints. It contains no layout logic; renderers walk it cell by cell.
//! All coordinates are 1-indexed, matching A1 notation.

use serde::{Deserialize, Serialize};

// ============================================================================
// CELL TYPES
// ============================================================================

/// Display value of a grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    /// Spreadsheet formula without a leading `=`.
    Formula(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Rendering role of a cell, used by backends to pick formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// Part of the three-row header band.
    Header,
    /// Part of the subtotal row.
    Subtotal,
    /// Entity data row cell.
    Data,
}

/// A single cell: value plus rendering role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetCell {
    pub value: CellValue,
    pub kind: CellKind,
}

impl SheetCell {
    pub fn header(value: CellValue) -> Self {
        SheetCell {
            value,
            kind: CellKind::Header,
        }
    }

    pub fn subtotal(value: CellValue) -> Self {
        SheetCell {
            value,
            kind: CellKind::Subtotal,
        }
    }

    pub fn data(value: CellValue) -> Self {
        SheetCell {
            value,
            kind: CellKind::Data,
        }
    }

    /// An empty cell of the given kind. Covered cells inside merge
    /// regions are emitted this way.
    pub fn blank(kind: CellKind) -> Self {
        SheetCell {
            value: CellValue::Empty,
            kind,
        }
    }
}

// ============================================================================
// ROWS AND MERGES
// ============================================================================

/// The type of a row in the sheet view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    Header,
    Subtotal,
    Data,
}

/// A rectangular merged region, 1-indexed and inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRegion {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl MergeRegion {
    /// Creates a region. Start must not exceed end on either axis.
    pub fn new(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        debug_assert!(start_row <= end_row && start_col <= end_col);
        MergeRegion {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    /// Number of cells covered.
    pub fn cell_count(&self) -> u32 {
        (self.end_row - self.start_row + 1) * (self.end_col - self.start_col + 1)
    }

    /// True if the region spans more than one cell.
    pub fn is_spanning(&self) -> bool {
        self.cell_count() > 1
    }

    /// True if this region shares any cell with `other`.
    pub fn overlaps(&self, other: &MergeRegion) -> bool {
        !(self.end_row < other.start_row
            || other.end_row < self.start_row
            || self.end_col < other.start_col
            || other.end_col < self.start_col)
    }
}

// ============================================================================
// SHEET VIEW
// ============================================================================

/// The complete description of one rendered worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetView {
    /// Worksheet name.
    pub name: String,

    /// Dense cell grid, indexed as `rows[row][col]`, 0-based in memory.
    pub rows: Vec<Vec<SheetCell>>,

    /// Kind of each row, parallel to `rows`.
    pub row_kinds: Vec<RowKind>,

    /// Merge regions laid over the grid.
    pub merges: Vec<MergeRegion>,

    /// Width hint per column, in Excel character units.
    pub column_widths: Vec<f64>,

    /// Number of header rows at the top of the grid.
    pub header_row_count: u32,

    /// 1-indexed row number of the first entity data row.
    pub first_data_row: u32,

    /// Number of entity data rows.
    pub data_row_count: u32,
}

impl SheetView {
    /// Creates an empty view with the given column widths.
    pub fn new(name: impl Into<String>, column_widths: Vec<f64>) -> Self {
        SheetView {
            name: name.into(),
            rows: Vec::new(),
            row_kinds: Vec::new(),
            merges: Vec::new(),
            column_widths,
            header_row_count: 0,
            first_data_row: 0,
            data_row_count: 0,
        }
    }

    /// Appends a row and records its kind.
    pub fn add_row(&mut self, cells: Vec<SheetCell>, kind: RowKind) {
        self.rows.push(cells);
        self.row_kinds.push(kind);
    }

    /// Number of rows in the grid.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the grid.
    pub fn col_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Gets a cell by 1-indexed row and column.
    pub fn cell(&self, row: u32, col: u32) -> Option<&SheetCell> {
        let row = (row as usize).checked_sub(1)?;
        let col = (col as usize).checked_sub(1)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }
}
