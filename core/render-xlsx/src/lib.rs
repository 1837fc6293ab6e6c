//! FILENAME: core/render-xlsx/src/lib.rs
//! XLSX rendering backend for report sheet views.
//!
//! Realizes `report-engine` sheet descriptions as .xlsx workbooks:
//! one worksheet per sheet, merge regions applied before cell content,
//! formats picked by cell kind, and the header band frozen above the
//! data rows.

mod error;
mod writer;

pub use error::RenderError;
pub use writer::{report_to_buffer, save_report};
