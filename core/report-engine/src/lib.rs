//! FILENAME: core/report-engine/src/lib.rs
//! Report grid engine for site-safety inspection workbooks.
//!
//! This crate turns a date range, an entity roster and per-sheet
//! observation feeds into render-ready sheet descriptions: a merged
//! three-row header band, a formula-driven subtotal row, and one data
//! row per entity in canonical order. Rendering lives elsewhere; the
//! output here is plain data.
//!
//! Layers:
//! - `definition`: Serializable configuration (what a report IS)
//! - `view`: Render-ready output (WHAT a sheet shows)
//! - `plan`, `merge`, `subtotal`, `grid`: layout engine (HOW it is built)
//! - `compose`: multi-sheet orchestration and failure isolation

pub mod compose;
pub mod coord;
pub mod daterange;
pub mod definition;
pub mod district;
pub mod error;
pub mod grid;
pub mod index;
pub mod merge;
pub mod plan;
pub mod sort;
pub mod subtotal;
pub mod view;

pub use compose::{compose_report, ReportOutput, SheetBuild, SheetSource, SheetStatus};
pub use daterange::DateRange;
pub use definition::*;
pub use error::{Diagnostics, DroppedObservations, ReportError, ReportWarning, SourceError};
pub use grid::assemble_sheet;
pub use index::RecordIndex;
pub use sort::{sorted, CanonicalOrder};
pub use view::*;
