//! FILENAME: core/report-engine/src/compose.rs
//! Report Composer - Multi-sheet orchestration.
//!
//! The composer validates the date range once, then builds each sheet
//! independently from its own observation source. A failed source
//! degrades that one sheet to its header band and a zero subtotal row;
//! the other sheets are unaffected. The only fatal input error is an
//! inverted date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::daterange::DateRange;
use crate::definition::{Entity, Observation, SheetDefinition};
use crate::error::{Diagnostics, DroppedObservations, ReportError, ReportWarning, SourceError};
use crate::grid::assemble_sheet;
use crate::index::RecordIndex;
use crate::sort::CanonicalOrder;
use crate::view::SheetView;

// ============================================================================
// INPUTS
// ============================================================================

/// One sheet to build: its shape plus the outcome of fetching its
/// observations. Sources run outside this crate; a fetch failure is
/// handed in as data so composition can degrade instead of abort.
#[derive(Debug, Clone)]
pub struct SheetSource {
    pub definition: SheetDefinition,
    pub observations: Result<Vec<Observation>, SourceError>,
}

impl SheetSource {
    pub fn new(
        definition: SheetDefinition,
        observations: Result<Vec<Observation>, SourceError>,
    ) -> Self {
        SheetSource {
            definition,
            observations,
        }
    }
}

// ============================================================================
// OUTPUTS
// ============================================================================

/// Whether a sheet was built from real data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SheetStatus {
    /// Built from its observation source.
    Complete,
    /// Source failed; header band and zero subtotal only.
    Degraded,
}

/// One built sheet with its status and drop tally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetBuild {
    pub status: SheetStatus,
    pub view: SheetView,

    /// Observations discarded while indexing this sheet's source.
    pub dropped: DroppedObservations,
}

/// The finished report: every sheet, a suggested file stem, and the
/// build diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    pub sheets: Vec<SheetBuild>,

    /// `report_YYYYMMDD_YYYYMMDD`, derived from the range.
    pub file_stem: String,

    pub diagnostics: Diagnostics,
}

// ============================================================================
// COMPOSITION
// ============================================================================

/// Builds the full report for an inclusive date range.
///
/// Entities are shared by all sheets and sorted once per sheet by the
/// canonical order; an empty order degrades sorting to alphabetical
/// and records a warning. Returns `Err` only when the range itself is
/// invalid.
pub fn compose_report(
    start: NaiveDate,
    end: NaiveDate,
    entities: &[Entity],
    order: &CanonicalOrder,
    sources: Vec<SheetSource>,
) -> Result<ReportOutput, ReportError> {
    let range = DateRange::new(start, end)?;

    let mut diagnostics = Diagnostics::default();
    if order.is_empty() {
        log::warn!("canonical order table is empty; sorting entities alphabetically");
        diagnostics.warnings.push(ReportWarning::MissingCanonicalOrder);
    }

    let mut sheets = Vec::with_capacity(sources.len());
    for source in sources {
        let build = match source.observations {
            Ok(observations) => {
                let (index, dropped) = RecordIndex::build(observations, entities, &range);
                if dropped.any() {
                    log::debug!(
                        "sheet '{}': dropped {} observations ({} unknown entity, {} out of range)",
                        source.definition.name,
                        dropped.total(),
                        dropped.unknown_entity,
                        dropped.out_of_range
                    );
                }
                diagnostics.dropped.absorb(&dropped);

                let view = assemble_sheet(&source.definition, &range, entities, order, &index);
                SheetBuild {
                    status: SheetStatus::Complete,
                    view,
                    dropped,
                }
            }
            Err(err) => {
                log::warn!("sheet '{}': observation source failed: {err}", source.definition.name);
                diagnostics.warnings.push(ReportWarning::SheetDataFetchFailure {
                    sheet: source.definition.name.clone(),
                    reason: err.to_string(),
                });

                let index = RecordIndex::default();
                let view = assemble_sheet(&source.definition, &range, &[], order, &index);
                SheetBuild {
                    status: SheetStatus::Degraded,
                    view,
                    dropped: DroppedObservations::default(),
                }
            }
        };
        sheets.push(build);
    }

    Ok(ReportOutput {
        sheets,
        file_stem: range.file_stem(),
        diagnostics,
    })
}
