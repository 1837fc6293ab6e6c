//! FILENAME: core/report-engine/src/grid.rs
//! Grid Assembler - Builds the full sheet view.
//!
//! The assembler walks a column plan four times: three header rows,
//! then the subtotal row, then one data row per entity in canonical
//! order. Cells covered by a merge region are emitted empty; the
//! region's anchor cell carries the label. The finished view is
//! self-contained and renderer-agnostic.
//!
//! Row layout:
//!   rows 1..3   merged header band
//!   row 4       subtotal row
//!   rows 5..    one row per entity

use crate::daterange::DateRange;
use crate::definition::{
    Entity, EntityField, Observation, ObservationField, SheetDefinition, ATTENDANCE_MARK,
};
use crate::index::RecordIndex;
use crate::merge::plan_merges;
use crate::plan::{ColumnPlan, ColumnRole, FIRST_DATA_ROW, HEADER_ROWS};
use crate::sort::{self, CanonicalOrder};
use crate::subtotal::subtotal_row;
use crate::view::{CellValue, RowKind, SheetCell, SheetView};

// ============================================================================
// FIELD PROJECTION
// ============================================================================

/// An empty string becomes a truly empty cell. Renderers skip empty
/// cells entirely, which keeps them out of the subtotal counts; a
/// written "" would be counted as non-blank.
fn text_or_empty(s: &str) -> CellValue {
    if s.is_empty() {
        CellValue::Empty
    } else {
        CellValue::text(s)
    }
}

/// Projects an entity attribute into a cell value.
fn entity_value(field: EntityField, entity: &Entity) -> CellValue {
    match field {
        EntityField::GroupKey => text_or_empty(&entity.group_key),
        EntityField::SubGroupKey => text_or_empty(&entity.sub_group_key),
        EntityField::DisplayKey => text_or_empty(&entity.display_key),
        EntityField::SiteName => text_or_empty(&entity.name),
        EntityField::Blank => CellValue::Empty,
    }
}

/// Projects an observation field into a cell value. Unset optional
/// fields project to empty cells, indistinguishable from a day with no
/// observation at all.
fn observation_value(field: ObservationField, obs: &Observation) -> CellValue {
    match field {
        ObservationField::AttendanceMark => {
            if obs.attended {
                CellValue::text(ATTENDANCE_MARK)
            } else {
                CellValue::Empty
            }
        }
        ObservationField::PersonName => match &obs.person_name {
            Some(name) => text_or_empty(name),
            None => CellValue::Empty,
        },
        ObservationField::WorkerCount => match obs.worker_count {
            Some(n) => CellValue::Number(n as f64),
            None => CellValue::Empty,
        },
        ObservationField::HazardCount => match obs.hazard_count {
            Some(n) => CellValue::Number(n as f64),
            None => CellValue::Empty,
        },
        ObservationField::Remarks => match &obs.remarks {
            Some(remarks) => text_or_empty(remarks),
            None => CellValue::Empty,
        },
    }
}

// ============================================================================
// GRID ASSEMBLER
// ============================================================================

/// Assembles one sheet view from prepared inputs.
///
/// The entity list must already be in display order; `assemble_sheet`
/// is the entry point that sorts first.
pub struct GridAssembler<'a> {
    definition: &'a SheetDefinition,
    range: &'a DateRange,
    entities: Vec<&'a Entity>,
    index: &'a RecordIndex,
}

impl<'a> GridAssembler<'a> {
    pub fn new(
        definition: &'a SheetDefinition,
        range: &'a DateRange,
        entities: Vec<&'a Entity>,
        index: &'a RecordIndex,
    ) -> Self {
        GridAssembler {
            definition,
            range,
            entities,
            index,
        }
    }

    /// Builds the complete view: header band, subtotal row, data rows
    /// and merge regions.
    pub fn assemble(&self) -> SheetView {
        let plan = ColumnPlan::build(self.definition, self.range);

        let mut view = SheetView::new(&self.definition.name, plan.widths());
        view.header_row_count = HEADER_ROWS;
        view.first_data_row = FIRST_DATA_ROW;
        view.data_row_count = self.entities.len() as u32;

        self.emit_header_rows(&mut view, &plan);
        self.emit_subtotal_row(&mut view, &plan);
        self.emit_data_rows(&mut view, &plan);
        view.merges = plan_merges(&plan);

        view
    }

    /// Row 1: fixed-column labels and group titles. Rows 2 and 3: date
    /// labels and sub-column labels. Cells under a merge stay empty.
    fn emit_header_rows(&self, view: &mut SheetView, plan: &ColumnPlan) {
        let def = self.definition;

        let row1 = plan
            .columns
            .iter()
            .map(|planned| {
                let value = match planned.role {
                    ColumnRole::FixedBefore(i) => CellValue::text(&def.fixed_before[i].label),
                    ColumnRole::FixedAfter(i) => CellValue::text(&def.fixed_after[i].label),
                    ColumnRole::PerDate { group, date: 0, sub: 0 } => {
                        CellValue::text(&def.date_groups[group].title)
                    }
                    ColumnRole::PerDate { .. } => CellValue::Empty,
                };
                SheetCell::header(value)
            })
            .collect();
        view.add_row(row1, RowKind::Header);

        let row2 = plan
            .columns
            .iter()
            .map(|planned| {
                let value = match planned.role {
                    ColumnRole::PerDate { group, date, sub: 0 } => {
                        let day = self.range.dates()[date];
                        let format = &def.date_groups[group].date_label_format;
                        CellValue::Text(day.format(format).to_string())
                    }
                    _ => CellValue::Empty,
                };
                SheetCell::header(value)
            })
            .collect();
        view.add_row(row2, RowKind::Header);

        let row3 = plan
            .columns
            .iter()
            .map(|planned| {
                let value = match planned.role {
                    ColumnRole::PerDate { group, sub, .. }
                        if def.date_groups[group].width() > 1 =>
                    {
                        CellValue::text(&def.date_groups[group].sub_columns[sub].label)
                    }
                    _ => CellValue::Empty,
                };
                SheetCell::header(value)
            })
            .collect();
        view.add_row(row3, RowKind::Header);
    }

    fn emit_subtotal_row(&self, view: &mut SheetView, plan: &ColumnPlan) {
        let cells = subtotal_row(plan, &self.definition.subtotal_label, self.entities.len() as u32);
        view.add_row(cells, RowKind::Subtotal);
    }

    fn emit_data_rows(&self, view: &mut SheetView, plan: &ColumnPlan) {
        let def = self.definition;

        for entity in &self.entities {
            let cells = plan
                .columns
                .iter()
                .map(|planned| {
                    let value = match planned.role {
                        ColumnRole::FixedBefore(i) => entity_value(def.fixed_before[i].field, entity),
                        ColumnRole::FixedAfter(i) => entity_value(def.fixed_after[i].field, entity),
                        ColumnRole::PerDate { group, date, sub } => {
                            let day = self.range.dates()[date];
                            match self.index.get(&entity.id, day) {
                                Some(obs) => observation_value(
                                    def.date_groups[group].sub_columns[sub].field,
                                    obs,
                                ),
                                None => CellValue::Empty,
                            }
                        }
                    };
                    SheetCell::data(value)
                })
                .collect();
            view.add_row(cells, RowKind::Data);
        }
    }
}

/// Sorts the entities canonically and assembles the sheet.
pub fn assemble_sheet(
    definition: &SheetDefinition,
    range: &DateRange,
    entities: &[Entity],
    order: &CanonicalOrder,
    index: &RecordIndex,
) -> SheetView {
    let ordered = sort::sorted(entities, order);
    GridAssembler::new(definition, range, ordered, index).assemble()
}
