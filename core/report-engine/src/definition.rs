//! FILENAME: core/report-engine/src/definition.rs
//! Report Definition - The serializable configuration.
//!
//! This module defines what a report IS: the entities being reported
//! on, the raw observations feeding it, and the sheet shapes (fixed
//! columns, repeating per-date groups, subtotal labels). Definitions
//! are plain data with serde support; the layout engine in `plan`,
//! `merge` and `grid` interprets them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::district;

/// Opaque identifier for a monitored site.
pub type EntityId = String;

/// Mark written in an attendance sub-column when a visit happened.
pub const ATTENDANCE_MARK: &str = "O";

/// Default strftime format for per-date header labels.
pub const DATE_LABEL_FORMAT: &str = "%m/%d";

/// Default label for the subtotal row.
pub const SUBTOTAL_LABEL: &str = "Subtotal";

// ============================================================================
// ENTITY
// ============================================================================

/// One monitored site, as maintained by the head office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,

    /// Regional classification, ordered by the canonical group table.
    pub group_key: String,

    /// Branch office within the group.
    pub sub_group_key: String,

    /// Free-text site name as entered by the branch.
    pub name: String,

    /// Short label shown in the identity column, derived from `name`.
    pub display_key: String,

    /// Manual ordering within a branch. Entities without one sort after
    /// those that have one.
    pub sort_order: Option<u32>,

    /// Inactive sites are excluded by callers before composition.
    pub active: bool,
}

impl Entity {
    /// Creates an active entity and derives its display key from the
    /// name.
    pub fn new(
        id: impl Into<EntityId>,
        group_key: impl Into<String>,
        sub_group_key: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let display_key = district::district_key(&name, district::DEFAULT_KEY_CHARS);
        Entity {
            id: id.into(),
            group_key: group_key.into(),
            sub_group_key: sub_group_key.into(),
            name,
            display_key,
            sort_order: None,
            active: true,
        }
    }

    /// Sets the manual sort position.
    pub fn with_sort_order(mut self, order: u32) -> Self {
        self.sort_order = Some(order);
        self
    }
}

// ============================================================================
// OBSERVATION
// ============================================================================

/// One recorded safety check for one site on one calendar day.
///
/// The `date` field carries day granularity; callers deriving it from a
/// datetime truncate first. `timestamp` is the application-level
/// created-at and is only consulted to resolve same-day duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub entity_id: EntityId,
    pub date: NaiveDate,
    pub timestamp: NaiveDateTime,

    /// Whether the site was actually visited.
    pub attended: bool,

    /// Name of the inspector who made the visit.
    pub person_name: Option<String>,

    /// Head count of workers present.
    pub worker_count: Option<u32>,

    /// Hazards flagged during the visit.
    pub hazard_count: Option<u32>,

    /// Free-text remarks.
    pub remarks: Option<String>,
}

impl Observation {
    /// Creates an attended observation with no detail fields set.
    pub fn new(entity_id: impl Into<EntityId>, date: NaiveDate, timestamp: NaiveDateTime) -> Self {
        Observation {
            entity_id: entity_id.into(),
            date,
            timestamp,
            attended: true,
            person_name: None,
            worker_count: None,
            hazard_count: None,
            remarks: None,
        }
    }

    pub fn with_person(mut self, name: impl Into<String>) -> Self {
        self.person_name = Some(name.into());
        self
    }

    pub fn with_worker_count(mut self, count: u32) -> Self {
        self.worker_count = Some(count);
        self
    }

    pub fn with_hazard_count(mut self, count: u32) -> Self {
        self.hazard_count = Some(count);
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }
}

// ============================================================================
// COLUMN FIELDS
// ============================================================================

/// Which entity attribute a fixed column shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityField {
    GroupKey,
    SubGroupKey,
    DisplayKey,
    SiteName,
    /// Column left blank for manual entry after export.
    Blank,
}

/// Which observation field a per-date sub-column shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObservationField {
    /// The attendance mark, written as "O" when the visit happened.
    AttendanceMark,
    PersonName,
    WorkerCount,
    HazardCount,
    Remarks,
}

// ============================================================================
// COLUMN DEFINITIONS
// ============================================================================

/// A fixed (non-repeating) column at either edge of the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedColumnDef {
    /// Header label, shown merged across the header band.
    pub label: String,

    /// Entity attribute shown in data rows.
    pub field: EntityField,

    /// Width hint in Excel character units.
    pub width: f64,
}

impl FixedColumnDef {
    pub fn new(label: impl Into<String>, field: EntityField, width: f64) -> Self {
        FixedColumnDef {
            label: label.into(),
            field,
            width,
        }
    }
}

/// One sub-column repeated under every date of a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubColumnDef {
    /// Header label, shown in the third header row when the group has
    /// more than one sub-column.
    pub label: String,

    /// Observation field shown in data rows.
    pub field: ObservationField,

    /// Width hint in Excel character units.
    pub width: f64,
}

impl SubColumnDef {
    pub fn new(label: impl Into<String>, field: ObservationField, width: f64) -> Self {
        SubColumnDef {
            label: label.into(),
            field,
            width,
        }
    }
}

/// A repeating group: its sub-columns are emitted once per date in the
/// report range, in date order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateGroupDef {
    /// Group title, merged across the group's full span in the first
    /// header row.
    pub title: String,

    /// strftime format for the per-date labels in the second header
    /// row. Must be a valid chrono format string.
    pub date_label_format: String,

    /// Sub-columns per date. Must not be empty.
    pub sub_columns: Vec<SubColumnDef>,
}

impl DateGroupDef {
    pub fn new(title: impl Into<String>, sub_columns: Vec<SubColumnDef>) -> Self {
        DateGroupDef {
            title: title.into(),
            date_label_format: DATE_LABEL_FORMAT.to_string(),
            sub_columns,
        }
    }

    /// Sub-columns per date.
    pub fn width(&self) -> usize {
        self.sub_columns.len()
    }
}

// ============================================================================
// SHEET DEFINITION
// ============================================================================

/// The shape of one report sheet.
///
/// Columns run: `fixed_before`, then every date group expanded over the
/// report's date range, then `fixed_after`. The identity column is one
/// of the leading fixed columns and gates the subtotal formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetDefinition {
    /// Worksheet name.
    pub name: String,

    /// Fixed columns before the repeating groups.
    pub fixed_before: Vec<FixedColumnDef>,

    /// Repeating per-date groups, left to right.
    pub date_groups: Vec<DateGroupDef>,

    /// Fixed columns after the repeating groups.
    pub fixed_after: Vec<FixedColumnDef>,

    /// Index into `fixed_before` of the identity column.
    pub identity_col: usize,

    /// Label written in the identity cell of the subtotal row.
    pub subtotal_label: String,
}

impl SheetDefinition {
    /// Creates an empty definition with the default subtotal label.
    pub fn new(name: impl Into<String>) -> Self {
        SheetDefinition {
            name: name.into(),
            fixed_before: Vec::new(),
            date_groups: Vec::new(),
            fixed_after: Vec::new(),
            identity_col: 0,
            subtotal_label: SUBTOTAL_LABEL.to_string(),
        }
    }

    pub fn with_fixed_before(mut self, columns: Vec<FixedColumnDef>) -> Self {
        self.fixed_before = columns;
        self
    }

    pub fn with_date_groups(mut self, groups: Vec<DateGroupDef>) -> Self {
        self.date_groups = groups;
        self
    }

    pub fn with_fixed_after(mut self, columns: Vec<FixedColumnDef>) -> Self {
        self.fixed_after = columns;
        self
    }

    /// Marks the identity column by its index in `fixed_before`.
    pub fn with_identity_col(mut self, index: usize) -> Self {
        self.identity_col = index;
        self
    }

    /// The stock inspections sheet: region, branch and district fixed
    /// columns, then a visit mark and an inspector name per date, then
    /// a blank notes column.
    pub fn inspections() -> Self {
        SheetDefinition::new("Inspections")
            .with_fixed_before(vec![
                FixedColumnDef::new("Region", EntityField::GroupKey, 10.0),
                FixedColumnDef::new("Branch", EntityField::SubGroupKey, 12.0),
                FixedColumnDef::new("District", EntityField::DisplayKey, 10.0),
            ])
            .with_identity_col(2)
            .with_date_groups(vec![DateGroupDef::new(
                "Daily Inspections",
                vec![
                    SubColumnDef::new("Visit", ObservationField::AttendanceMark, 6.0),
                    SubColumnDef::new("Inspector", ObservationField::PersonName, 10.0),
                ],
            )])
            .with_fixed_after(vec![FixedColumnDef::new(
                "Notes",
                EntityField::Blank,
                14.0,
            )])
    }

    /// The stock work-log sheet: one crew-count sub-column per date,
    /// plus the full site name alongside the identity columns.
    pub fn work_logs() -> Self {
        SheetDefinition::new("Work Logs")
            .with_fixed_before(vec![
                FixedColumnDef::new("Region", EntityField::GroupKey, 10.0),
                FixedColumnDef::new("Branch", EntityField::SubGroupKey, 12.0),
                FixedColumnDef::new("District", EntityField::DisplayKey, 10.0),
                FixedColumnDef::new("Site", EntityField::SiteName, 18.0),
            ])
            .with_identity_col(2)
            .with_date_groups(vec![DateGroupDef::new(
                "Daily Crew Counts",
                vec![SubColumnDef::new(
                    "Crew",
                    ObservationField::WorkerCount,
                    6.0,
                )],
            )])
            .with_fixed_after(vec![FixedColumnDef::new(
                "Notes",
                EntityField::Blank,
                14.0,
            )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_derives_display_key() {
        let entity = Entity::new("e1", "North", "Harbor", "Gunwi Bridge Site");
        assert_eq!(entity.display_key, "Gunwi");
        assert!(entity.active);
        assert_eq!(entity.sort_order, None);
    }

    #[test]
    fn test_entity_sort_order_builder() {
        let entity = Entity::new("e1", "North", "Harbor", "Gunwi Bridge").with_sort_order(3);
        assert_eq!(entity.sort_order, Some(3));
    }

    #[test]
    fn test_stock_inspections_shape() {
        let def = SheetDefinition::inspections();
        assert_eq!(def.fixed_before.len(), 3);
        assert_eq!(def.date_groups.len(), 1);
        assert_eq!(def.date_groups[0].width(), 2);
        assert_eq!(def.fixed_after.len(), 1);
        assert_eq!(def.identity_col, 2);
        assert_eq!(def.fixed_before[def.identity_col].field, EntityField::DisplayKey);
    }

    #[test]
    fn test_stock_work_logs_shape() {
        let def = SheetDefinition::work_logs();
        assert_eq!(def.fixed_before.len(), 4);
        assert_eq!(def.date_groups[0].width(), 1);
        assert_eq!(
            def.date_groups[0].sub_columns[0].field,
            ObservationField::WorkerCount
        );
    }

    #[test]
    fn test_definition_round_trips_through_json() {
        let def = SheetDefinition::inspections();
        let json = serde_json::to_string(&def).unwrap();
        let back: SheetDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, def);
    }
}
