//! FILENAME: core/report-engine/src/index.rs
//! Record Index - Observation lookup by entity and day.
//!
//! Observation sources return flat lists with no uniqueness guarantee:
//! the same site can be recorded twice on one day, rows can reference
//! retired sites, and date filters upstream are best-effort. The index
//! collapses all of that into at most one winning observation per
//! (entity, day) pair, which is what the grid assembler probes once per
//! per-date cell.

use std::collections::hash_map::Entry;

use chrono::NaiveDate;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::daterange::DateRange;
use crate::definition::{Entity, EntityId, Observation};
use crate::error::DroppedObservations;

/// Winning observations keyed by entity, then by day.
#[derive(Debug, Clone, Default)]
pub struct RecordIndex {
    by_entity: FxHashMap<EntityId, FxHashMap<NaiveDate, Observation>>,
    len: usize,
}

impl RecordIndex {
    /// Builds the index from a raw observation list.
    ///
    /// Observations referencing an entity not in `entities`, or dated
    /// outside `range`, are dropped and tallied. When several
    /// observations share an (entity, day) pair the one with the
    /// latest timestamp wins; on a timestamp tie the one appearing
    /// later in the input wins.
    pub fn build(
        observations: Vec<Observation>,
        entities: &[Entity],
        range: &DateRange,
    ) -> (Self, DroppedObservations) {
        let known: FxHashSet<&str> = entities.iter().map(|e| e.id.as_str()).collect();

        let mut dropped = DroppedObservations::default();
        let mut by_entity: FxHashMap<EntityId, FxHashMap<NaiveDate, Observation>> =
            FxHashMap::default();
        let mut len = 0;

        for obs in observations {
            if !known.contains(obs.entity_id.as_str()) {
                dropped.unknown_entity += 1;
                continue;
            }
            if !range.contains(obs.date) {
                dropped.out_of_range += 1;
                continue;
            }

            let per_day = by_entity.entry(obs.entity_id.clone()).or_default();
            match per_day.entry(obs.date) {
                Entry::Occupied(mut slot) => {
                    if obs.timestamp >= slot.get().timestamp {
                        slot.insert(obs);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(obs);
                    len += 1;
                }
            }
        }

        (RecordIndex { by_entity, len }, dropped)
    }

    /// Looks up the winning observation for an entity on a day.
    pub fn get(&self, entity_id: &str, date: NaiveDate) -> Option<&Observation> {
        self.by_entity
            .get(entity_id)
            .and_then(|per_day| per_day.get(&date))
    }

    /// Number of (entity, day) pairs with a winning observation.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
