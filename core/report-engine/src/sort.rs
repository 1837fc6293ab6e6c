//! FILENAME: core/report-engine/src/sort.rs
//! Entity Ordering - Canonical sort for data rows.
//!
//! Row order is administrative, not alphabetical: the head office keeps
//! a canonical list of groups and, per group, of sub-groups. Entities
//! sort by their group's position in that list, then their sub-group's
//! position, then any manual per-entity position, then display key.
//! Keys missing from the canonical list sort after all known keys,
//! alphabetically among themselves.
//!
//! An empty canonical list degrades the whole sort to alphabetical;
//! callers surface that as a warning.

use std::cmp::Ordering;
use std::collections::HashMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::definition::Entity;

// ============================================================================
// CANONICAL ORDER TABLE
// ============================================================================

/// The head-office ordering of groups and sub-groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalOrder {
    /// Groups in display order.
    groups: Vec<String>,

    /// Per-group sub-group display order.
    sub_groups: HashMap<String, Vec<String>>,
}

impl CanonicalOrder {
    pub fn new(groups: Vec<impl Into<String>>) -> Self {
        CanonicalOrder {
            groups: groups.into_iter().map(Into::into).collect(),
            sub_groups: HashMap::new(),
        }
    }

    /// Sets the sub-group order for one group.
    pub fn with_sub_groups(mut self, group: impl Into<String>, subs: Vec<impl Into<String>>) -> Self {
        self.sub_groups
            .insert(group.into(), subs.into_iter().map(Into::into).collect());
        self
    }

    /// True when no groups are listed; sorting then degrades to
    /// alphabetical.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

// ============================================================================
// SORTING
// ============================================================================

fn rank_cmp(a: Option<&usize>, b: Option<&usize>, tie: impl FnOnce() -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => tie(),
    }
}

/// Manual position, then display key. Entities with a manual position
/// sort before those without one.
fn manual_then_display(a: &Entity, b: &Entity) -> Ordering {
    let manual = match (a.sort_order, b.sort_order) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    manual.then_with(|| a.display_key.cmp(&b.display_key))
}

/// Returns the entities in canonical report order.
///
/// The sort is stable, so fully tied entities keep their input order
/// and repeated runs over the same input produce the same row order.
pub fn sorted<'a>(entities: &'a [Entity], order: &CanonicalOrder) -> Vec<&'a Entity> {
    let mut refs: Vec<&Entity> = entities.iter().collect();

    if order.is_empty() {
        refs.sort_by(|a, b| {
            a.group_key
                .cmp(&b.group_key)
                .then_with(|| a.sub_group_key.cmp(&b.sub_group_key))
                .then_with(|| manual_then_display(a, b))
        });
        return refs;
    }

    let group_rank: FxHashMap<&str, usize> = order
        .groups
        .iter()
        .enumerate()
        .map(|(i, g)| (g.as_str(), i))
        .collect();
    let sub_rank: FxHashMap<(&str, &str), usize> = order
        .sub_groups
        .iter()
        .flat_map(|(group, subs)| {
            subs.iter()
                .enumerate()
                .map(move |(i, s)| ((group.as_str(), s.as_str()), i))
        })
        .collect();

    refs.sort_by(|a, b| {
        rank_cmp(
            group_rank.get(a.group_key.as_str()),
            group_rank.get(b.group_key.as_str()),
            || a.group_key.cmp(&b.group_key),
        )
        .then_with(|| {
            // Group ranks tied, so both entities share a group here.
            rank_cmp(
                sub_rank.get(&(a.group_key.as_str(), a.sub_group_key.as_str())),
                sub_rank.get(&(b.group_key.as_str(), b.sub_group_key.as_str())),
                || a.sub_group_key.cmp(&b.sub_group_key),
            )
        })
        .then_with(|| manual_then_display(a, b))
    });
    refs
}
