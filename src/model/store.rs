//! The top-level collection of areas and its merge protocol.

use std::collections::BTreeMap;

use crate::error::{StatsError, StatsResult};

use super::{Area, upsert_by_key};

/// All ingested areas, keyed by lowercase authority code.
///
/// There is exactly one [`Area`] per case-insensitive authority code. Iteration is ordered by
/// that lowercase code. Populate it with [`AreaStore::populate`] or
/// [`crate::ingestion::ingest_from_path`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaStore {
    areas: BTreeMap<String, Area>,
}

impl AreaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `area` under `code`, or combine it into the existing area with [`Area::combine`].
    pub fn upsert_area(&mut self, code: &str, area: Area) {
        upsert_by_key(&mut self.areas, code.to_lowercase(), area, Area::combine);
    }

    /// Area stored under `code`, matched case-insensitively.
    pub fn area(&self, code: &str) -> StatsResult<&Area> {
        self.areas
            .get(&code.to_lowercase())
            .ok_or_else(|| StatsError::not_found(format!("no area found matching {code}")))
    }

    pub fn area_mut(&mut self, code: &str) -> StatsResult<&mut Area> {
        self.areas
            .get_mut(&code.to_lowercase())
            .ok_or_else(|| StatsError::not_found(format!("no area found matching {code}")))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.areas.contains_key(&code.to_lowercase())
    }

    /// Number of distinct areas.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Areas keyed by lowercase authority code.
    pub fn areas(&self) -> &BTreeMap<String, Area> {
        &self.areas
    }

    /// Areas in authority-code order.
    pub fn iter(&self) -> impl Iterator<Item = &Area> {
        self.areas.values()
    }
}
