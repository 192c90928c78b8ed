//! Building store - insertion-ordered collection of placed buildings

use crate::city::building::Building;
use crate::core::types::{BuildingId, GridCoord};
use serde::{Deserialize, Serialize};

/// Placed buildings in the order they were built.
///
/// Holds at most one building per cell. The store itself does not key by
/// cell; [`BuildingStore::insert`] checks occupancy before pushing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingStore {
    buildings: Vec<Building>,
}

impl BuildingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Building> + '_ {
        self.buildings.iter()
    }

    pub fn at(&self, cell: GridCoord) -> Option<&Building> {
        self.buildings.iter().find(|b| b.cell() == cell)
    }

    pub fn is_occupied(&self, cell: GridCoord) -> bool {
        self.at(cell).is_some()
    }

    pub fn get(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    /// Append a building, returns false (and stores nothing) if its cell is taken
    pub fn insert(&mut self, building: Building) -> bool {
        if self.is_occupied(building.cell()) {
            return false;
        }
        self.buildings.push(building);
        true
    }

    /// Remove a building by id, preserving the order of the rest
    pub fn remove(&mut self, id: BuildingId) -> Option<Building> {
        let index = self.buildings.iter().position(|b| b.id == id)?;
        Some(self.buildings.remove(index))
    }
}
