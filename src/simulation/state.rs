//! Game state store

use crate::city::{BuildingCatalog, BuildingStore, BuildingType, Ledger};
use crate::core::config::GameConfig;
use crate::core::types::GridCoord;

/// Everything a transition reads or writes.
///
/// Pass it through [`crate::simulation::reduce`] (or [`GameState::dispatch`])
/// to advance the game; rendering only ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub ledger: Ledger,
    pub buildings: BuildingStore,
    /// Building type a click on an empty cell will place (`None` = removal mode)
    pub selected: Option<BuildingType>,
    pub(crate) catalog: BuildingCatalog,
    pub(crate) grid_size: u32,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            ledger: config.initial,
            buildings: BuildingStore::new(),
            selected: config.initial_selection,
            catalog: config.costs,
            grid_size: config.grid_size,
        }
    }

    pub fn catalog(&self) -> &BuildingCatalog {
        &self.catalog
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn in_bounds(&self, cell: GridCoord) -> bool {
        cell.in_bounds(self.grid_size)
    }

    /// True if a click on `cell` with the current selection would place a building
    pub fn can_place(&self, cell: GridCoord) -> bool {
        match self.selected {
            Some(building_type) => {
                self.in_bounds(cell)
                    && !self.buildings.is_occupied(cell)
                    && self.catalog.can_afford(building_type, self.ledger.money)
            }
            None => false,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
