//! Transition function - the only code that changes a [`GameState`]
//!
//! Every action is validated against the current state before anything is
//! written, so a transition either applies completely or leaves the state
//! exactly as it was.

use crate::city::{Building, BuildingType};
use crate::core::types::{BuildingId, GridCoord};
use crate::simulation::state::GameState;
use thiserror::Error;

/// Something the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Change the palette selection (`None` = removal mode)
    Select(Option<BuildingType>),
    /// Click a cell: removes the occupant if there is one, otherwise places the selection
    Click(GridCoord),
    /// Place a specific building type regardless of the selection
    Place {
        building_type: BuildingType,
        cell: GridCoord,
    },
    /// Remove a building by id
    Remove(BuildingId),
}

/// Why an action left the state untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no building type selected")]
    NoSelection,
    #[error("cell {0} is already occupied")]
    Occupied(GridCoord),
    #[error("cell {0} is outside the grid")]
    OutOfBounds(GridCoord),
    #[error("costs ${cost}, only ${available} available")]
    InsufficientFunds { cost: i64, available: i64 },
    #[error("no building with id {0}")]
    UnknownBuilding(BuildingId),
}

/// Result of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Placed {
        id: BuildingId,
        building_type: BuildingType,
        cell: GridCoord,
        cost: i64,
    },
    Removed {
        id: BuildingId,
        building_type: BuildingType,
        cell: GridCoord,
        refund: i64,
    },
    Selected(Option<BuildingType>),
    /// Nothing changed
    Ignored(Rejection),
}

impl Outcome {
    /// True if the transition changed the state
    pub fn is_applied(&self) -> bool {
        !matches!(self, Outcome::Ignored(_))
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Outcome::Ignored(rejection) => Some(*rejection),
            _ => None,
        }
    }
}

/// Apply `action` to `state`, returning the next state and what happened
pub fn reduce(mut state: GameState, action: Action) -> (GameState, Outcome) {
    let outcome = state.dispatch(action);
    (state, outcome)
}

impl GameState {
    /// Apply `action` in place
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        let outcome = match action {
            Action::Select(selection) => {
                self.selected = selection;
                Outcome::Selected(selection)
            }
            Action::Click(cell) => self.click(cell),
            Action::Place {
                building_type,
                cell,
            } => self.place(Some(building_type), cell),
            Action::Remove(id) => self.remove(id),
        };

        if let Outcome::Ignored(rejection) = outcome {
            tracing::debug!(?action, %rejection, "Action ignored");
        }
        outcome
    }

    fn click(&mut self, cell: GridCoord) -> Outcome {
        if !self.in_bounds(cell) {
            return Outcome::Ignored(Rejection::OutOfBounds(cell));
        }
        match self.buildings.at(cell).map(|b| b.id) {
            Some(occupant) => self.remove(occupant),
            None => self.place(self.selected, cell),
        }
    }

    fn place(&mut self, building_type: Option<BuildingType>, cell: GridCoord) -> Outcome {
        let Some(building_type) = building_type else {
            return Outcome::Ignored(Rejection::NoSelection);
        };
        if !self.in_bounds(cell) {
            return Outcome::Ignored(Rejection::OutOfBounds(cell));
        }
        if self.buildings.is_occupied(cell) {
            return Outcome::Ignored(Rejection::Occupied(cell));
        }
        let cost = self.catalog.cost(building_type);
        if self.ledger.money < cost {
            return Outcome::Ignored(Rejection::InsufficientFunds {
                cost,
                available: self.ledger.money,
            });
        }

        let building = Building::new(building_type, cell);
        if !self.buildings.insert(building) {
            return Outcome::Ignored(Rejection::Occupied(cell));
        }
        self.ledger = self.ledger.spend(cost).apply(building_type.effect());

        tracing::info!(
            id = %building.id,
            building = %building_type,
            %cell,
            cost,
            money = self.ledger.money,
            "Placed building"
        );
        Outcome::Placed {
            id: building.id,
            building_type,
            cell,
            cost,
        }
    }

    fn remove(&mut self, id: BuildingId) -> Outcome {
        let Some(building) = self.buildings.remove(id) else {
            return Outcome::Ignored(Rejection::UnknownBuilding(id));
        };

        // Only money comes back; the placement effect stays applied.
        let refund = self.catalog.refund(building.building_type);
        self.ledger = self.ledger.credit(refund);

        tracing::info!(
            %id,
            building = %building.building_type,
            cell = %building.cell(),
            refund,
            money = self.ledger.money,
            "Removed building"
        );
        Outcome::Removed {
            id,
            building_type: building.building_type,
            cell: building.cell(),
            refund,
        }
    }
}
