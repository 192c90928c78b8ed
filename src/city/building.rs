//! Building types, placed buildings, and the cost catalog

use crate::city::ledger::LedgerDelta;
use crate::core::types::{BuildingId, GridCoord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type of building available in the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingType {
    House,
    Office,
    Factory,
    Shop,
}

impl BuildingType {
    /// Palette order
    pub const ALL: [BuildingType; 4] = [
        BuildingType::House,
        BuildingType::Office,
        BuildingType::Factory,
        BuildingType::Shop,
    ];

    /// One-time ledger effect applied when this building is placed.
    ///
    /// The effect is never reversed on removal; only money is partially
    /// refunded (see [`BuildingCatalog::refund`]).
    pub fn effect(&self) -> LedgerDelta {
        match self {
            BuildingType::House => LedgerDelta {
                population: 4,
                ..LedgerDelta::default()
            },
            BuildingType::Office => LedgerDelta {
                money: 50,
                ..LedgerDelta::default()
            },
            BuildingType::Factory => LedgerDelta {
                power: 20,
                happiness: -5,
                ..LedgerDelta::default()
            },
            BuildingType::Shop => LedgerDelta {
                happiness: 10,
                money: 25,
                ..LedgerDelta::default()
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuildingType::House => "House",
            BuildingType::Office => "Office",
            BuildingType::Factory => "Factory",
            BuildingType::Shop => "Shop",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BuildingType::House => "Provides population",
            BuildingType::Office => "Generates income",
            BuildingType::Factory => "Generates power",
            BuildingType::Shop => "Boosts happiness",
        }
    }

    /// Human-readable summary of [`BuildingType::effect`]
    pub fn effect_label(&self) -> &'static str {
        match self {
            BuildingType::House => "+4 Population",
            BuildingType::Office => "+$50 Income",
            BuildingType::Factory => "+20 Power, -5 Happiness",
            BuildingType::Shop => "+10 Happiness, +$25 Income",
        }
    }

    /// Lowercase identifier, also used for sprite file names
    pub fn key(&self) -> &'static str {
        match self {
            BuildingType::House => "house",
            BuildingType::Office => "office",
            BuildingType::Factory => "factory",
            BuildingType::Shop => "shop",
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BuildingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "house" => Ok(BuildingType::House),
            "office" => Ok(BuildingType::Office),
            "factory" => Ok(BuildingType::Factory),
            "shop" => Ok(BuildingType::Shop),
            other => Err(format!("unknown building type '{other}'")),
        }
    }
}

/// A building placed on the grid. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    #[serde(rename = "type")]
    pub building_type: BuildingType,
    pub x: u32,
    pub y: u32,
}

impl Building {
    pub fn new(building_type: BuildingType, cell: GridCoord) -> Self {
        Self {
            id: BuildingId::new(),
            building_type,
            x: cell.x,
            y: cell.y,
        }
    }

    pub fn cell(&self) -> GridCoord {
        GridCoord::new(self.x, self.y)
    }
}

/// Price of each building type, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingCatalog {
    pub house: i64,
    pub office: i64,
    pub factory: i64,
    pub shop: i64,
}

impl Default for BuildingCatalog {
    fn default() -> Self {
        Self {
            house: 100,
            office: 200,
            factory: 300,
            shop: 150,
        }
    }
}

impl BuildingCatalog {
    pub fn cost(&self, building_type: BuildingType) -> i64 {
        match building_type {
            BuildingType::House => self.house,
            BuildingType::Office => self.office,
            BuildingType::Factory => self.factory,
            BuildingType::Shop => self.shop,
        }
    }

    /// Money returned when a building of this type is removed: half the cost, rounded down
    pub fn refund(&self, building_type: BuildingType) -> i64 {
        self.cost(building_type).div_euclid(2)
    }

    pub fn can_afford(&self, building_type: BuildingType, money: i64) -> bool {
        money >= self.cost(building_type)
    }
}
