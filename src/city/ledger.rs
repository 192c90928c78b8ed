//! Ledger - the city's four resource counters

use serde::{Deserialize, Serialize};

/// Upper bound used when displaying happiness and power as a percentage
pub const DISPLAY_MAX: i64 = 100;

/// City-wide resource counters.
///
/// Happiness and power are not clamped here; only the display clamps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ledger {
    pub money: i64,
    pub population: i64,
    pub happiness: i64,
    pub power: i64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            money: 1000,
            population: 0,
            happiness: 50,
            power: 100,
        }
    }
}

/// Change applied to every counter of a [`Ledger`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerDelta {
    pub money: i64,
    pub population: i64,
    pub happiness: i64,
    pub power: i64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the ledger with `delta` applied to every counter
    #[must_use]
    pub fn apply(self, delta: LedgerDelta) -> Self {
        Self {
            money: self.money + delta.money,
            population: self.population + delta.population,
            happiness: self.happiness + delta.happiness,
            power: self.power + delta.power,
        }
    }

    /// Return the ledger with `amount` subtracted from money
    #[must_use]
    pub fn spend(self, amount: i64) -> Self {
        Self {
            money: self.money - amount,
            ..self
        }
    }

    /// Return the ledger with `amount` added to money
    #[must_use]
    pub fn credit(self, amount: i64) -> Self {
        Self {
            money: self.money + amount,
            ..self
        }
    }

    pub fn display_happiness(&self) -> i64 {
        self.happiness.clamp(0, DISPLAY_MAX)
    }

    pub fn display_power(&self) -> i64 {
        self.power.clamp(0, DISPLAY_MAX)
    }
}
