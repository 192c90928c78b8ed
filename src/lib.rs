//! City Builder - grid city-building game
//!
//! Buildings are placed on a square grid from a fixed palette; each
//! placement spends money and applies a one-time effect to the ledger,
//! each removal refunds half the cost. All state changes go through
//! [`simulation::reduce`].

pub mod city;
pub mod core;
pub mod render;
pub mod simulation;
pub mod ui;
