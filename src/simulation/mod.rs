//! Simulation - game state and the transitions that change it

pub mod script;
pub mod state;
pub mod transition;

pub use script::{parse_script, run_script, ScriptCommand, Snapshot};
pub use state::GameState;
pub use transition::{reduce, Action, Outcome, Rejection};
