//! UI module - ratatui front end for the city grid

pub mod display;
pub mod input;
pub mod state;
pub mod terminal;

pub use state::UiState;
pub use terminal::{run, App};
