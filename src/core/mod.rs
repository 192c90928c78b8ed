pub mod config;
pub mod error;
pub mod types;

pub use config::GameConfig;
pub use error::{CityError, Result};
pub use types::{BuildingId, GridCoord};
