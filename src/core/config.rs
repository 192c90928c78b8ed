//! Game configuration with documented defaults
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```toml
//! grid_size = 12
//! initial_selection = "shop"
//!
//! [costs]
//! factory = 450
//! ```

use crate::city::building::{BuildingCatalog, BuildingType};
use crate::city::ledger::Ledger;
use crate::core::error::{CityError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Startup configuration. Read once; nothing here changes during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells per side of the square placement grid
    pub grid_size: u32,

    /// Terminal columns per grid cell
    ///
    /// Terminal glyphs are roughly twice as tall as they are wide, so two
    /// columns by one row draws a cell that looks square.
    pub cell_width: u16,

    /// Terminal rows per grid cell
    pub cell_height: u16,

    /// Ledger at the start of a session
    pub initial: Ledger,

    /// Price of each building type
    pub costs: BuildingCatalog,

    /// Building type selected when the game starts (`None` = removal mode)
    pub initial_selection: Option<BuildingType>,

    /// Directory holding `<type>.png` sprites
    pub assets_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            cell_width: 2,
            cell_height: 1,
            initial: Ledger::default(),
            costs: BuildingCatalog::default(),
            initial_selection: Some(BuildingType::House),
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse and validate a config from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(CityError::Config("grid_size must be at least 1".into()));
        }

        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(CityError::Config(format!(
                "cell size must be non-zero (got {}x{})",
                self.cell_width, self.cell_height
            )));
        }

        // the canvas plus its border must fit a terminal's u16 extent
        let extent = |cells: u16| {
            u16::try_from(self.grid_size)
                .ok()
                .and_then(|size| size.checked_mul(cells))
                .and_then(|span| span.checked_add(2))
        };
        if extent(self.cell_width).is_none() || extent(self.cell_height).is_none() {
            return Err(CityError::Config(format!(
                "grid_size {} is too large for {}x{} cells",
                self.grid_size, self.cell_width, self.cell_height
            )));
        }

        for building_type in BuildingType::ALL {
            let cost = self.costs.cost(building_type);
            if cost < 0 {
                return Err(CityError::Config(format!(
                    "cost of {building_type} must not be negative (got {cost})"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.initial_selection, Some(BuildingType::House));
        assert_eq!(config.initial, Ledger::default());
    }

    #[test]
    fn test_partial_override() {
        let config = GameConfig::parse(
            r#"
            grid_size = 8
            initial_selection = "shop"

            [costs]
            factory = 450

            [initial]
            money = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.grid_size, 8);
        assert_eq!(config.initial_selection, Some(BuildingType::Shop));
        assert_eq!(config.costs.factory, 450);
        assert_eq!(config.costs.house, 100);
        assert_eq!(config.initial.money, 50);
        assert_eq!(config.initial.happiness, 50);
        assert_eq!(config.cell_width, 2);
    }

    #[test]
    fn test_rejects_zero_grid() {
        let err = GameConfig::parse("grid_size = 0").unwrap_err();
        assert!(matches!(err, CityError::Config(_)));
    }

    #[test]
    fn test_rejects_zero_cell_size() {
        let err = GameConfig::parse("cell_height = 0").unwrap_err();
        assert!(err.to_string().contains("cell size"));
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let err = GameConfig::parse("grid_size = 4000000000\ncell_height = 2").unwrap_err();
        assert!(matches!(err, CityError::Config(_)));
        assert!(err.to_string().contains("too large"));

        let err = GameConfig::parse("grid_size = 40000").unwrap_err();
        assert!(matches!(err, CityError::Config(_)));

        let config = GameConfig::parse("grid_size = 32766\ncell_width = 1").unwrap();
        assert_eq!(config.grid_size, 32766);
    }

    #[test]
    fn test_rejects_negative_cost() {
        let err = GameConfig::parse("[costs]\nshop = -1").unwrap_err();
        assert!(err.to_string().contains("shop"));
    }

    #[test]
    fn test_rejects_unknown_building_type() {
        let err = GameConfig::parse("initial_selection = \"castle\"").unwrap_err();
        assert!(matches!(err, CityError::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "grid_size = 5").unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.grid_size, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load(Path::new("/nonexistent/city.toml")).unwrap_err();
        assert!(matches!(err, CityError::Io(_)));
    }
}
