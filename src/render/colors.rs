//! Color definitions for buildings and grid overlays

use crate::city::BuildingType;
use ratatui::style::Color;

/// Grass background behind the grid
pub const BACKGROUND: Color = Color::Rgb(74, 124, 58);

/// Faint grid lines
pub const GRID_LINE: Color = Color::Rgb(96, 146, 80);

/// Hovered cell that can be built on
pub const HOVER_BUILDABLE: Color = Color::Rgb(84, 190, 84);

/// Hovered cell that already holds a building
pub const HOVER_OCCUPIED: Color = Color::Rgb(190, 70, 60);

/// Block color drawn when a building has no sprite
pub fn fallback_color(building_type: BuildingType) -> Color {
    match building_type {
        BuildingType::House => Color::Rgb(0xFF, 0x6B, 0x35),   // Orange
        BuildingType::Office => Color::Rgb(0x4A, 0x90, 0xE2),  // Blue
        BuildingType::Factory => Color::Rgb(0x8B, 0x00, 0x00), // Dark red
        BuildingType::Shop => Color::Rgb(0xFF, 0xD7, 0x00),    // Gold
    }
}

/// Hover highlight for a cell, green if it can be built on, red if occupied
pub fn hover_color(occupied: bool) -> Color {
    if occupied {
        HOVER_OCCUPIED
    } else {
        HOVER_BUILDABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_colors_are_distinct() {
        let colors: Vec<Color> = BuildingType::ALL.iter().map(|t| fallback_color(*t)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_hover_color() {
        assert_eq!(hover_color(true), HOVER_OCCUPIED);
        assert_eq!(hover_color(false), HOVER_BUILDABLE);
    }
}
