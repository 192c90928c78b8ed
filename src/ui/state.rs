//! UI state - everything the terminal front end tracks besides the game itself

use crate::city::BuildingType;
use crate::core::types::GridCoord;
use crate::simulation::Outcome;
use crate::ui::display::PALETTE_ENTRY_ROWS;
use crate::ui::input::cell_at;
use ratatui::layout::Rect;
use std::collections::VecDeque;

/// Maximum event log entries to keep
const MAX_LOG_ENTRIES: usize = 50;

/// Terminal UI state
#[derive(Debug, Default)]
pub struct UiState {
    /// Cell under the pointer, tracked only while a building type is selected
    pub hovered: Option<GridCoord>,
    /// Inner area of the grid canvas as last drawn
    pub canvas: Rect,
    /// Inner area of the palette list as last drawn
    pub palette: Rect,
    /// Recent placements and removals, oldest first
    pub event_log: VecDeque<String>,
    pub should_quit: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            hovered: None,
            canvas: Rect::default(),
            palette: Rect::default(),
            event_log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            should_quit: false,
        }
    }

    /// Grid cell under an absolute terminal position, `None` outside the canvas
    pub fn pointer_cell(
        &self,
        column: u16,
        row: u16,
        cell_width: u16,
        cell_height: u16,
        grid_size: u32,
    ) -> Option<GridCoord> {
        if !contains(self.canvas, column, row) {
            return None;
        }
        let offset_x = i32::from(column) - i32::from(self.canvas.x);
        let offset_y = i32::from(row) - i32::from(self.canvas.y);
        cell_at(offset_x, offset_y, cell_width, cell_height, grid_size)
    }

    /// Palette entry under an absolute terminal position.
    ///
    /// `Some(None)` is the removal-mode entry; `None` means no entry was hit.
    pub fn palette_entry(&self, column: u16, row: u16) -> Option<Option<BuildingType>> {
        if !contains(self.palette, column, row) {
            return None;
        }
        let index = usize::from((row - self.palette.y) / PALETTE_ENTRY_ROWS);
        match index.cmp(&BuildingType::ALL.len()) {
            std::cmp::Ordering::Less => Some(Some(BuildingType::ALL[index])),
            std::cmp::Ordering::Equal => Some(None),
            std::cmp::Ordering::Greater => None,
        }
    }

    /// Track the hovered cell; cleared when nothing is selected
    pub fn hover(&mut self, cell: Option<GridCoord>, selected: Option<BuildingType>) {
        self.hovered = selected.and(cell);
    }

    /// Log applied outcomes. Ignored actions stay silent.
    pub fn record(&mut self, outcome: &Outcome) {
        let message = match outcome {
            Outcome::Placed {
                building_type,
                cell,
                cost,
                ..
            } => format!("Built {} at {cell} for ${cost}", building_type.name()),
            Outcome::Removed {
                building_type,
                cell,
                refund,
                ..
            } => format!("Removed {} at {cell}, refunded ${refund}", building_type.name()),
            Outcome::Selected(_) | Outcome::Ignored(_) => return,
        };

        if self.event_log.len() >= MAX_LOG_ENTRIES {
            self.event_log.pop_front();
        }
        self.event_log.push_back(message);
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}
