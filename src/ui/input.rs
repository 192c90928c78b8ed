//! Input translation - terminal events to UI commands, pointer offsets to cells

use crate::city::BuildingType;
use crate::core::types::GridCoord;
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};

/// What a terminal event asks the UI to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Quit,
    /// Palette selection (`None` = removal mode)
    Select(Option<BuildingType>),
    /// Left click at an absolute terminal position
    Click { column: u16, row: u16 },
    /// Pointer moved to an absolute terminal position
    Hover { column: u16, row: u16 },
}

/// Map a terminal event to a command, ignoring anything the game doesn't use
pub fn translate(event: &Event) -> Option<InputCommand> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(InputCommand::Quit),
            KeyCode::Char('0') | KeyCode::Char('x') => Some(InputCommand::Select(None)),
            KeyCode::Char(c @ '1'..='4') => {
                let index = (c as usize) - ('1' as usize);
                Some(InputCommand::Select(Some(BuildingType::ALL[index])))
            }
            _ => None,
        },
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(InputCommand::Click {
                column: mouse.column,
                row: mouse.row,
            }),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(InputCommand::Hover {
                column: mouse.column,
                row: mouse.row,
            }),
            _ => None,
        },
        _ => None,
    }
}

/// Grid cell under a pointer offset measured from the canvas origin.
///
/// Floor-divides the offset by the cell size; returns `None` when the
/// result is outside `[0, grid_size)` on either axis.
pub fn cell_at(
    offset_x: i32,
    offset_y: i32,
    cell_width: u16,
    cell_height: u16,
    grid_size: u32,
) -> Option<GridCoord> {
    if cell_width == 0 || cell_height == 0 {
        return None;
    }
    let x = offset_x.div_euclid(i32::from(cell_width));
    let y = offset_y.div_euclid(i32::from(cell_height));
    let x = u32::try_from(x).ok()?;
    let y = u32::try_from(y).ok()?;

    let cell = GridCoord::new(x, y);
    cell.in_bounds(grid_size).then_some(cell)
}
