//! Headless script runner
//!
//! Drives the same transitions the terminal UI uses, one command per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! select factory
//! click 3 4
//! place shop 0 0
//! remove 3 4
//! select none
//! ```

use crate::city::{Building, BuildingType, Ledger};
use crate::core::error::{CityError, Result};
use crate::core::types::GridCoord;
use crate::simulation::state::GameState;
use crate::simulation::transition::{Action, Outcome};
use serde::Serialize;

/// One parsed script line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptCommand {
    Select(Option<BuildingType>),
    Click(GridCoord),
    Place {
        building_type: BuildingType,
        cell: GridCoord,
    },
    /// Remove whatever occupies the cell
    RemoveAt(GridCoord),
}

/// Final state of a script run
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub ledger: Ledger,
    pub selected: Option<BuildingType>,
    pub buildings: Vec<Building>,
    /// Commands that changed the state
    pub applied: usize,
    /// Commands that were silently ignored
    pub ignored: usize,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse a whole script, keeping 1-based line numbers
pub fn parse_script(source: &str) -> Result<Vec<(usize, ScriptCommand)>> {
    let mut commands = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let command = parse_line(text).map_err(|message| CityError::Script { line, message })?;
        commands.push((line, command));
    }
    Ok(commands)
}

fn parse_line(text: &str) -> std::result::Result<ScriptCommand, String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    match words.as_slice() {
        ["select", "none"] => Ok(ScriptCommand::Select(None)),
        ["select", kind] => Ok(ScriptCommand::Select(Some(kind.parse()?))),
        ["click", x, y] => Ok(ScriptCommand::Click(parse_cell(x, y)?)),
        ["place", kind, x, y] => Ok(ScriptCommand::Place {
            building_type: kind.parse()?,
            cell: parse_cell(x, y)?,
        }),
        ["remove", x, y] => Ok(ScriptCommand::RemoveAt(parse_cell(x, y)?)),
        [verb, ..] => Err(format!("unrecognized command '{verb}' ({} args)", words.len() - 1)),
        [] => Err("empty command".into()),
    }
}

fn parse_cell(x: &str, y: &str) -> std::result::Result<GridCoord, String> {
    let x = x
        .parse::<u32>()
        .map_err(|e| format!("invalid x coordinate '{x}': {e}"))?;
    let y = y
        .parse::<u32>()
        .map_err(|e| format!("invalid y coordinate '{y}': {e}"))?;
    Ok(GridCoord::new(x, y))
}

/// Parse `source` and run it against `state`
pub fn run_script(mut state: GameState, source: &str) -> Result<Snapshot> {
    let commands = parse_script(source)?;
    let mut applied = 0;
    let mut ignored = 0;

    for (line, command) in commands {
        let outcome = match command {
            ScriptCommand::Select(selection) => state.dispatch(Action::Select(selection)),
            ScriptCommand::Click(cell) => state.dispatch(Action::Click(cell)),
            ScriptCommand::Place {
                building_type,
                cell,
            } => state.dispatch(Action::Place {
                building_type,
                cell,
            }),
            ScriptCommand::RemoveAt(cell) => match state.buildings.at(cell).map(|b| b.id) {
                Some(id) => state.dispatch(Action::Remove(id)),
                None => {
                    tracing::debug!(line, %cell, "Nothing to remove");
                    ignored += 1;
                    continue;
                }
            },
        };

        if outcome.is_applied() {
            applied += 1;
        } else {
            ignored += 1;
        }
        if let Outcome::Ignored(rejection) = outcome {
            tracing::debug!(line, %rejection, "Script command ignored");
        }
    }

    tracing::info!(applied, ignored, "Script finished");
    Ok(Snapshot {
        ledger: state.ledger,
        selected: state.selected,
        buildings: state.buildings.iter().copied().collect(),
        applied,
        ignored,
    })
}
