//! Terminal front end - owns the game state and runs the event loop

use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::types::GridCoord;
use crate::render::SpriteCache;
use crate::simulation::{Action, GameState};
use crate::ui::display::{self, View};
use crate::ui::input::{self, InputCommand};
use crate::ui::state::UiState;
use crossterm::{
    cursor::Show,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;
use tokio::runtime::Handle;

/// How long to wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Game plus everything the terminal front end needs to draw it
#[derive(Debug)]
pub struct App {
    pub state: GameState,
    pub ui: UiState,
    pub sprites: SpriteCache,
    pub config: GameConfig,
}

impl App {
    pub fn new(config: GameConfig, sprites: SpriteCache) -> Self {
        Self {
            state: GameState::new(&config),
            ui: UiState::new(),
            sprites,
            config,
        }
    }

    /// Apply one input command
    pub fn handle(&mut self, command: InputCommand) {
        match command {
            InputCommand::Quit => self.ui.should_quit = true,
            InputCommand::Select(Some(building_type))
                if !self
                    .state
                    .catalog()
                    .can_afford(building_type, self.state.ledger.money) =>
            {
                // palette entry is disabled
                tracing::debug!(building = %building_type, "Cannot afford selection");
            }
            InputCommand::Select(selection) => {
                self.state.dispatch(Action::Select(selection));
                if selection.is_none() {
                    self.ui.hovered = None;
                }
            }
            InputCommand::Click { column, row } => {
                if let Some(selection) = self.ui.palette_entry(column, row) {
                    self.handle(InputCommand::Select(selection));
                } else if let Some(cell) = self.cell_under(column, row) {
                    let outcome = self.state.dispatch(Action::Click(cell));
                    self.ui.record(&outcome);
                }
            }
            InputCommand::Hover { column, row } => {
                let cell = self.cell_under(column, row);
                self.ui.hover(cell, self.state.selected);
            }
        }
    }

    fn cell_under(&self, column: u16, row: u16) -> Option<GridCoord> {
        self.ui.pointer_cell(
            column,
            row,
            self.config.cell_width,
            self.config.cell_height,
            self.config.grid_size,
        )
    }

    /// Redraws only after input, a resize, or a newly loaded sprite
    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut dirty = true;
        while !self.ui.should_quit {
            dirty |= self.sprites.poll();

            if dirty {
                let view = View {
                    state: &self.state,
                    sprites: &self.sprites,
                    config: &self.config,
                };
                let ui = &mut self.ui;
                terminal.draw(|frame| display::draw(frame, &view, ui))?;
                dirty = false;
            }

            if event::poll(POLL_INTERVAL)? {
                let event = event::read()?;
                if let Some(command) = input::translate(&event) {
                    self.handle(command);
                }
                dirty = true;
            }
        }
        Ok(())
    }
}

/// Raw mode, alternate screen and mouse capture, undone on drop
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self { out };
        execute!(guard.out, EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }

    fn restore(&mut self) -> io::Result<()> {
        let raw = disable_raw_mode();
        let screen = execute!(self.out, LeaveAlternateScreen, DisableMouseCapture, Show);
        raw.and(screen)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!(error = %e, "Failed to restore terminal");
        }
    }
}

/// Run the game until the player quits
pub fn run(config: GameConfig, runtime: &Handle) -> Result<()> {
    let sprites = SpriteCache::spawn_loading(
        runtime,
        &config.assets_dir,
        u32::from(config.cell_width),
        u32::from(config.cell_height) * 2,
    );
    let mut app = App::new(config, sprites);

    let guard = TerminalGuard::enter(stdout())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    tracing::info!(grid_size = app.config.grid_size, "City Builder started");
    let result = app.event_loop(&mut terminal);
    drop(guard);

    tracing::info!(
        buildings = app.state.buildings.len(),
        money = app.state.ledger.money,
        "City Builder exited"
    );
    result
}
