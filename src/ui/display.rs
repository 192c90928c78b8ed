//! Drawing the game into a ratatui frame

use crate::city::BuildingType;
use crate::core::config::GameConfig;
use crate::core::types::GridCoord;
use crate::render::colors::{self, BACKGROUND, GRID_LINE};
use crate::render::SpriteCache;
use crate::simulation::GameState;
use crate::ui::state::UiState;
use ahash::AHashMap;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

/// Width of the stats/palette column
const SIDE_PANEL_WIDTH: u16 = 36;

/// Terminal rows per palette entry
pub const PALETTE_ENTRY_ROWS: u16 = 3;

/// Upper half block: foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '▀';

/// Everything the draw code reads
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub state: &'a GameState,
    pub sprites: &'a SpriteCache,
    pub config: &'a GameConfig,
}

/// Screen regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Canvas block including its border
    pub canvas: Rect,
    pub stats: Rect,
    pub palette: Rect,
    pub log: Rect,
}

pub fn layout(area: Rect, config: &GameConfig) -> ScreenLayout {
    let grid = u16::try_from(config.grid_size).unwrap_or(u16::MAX);
    let canvas_width = grid.saturating_mul(config.cell_width).saturating_add(2);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(canvas_width),
            Constraint::Min(SIDE_PANEL_WIDTH),
        ])
        .split(area);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),  // Stats
            Constraint::Min(14),    // Palette
            Constraint::Length(8),  // Event log
        ])
        .split(columns[1]);

    ScreenLayout {
        canvas: columns[0],
        stats: side[0],
        palette: side[1],
        log: side[2],
    }
}

/// Draw one frame and remember where the canvas and palette landed for pointer mapping
pub fn draw(frame: &mut Frame, view: &View, ui: &mut UiState) {
    let regions = layout(frame.size(), view.config);

    let canvas_block = Block::default()
        .borders(Borders::ALL)
        .title(" City Builder ");
    ui.canvas = canvas_block.inner(regions.canvas);
    frame.render_widget(
        Paragraph::new(grid_lines(view, ui.hovered)).block(canvas_block),
        regions.canvas,
    );

    draw_stats(frame, view, regions.stats);
    let palette_block = palette_block();
    ui.palette = palette_block.inner(regions.palette);
    frame.render_widget(palette(view.state).block(palette_block), regions.palette);
    frame.render_widget(event_log(ui, regions.log), regions.log);
}

/// Rows of the canvas: grid, hover highlight, then buildings
pub fn grid_lines(view: &View, hovered: Option<GridCoord>) -> Vec<Line<'static>> {
    let state = view.state;
    let (cell_width, cell_height) = (view.config.cell_width, view.config.cell_height);
    let hovered = hovered.filter(|_| state.selected.is_some());

    let occupied: AHashMap<GridCoord, BuildingType> = state
        .buildings
        .iter()
        .map(|b| (b.cell(), b.building_type))
        .collect();

    let side = state.grid_size() as usize;
    let mut lines = Vec::with_capacity(side.saturating_mul(usize::from(cell_height)));
    for y in 0..state.grid_size() {
        for sub_row in 0..cell_height {
            let mut spans = Vec::with_capacity(side.saturating_mul(usize::from(cell_width)));
            for x in 0..state.grid_size() {
                let cell = GridCoord::new(x, y);
                for sub_col in 0..cell_width {
                    let glyph = CellGlyph {
                        cell,
                        sub_col,
                        sub_row,
                        building: occupied.get(&cell).copied(),
                        hovered: hovered == Some(cell),
                    };
                    spans.push(glyph.render(view.sprites));
                }
            }
            lines.push(Line::from(spans));
        }
    }
    lines
}

/// One terminal column-row inside a grid cell
struct CellGlyph {
    cell: GridCoord,
    sub_col: u16,
    sub_row: u16,
    building: Option<BuildingType>,
    hovered: bool,
}

impl CellGlyph {
    fn render(&self, sprites: &SpriteCache) -> Span<'static> {
        let ground = if (self.cell.x + self.cell.y) % 2 == 0 {
            BACKGROUND
        } else {
            GRID_LINE
        };
        let is_corner = self.sub_col == 0 && self.sub_row == 0;

        if self.hovered {
            let style = Style::default()
                .bg(colors::hover_color(self.building.is_some()))
                .fg(Color::Black);
            let text = match self.building {
                Some(building_type) if is_corner => label(building_type),
                _ => ' ',
            };
            return Span::styled(text.to_string(), style);
        }

        let Some(building_type) = self.building else {
            return Span::styled(" ", Style::default().bg(ground));
        };

        match sprites.get(building_type) {
            Some(sprite) => {
                let px = u32::from(self.sub_col);
                let top = u32::from(self.sub_row) * 2;
                let fg = sprite.rgb(px, top).map_or(ground, rgb);
                let bg = sprite.rgb(px, top + 1).map_or(ground, rgb);
                Span::styled(HALF_BLOCK.to_string(), Style::default().fg(fg).bg(bg))
            }
            None => {
                let text = if is_corner { label(building_type) } else { ' ' };
                Span::styled(
                    text.to_string(),
                    Style::default()
                        .bg(colors::fallback_color(building_type))
                        .fg(Color::Black),
                )
            }
        }
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

fn label(building_type: BuildingType) -> char {
    building_type.name().chars().next().unwrap_or('?')
}

fn draw_stats(frame: &mut Frame, view: &View, area: Rect) {
    let ledger = view.state.ledger;
    let block = Block::default().borders(Borders::ALL).title(" City Stats ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Money
            Constraint::Length(1), // Population
            Constraint::Length(2), // Happiness
            Constraint::Length(2), // Power
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(stat_line("Money", format!("${}", ledger.money), Color::Yellow)),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(stat_line("Population", ledger.population.to_string(), Color::White)),
        rows[1],
    );
    frame.render_widget(
        meter(
            "Happiness",
            format!("{}%", ledger.happiness),
            ledger.display_happiness(),
            Color::Green,
        ),
        rows[2],
    );
    frame.render_widget(
        meter("Power", ledger.power.to_string(), ledger.display_power(), Color::Cyan),
        rows[3],
    );
}

fn stat_line(name: &'static str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{name:<12}")),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

/// Labelled gauge; `clamped` must already be within [0, 100]
fn meter(name: &'static str, value: String, clamped: i64, color: Color) -> Gauge<'static> {
    let percent = u16::try_from(clamped.clamp(0, 100)).unwrap_or(0);
    Gauge::default()
        .block(Block::default().title(format!("{name} {value}")))
        .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
        .percent(percent)
}

/// Palette entries, [`PALETTE_ENTRY_ROWS`] rows each. Unaffordable types are
/// dimmed and cannot be selected.
pub fn palette(state: &GameState) -> List<'static> {
    let money = state.ledger.money;
    let mut items: Vec<ListItem> = BuildingType::ALL
        .iter()
        .enumerate()
        .map(|(index, building_type)| {
            let cost = state.catalog().cost(*building_type);
            let affordable = state.catalog().can_afford(*building_type, money);
            let selected = state.selected == Some(*building_type);
            let style = entry_style(selected, affordable);

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!(
                            "{} [{}] {:<8}",
                            marker(selected),
                            index + 1,
                            building_type.name()
                        ),
                        style.add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("${cost}"), style.fg(Color::Yellow)),
                ]),
                Line::styled(format!("      {}", building_type.description()), style),
                Line::styled(
                    format!("      {}", building_type.effect_label()),
                    style.fg(Color::Cyan),
                ),
            ])
        })
        .collect();

    let removal = state.selected.is_none();
    items.push(ListItem::new(vec![
        Line::raw(""),
        Line::styled(
            format!("{} [0] Select mode (remove buildings)", marker(removal)),
            entry_style(removal, true),
        ),
        Line::styled(
            "  Click buildings to remove them for 50% refund",
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    List::new(items)
}

fn palette_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title(" Buildings ")
}

fn marker(selected: bool) -> &'static str {
    if selected {
        ">"
    } else {
        " "
    }
}

fn entry_style(selected: bool, enabled: bool) -> Style {
    if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if selected {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    }
}

fn event_log(ui: &UiState, area: Rect) -> Paragraph<'static> {
    let visible = usize::from(area.height.saturating_sub(2));
    let lines: Vec<Line> = ui
        .event_log
        .iter()
        .skip(ui.event_log.len().saturating_sub(visible))
        .map(|entry| Line::raw(entry.clone()))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Log  (1-4 build, 0 remove, q quit) ");
    Paragraph::new(lines).wrap(Wrap { trim: true }).block(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Sprite;
    use crate::simulation::Action;
    use image::{DynamicImage, Rgba, RgbaImage};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn small_config() -> GameConfig {
        GameConfig {
            grid_size: 3,
            ..GameConfig::default()
        }
    }

    fn span_bg(lines: &[Line], column: usize, row: usize) -> Option<Color> {
        lines[row].spans[column].style.bg
    }

    fn view<'a>(
        state: &'a GameState,
        sprites: &'a SpriteCache,
        config: &'a GameConfig,
    ) -> View<'a> {
        View {
            state,
            sprites,
            config,
        }
    }

    #[test]
    fn test_grid_dimensions() {
        let config = small_config();
        let state = GameState::new(&config);
        let sprites = SpriteCache::new();
        let view = view(&state, &sprites, &config);

        let lines = grid_lines(&view, None);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| line.spans.len() == 6));
        assert_eq!(span_bg(&lines, 0, 0), Some(BACKGROUND));
        assert_eq!(span_bg(&lines, 2, 0), Some(GRID_LINE));
    }

    #[test]
    fn test_building_without_sprite_uses_fallback() {
        let config = small_config();
        let mut state = GameState::new(&config);
        state.dispatch(Action::Click(GridCoord::new(1, 2)));
        let sprites = SpriteCache::new();
        let view = view(&state, &sprites, &config);

        let lines = grid_lines(&view, None);
        let house = Some(colors::fallback_color(BuildingType::House));
        assert_eq!(span_bg(&lines, 2, 2), house);
        assert_eq!(span_bg(&lines, 3, 2), house);
        assert_eq!(lines[2].spans[2].content, "H");
    }

    #[test]
    fn test_building_with_sprite_uses_pixels() {
        let config = small_config();
        let mut state = GameState::new(&config);
        state.dispatch(Action::Click(GridCoord::new(0, 0)));

        let mut sprites = SpriteCache::new();
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255])));
        sprites.insert(BuildingType::House, Sprite::from_image(&image, 2, 2));
        let view = view(&state, &sprites, &config);

        let lines = grid_lines(&view, None);
        let span = &lines[0].spans[0];
        assert_eq!(span.content, "▀");
        assert_eq!(span.style.fg, Some(Color::Rgb(1, 2, 3)));
        assert_eq!(span.style.bg, Some(Color::Rgb(1, 2, 3)));
    }

    #[test]
    fn test_hover_highlight_colors() {
        let config = small_config();
        let mut state = GameState::new(&config);
        state.dispatch(Action::Click(GridCoord::new(0, 0)));
        let sprites = SpriteCache::new();
        let view = view(&state, &sprites, &config);

        let empty = grid_lines(&view, Some(GridCoord::new(1, 0)));
        assert_eq!(span_bg(&empty, 2, 0), Some(colors::HOVER_BUILDABLE));

        let occupied = grid_lines(&view, Some(GridCoord::new(0, 0)));
        assert_eq!(span_bg(&occupied, 0, 0), Some(colors::HOVER_OCCUPIED));
    }

    #[test]
    fn test_no_hover_highlight_in_removal_mode() {
        let config = small_config();
        let mut state = GameState::new(&config);
        state.dispatch(Action::Select(None));
        let sprites = SpriteCache::new();
        let view = view(&state, &sprites, &config);

        let lines = grid_lines(&view, Some(GridCoord::new(0, 0)));
        assert_eq!(span_bg(&lines, 0, 0), Some(BACKGROUND));
    }

    #[test]
    fn test_layout_fits_canvas_to_grid() {
        let config = GameConfig::default();
        let regions = layout(Rect::new(0, 0, 100, 40), &config);
        assert_eq!(regions.canvas.width, 42);
        assert_eq!(regions.stats.x, 42);
        assert_eq!(regions.stats.height, 8);
    }

    #[test]
    fn test_draw_records_palette_rows() {
        let config = GameConfig::default();
        let state = GameState::new(&config);
        let sprites = SpriteCache::new();
        let view = view(&state, &sprites, &config);
        let mut ui = UiState::new();

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| draw(frame, &view, &mut ui)).unwrap();

        assert_eq!(ui.canvas, Rect::new(1, 1, 40, 38));
        assert_eq!(ui.palette.x, 43);
        let buffer = terminal.backend().buffer();
        let row_text = |row: u16| -> String {
            (ui.palette.x..ui.palette.right())
                .map(|x| buffer.get(x, row).symbol())
                .collect()
        };

        let office = ui.palette.y + PALETTE_ENTRY_ROWS;
        assert!(row_text(office).contains("[2] Office"));
        assert_eq!(ui.palette_entry(50, office), Some(Some(BuildingType::Office)));

        let removal = ui.palette.y + 4 * PALETTE_ENTRY_ROWS + 1;
        assert!(row_text(removal).contains("[0] Select mode"));
        assert_eq!(ui.palette_entry(50, removal), Some(None));
    }

    #[test]
    fn test_grid_lines_for_tall_cells() {
        let config = GameConfig {
            grid_size: 2,
            cell_height: 3,
            ..GameConfig::default()
        };
        let state = GameState::new(&config);
        let sprites = SpriteCache::new();
        let view = view(&state, &sprites, &config);

        let lines = grid_lines(&view, None);
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|line| line.spans.len() == 4));
    }
}
