use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{palette, GridSize, GLYPH_FULL, GLYPH_HALF_UPPER};
use crate::food::FoodKind;
use crate::screen::ScreenState;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_instructions_menu, render_start_menu};
use crate::view::RenderPayload;

/// Terminal size of the board: one column per cell, two cells per row.
const BOARD_COLUMNS: u16 = GridSize::BOARD.width;
const BOARD_ROWS: u16 = GridSize::BOARD.height.div_ceil(2);

/// Renders the full frame and returns the terminal area covered by the board.
pub fn render(frame: &mut Frame<'_>, payload: &RenderPayload) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let framed = centered(play_area, BOARD_COLUMNS + 2, BOARD_ROWS + 2);
    let block = Block::bordered().border_style(Style::new().fg(palette::GRAY));
    let board = block.inner(framed);
    frame.render_widget(block, framed);

    if payload.screen == ScreenState::Playing {
        render_hud(frame, hud_area, payload);
    }

    let cells = cell_colors(payload);
    paint_board(frame.buffer_mut(), board, &cells);

    match payload.screen {
        ScreenState::Start => render_start_menu(frame, board, payload),
        ScreenState::Instructions => render_instructions_menu(frame, board, payload),
        ScreenState::GameOver => render_game_over_menu(frame, board, payload),
        ScreenState::Playing => {}
    }

    board
}

/// Returns the fill color of a food, rolling Star through the rainbow.
#[must_use]
pub fn food_color(kind: FoodKind, star_shade: usize) -> Color {
    match kind {
        FoodKind::Default => palette::FOOD_DEFAULT,
        FoodKind::Decapitator => palette::FOOD_DECAPITATOR,
        FoodKind::Fast => palette::FOOD_FAST,
        FoodKind::Slow => palette::FOOD_SLOW,
        FoodKind::Exploder => palette::FOOD_EXPLODER,
        FoodKind::Slimer => palette::FOOD_SLIMER,
        FoodKind::Reverse => palette::FOOD_REVERSE,
        FoodKind::Star => palette::RAINBOW[star_shade % palette::RAINBOW.len()],
    }
}

/// Snake tint under the active effect; `None` keeps the head/body colors.
fn snake_tint(payload: &RenderPayload) -> Option<Color> {
    match payload.active_effect {
        FoodKind::Decapitator
        | FoodKind::Star
        | FoodKind::Reverse
        | FoodKind::Fast
        | FoodKind::Slow => Some(food_color(payload.active_effect, payload.star_shade)),
        FoodKind::Default | FoodKind::Exploder | FoodKind::Slimer => None,
    }
}

fn cell_colors(payload: &RenderPayload) -> Vec<Vec<Color>> {
    let bounds = GridSize::BOARD;
    let mut cells = vec![vec![palette::GROUND; usize::from(bounds.width)]; usize::from(bounds.height)];

    if payload.screen != ScreenState::Playing {
        return cells;
    }

    let mut paint = |position: Position, color: Color| {
        if !position.is_within_bounds(bounds) {
            return;
        }
        if let (Ok(x), Ok(y)) = (usize::try_from(position.x), usize::try_from(position.y)) {
            cells[y][x] = color;
        }
    };

    for food in &payload.foods {
        paint(food.position, food_color(food.kind, payload.star_shade));
    }
    for cell in &payload.hazards {
        paint(*cell, palette::SLIME);
    }

    let tint = snake_tint(payload);
    for segment in payload.snake.iter().rev() {
        let color = match (tint, segment.is_head) {
            (Some(color), _) => color,
            (None, true) => palette::SNAKE_HEAD,
            (None, false) => palette::SNAKE_BODY,
        };
        paint(segment.position, color);
    }

    cells
}

/// Composites two board rows per terminal row with half-block glyphs.
fn paint_board(buffer: &mut Buffer, board: Rect, cells: &[Vec<Color>]) {
    for (row, pair) in cells.chunks(2).enumerate() {
        let Ok(row) = u16::try_from(row) else {
            break;
        };
        if row >= board.height {
            break;
        }

        for (column, &upper) in pair[0].iter().enumerate() {
            let Ok(column) = u16::try_from(column) else {
                break;
            };
            if column >= board.width {
                break;
            }

            let lower = pair.get(1).map_or(palette::GROUND, |cells| cells[usize::from(column)]);
            let (glyph, style) = if upper == lower {
                (GLYPH_FULL, Style::new().fg(upper))
            } else {
                (GLYPH_HALF_UPPER, Style::new().fg(upper).bg(lower))
            };
            buffer.set_string(board.x + column, board.y + row, glyph, style);
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
