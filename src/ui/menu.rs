use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::collision::DeathReason;
use crate::config::{palette, CELL_PIXELS};
use crate::food::FoodKind;
use crate::renderer::food_color;
use crate::screen::PixelRect;
use crate::view::{MenuView, RenderPayload};

/// Draws the start screen over the board.
pub fn render_start_menu(frame: &mut Frame<'_>, board: Rect, payload: &RenderPayload) {
    render_title(frame, board, "s n a k e", 0.4);
    render_line(
        frame,
        board,
        0.48,
        Line::from(Span::styled(
            format!("high score: {}", payload.high_score),
            Style::new().fg(palette::GRAY),
        )),
    );
    render_buttons(frame, board, payload.menu.as_ref());
}

/// Draws the food reference list.
pub fn render_instructions_menu(frame: &mut Frame<'_>, board: Rect, payload: &RenderPayload) {
    render_title(frame, board, "how to play", 0.1);

    let mut lines = vec![
        Line::from(Span::styled(
            "steer with the arrow keys or WASD",
            Style::new().fg(palette::GRAY),
        )),
        Line::from(""),
    ];
    for kind in FoodKind::ALL {
        lines.push(Line::from(vec![
            Span::styled("■ ", Style::new().fg(food_color(kind, 0))),
            Span::styled(
                format!("{:<12}", kind.tag()),
                Style::new().fg(palette::WHITE),
            ),
            Span::styled(kind.description(), Style::new().fg(palette::GRAY)),
        ]));
    }

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let area = Rect {
        x: board.x,
        y: board.y + board.height / 5,
        width: board.width,
        height: height.min(board.height.saturating_sub(board.height / 5)),
    };
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    render_buttons(frame, board, payload.menu.as_ref());
}

/// Draws the game-over screen; the frozen board stays visible around it.
pub fn render_game_over_menu(frame: &mut Frame<'_>, board: Rect, payload: &RenderPayload) {
    render_title(frame, board, "game over", 0.3);

    let high_line = if payload.is_new_high() {
        Span::styled(
            format!("NEW HIGH SCORE: {}", payload.score),
            Style::new().fg(palette::BLUE).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!("high score: {}", payload.high_score),
            Style::new().fg(palette::GRAY),
        )
    };
    render_line(frame, board, 0.4, Line::from(high_line));
    render_line(
        frame,
        board,
        0.46,
        Line::from(Span::styled(
            format!("score: {}", payload.score),
            Style::new().fg(palette::GRAY),
        )),
    );
    if let Some(reason) = payload.death_reason {
        render_line(
            frame,
            board,
            0.52,
            Line::from(Span::styled(
                death_text(reason),
                Style::new().fg(palette::GRAY),
            )),
        );
    }
    render_buttons(frame, board, payload.menu.as_ref());
}

fn death_text(reason: DeathReason) -> &'static str {
    match reason {
        DeathReason::SelfCollision => "you bit yourself",
        DeathReason::SlimeCollision => "you slipped on slime",
        DeathReason::WallCollision => "you hit the wall",
        DeathReason::Decapitated => "you lost your last segment",
        DeathReason::EmptySnake => "nothing left of you",
    }
}

fn render_title(frame: &mut Frame<'_>, board: Rect, title: &str, at: f32) {
    render_line(
        frame,
        board,
        at,
        Line::from(Span::styled(
            title.to_owned(),
            Style::new().fg(palette::WHITE).add_modifier(Modifier::BOLD),
        )),
    );
}

/// Draws a centred line at a fraction of the board height.
fn render_line(frame: &mut Frame<'_>, board: Rect, at: f32, line: Line<'_>) {
    let offset = (f32::from(board.height) * at) as u16;
    if offset >= board.height {
        return;
    }

    let area = Rect {
        x: board.x,
        y: board.y + offset,
        width: board.width,
        height: 1,
    };
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_buttons(frame: &mut Frame<'_>, board: Rect, menu: Option<&MenuView>) {
    let Some(menu) = menu else {
        return;
    };

    for (index, button) in menu.buttons.iter().enumerate() {
        let area = pixel_rect_to_terminal(board, button.bounds);
        if area.is_empty() {
            continue;
        }

        let focused = index == menu.focus;
        let style = if focused {
            Style::new().fg(palette::GROUND).bg(palette::GREEN).add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(palette::GREEN)
        };

        frame.render_widget(Clear, area);
        frame.render_widget(Block::new().style(style), area);
        let label_row = Rect {
            y: area.y + area.height / 2,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(centered_label(button.label, label_row.width)).style(style),
            label_row,
        );
    }
}

/// Pads `label` so it sits in the middle of `width` columns.
fn centered_label(label: &str, width: u16) -> String {
    let label_width = label.width();
    let padding = usize::from(width).saturating_sub(label_width) / 2;
    format!("{}{label}", " ".repeat(padding))
}

/// Converts a board-pixel box to the half-block terminal cells it covers.
#[must_use]
pub fn pixel_rect_to_terminal(board: Rect, rect: PixelRect) -> Rect {
    let row_pixels = CELL_PIXELS * 2;
    let column = rect.x / CELL_PIXELS;
    let row = rect.y / row_pixels;
    let columns = (rect.x + rect.width + CELL_PIXELS - 1) / CELL_PIXELS - column;
    let rows = (rect.y + rect.height + row_pixels - 1) / row_pixels - row;

    let to_u16 = |value: i32| u16::try_from(value.max(0)).unwrap_or(u16::MAX);
    board.intersection(Rect {
        x: board.x.saturating_add(to_u16(column)),
        y: board.y.saturating_add(to_u16(row)),
        width: to_u16(columns),
        height: to_u16(rows),
    })
}
