use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::palette;
use crate::food::FoodKind;
use crate::renderer::food_color;
use crate::view::RenderPayload;

/// Renders the one-line status bar under the board.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, payload: &RenderPayload) {
    frame.render_widget(
        Paragraph::new(status_line(payload)).alignment(Alignment::Right),
        area,
    );
}

fn status_line(payload: &RenderPayload) -> Line<'static> {
    let label = Style::new().fg(palette::GRAY);
    // The score turns blue once the run beats the previous best.
    let score_style = if payload.is_new_high() {
        Style::new().fg(palette::BLUE).add_modifier(Modifier::BOLD)
    } else {
        Style::new().fg(palette::WHITE)
    };

    let mut spans = Vec::with_capacity(6);
    if payload.active_effect != FoodKind::Default {
        spans.push(Span::styled("effect ", label));
        spans.push(Span::styled(
            format!("{}  ", payload.active_effect.tag()),
            Style::new().fg(food_color(payload.active_effect, payload.star_shade)),
        ));
    }
    spans.push(Span::styled("hi ", label));
    spans.push(Span::styled(format!("{}  ", payload.high_score), label));
    spans.push(Span::styled("length ", label));
    spans.push(Span::styled(format!("{} ", payload.score), score_style));

    Line::from(spans)
}
