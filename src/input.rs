use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use serde::Serialize;

use crate::config::CELL_PIXELS;
use crate::snake::Position;

/// Movement directions; `Still` is the heading of a snake that has not moved yet.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Still,
}

impl Direction {
    /// Returns the opposite direction. `Still` has no opposite.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Still => Self::Still,
        }
    }

    /// Cell offset of one step in this direction (y grows downwards).
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Still => (0, 0),
        }
    }

    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Returns whether a segment heading `current` may turn to `next`.
///
/// A still segment accepts anything; a moving one only accepts the
/// perpendicular axis, so reversals and same-axis requests are refused.
#[must_use]
pub fn valid_turn(current: Direction, next: Direction) -> bool {
    match current {
        Direction::Still => true,
        Direction::Up | Direction::Down => next.is_horizontal(),
        Direction::Left | Direction::Right => next.is_vertical(),
    }
}

/// Maps a pressed direction through the Reverse effect's control swap.
#[must_use]
pub fn map_controls(pressed: Direction, reversed: bool) -> Direction {
    if reversed { pressed.opposite() } else { pressed }
}

/// Already-decoded input signals consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    /// A direction key, only meaningful while playing.
    Direction(Direction),
    /// Menu focus movement; `up` moves towards the first button.
    Navigate { up: bool },
    Activate,
    /// Pointer position in board-pixel space.
    PointerMoved { x: i32, y: i32 },
    PointerClicked { x: i32, y: i32 },
    Quit,
}

/// Translates terminal key and mouse events into `GameInput` signals.
#[derive(Debug, Default)]
pub struct InputHandler {
    board_area: Option<Rect>,
}

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records where the board was drawn so pointer events can be mapped.
    pub fn set_board_area(&mut self, area: Rect) {
        self.board_area = Some(area);
    }

    /// Waits up to `timeout` for one event and decodes it.
    pub fn poll_input(&self, timeout: Duration, playing: bool) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        Ok(match event::read()? {
            Event::Key(key) => decode_key(key, playing),
            Event::Mouse(mouse) => {
                let Some((x, y)) = self.board_pixel(mouse.column, mouse.row) else {
                    return Ok(None);
                };
                match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        Some(GameInput::PointerMoved { x, y })
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        Some(GameInput::PointerClicked { x, y })
                    }
                    _ => None,
                }
            }
            _ => None,
        })
    }

    fn board_pixel(&self, column: u16, row: u16) -> Option<(i32, i32)> {
        let area = self.board_area?;
        terminal_to_board_pixel(area, column, row)
    }
}

/// Decodes a key press; arrows double as menu navigation outside of play.
#[must_use]
pub fn decode_key(key: KeyEvent, playing: bool) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let direction = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Direction::Right),
        _ => None,
    };

    if let Some(direction) = direction {
        return match (playing, direction) {
            (true, direction) => Some(GameInput::Direction(direction)),
            (false, Direction::Up) => Some(GameInput::Navigate { up: true }),
            (false, Direction::Down) => Some(GameInput::Navigate { up: false }),
            (false, _) => None,
        };
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') if !playing => Some(GameInput::Activate),
        KeyCode::Tab if !playing => Some(GameInput::Navigate { up: false }),
        KeyCode::BackTab if !playing => Some(GameInput::Navigate { up: true }),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(GameInput::Quit),
        _ => None,
    }
}

/// Maps a terminal cell inside the half-block board area to the pixel at its centre.
///
/// One terminal row covers two board rows.
#[must_use]
pub fn terminal_to_board_pixel(area: Rect, column: u16, row: u16) -> Option<(i32, i32)> {
    if column < area.x || row < area.y || column >= area.right() || row >= area.bottom() {
        return None;
    }

    let cell = Position {
        x: i32::from(column - area.x),
        y: i32::from(row - area.y) * 2,
    };
    Some((
        cell.x * CELL_PIXELS + CELL_PIXELS / 2,
        cell.y * CELL_PIXELS + CELL_PIXELS,
    ))
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::layout::Rect;

    use super::{
        decode_key, map_controls, terminal_to_board_pixel, valid_turn, Direction, GameInput,
    };

    const ALL: [Direction; 5] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Still,
    ];

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::Still.opposite(), Direction::Still);
    }

    #[test]
    fn valid_turn_rejects_reversal_and_same_axis() {
        for current in ALL {
            for next in ALL {
                let expected = current == Direction::Still
                    || (current.is_vertical() && next.is_horizontal())
                    || (current.is_horizontal() && next.is_vertical());
                assert_eq!(valid_turn(current, next), expected, "{current:?} -> {next:?}");
            }
        }

        assert!(!valid_turn(Direction::Up, Direction::Down));
        assert!(!valid_turn(Direction::Left, Direction::Left));
        assert!(valid_turn(Direction::Still, Direction::Up));
        assert!(valid_turn(Direction::Right, Direction::Up));
    }

    #[test]
    fn reversed_controls_swap_each_axis() {
        assert_eq!(map_controls(Direction::Up, true), Direction::Down);
        assert_eq!(map_controls(Direction::Left, true), Direction::Right);
        assert_eq!(map_controls(Direction::Left, false), Direction::Left);
    }

    #[test]
    fn arrows_navigate_menus_outside_play() {
        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);

        assert_eq!(decode_key(up, false), Some(GameInput::Navigate { up: true }));
        assert_eq!(decode_key(up, true), Some(GameInput::Direction(Direction::Up)));
    }

    #[test]
    fn enter_only_activates_outside_play() {
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(decode_key(enter, false), Some(GameInput::Activate));
        assert_eq!(decode_key(enter, true), None);
    }

    #[test]
    fn terminal_cells_map_into_pixel_space() {
        let area = Rect::new(2, 1, 50, 25);

        assert_eq!(terminal_to_board_pixel(area, 2, 1), Some((10, 20)));
        assert_eq!(terminal_to_board_pixel(area, 51, 25), Some((990, 980)));
        assert_eq!(terminal_to_board_pixel(area, 1, 1), None);
    }
}
