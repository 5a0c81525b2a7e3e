//! Screen navigation: which screen is showing and which menu button has focus.

use serde::Serialize;

use crate::config::{BOARD_PIXELS, BUTTON_HEIGHT, BUTTON_SPACING, BUTTON_TOP, BUTTON_WIDTH};

/// Current high-level screen.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum ScreenState {
    Start,
    Instructions,
    Playing,
    GameOver,
}

/// Axis-aligned box in board-pixel space.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    /// Inclusive of the top-left edge, exclusive of the bottom-right edge.
    #[must_use]
    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

/// A labelled menu action leading to another screen.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Button {
    pub label: &'static str,
    pub target: ScreenState,
    pub bounds: PixelRect,
}

/// Ordered buttons with exactly one focused.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Menu {
    buttons: Vec<Button>,
    focus: usize,
}

impl Menu {
    /// Lays out `entries` as a centred column starting at `top`.
    fn column(top: i32, entries: &[(&'static str, ScreenState)]) -> Self {
        let x = (BOARD_PIXELS - BUTTON_WIDTH) / 2;
        let buttons = entries
            .iter()
            .zip(0..)
            .map(|(&(label, target), row)| Button {
                label,
                target,
                bounds: PixelRect {
                    x,
                    y: top + row * BUTTON_SPACING,
                    width: BUTTON_WIDTH,
                    height: BUTTON_HEIGHT,
                },
            })
            .collect();

        Self { buttons, focus: 0 }
    }

    /// Returns the menu owned by `state`; Playing has none.
    #[must_use]
    pub fn for_screen(state: ScreenState) -> Option<Self> {
        match state {
            ScreenState::Start => Some(Self::column(
                BUTTON_TOP,
                &[
                    ("play", ScreenState::Playing),
                    ("instructions", ScreenState::Instructions),
                ],
            )),
            ScreenState::Instructions => Some(Self::column(
                BOARD_PIXELS - BUTTON_SPACING - BUTTON_HEIGHT,
                &[("back", ScreenState::Start)],
            )),
            ScreenState::GameOver => Some(Self::column(
                BUTTON_TOP + BUTTON_SPACING * 2,
                &[("continue", ScreenState::Playing), ("menu", ScreenState::Start)],
            )),
            ScreenState::Playing => None,
        }
    }

    /// Moves focus to the neighbouring button, wrapping at both ends.
    pub fn navigate(&mut self, up: bool) {
        let count = self.buttons.len();
        self.focus = if up {
            (self.focus + count - 1) % count
        } else {
            (self.focus + 1) % count
        };
    }

    /// Focuses the button under the pointer, if any. Returns whether one was hit.
    pub fn pointer_moved(&mut self, x: i32, y: i32) -> bool {
        match self
            .buttons
            .iter()
            .position(|button| button.bounds.contains(x, y))
        {
            Some(index) => {
                self.focus = index;
                true
            }
            None => false,
        }
    }

    /// Returns the focused button's target.
    #[must_use]
    pub fn activate(&self) -> ScreenState {
        self.focused().target
    }

    /// Activates the button under a click, which also takes focus.
    pub fn click(&mut self, x: i32, y: i32) -> Option<ScreenState> {
        self.pointer_moved(x, y);
        let focused = self.focused();
        focused.bounds.contains(x, y).then_some(focused.target)
    }

    #[must_use]
    pub fn focused(&self) -> &Button {
        &self.buttons[self.focus]
    }

    #[must_use]
    pub fn focus(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }
}

/// Tracks the current screen and its menu.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScreenMachine {
    state: ScreenState,
    menu: Option<Menu>,
}

impl Default for ScreenMachine {
    fn default() -> Self {
        Self::new(ScreenState::Start)
    }
}

impl ScreenMachine {
    #[must_use]
    pub fn new(state: ScreenState) -> Self {
        Self {
            state,
            menu: Menu::for_screen(state),
        }
    }

    /// Switches screens; the new screen's menu starts focused on its first button.
    pub fn enter(&mut self, state: ScreenState) {
        log::debug!("screen {:?} -> {:?}", self.state, state);
        self.state = state;
        self.menu = Menu::for_screen(state);
    }

    #[must_use]
    pub fn state(&self) -> ScreenState {
        self.state
    }

    #[must_use]
    pub fn menu(&self) -> Option<&Menu> {
        self.menu.as_ref()
    }

    pub fn menu_mut(&mut self) -> Option<&mut Menu> {
        self.menu.as_mut()
    }
}
