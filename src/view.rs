use serde::Serialize;

use crate::collision::DeathReason;
use crate::food::{Food, FoodKind};
use crate::game::GameState;
use crate::screen::{Button, ScreenState};
use crate::snake::Position;

/// One snake cell as a view needs it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct SegmentView {
    pub position: Position,
    pub is_head: bool,
}

/// Menu buttons with the focused index.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct MenuView {
    pub buttons: Vec<Button>,
    pub focus: usize,
}

/// Everything a view needs to draw one frame.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct RenderPayload {
    pub screen: ScreenState,
    pub snake: Vec<SegmentView>,
    pub foods: Vec<Food>,
    pub hazards: Vec<Position>,
    pub active_effect: FoodKind,
    pub score: u32,
    pub high_score: u32,
    /// High score before the current run, for "new high score" messages.
    pub run_high_score: u32,
    pub death_reason: Option<DeathReason>,
    pub star_shade: usize,
    pub menu: Option<MenuView>,
}

impl RenderPayload {
    /// Snapshots `state` for drawing.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        Self {
            screen: state.screen(),
            snake: state
                .snake
                .segments()
                .map(|segment| SegmentView {
                    position: segment.position,
                    is_head: segment.is_head,
                })
                .collect(),
            foods: state.foods.clone(),
            hazards: state.hazards.cells().to_vec(),
            active_effect: state.effect.active(),
            score: state.score(),
            high_score: state.high_score,
            run_high_score: state.run_high_score(),
            death_reason: state.death_reason(),
            star_shade: state.star_shade(),
            menu: state.screens().menu().map(|menu| MenuView {
                buttons: menu.buttons().to_vec(),
                focus: menu.focus(),
            }),
        }
    }

    /// True while the running score beats the high score held before the run.
    #[must_use]
    pub fn is_new_high(&self) -> bool {
        self.score > self.run_high_score
    }
}
