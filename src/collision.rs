use serde::Serialize;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum DeathReason {
    SelfCollision,
    SlimeCollision,
    WallCollision,
    /// A Decapitator was eaten by a one-segment snake.
    Decapitated,
    EmptySnake,
}

/// Slime cells left behind during a Slimer window.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct HazardTrail {
    cells: Vec<Position>,
}

impl HazardTrail {
    /// Adds a cell unless it is already slimed.
    pub fn push(&mut self, cell: Position) {
        if !self.cells.contains(&cell) {
            self.cells.push(cell);
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    #[must_use]
    pub fn contains(&self, cell: Position) -> bool {
        self.cells.contains(&cell)
    }

    #[must_use]
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Judges the board as it stands at the start of a tick.
#[must_use]
pub fn check_game_over(snake: &Snake, hazards: &HazardTrail, bounds: GridSize) -> Option<DeathReason> {
    if snake.is_empty() {
        return Some(DeathReason::EmptySnake);
    }

    let head = snake.head();
    if snake.head_overlaps_body() {
        Some(DeathReason::SelfCollision)
    } else if hazards.contains(head) {
        Some(DeathReason::SlimeCollision)
    } else if !head.is_within_bounds(bounds) {
        Some(DeathReason::WallCollision)
    } else {
        None
    }
}
