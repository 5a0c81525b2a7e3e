use crate::error::GameError;
use crate::input::{valid_turn, Direction};
use crate::snake::{Position, Snake};

/// A direction change pinned to the cell where the head was when it was requested.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TurnRequest {
    pub position: Position,
    pub direction: Direction,
}

/// Pending turns, oldest first.
///
/// Each body segment executes a turn when it reaches the recorded cell, so
/// the body bends where the head bent. An entry lives until the tail has
/// been over it.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TurnQueue {
    entries: Vec<TurnRequest>,
}

impl TurnQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a turn at `position`. Returns whether the request was kept.
    ///
    /// Requests matching the head's heading, or landing on the cell of the
    /// latest queued entry, are dropped.
    pub fn submit(
        &mut self,
        position: Position,
        direction: Direction,
        head_direction: Direction,
    ) -> Result<bool, GameError> {
        if direction == Direction::Still {
            return Err(GameError::StillTurn);
        }
        if direction == head_direction {
            return Ok(false);
        }
        if self
            .entries
            .last()
            .is_some_and(|latest| latest.position == position)
        {
            return Ok(false);
        }

        self.entries.push(TurnRequest {
            position,
            direction,
        });
        Ok(true)
    }

    /// Turns every segment standing on a queued cell, then drops the entry the tail used.
    ///
    /// A segment takes at most one turn per tick: the oldest matching entry
    /// whose direction is a valid turn for it.
    pub fn apply(&mut self, snake: &mut Snake) {
        let mut consumed = None;
        let segments = snake.segments_mut();
        let tail_index = segments.len() - 1;

        for (index, segment) in segments.iter_mut().enumerate() {
            let turn = self.entries.iter().find(|entry| {
                entry.position == segment.position && valid_turn(segment.direction, entry.direction)
            });
            if let Some(turn) = turn {
                segment.direction = turn.direction;
            }

            if index == tail_index {
                consumed = self
                    .entries
                    .iter()
                    .position(|entry| entry.position == segment.position);
            }
        }

        if let Some(index) = consumed {
            let entry = self.entries.remove(index);
            log::trace!("turn at {:?} consumed by tail", entry.position);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
