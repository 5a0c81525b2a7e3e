use serde::Serialize;

use crate::config::GridSize;
use crate::error::GameError;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Coordinates are signed so a segment can step off the board; the
/// collision check is what turns that into a game over.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: wrap_axis(self.x, i32::from(bounds.width)),
            y: wrap_axis(self.y, i32::from(bounds.height)),
        }
    }

    /// Returns the neighbouring position one step towards `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    let wrapped = value % upper_bound;
    if wrapped < 0 {
        wrapped + upper_bound
    } else {
        wrapped
    }
}

/// One body cell. Every segment carries its own heading.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Segment {
    pub position: Position,
    pub direction: Direction,
    pub is_head: bool,
}

impl Segment {
    #[must_use]
    pub fn new(position: Position, direction: Direction) -> Self {
        Self {
            position,
            direction,
            is_head: false,
        }
    }

    /// Advances one cell, wrapping around the board edges when `wrap` is set.
    pub fn advance(&mut self, bounds: GridSize, wrap: bool) {
        let next = self.position.stepped(self.direction);
        self.position = if wrap { next.wrapped(bounds) } else { next };
    }
}

/// Ordered body segments, index 0 being the head.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    segments: Vec<Segment>,
}

impl Snake {
    /// Creates a motionless one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        let mut head = Segment::new(start, Direction::Still);
        head.is_head = true;
        Self {
            segments: vec![head],
        }
    }

    /// Creates a snake from explicit segments (front is head).
    pub fn from_segments(mut segments: Vec<Segment>) -> Result<Self, GameError> {
        if segments.is_empty() {
            return Err(GameError::EmptySnake);
        }

        for (index, segment) in segments.iter_mut().enumerate() {
            segment.is_head = index == 0;
        }
        Ok(Self { segments })
    }

    /// Creates a snake whose segments all share one heading.
    pub fn from_positions(positions: &[Position], direction: Direction) -> Result<Self, GameError> {
        Self::from_segments(
            positions
                .iter()
                .map(|position| Segment::new(*position, direction))
                .collect(),
        )
    }

    /// Moves every segment one cell along its own heading.
    pub fn move_all(&mut self, bounds: GridSize, wrap: bool) {
        for segment in &mut self.segments {
            segment.advance(bounds, wrap);
        }
    }

    /// Adds a new head one step ahead of the current one.
    pub fn grow_front(&mut self, bounds: GridSize, wrap: bool) {
        let old_head = self.head_segment();
        let mut new_head = Segment::new(old_head.position, old_head.direction);
        new_head.advance(bounds, wrap);
        new_head.is_head = true;

        self.segments[0].is_head = false;
        self.segments.insert(0, new_head);
    }

    /// Removes the head; the second segment takes over.
    pub fn decapitate(&mut self) -> Result<(), GameError> {
        if self.segments.len() < 2 {
            return Err(GameError::LastSegment);
        }

        self.segments.remove(0);
        self.segments[0].is_head = true;
        Ok(())
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.head_segment().position
    }

    #[must_use]
    pub fn head_segment(&self) -> Segment {
        self.segments[0]
    }

    #[must_use]
    pub fn tail_segment(&self) -> Segment {
        self.segments[self.segments.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.position == position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.segments
            .iter()
            .skip(1)
            .any(|segment| segment.position == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true when no segments remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the heading of the head segment.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.head_segment().direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub(crate) fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::error::GameError;
    use crate::input::Direction;

    use super::{Position, Segment, Snake};

    #[test]
    fn position_wrapping_keeps_coordinates_inside_bounds() {
        let wrapped_left = Position { x: -1, y: 3 }.wrapped(GridSize::BOARD);
        let wrapped_bottom = Position { x: 4, y: 50 }.wrapped(GridSize::BOARD);

        assert_eq!(wrapped_left, Position { x: 49, y: 3 });
        assert_eq!(wrapped_bottom, Position { x: 4, y: 0 });
    }

    #[test]
    fn new_snake_is_a_still_head() {
        let snake = Snake::new(Position { x: 1, y: 1 });

        assert_eq!(snake.len(), 1);
        assert_eq!(snake.direction(), Direction::Still);
        assert!(snake.head_segment().is_head);
    }

    #[test]
    fn empty_segment_list_is_rejected() {
        assert_eq!(Snake::from_segments(Vec::new()), Err(GameError::EmptySnake));
    }

    #[test]
    fn segments_follow_their_own_heading() {
        let mut snake = Snake::from_segments(vec![
            Segment::new(Position { x: 5, y: 4 }, Direction::Up),
            Segment::new(Position { x: 5, y: 5 }, Direction::Up),
            Segment::new(Position { x: 4, y: 5 }, Direction::Right),
        ])
        .expect("non-empty");

        snake.move_all(GridSize::BOARD, false);

        let positions: Vec<_> = snake.segments().map(|segment| segment.position).collect();
        assert_eq!(
            positions,
            vec![
                Position { x: 5, y: 3 },
                Position { x: 5, y: 4 },
                Position { x: 5, y: 5 },
            ]
        );
    }

    #[test]
    fn moving_off_the_edge_only_wraps_when_asked() {
        let mut plain = Snake::from_positions(&[Position { x: 49, y: 0 }], Direction::Right)
            .expect("non-empty");
        let mut wrapping = plain.clone();

        plain.move_all(GridSize::BOARD, false);
        wrapping.move_all(GridSize::BOARD, true);

        assert_eq!(plain.head(), Position { x: 50, y: 0 });
        assert_eq!(wrapping.head(), Position { x: 0, y: 0 });
    }

    #[test]
    fn still_segments_do_not_move() {
        let mut snake = Snake::new(Position { x: 1, y: 1 });

        snake.move_all(GridSize::BOARD, false);

        assert_eq!(snake.head(), Position { x: 1, y: 1 });
    }

    #[test]
    fn growing_puts_a_new_head_in_front() {
        let mut snake = Snake::from_positions(
            &[Position { x: 3, y: 2 }, Position { x: 2, y: 2 }],
            Direction::Right,
        )
        .expect("non-empty");

        snake.grow_front(GridSize::BOARD, false);

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position { x: 4, y: 2 });
        assert_eq!(snake.segments().filter(|segment| segment.is_head).count(), 1);
    }

    #[test]
    fn decapitating_promotes_second_segment() {
        let mut snake = Snake::from_positions(
            &[Position { x: 3, y: 2 }, Position { x: 2, y: 2 }],
            Direction::Right,
        )
        .expect("non-empty");

        snake.decapitate().expect("two segments");

        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position { x: 2, y: 2 });
        assert!(snake.head_segment().is_head);
        assert_eq!(snake.decapitate(), Err(GameError::LastSegment));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn head_overlap_detects_self_collision() {
        let snake = Snake::from_positions(
            &[
                Position { x: 2, y: 2 },
                Position { x: 3, y: 2 },
                Position { x: 2, y: 2 },
            ],
            Direction::Left,
        )
        .expect("non-empty");

        assert!(snake.head_overlaps_body());
        assert!(snake.occupies(Position { x: 3, y: 2 }));
    }
}
