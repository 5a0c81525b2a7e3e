use rand::Rng;
use serde::Serialize;

use crate::config::{GridSize, EXPLODER_MAX_FOODS};
use crate::error::GameError;
use crate::snake::{Position, Snake};

/// Food variants. Every non-Default kind starts a timed effect when eaten.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum FoodKind {
    Default,
    Decapitator,
    Fast,
    Slow,
    Exploder,
    Slimer,
    Reverse,
    Star,
}

impl FoodKind {
    /// Every kind, in spawn-roll order.
    pub const ALL: [Self; 8] = [
        Self::Default,
        Self::Decapitator,
        Self::Fast,
        Self::Slow,
        Self::Exploder,
        Self::Slimer,
        Self::Reverse,
        Self::Star,
    ];

    /// A rolled kind is kept with probability `1 / spawn_weight`.
    #[must_use]
    pub fn spawn_weight(self) -> u32 {
        match self {
            Self::Default => 1,
            Self::Decapitator => 2,
            Self::Fast | Self::Slow => 3,
            Self::Exploder | Self::Slimer | Self::Reverse => 5,
            Self::Star => 12,
        }
    }

    /// Stable name used by views to pick a look for the kind.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Decapitator => "decapitator",
            Self::Fast => "fast",
            Self::Slow => "slow",
            Self::Exploder => "exploder",
            Self::Slimer => "slimer",
            Self::Reverse => "reverse",
            Self::Star => "star",
        }
    }

    /// One-line description shown on the instructions screen.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Default => "grow by one",
            Self::Decapitator => "lose your head",
            Self::Fast => "triple speed",
            Self::Slow => "a third of the speed",
            Self::Exploder => "scatter extra food",
            Self::Slimer => "leave a deadly slime trail",
            Self::Reverse => "reversed controls, no walls",
            Self::Star => "no walls",
        }
    }

    /// Applies this food's effect and returns the kind to make active.
    ///
    /// `Default` is returned when nothing should become active.
    pub fn eat_effect<R: Rng + ?Sized>(self, board: Board<'_, R>) -> Result<Self, GameError> {
        let Board {
            snake,
            foods,
            hazards,
            active,
            wraps,
            bounds,
            rng,
        } = board;
        if snake.is_empty() {
            return Err(GameError::EmptySnake);
        }

        match self {
            Self::Default => {
                snake.grow_front(bounds, wraps);
                if active != Self::Exploder {
                    let food = Food::spawn(rng, bounds, |cell| is_taken(snake, foods, hazards, cell));
                    foods.insert(0, food);
                }
            }
            Self::Decapitator => snake.decapitate()?,
            Self::Exploder => {
                let count = rng.gen_range(1..=EXPLODER_MAX_FOODS);
                for _ in 0..count {
                    let food = Food::spawn(rng, bounds, |cell| is_taken(snake, foods, hazards, cell));
                    foods.push(food);
                }
                log::debug!("exploder scattered {count} foods");
            }
            Self::Fast | Self::Slow | Self::Slimer | Self::Reverse | Self::Star => {}
        }

        Ok(self)
    }
}

/// Mutable view of the board lent to an eat effect for one call.
pub struct Board<'a, R: Rng + ?Sized> {
    pub snake: &'a mut Snake,
    pub foods: &'a mut Vec<Food>,
    pub hazards: &'a [Position],
    pub active: FoodKind,
    pub wraps: bool,
    pub bounds: GridSize,
    pub rng: &'a mut R,
}

/// Returns true when a cell already holds snake, food or slime.
#[must_use]
pub fn is_taken(snake: &Snake, foods: &[Food], hazards: &[Position], cell: Position) -> bool {
    snake.occupies(cell) || foods.iter().any(|food| food.position == cell) || hazards.contains(&cell)
}

/// Food entity currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    #[must_use]
    pub fn new(position: Position, kind: FoodKind) -> Self {
        Self { position, kind }
    }

    /// Creates a Default food at `position`.
    #[must_use]
    pub fn standing(position: Position) -> Self {
        Self::new(position, FoodKind::Default)
    }

    /// Spawns Default food in a free cell.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        is_taken: impl Fn(Position) -> bool,
    ) -> Self {
        Self::standing(spawn_position(rng, bounds, is_taken))
    }
}

/// Rolls one spawn attempt: a uniformly chosen kind kept with `1 / weight` odds.
#[must_use]
pub fn roll_spawn_kind<R: Rng + ?Sized>(rng: &mut R) -> Option<FoodKind> {
    let kind = FoodKind::ALL[rng.gen_range(0..FoodKind::ALL.len())];
    (rng.gen_range(0..kind.spawn_weight()) == 0).then_some(kind)
}

/// Picks a random cell for which `is_taken` is false.
///
/// On a full board any cell is returned.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    is_taken: impl Fn(Position) -> bool,
) -> Position {
    let mut candidates = Vec::with_capacity(bounds.total_cells());

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !is_taken(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
    }

    candidates[rng.gen_range(0..candidates.len())]
}
