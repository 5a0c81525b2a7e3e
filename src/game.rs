use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::collision::{check_game_over, DeathReason, HazardTrail};
use crate::config::{GameConfig, GridSize, SPAWN_MIN_SNAKE_LEN, STAR_SHADES};
use crate::effect::EffectState;
use crate::error::GameError;
use crate::food::{is_taken, roll_spawn_kind, spawn_position, Board, Food, FoodKind};
use crate::input::{map_controls, Direction, GameInput};
use crate::screen::{ScreenMachine, ScreenState};
use crate::snake::{Position, Snake};
use crate::timers::Timers;
use crate::turns::TurnQueue;

/// Cell the snake starts every run on.
pub const START_POSITION: Position = Position { x: 1, y: 1 };

/// Complete mutable state for one process: the board plus screen navigation.
///
/// The board is rebuilt on every entry into Playing and left untouched on
/// game over, so the final position stays visible behind the menu.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub foods: Vec<Food>,
    pub hazards: HazardTrail,
    pub turns: TurnQueue,
    pub effect: EffectState,
    pub timers: Timers,
    pub high_score: u32,
    pub tick_count: u64,
    screens: ScreenMachine,
    run_high_score: u32,
    death_reason: Option<DeathReason>,
    star_shade: usize,
    config: GameConfig,
    rng: StdRng,
}

impl GameState {
    /// Creates a state on the start screen seeded from OS entropy.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let snake = Snake::new(START_POSITION);
        let food = Food::spawn(&mut rng, GridSize::BOARD, |cell| snake.occupies(cell));

        Self {
            snake,
            foods: vec![food],
            hazards: HazardTrail::default(),
            turns: TurnQueue::new(),
            effect: EffectState::default(),
            timers: Timers::default(),
            high_score: 0,
            tick_count: 0,
            screens: ScreenMachine::default(),
            run_high_score: 0,
            death_reason: None,
            star_shade: 0,
            config,
            rng,
        }
    }

    /// Resets the board and enters Playing.
    pub fn init(&mut self) {
        self.snake = Snake::new(START_POSITION);
        self.foods.clear();
        self.hazards.clear();
        self.turns = TurnQueue::new();
        self.effect.clear();
        self.timers = Timers::default();
        self.tick_count = 0;
        self.death_reason = None;
        self.run_high_score = self.high_score;

        let snake = &self.snake;
        let food = Food::spawn(&mut self.rng, GridSize::BOARD, |cell| snake.occupies(cell));
        self.foods.push(food);

        self.screens.enter(ScreenState::Playing);
        log::info!("new run started, high score {}", self.high_score);
    }

    /// Advances simulation by one tick; `now` is the time since the session began.
    pub fn tick(&mut self, now: Duration) -> Result<(), GameError> {
        if self.screens.state() != ScreenState::Playing {
            return Ok(());
        }

        self.tick_count += 1;
        if let Some(reason) = check_game_over(&self.snake, &self.hazards, GridSize::BOARD) {
            self.finish(reason);
            return Ok(());
        }

        self.update_timers(now);
        self.star_shade = self.rng.gen_range(0..STAR_SHADES);

        let head = self.snake.head();
        let eaten = self.foods.iter().position(|food| food.position == head);

        if self.effect.leaves_slime() {
            let tail = self.snake.tail_segment();
            if tail.direction != Direction::Still {
                self.hazards.push(tail.position);
            }
        }

        self.turns.apply(&mut self.snake);
        self.snake.move_all(GridSize::BOARD, self.effect.wraps());

        if let Some(index) = eaten {
            self.eat(index, now)?;
        }
        Ok(())
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) -> Result<(), GameError> {
        match (self.screens.state(), input) {
            (_, GameInput::Quit) => {}
            (ScreenState::Playing, GameInput::Direction(pressed)) => {
                let direction = map_controls(pressed, self.effect.reverse_controls());
                let head = self.snake.head_segment();
                if self.turns.submit(head.position, direction, head.direction)? {
                    log::trace!("turn {direction:?} queued at {:?}", head.position);
                }
            }
            (ScreenState::Playing, _) | (_, GameInput::Direction(_)) => {}
            (_, GameInput::Navigate { up }) => {
                if let Some(menu) = self.screens.menu_mut() {
                    menu.navigate(up);
                }
            }
            (_, GameInput::PointerMoved { x, y }) => {
                if let Some(menu) = self.screens.menu_mut() {
                    menu.pointer_moved(x, y);
                }
            }
            (_, GameInput::Activate) => {
                if let Some(target) = self.screens.menu().map(|menu| menu.activate()) {
                    self.enter(target);
                }
            }
            (_, GameInput::PointerClicked { x, y }) => {
                if let Some(target) = self.screens.menu_mut().and_then(|menu| menu.click(x, y)) {
                    self.enter(target);
                }
            }
        }
        Ok(())
    }

    /// Interval the scheduler should wait before the next tick.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.effect.tick_interval(self.config.tick_interval())
    }

    #[must_use]
    pub fn screen(&self) -> ScreenState {
        self.screens.state()
    }

    #[must_use]
    pub fn screens(&self) -> &ScreenMachine {
        &self.screens
    }

    /// Current score: the snake's length.
    #[must_use]
    pub fn score(&self) -> u32 {
        u32::try_from(self.snake.len()).unwrap_or(u32::MAX)
    }

    /// High score as it was when the current (or last) run began.
    #[must_use]
    pub fn run_high_score(&self) -> u32 {
        self.run_high_score
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn star_shade(&self) -> usize {
        self.star_shade
    }

    fn enter(&mut self, target: ScreenState) {
        if target == ScreenState::Playing {
            self.init();
        } else {
            self.screens.enter(target);
        }
    }

    fn finish(&mut self, reason: DeathReason) {
        self.death_reason = Some(reason);
        self.high_score = self.high_score.max(self.score());
        self.screens.enter(ScreenState::GameOver);
        log::info!(
            "game over ({reason:?}) with score {}, high score {}",
            self.score(),
            self.high_score
        );
    }

    fn update_timers(&mut self, now: Duration) {
        let config = self.config;

        if self.snake.len() >= SPAWN_MIN_SNAKE_LEN {
            if !self.timers.spawn.is_armed() {
                self.timers.spawn.arm(now);
            } else if self.timers.spawn.fire(now, config.spawn_wait())
                && self.spawn_roll()
                && self.foods.len() == 2
            {
                self.timers.despawn.arm(now);
            }
        }

        if self.timers.despawn.fire(now, config.despawn_wait()) {
            let removed = self.despawn_transients();
            log::debug!("despawned {removed} transient foods");
            if self.effect.active() == FoodKind::Exploder {
                self.effect.clear();
                self.timers.effect.disarm();
                log::debug!("exploder window closed by despawn");
            }
        }

        if self.effect.is_active() && self.timers.effect.fire(now, config.effect_wait()) {
            log::debug!("effect {:?} expired", self.effect.active());
            self.effect.clear();
            self.hazards.clear();
        }
    }

    /// Rolls for a special food. Returns whether one was placed.
    fn spawn_roll(&mut self) -> bool {
        let Some(kind) = roll_spawn_kind(&mut self.rng) else {
            return false;
        };
        if kind == FoodKind::Default {
            return false;
        }

        let (snake, foods, hazards) = (&self.snake, &self.foods, self.hazards.cells());
        let position = spawn_position(&mut self.rng, GridSize::BOARD, |cell| {
            is_taken(snake, foods, hazards, cell)
        });
        self.foods.push(Food::new(position, kind));
        log::debug!("{} food spawned at {position:?}", kind.tag());
        true
    }

    /// Drops every food but the standing Default one, spawning it anew if it was eaten.
    /// Returns how many foods were discarded.
    fn despawn_transients(&mut self) -> usize {
        let standing = self
            .foods
            .iter()
            .find(|food| food.kind == FoodKind::Default)
            .copied();
        let removed = self.foods.len() - usize::from(standing.is_some());
        self.foods.clear();

        let food = match standing {
            Some(food) => food,
            None => {
                let (snake, hazards) = (&self.snake, self.hazards.cells());
                Food::spawn(&mut self.rng, GridSize::BOARD, |cell| {
                    snake.occupies(cell) || hazards.contains(&cell)
                })
            }
        };
        self.foods.push(food);
        removed
    }

    fn eat(&mut self, index: usize, now: Duration) -> Result<(), GameError> {
        let food = self.foods.remove(index);
        if food.kind == FoodKind::Decapitator && self.snake.len() == 1 {
            self.finish(DeathReason::Decapitated);
            return Ok(());
        }

        let change = food.kind.eat_effect(Board {
            snake: &mut self.snake,
            foods: &mut self.foods,
            hazards: self.hazards.cells(),
            active: self.effect.active(),
            wraps: self.effect.wraps(),
            bounds: GridSize::BOARD,
            rng: &mut self.rng,
        })?;
        log::debug!("ate {} food, length {}", food.kind.tag(), self.snake.len());

        if change != FoodKind::Default {
            self.effect.begin(change);
            self.timers.effect.arm(now);
            if change == FoodKind::Exploder {
                self.timers.despawn.arm(now);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::collision::DeathReason;
    use crate::config::{GameConfig, FOOD_DESPAWN_WAIT_MS};
    use crate::food::{Food, FoodKind};
    use crate::input::{Direction, GameInput};
    use crate::screen::ScreenState;
    use crate::snake::{Position, Segment, Snake};

    use super::GameState;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new_with_seed(GameConfig::default(), seed);
        state.init();
        state
    }

    fn heading(head: Position, direction: Direction) -> Snake {
        Snake::from_positions(&[head], direction).expect("non-empty")
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let mut state = playing(1);
        state.snake = heading(Position { x: 1, y: 1 }, Direction::Right);
        state.foods = vec![Food::standing(Position { x: 2, y: 1 })];

        state.tick(ms(0)).expect("tick");
        assert_eq!(state.snake.len(), 1);

        state.tick(ms(50)).expect("tick");
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.foods.len(), 1);
        assert!(!state.snake.occupies(state.foods[0].position));
    }

    #[test]
    fn snake_collision_with_wall_sets_game_over() {
        let mut state = playing(2);
        state.snake = heading(Position { x: 49, y: 1 }, Direction::Right);
        state.foods = vec![Food::standing(Position { x: 30, y: 30 })];

        state.tick(ms(0)).expect("tick");
        assert_eq!(state.screen(), ScreenState::Playing);

        state.tick(ms(50)).expect("tick");
        assert_eq!(state.screen(), ScreenState::GameOver);
        assert_eq!(state.death_reason(), Some(DeathReason::WallCollision));
        assert_eq!(state.snake.head(), Position { x: 50, y: 1 });
    }

    #[test]
    fn star_effect_wraps_instead_of_killing() {
        let mut state = playing(3);
        state.snake = heading(Position { x: 47, y: 1 }, Direction::Right);
        state.foods = vec![
            Food::standing(Position { x: 30, y: 30 }),
            Food::new(Position { x: 47, y: 1 }, FoodKind::Star),
        ];

        for step in 0..4 {
            state.tick(ms(step * 50)).expect("tick");
        }

        assert_eq!(state.screen(), ScreenState::Playing);
        assert_eq!(state.snake.head(), Position { x: 1, y: 1 });
    }

    #[test]
    fn direction_input_queues_a_turn_at_the_head() {
        let mut state = playing(4);

        state
            .apply_input(GameInput::Direction(Direction::Down))
            .expect("moving direction");
        state.tick(ms(0)).expect("tick");

        assert_eq!(state.snake.head(), Position { x: 1, y: 2 });
        assert!(state.turns.is_empty());
    }

    #[test]
    fn reverse_effect_flips_direction_input() {
        let mut state = playing(5);
        state.snake = heading(Position { x: 10, y: 10 }, Direction::Right);
        state.foods = vec![
            Food::standing(Position { x: 30, y: 30 }),
            Food::new(Position { x: 10, y: 10 }, FoodKind::Reverse),
        ];
        state.tick(ms(0)).expect("tick");

        state
            .apply_input(GameInput::Direction(Direction::Up))
            .expect("moving direction");
        state.tick(ms(50)).expect("tick");

        assert_eq!(state.snake.head(), Position { x: 11, y: 11 });
    }

    #[test]
    fn slimer_trail_grows_and_clears_on_expiry() {
        let mut state = playing(6);
        state.snake = Snake::from_positions(
            &[Position { x: 10, y: 10 }, Position { x: 9, y: 10 }],
            Direction::Right,
        )
        .expect("non-empty");
        state.foods = vec![
            Food::standing(Position { x: 30, y: 30 }),
            Food::new(Position { x: 10, y: 10 }, FoodKind::Slimer),
        ];

        state.tick(ms(0)).expect("tick");
        state.tick(ms(50)).expect("tick");
        state.tick(ms(100)).expect("tick");
        assert_eq!(state.hazards.cells(), &[Position { x: 10, y: 10 }, Position { x: 11, y: 10 }]);

        state.tick(ms(6000)).expect("tick");
        assert!(state.hazards.is_empty());
        assert_eq!(state.effect.active(), FoodKind::Default);
    }

    #[test]
    fn lone_head_eating_decapitator_ends_the_run() {
        let mut state = playing(7);
        state.snake = heading(Position { x: 10, y: 10 }, Direction::Right);
        state.foods = vec![
            Food::standing(Position { x: 30, y: 30 }),
            Food::new(Position { x: 10, y: 10 }, FoodKind::Decapitator),
        ];

        state.tick(ms(0)).expect("tick");

        assert_eq!(state.screen(), ScreenState::GameOver);
        assert_eq!(state.death_reason(), Some(DeathReason::Decapitated));
        assert_eq!(state.snake.len(), 1);
    }

    #[test]
    fn new_effect_restarts_the_expiry_window() {
        let mut state = playing(8);
        state.snake = heading(Position { x: 10, y: 10 }, Direction::Right);
        state.foods = vec![
            Food::standing(Position { x: 30, y: 30 }),
            Food::new(Position { x: 10, y: 10 }, FoodKind::Fast),
            Food::new(Position { x: 11, y: 10 }, FoodKind::Slow),
        ];

        state.tick(ms(0)).expect("tick");
        assert_eq!(state.effect.active(), FoodKind::Fast);
        state.tick(ms(3000)).expect("tick");
        assert_eq!(state.effect.active(), FoodKind::Slow);

        state.tick(ms(6000)).expect("tick");
        assert_eq!(state.effect.active(), FoodKind::Slow);

        state.tick(ms(9000)).expect("tick");
        assert_eq!(state.effect.active(), FoodKind::Default);
        assert_eq!(state.tick_interval(), ms(50));
    }

    #[test]
    fn spawn_timer_waits_for_length_five() {
        let mut state = playing(9);
        state.snake = heading(Position { x: 10, y: 10 }, Direction::Down);
        state.foods = vec![Food::standing(Position { x: 30, y: 30 })];

        state.tick(ms(0)).expect("tick");

        assert!(!state.timers.spawn.is_armed());
    }

    #[test]
    fn spawn_rolls_eventually_add_transient_food() {
        let mut state = playing(10);
        let body: Vec<_> = (0..5).map(|i| Position { x: 10 - i, y: 10 }).collect();
        state.snake = Snake::from_positions(&body, Direction::Right).expect("non-empty");
        state.foods = vec![Food::standing(Position { x: 30, y: 30 })];

        let mut spawned = false;
        for step in 0..200u64 {
            state.update_timers(ms(step * 800));
            if state.foods.len() > 1 {
                spawned = true;
                break;
            }
        }

        assert!(spawned);
        assert_ne!(state.foods[1].kind, FoodKind::Default);
        assert!(state.timers.despawn.is_armed());
    }

    #[test]
    fn despawn_places_a_fresh_standing_food_when_none_survived() {
        let mut state = playing(13);
        state.snake = heading(Position { x: 10, y: 10 }, Direction::Right);
        state.foods = vec![
            Food::standing(Position { x: 30, y: 30 }),
            Food::new(Position { x: 10, y: 10 }, FoodKind::Exploder),
        ];
        state.tick(ms(0)).expect("tick");
        assert!(state.timers.despawn.is_armed());

        state.foods = vec![
            Food::new(Position { x: 20, y: 20 }, FoodKind::Fast),
            Food::new(Position { x: 21, y: 20 }, FoodKind::Star),
        ];
        for x in 0..10 {
            state.hazards.push(Position { x, y: 40 });
        }

        state.update_timers(ms(FOOD_DESPAWN_WAIT_MS));

        assert_eq!(state.foods.len(), 1);
        let standing = state.foods[0];
        assert_eq!(standing.kind, FoodKind::Default);
        assert!(!state.snake.occupies(standing.position));
        assert!(!state.hazards.contains(standing.position));
        assert_eq!(state.effect.active(), FoodKind::Default);
    }

    #[test]
    fn despawn_counts_only_discarded_foods() {
        let mut state = playing(14);
        state.foods = vec![
            Food::new(Position { x: 20, y: 20 }, FoodKind::Fast),
            Food::new(Position { x: 21, y: 20 }, FoodKind::Star),
        ];
        assert_eq!(state.despawn_transients(), 2);

        state.foods = vec![
            Food::standing(Position { x: 30, y: 30 }),
            Food::new(Position { x: 20, y: 20 }, FoodKind::Fast),
            Food::new(Position { x: 21, y: 20 }, FoodKind::Star),
        ];
        assert_eq!(state.despawn_transients(), 2);
        assert_eq!(state.foods, vec![Food::standing(Position { x: 30, y: 30 })]);
    }

    #[test]
    fn slimer_leaves_no_trail_behind_a_still_tail() {
        let mut state = playing(15);
        state.foods = vec![Food::standing(Position { x: 30, y: 30 })];
        state.effect.begin(FoodKind::Slimer);

        state.tick(ms(0)).expect("tick");
        assert_eq!(state.snake.direction(), Direction::Still);
        assert!(state.hazards.is_empty());

        state.snake = Snake::from_segments(vec![
            Segment::new(Position { x: 10, y: 10 }, Direction::Right),
            Segment::new(Position { x: 9, y: 10 }, Direction::Still),
        ])
        .expect("non-empty");
        state.tick(ms(50)).expect("tick");

        assert_eq!(state.snake.tail_segment().position, Position { x: 9, y: 10 });
        assert!(state.hazards.is_empty());
    }

    #[test]
    fn menu_input_is_ignored_while_playing() {
        let mut state = playing(11);

        state.apply_input(GameInput::Activate).expect("input");
        state
            .apply_input(GameInput::Navigate { up: true })
            .expect("input");

        assert_eq!(state.screen(), ScreenState::Playing);
        assert_eq!(state.tick_count, 0);
    }

    #[test]
    fn high_score_only_moves_on_game_over() {
        let mut state = playing(12);
        state.snake = Snake::from_positions(
            &[Position { x: 49, y: 5 }, Position { x: 48, y: 5 }, Position { x: 47, y: 5 }],
            Direction::Right,
        )
        .expect("non-empty");
        state.foods = vec![Food::standing(Position { x: 30, y: 30 })];

        state.tick(ms(0)).expect("tick");
        assert_eq!(state.high_score, 0);

        state.tick(ms(50)).expect("tick");
        assert_eq!(state.high_score, 3);

        state.apply_input(GameInput::Activate).expect("continue");
        assert_eq!(state.screen(), ScreenState::Playing);
        assert_eq!(state.run_high_score(), 3);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.high_score, 3);
    }
}
