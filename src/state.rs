use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::{GameConfig, FOOD_REWARD, GRID_SIZE, INITIAL_SNAKE_LENGTH, START_HEAD};
use crate::snake::{Direction, Snake};
use crate::{Coords, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameOverReason {
    HitWall,
    HitSelf,
    /// The snake covers the whole board; nothing left to eat
    BoardFull,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    GameOver(GameOverReason),
}

/// Read-only copy of what the renderer and score display need.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub snake: Vec<Coords>,
    pub food: Coords,
    pub score: u32,
    pub direction: Direction,
    pub run_state: RunState,
    pub speed_ms: f64,
}

#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    rng: ChaCha8Rng,
    snake: Snake,
    direction: Direction,
    pending_direction: Direction,
    food: Coords,
    score: u32,
    speed_ms: f64,
    run_state: RunState,
}

impl GameState {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut state = GameState {
            speed_ms: config.initial_speed_ms,
            config,
            rng,
            snake: Snake::new(START_HEAD, INITIAL_SNAKE_LENGTH, Direction::Right),
            direction: Direction::Right,
            pending_direction: Direction::Right,
            food: (0, 0),
            score: 0,
            run_state: RunState::NotStarted,
        };
        state.reset();
        Ok(state)
    }

    /// Back to the opening position. Leaves the run state alone.
    pub fn reset(&mut self) {
        self.snake = Snake::new(START_HEAD, INITIAL_SNAKE_LENGTH, Direction::Right);
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.score = 0;
        self.speed_ms = self.config.initial_speed_ms;
        self.place_food();
    }

    /// Queues a turn for the next step. Reversals and turns outside a
    /// running game are dropped. A later call overwrites an earlier one.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if self.run_state != RunState::Running {
            return;
        }
        if direction.is_opposite(self.direction) {
            debug!(?direction, current = ?self.direction, "reversal ignored");
            return;
        }
        self.pending_direction = direction;
    }

    /// Moves the food to a uniformly random free cell. Returns `false`, with
    /// the food left where it was, when the snake covers the board.
    pub fn place_food(&mut self) -> bool {
        let cells = GRID_SIZE as usize * GRID_SIZE as usize;
        if self.snake.len() >= cells {
            return false;
        }

        loop {
            let candidate = (self.rng.gen_range(0..GRID_SIZE), self.rng.gen_range(0..GRID_SIZE));
            if !self.snake.contains(candidate) {
                self.food = candidate;
                return true;
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.body().iter().copied().collect(),
            food: self.food,
            score: self.score,
            direction: self.direction,
            run_state: self.run_state,
            speed_ms: self.speed_ms,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed_ms(&self) -> f64 {
        self.speed_ms
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Ignored for an empty body.
    #[doc(hidden)]
    pub fn debug_set_snake(&mut self, body: &[Coords], direction: Direction) {
        let snake = match Snake::from_body(body) {
            Some(snake) => snake,
            None => return,
        };
        self.snake = snake;
        self.direction = direction;
        self.pending_direction = direction;
    }

    #[doc(hidden)]
    pub fn debug_set_food(&mut self, food: Coords) {
        self.food = food;
    }

    pub(crate) fn set_run_state(&mut self, run_state: RunState) {
        self.run_state = run_state;
    }

    /// Latches the pending turn as the effective direction.
    pub(crate) fn commit_direction(&mut self) -> Direction {
        self.direction = self.pending_direction;
        self.direction
    }

    pub(crate) fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    /// Score reward plus the speed ramp, clamped at the configured floor.
    pub(crate) fn reward(&mut self) {
        self.score += FOOD_REWARD;
        self.speed_ms = (self.speed_ms * self.config.speed_factor).max(self.config.min_speed_ms);
    }

    pub(crate) fn check_invariants(&self) {
        debug_assert!(self.snake.len() > 0, "snake lost its head");
        debug_assert!(self.score % FOOD_REWARD == 0, "score {} off the reward grid", self.score);
        debug_assert!(self.speed_ms > 0.0, "speed {} not positive", self.speed_ms);
        debug_assert!(
            self.run_state != RunState::Running || !self.snake.contains(self.food),
            "food {:?} under the snake",
            self.food
        );
    }
}
