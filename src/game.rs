use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::snake::{Crash, Direction, MoveResult::*};
use crate::state::{GameOverReason, GameState, RunState, Snapshot};
use crate::Result;

/// What a call to [`UpdateLoop::tick`] did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No game running
    Idle,
    /// Not enough time since the last step
    Waiting,
    Moved,
    Ate { score: u32 },
    GameOver(GameOverReason),
}

/// Moves the snake once every `speed_ms`, however often it is ticked.
pub struct UpdateLoop {
    state: GameState,
    last_step_ms: f64,
}

impl UpdateLoop {
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(UpdateLoop { state: GameState::new(config)?, last_step_ms: 0.0 })
    }

    /// Starts a fresh game, or restarts a finished one.
    pub fn start(&mut self, now_ms: f64) {
        self.state.reset();
        self.state.set_run_state(RunState::Running);
        self.last_step_ms = now_ms;
        info!(food = ?self.state.food(), "game started");
    }

    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.state.set_pending_direction(direction);
    }

    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        if self.state.run_state() != RunState::Running {
            return TickOutcome::Idle;
        }

        let elapsed = now_ms - self.last_step_ms;
        if elapsed <= self.state.speed_ms() {
            return TickOutcome::Waiting;
        }

        let outcome = self.step();
        if !matches!(outcome, TickOutcome::GameOver(_)) {
            self.last_step_ms = now_ms;
        }
        self.state.check_invariants();
        outcome
    }

    fn step(&mut self) -> TickOutcome {
        let direction = self.state.commit_direction();
        let food = self.state.food();
        let grow = self.state.snake().next_head(direction) == food;

        match self.state.snake_mut().move_step(direction, grow) {
            Crashed(crash) => {
                let reason = match crash {
                    Crash::Wall => GameOverReason::HitWall,
                    Crash::Body => GameOverReason::HitSelf,
                };
                self.game_over(reason)
            },
            Moved { new_head, old_tail: None, .. } => {
                self.state.reward();
                let score = self.state.score();
                debug!(?new_head, score, speed_ms = self.state.speed_ms(), "food eaten");

                if !self.state.place_food() {
                    return self.game_over(GameOverReason::BoardFull);
                }
                TickOutcome::Ate { score }
            },
            Moved { new_head, .. } => {
                trace!(?new_head, ?direction, "step");
                TickOutcome::Moved
            },
        }
    }

    fn game_over(&mut self, reason: GameOverReason) -> TickOutcome {
        self.state.set_run_state(RunState::GameOver(reason));
        info!(?reason, score = self.state.score(), length = self.state.snake().len(), "game over");
        TickOutcome::GameOver(reason)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Test hook for building exact boards.
    #[doc(hidden)]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state()
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn last_step_ms(&self) -> f64 {
        self.last_step_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(seed: u64) -> UpdateLoop {
        let mut game = UpdateLoop::new(GameConfig::with_seed(seed)).unwrap();
        game.start(0.0);
        game.state_mut().debug_set_food((0, 0));
        game
    }

    #[test]
    fn idle_before_start() {
        let mut game = UpdateLoop::new(GameConfig::with_seed(1)).unwrap();
        let before = game.snapshot();
        assert_eq!(game.tick(1_000.0), TickOutcome::Idle);
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn gate_is_strictly_greater() {
        let mut game = started(2);
        assert_eq!(game.tick(50.0), TickOutcome::Waiting);
        assert_eq!(game.tick(100.0), TickOutcome::Waiting);
        assert_eq!(game.snapshot().snake[0], (10, 10));

        assert_eq!(game.tick(100.5), TickOutcome::Moved);
        assert_eq!(game.snapshot().snake[0], (11, 10));
        assert_eq!(game.last_step_ms(), 100.5);
    }

    #[test]
    fn one_step_per_gate_regardless_of_lag() {
        let mut game = started(3);
        // A long stall still only moves one cell
        assert_eq!(game.tick(10_000.0), TickOutcome::Moved);
        assert_eq!(game.snapshot().snake[0], (11, 10));
        assert_eq!(game.tick(10_050.0), TickOutcome::Waiting);
    }

    #[test]
    fn eating_grows_and_scores() {
        let mut game = started(4);
        game.state_mut().debug_set_food((11, 10));

        assert_eq!(game.tick(101.0), TickOutcome::Ate { score: 10 });
        let snap = game.snapshot();
        assert_eq!(snap.snake, vec![(11, 10), (10, 10), (9, 10), (8, 10)]);
        assert!((snap.speed_ms - 95.0).abs() < 1e-9);
        assert!(!snap.snake.contains(&snap.food));
    }

    #[test]
    fn self_collision_ends_game() {
        let mut game = started(5);
        game.state_mut().debug_set_snake(&[(5, 5), (5, 6), (6, 6), (6, 5), (6, 4)], Direction::Up);
        game.set_pending_direction(Direction::Right);

        assert_eq!(game.tick(101.0), TickOutcome::GameOver(GameOverReason::HitSelf));
        assert_eq!(game.run_state(), RunState::GameOver(GameOverReason::HitSelf));
        assert_eq!(game.snapshot().snake.len(), 5);
        assert_eq!(game.tick(500.0), TickOutcome::Idle);
    }

    #[test]
    fn filling_the_board_wins() {
        let mut game = started(6);
        // Head at (1,0) heading left into the only free cell
        let mut body: Vec<_> = (1..20).map(|x| (x, 0)).collect();
        for y in 1..20 {
            let row: Vec<_> = (0..20).map(|x| (x, y)).collect();
            if y % 2 == 1 {
                body.extend(row.into_iter().rev());
            } else {
                body.extend(row);
            }
        }
        game.state_mut().debug_set_snake(&body, Direction::Left);
        game.state_mut().debug_set_food((0, 0));

        assert_eq!(game.tick(101.0), TickOutcome::GameOver(GameOverReason::BoardFull));
        assert_eq!(game.snapshot().snake.len(), 400);
    }
}
