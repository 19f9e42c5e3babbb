use crate::{Coord, Coords, Error, Result};

/// Cells per side of the square board
pub const GRID_SIZE: Coord = 20;

/// Points awarded per food eaten
pub const FOOD_REWARD: u32 = 10;

/// Milliseconds between steps at the start of a game
pub const INITIAL_SPEED_MS: f64 = 100.0;

/// Step interval multiplier applied per food eaten
pub const SPEED_FACTOR: f64 = 0.95;

/// Default lower bound for the step interval
pub const MIN_SPEED_MS: f64 = 25.0;

pub const INITIAL_SNAKE_LENGTH: usize = 3;
pub const START_HEAD: Coords = (10, 10);

/// Frame driver cadence, roughly one display refresh
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Whether a position lies on the board
pub fn in_bounds(pos: Coords) -> bool {
    (0..GRID_SIZE).contains(&pos.0) && (0..GRID_SIZE).contains(&pos.1)
}

/// Runtime tuning for a game. `Default` matches the constants above.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub initial_speed_ms: f64,
    pub speed_factor: f64,
    pub min_speed_ms: f64,
    /// Fixed RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_speed_ms: INITIAL_SPEED_MS,
            speed_factor: SPEED_FACTOR,
            min_speed_ms: MIN_SPEED_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.initial_speed_ms > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "initial speed must be positive, got {}ms",
                self.initial_speed_ms
            )));
        }
        if !(self.speed_factor > 0.0 && self.speed_factor <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "speed factor must be in (0, 1], got {}",
                self.speed_factor
            )));
        }
        if !(self.min_speed_ms > 0.0 && self.min_speed_ms <= self.initial_speed_ms) {
            return Err(Error::InvalidConfig(format!(
                "minimum speed must be in (0, {}], got {}ms",
                self.initial_speed_ms, self.min_speed_ms
            )));
        }
        Ok(())
    }
}
