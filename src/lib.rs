pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod render;
pub mod snake;
pub mod state;
pub mod term;

pub use error::{Error, Result};

pub type Coord = i16;
pub type Coords = (Coord, Coord);
