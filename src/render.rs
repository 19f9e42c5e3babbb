use crate::config::{in_bounds, GRID_SIZE};
use crate::snake::head_char;
use crate::state::{GameOverReason, Snapshot};

const EMPTY_CHAR: char = '·';
const BODY_CHAR: char = '█';
const FOOD_CHAR: char = '●';
const FOOD_SMALL_CHAR: char = '•';

const GRID_COLOR: Rgb = Rgb(60, 60, 72);
const FOOD_COLOR: Rgb = Rgb(0xe9, 0x45, 0x60);
const SNAKE_HUE: f64 = 351.0;
const SNAKE_SATURATION: f64 = 0.8;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Food,
    Head,
    Body,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cell {
    pub kind: CellKind,
    pub glyph: char,
    pub color: Rgb,
}

/// One board's worth of cells, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    size: usize,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.size + x]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }
}

pub fn render(snap: &Snapshot, now_ms: f64) -> Frame {
    let size = GRID_SIZE as usize;
    let empty = Cell { kind: CellKind::Empty, glyph: EMPTY_CHAR, color: GRID_COLOR };
    let mut cells = vec![empty; size * size];

    let (fx, fy) = snap.food;
    if in_bounds(snap.food) {
        cells[fy as usize * size + fx as usize] = Cell {
            kind: CellKind::Food,
            glyph: if food_pulse(now_ms) >= 0.8 { FOOD_CHAR } else { FOOD_SMALL_CHAR },
            color: FOOD_COLOR,
        };
    }

    let len = snap.snake.len();
    for (i, &(x, y)) in snap.snake.iter().enumerate() {
        // Off-board cells have nowhere to go
        if !in_bounds((x, y)) {
            continue;
        }
        let lightness = 0.6 - (i as f64 / len as f64) * 0.4;
        let color = hsl_to_rgb(SNAKE_HUE, SNAKE_SATURATION, lightness);
        let (kind, glyph) = if i == 0 {
            (CellKind::Head, head_char(snap.direction))
        } else {
            (CellKind::Body, BODY_CHAR)
        };
        cells[y as usize * size + x as usize] = Cell { kind, glyph, color };
    }

    Frame { size, cells }
}

/// Food size factor, oscillating in [0.6, 1.0] with a ~1.26s period
pub fn food_pulse(now_ms: f64) -> f64 {
    (now_ms / 200.0).sin() * 0.2 + 0.8
}

pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Rgb {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = (hue % 360.0) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = lightness - c / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb(channel(r), channel(g), channel(b))
}

pub fn score_line(score: u32) -> String {
    format!("Score: {}", score)
}

pub fn start_screen() -> Vec<String> {
    vec![
        "S N A K E".to_string(),
        String::new(),
        "Arrow keys or WASD to move".to_string(),
        "q or CTRL+C to quit".to_string(),
        String::new(),
        "Press Enter to start".to_string(),
    ]
}

pub fn game_over_screen(reason: GameOverReason, score: u32) -> Vec<String> {
    let title = match reason {
        GameOverReason::BoardFull => "You won!",
        GameOverReason::HitWall => "Game over! You hit the wall",
        GameOverReason::HitSelf => "Game over! You bit yourself",
    };

    vec![
        title.to_string(),
        format!("Final score: {}", score),
        String::new(),
        "Press Enter to play again,".to_string(),
        "or CTRL+C to quit.".to_string(),
    ]
}
