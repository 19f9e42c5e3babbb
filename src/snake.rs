use std::collections::VecDeque;

use crate::config::in_bounds;
use crate::Coords;
use Direction::*;
use MoveResult::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// One-cell displacement; y grows downwards
    pub fn offset(self) -> Coords {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Crash {
    Wall,
    Body,
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Coords, old_head: Coords, old_tail: Option<Coords> },
    Crashed(Crash)
}

/// Snake body, head first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coords>,
}

impl Snake {
    /// Straight snake with its head at `head`, trailing away from `direction`.
    pub fn new(head: Coords, size: usize, direction: Direction) -> Self {
        let diff = direction.offset();

        let body = (0..size as i16)
            .map(|i| (head.0 - diff.0 * i, head.1 - diff.1 * i))
            .collect();
        Snake { body }
    }

    /// Arbitrary body for building test boards. `None` without a head.
    #[doc(hidden)]
    pub fn from_body(body: &[Coords]) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Snake { body: body.iter().copied().collect() })
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    pub fn next_head(&self, direction: Direction) -> Coords {
        let head = self.head();
        let diff = direction.offset();
        (head.0 + diff.0, head.1 + diff.1)
    }

    /// Advances one cell. Walls are checked before the body, and the body is
    /// checked as it stands before the move, tail included. A crash leaves the
    /// snake untouched. With `grow` the tail stays put.
    pub fn move_step(&mut self, direction: Direction, grow: bool) -> MoveResult {
        let old_head = self.head();
        let new_head = self.next_head(direction);

        if !in_bounds(new_head) {
            return Crashed(Crash::Wall);
        }
        if self.contains(new_head) {
            return Crashed(Crash::Body);
        }

        self.body.push_front(new_head);

        let old_tail = if grow { None } else { self.body.pop_back() };
        Moved { new_head, old_head, old_tail }
    }
}

pub fn head_char(direction: Direction) -> char {
    match direction {
        Up => '^',
        Down => 'v',
        Left => '<',
        Right => '>',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snake_trails_behind_head() {
        let snake = Snake::new((10, 10), 3, Right);
        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), vec![(10, 10), (9, 10), (8, 10)]);

        let snake = Snake::new((5, 5), 3, Up);
        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), vec![(5, 5), (5, 6), (5, 7)]);
    }

    #[test]
    fn opposites() {
        assert!(Up.is_opposite(Down));
        assert!(Left.is_opposite(Right));
        assert!(!Up.is_opposite(Left));
        assert!(!Right.is_opposite(Right));
    }

    #[test]
    fn move_pops_tail() {
        let mut snake = Snake::new((10, 10), 3, Right);
        let res = snake.move_step(Down, false);

        assert_eq!(res, Moved { new_head: (10, 11), old_head: (10, 10), old_tail: Some((8, 10)) });
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), (10, 11));
    }

    #[test]
    fn grow_keeps_tail() {
        let mut snake = Snake::new((10, 10), 3, Right);
        let res = snake.move_step(Right, true);

        assert_eq!(res, Moved { new_head: (11, 10), old_head: (10, 10), old_tail: None });
        assert_eq!(snake.len(), 4);
        assert!(snake.contains((8, 10)));
    }

    #[test]
    fn wall_crash_leaves_body_alone() {
        let mut snake = Snake::new((0, 4), 3, Left);
        let before = snake.clone();

        assert_eq!(snake.move_step(Left, false), Crashed(Crash::Wall));
        assert_eq!(snake, before);
    }

    #[test]
    fn tail_cell_counts_as_body() {
        // 2x2 loop: head (1,0) moving down lands on the tail at (1,1)
        let mut snake = Snake::from_body(&[(1, 0), (0, 0), (0, 1), (1, 1)]).unwrap();
        assert_eq!(snake.move_step(Down, false), Crashed(Crash::Body));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn headless_body_is_refused() {
        assert!(Snake::from_body(&[]).is_none());
    }

    #[test]
    fn head_chars() {
        assert_eq!(head_char(Up), '^');
        assert_eq!(head_char(Right), '>');
    }
}
