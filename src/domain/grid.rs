/// Grid geometry: positions, directions and toroidal stepping.
///
/// The board is a fixed GRID_SIZE × GRID_SIZE square. Movement wraps at
/// every edge, so stepping is a total function: any position plus any
/// direction yields another in-bounds position.

/// Cells per side. Fixed; the board is always square.
pub const GRID_SIZE: i32 = 20;

/// A cell on the board. `x` is the column, `y` the row (0 = top).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Both coordinates within [0, GRID_SIZE).
    pub fn in_bounds(self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }

    /// Neighbouring cell in `dir`, wrapping around the board edges.
    pub fn step(self, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        Position {
            x: (self.x + dx).rem_euclid(GRID_SIZE),
            y: (self.y + dy).rem_euclid(GRID_SIZE),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    #[cfg(test)]
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit vector (dx, dy). Up is negative y.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Same axis as `other` (equal or opposite).
    pub fn is_colinear(self, other: Direction) -> bool {
        self == other || self == other.opposite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn step_moves_one_cell() {
        let p = Position::new(10, 10);
        assert_eq!(p.step(Direction::Right), Position::new(11, 10));
        assert_eq!(p.step(Direction::Left), Position::new(9, 10));
        assert_eq!(p.step(Direction::Up), Position::new(10, 9));
        assert_eq!(p.step(Direction::Down), Position::new(10, 11));
    }

    #[test]
    fn step_wraps_at_every_edge() {
        assert_eq!(Position::new(19, 4).step(Direction::Right), Position::new(0, 4));
        assert_eq!(Position::new(0, 4).step(Direction::Left), Position::new(19, 4));
        assert_eq!(Position::new(7, 0).step(Direction::Up), Position::new(7, 19));
        assert_eq!(Position::new(7, 19).step(Direction::Down), Position::new(7, 0));
    }

    #[test]
    fn colinear_pairs() {
        assert!(Direction::Up.is_colinear(Direction::Up));
        assert!(Direction::Up.is_colinear(Direction::Down));
        assert!(!Direction::Up.is_colinear(Direction::Left));
        assert!(!Direction::Right.is_colinear(Direction::Down));
    }

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn step_never_leaves_the_board(
            x in 0..GRID_SIZE,
            y in 0..GRID_SIZE,
            dirs in prop::collection::vec(any_direction(), 1..200),
        ) {
            let mut p = Position::new(x, y);
            for d in dirs {
                p = p.step(d);
                prop_assert!(p.in_bounds());
            }
        }

        #[test]
        fn step_then_opposite_returns(x in 0..GRID_SIZE, y in 0..GRID_SIZE, d in any_direction()) {
            let p = Position::new(x, y);
            prop_assert_eq!(p.step(d).step(d.opposite()), p);
        }
    }
}
