/// Entities: the snake body and the food pellet.
/// Both are plain data; the rules for moving them live in `sim::step`.

use std::collections::VecDeque;

use super::grid::{Direction, Position};

/// Head-first body. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    pub fn new(head: Position) -> Self {
        let mut body = VecDeque::with_capacity(16);
        body.push_back(head);
        Snake { body }
    }

    /// Build from explicit segments, head first. Returns None for an empty list.
    #[cfg(test)]
    pub fn from_segments(segments: &[Position]) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        Some(Snake { body: segments.iter().copied().collect() })
    }

    pub fn head(&self) -> Position {
        // body is never empty: constructors guarantee one segment and
        // `advance` only pops after pushing.
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Where the head would land moving in `dir`.
    pub fn next_head(&self, dir: Direction) -> Position {
        self.head().step(dir)
    }

    /// Push a new head; drop the tail unless `grow`.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    pub pos: Position,
}

impl Food {
    pub fn at(pos: Position) -> Self {
        Food { pos }
    }

    pub fn is_at(&self, pos: Position) -> bool {
        self.pos == pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snake_has_one_segment() {
        let s = Snake::new(Position::new(10, 10));
        assert_eq!(s.len(), 1);
        assert_eq!(s.head(), Position::new(10, 10));
    }

    #[test]
    fn from_segments_rejects_empty() {
        assert!(Snake::from_segments(&[]).is_none());
    }

    #[test]
    fn advance_without_growth_keeps_length() {
        let mut s = Snake::from_segments(&[
            Position::new(5, 5), Position::new(4, 5), Position::new(3, 5),
        ]).unwrap();
        let head = s.next_head(Direction::Right);
        s.advance(head, false);
        let segs: Vec<_> = s.segments().collect();
        assert_eq!(segs, vec![Position::new(6, 5), Position::new(5, 5), Position::new(4, 5)]);
    }

    #[test]
    fn advance_with_growth_adds_one() {
        let mut s = Snake::new(Position::new(0, 0));
        s.advance(Position::new(1, 0), true);
        assert_eq!(s.len(), 2);
        assert_eq!(s.head(), Position::new(1, 0));
        assert!(s.occupies(Position::new(0, 0)));
    }
}
