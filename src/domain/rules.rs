/// Game rules as pure functions and constants.
///
/// These encode "what is legal" without touching session state:
///   - a turn is accepted only across axes (never onto the current axis)
///   - the session is won at WIN_SCORE points
///   - winning reveals the fixed REWARD_CODE

use super::grid::{Direction, Position};

/// Score at which the session is won.
pub const WIN_SCORE: u32 = 10;

/// Promo code shown on a win. Static; the contact form validates it.
pub const REWARD_CODE: &str = "SNAKE10";

/// Discount advertised next to the code.
pub const REWARD_DISCOUNT_PERCENT: u32 = 10;

/// Starting layout for every session.
pub const START_HEAD: Position = Position::new(10, 10);
pub const START_DIRECTION: Direction = Direction::Right;
pub const START_FOOD: Position = Position::new(15, 15);

/// May the snake, committed to `current`, be turned towards `requested`?
///
/// Both the same direction and the exact reverse are refused. Checked
/// against the direction of the last tick, not any pending turn, so a
/// burst of key presses between ticks cannot chain two quarter turns
/// into a reversal.
pub fn can_turn(current: Direction, requested: Direction) -> bool {
    !requested.is_colinear(current)
}

pub fn is_winning_score(score: u32) -> bool {
    score >= WIN_SCORE
}
