/// Events emitted by `step::update`.
/// The presentation layer consumes these for sound and logging.

use crate::domain::grid::{Direction, Position};

#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(dead_code)]
pub enum GameEvent {
    Moved { head: Position },
    Turned { to: Direction },
    FoodEaten { score: u32 },
    FoodPlaced { at: Position },
    Crashed { at: Position },
    Won { code: &'static str },
    Restarted,
}
