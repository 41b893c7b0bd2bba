/// Session: the complete state of one overlay opening.
///
/// Created when the overlay mounts, dropped when it is dismissed. Nothing
/// survives between openings. All mutation goes through `sim::step::update`.
///
/// ## Directions
///
/// Two directions are tracked:
///   - `direction`: the one the last tick moved in (committed).
///   - `pending`: the one the next tick will move in.
///
/// Turn requests are validated against `direction` and overwrite `pending`,
/// so only the latest valid request between two ticks takes effect.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::domain::entity::{Food, Snake};
use crate::domain::grid::{Direction, Position, GRID_SIZE};
use crate::domain::rules::{START_DIRECTION, START_FOOD, START_HEAD};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Running,
    /// Self-collision. Replay is offered.
    Over,
    /// Win threshold reached. Only Close is offered.
    Won,
}

impl GameState {
    /// Over and Won both stop the game loop.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameState::Running)
    }
}

pub struct Session {
    pub snake: Snake,
    pub direction: Direction,
    pub pending: Direction,
    pub food: Food,
    pub score: u32,
    pub state: GameState,
    pub tick: u64,
    seed: u64,
    rng: Pcg32,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Session {
            snake: Snake::new(START_HEAD),
            direction: START_DIRECTION,
            pending: START_DIRECTION,
            food: Food::at(START_FOOD),
            score: 0,
            state: GameState::Running,
            tick: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed used for food placement; logged at mount for reproduction.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Back to the starting layout. The RNG stream continues, so food
    /// placement differs between attempts within one opening.
    pub fn restart(&mut self) {
        self.snake = Snake::new(START_HEAD);
        self.direction = START_DIRECTION;
        self.pending = START_DIRECTION;
        self.food = Food::at(START_FOOD);
        self.score = 0;
        self.state = GameState::Running;
        self.tick = 0;
    }

    /// Uniform random cell. May land under the snake.
    pub fn random_cell(&mut self) -> Position {
        Position::new(
            self.rng.random_range(0..GRID_SIZE),
            self.rng.random_range(0..GRID_SIZE),
        )
    }
}
