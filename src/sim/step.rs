/// The update function: the only way a `Session` changes.
///
/// Commands:
///   - `Tick`: advance one cell (Running only)
///   - `SetDirection(d)`: queue a turn for the next tick (Running only)
///   - `Reset`: replay after a crash (Over only)
///
/// Tick processing order:
///   1. Commit the pending direction
///   2. Compute the wrapped head position
///   3. Self-collision → Over, snake untouched
///   4. Prepend the head
///   5. Food → score; threshold → Won; else re-place food
///      No food → drop the tail

use log::{debug, info};

use crate::domain::grid::Direction;
use crate::domain::rules::{self, REWARD_CODE};
use super::event::GameEvent;
use super::world::{GameState, Session};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Tick,
    SetDirection(Direction),
    Reset,
}

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn update(session: &mut Session, cmd: Command) -> Vec<GameEvent> {
    match cmd {
        Command::Tick => tick(session),
        Command::SetDirection(dir) => set_direction(session, dir),
        Command::Reset => reset(session),
    }
}

// ══════════════════════════════════════════════════════════════
// Tick
// ══════════════════════════════════════════════════════════════

fn tick(session: &mut Session) -> Vec<GameEvent> {
    if session.state != GameState::Running { return vec![]; }

    let mut events = Vec::with_capacity(3);
    session.tick += 1;
    session.direction = session.pending;

    let new_head = session.snake.next_head(session.direction);

    if session.snake.occupies(new_head) {
        session.state = GameState::Over;
        info!("crashed at ({}, {}) on tick {}, score {}", new_head.x, new_head.y, session.tick, session.score);
        events.push(GameEvent::Crashed { at: new_head });
        return events;
    }

    let ate = session.food.is_at(new_head);
    session.snake.advance(new_head, ate);
    events.push(GameEvent::Moved { head: new_head });

    if ate {
        resolve_food(session, &mut events);
    }

    events
}

fn resolve_food(session: &mut Session, events: &mut Vec<GameEvent>) {
    session.score += 1;
    events.push(GameEvent::FoodEaten { score: session.score });

    if rules::is_winning_score(session.score) {
        session.state = GameState::Won;
        info!("won on tick {} (seed {})", session.tick, session.seed());
        events.push(GameEvent::Won { code: REWARD_CODE });
        return;
    }

    let at = session.random_cell();
    session.food.pos = at;
    debug!("food placed at ({}, {})", at.x, at.y);
    events.push(GameEvent::FoodPlaced { at });
}

// ══════════════════════════════════════════════════════════════
// Input
// ══════════════════════════════════════════════════════════════

fn set_direction(session: &mut Session, dir: Direction) -> Vec<GameEvent> {
    if session.state != GameState::Running { return vec![]; }
    if !rules::can_turn(session.direction, dir) { return vec![]; }
    if session.pending == dir { return vec![]; }

    session.pending = dir;
    debug!("turn queued: {:?}", dir);
    vec![GameEvent::Turned { to: dir }]
}

// ══════════════════════════════════════════════════════════════
// Reset
// ══════════════════════════════════════════════════════════════

/// Replay is offered after a crash only. A win is final for the opening.
fn reset(session: &mut Session) -> Vec<GameEvent> {
    if session.state != GameState::Over { return vec![]; }
    session.restart();
    info!("session restarted");
    vec![GameEvent::Restarted]
}
