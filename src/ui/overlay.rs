/// The arcade overlay component.
///
/// Owns one `Session`, the tick timer that drives it and the host's dismiss
/// callback. While mounted it consumes every action the host routes to it;
/// nothing it receives is passed back to the host.
///
/// Lifecycle:
///   mount → Running (timer armed)
///   Running → Over | Won (timer cancelled on the same tick)
///   Over + Confirm → Running (timer re-armed)
///   Won + Confirm, or Close from any state → dismiss callback
///
/// The overlay never unmounts itself. After dismissal it ignores input and
/// its timer stays cancelled until the host drops it.

use std::time::{Duration, Instant};

use log::info;

use crate::sim::event::GameEvent;
use crate::sim::scheduler::TickTimer;
use crate::sim::step::{self, Command};
use crate::sim::world::{GameState, Session};
use super::input::Action;

pub type DismissCallback = Box<dyn FnMut()>;

pub struct Overlay {
    session: Session,
    timer: TickTimer,
    on_dismiss: DismissCallback,
    dismissed: bool,
}

impl Overlay {
    pub fn mount(seed: u64, tick_interval: Duration, now: Instant, on_dismiss: DismissCallback) -> Self {
        let mut timer = TickTimer::new(tick_interval);
        timer.start(now);
        info!("overlay mounted (seed {seed}, tick {}ms)", tick_interval.as_millis());
        Overlay {
            session: Session::new(seed),
            timer,
            on_dismiss,
            dismissed: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// Run at most one tick if the timer is due.
    pub fn advance(&mut self, now: Instant) -> Vec<GameEvent> {
        if !self.timer.fire(now) {
            return vec![];
        }
        let events = step::update(&mut self.session, Command::Tick);
        if self.session.state.is_terminal() {
            self.timer.cancel();
        }
        events
    }

    /// Handle one input action. Every action is consumed.
    pub fn handle_action(&mut self, action: Action, now: Instant) -> Vec<GameEvent> {
        if self.dismissed {
            return vec![];
        }
        match action {
            Action::Turn(dir) => step::update(&mut self.session, Command::SetDirection(dir)),
            Action::Confirm => match self.session.state {
                GameState::Over => {
                    let events = step::update(&mut self.session, Command::Reset);
                    self.timer.start(now);
                    events
                }
                GameState::Won => {
                    self.dismiss();
                    vec![]
                }
                GameState::Running => vec![],
            },
            Action::Close => {
                self.dismiss();
                vec![]
            }
            Action::Open | Action::Quit | Action::Interrupt => vec![],
        }
    }

    fn dismiss(&mut self) {
        if self.dismissed {
            return;
        }
        self.dismissed = true;
        self.timer.cancel();
        info!(
            "overlay dismissed in state {:?} with score {} (length {})",
            self.session.state, self.session.score, self.session.snake.len()
        );
        (self.on_dismiss)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::domain::entity::Snake;
    use crate::domain::grid::{Direction, Position};
    use crate::domain::rules::WIN_SCORE;

    const TICK: Duration = Duration::from_millis(150);

    fn mounted() -> (Overlay, Rc<Cell<u32>>, Instant) {
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let t0 = Instant::now();
        let overlay = Overlay::mount(9, TICK, t0, Box::new(move || c.set(c.get() + 1)));
        (overlay, calls, t0)
    }

    fn at(t0: Instant, n: u32) -> Instant {
        t0 + TICK * n
    }

    /// Put the session one tick away from crashing into itself.
    fn arrange_crash(o: &mut Overlay) {
        o.session.snake = Snake::from_segments(&[
            Position::new(5, 5), Position::new(6, 5), Position::new(6, 4), Position::new(5, 4),
        ]).unwrap();
        o.session.direction = Direction::Up;
        o.session.pending = Direction::Up;
    }

    #[test]
    fn ticks_only_when_due() {
        let (mut o, _, t0) = mounted();
        assert!(o.advance(t0 + Duration::from_millis(100)).is_empty());
        assert_eq!(o.session().snake.head(), Position::new(10, 10));
        let events = o.advance(at(t0, 1));
        assert_eq!(events, vec![GameEvent::Moved { head: Position::new(11, 10) }]);
    }

    #[test]
    fn crash_cancels_timer() {
        let (mut o, _, t0) = mounted();
        arrange_crash(&mut o);
        o.advance(at(t0, 1));
        assert_eq!(o.session().state, GameState::Over);
        assert!(!o.timer.is_armed());
        let frozen = o.session().snake.clone();
        assert!(o.advance(at(t0, 50)).is_empty());
        assert_eq!(o.session().snake, frozen);
    }

    #[test]
    fn confirm_after_crash_replays() {
        let (mut o, calls, t0) = mounted();
        arrange_crash(&mut o);
        o.advance(at(t0, 1));

        let events = o.handle_action(Action::Confirm, at(t0, 2));
        assert_eq!(events, vec![GameEvent::Restarted]);
        assert_eq!(o.session().state, GameState::Running);
        assert!(o.timer.is_armed());
        assert_eq!(calls.get(), 0);
        // first tick after replay is one interval after the confirm
        assert!(o.advance(at(t0, 2) + Duration::from_millis(10)).is_empty());
        assert!(!o.advance(at(t0, 3)).is_empty());
    }

    #[test]
    fn confirm_after_win_dismisses() {
        let (mut o, calls, t0) = mounted();
        o.session.score = WIN_SCORE - 1;
        o.session.food.pos = Position::new(11, 10);
        let events = o.advance(at(t0, 1));
        assert!(events.contains(&GameEvent::Won { code: "SNAKE10" }));
        assert_eq!(o.session().state, GameState::Won);
        assert!(!o.timer.is_armed());

        assert!(o.handle_action(Action::Confirm, at(t0, 2)).is_empty());
        assert_eq!(o.session().state, GameState::Won);
        assert!(o.is_dismissed());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn close_invokes_callback_once() {
        let (mut o, calls, t0) = mounted();
        o.handle_action(Action::Close, t0);
        o.handle_action(Action::Close, t0);
        o.handle_action(Action::Confirm, t0);
        assert_eq!(calls.get(), 1);
        assert!(!o.timer.is_armed());
        assert!(o.advance(at(t0, 10)).is_empty());
    }

    #[test]
    fn input_after_dismiss_ignored() {
        let (mut o, _, t0) = mounted();
        o.handle_action(Action::Close, t0);
        assert!(o.handle_action(Action::Turn(Direction::Up), t0).is_empty());
        assert_eq!(o.session().pending, Direction::Right);
    }

    #[test]
    fn turns_reach_session() {
        let (mut o, _, t0) = mounted();
        let events = o.handle_action(Action::Turn(Direction::Down), t0);
        assert_eq!(events, vec![GameEvent::Turned { to: Direction::Down }]);
        assert!(o.handle_action(Action::Turn(Direction::Left), t0).is_empty());
        o.advance(at(t0, 1));
        assert_eq!(o.session().snake.head(), Position::new(10, 11));
    }

    #[test]
    fn host_actions_swallowed() {
        let (mut o, calls, t0) = mounted();
        assert!(o.handle_action(Action::Open, t0).is_empty());
        assert!(o.handle_action(Action::Quit, t0).is_empty());
        assert!(!o.is_dismissed());
        assert_eq!(calls.get(), 0);
    }
}
